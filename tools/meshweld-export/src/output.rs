//! Writing and reading converted scenes

use anyhow::{Context, Result};
use meshweld_shared::{SceneData, SCENE_FORMAT};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// On-disk encoding of a converted scene.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed JSON hand-off file
    #[default]
    Json,
    /// `.mwscene` binary container
    Binary,
}

impl OutputFormat {
    /// Infer the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_lowercase())?;

        if ext == SCENE_FORMAT.binary_ext {
            Some(OutputFormat::Binary)
        } else if ext == SCENE_FORMAT.json_ext {
            Some(OutputFormat::Json)
        } else {
            None
        }
    }

    /// Default output path next to `input`.
    ///
    /// JSON output gets a `.meshes.json` suffix so it never overwrites a JSON input.
    pub fn default_output(self, input: &Path) -> PathBuf {
        match self {
            OutputFormat::Json => input.with_extension(format!("meshes.{}", SCENE_FORMAT.json_ext)),
            OutputFormat::Binary => input.with_extension(SCENE_FORMAT.binary_ext),
        }
    }
}

/// Write a converted scene, creating parent directories as needed.
pub fn write_scene(scene: &SceneData, path: &Path, format: OutputFormat) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }

    let bytes = match format {
        OutputFormat::Json => scene.to_json()?.into_bytes(),
        OutputFormat::Binary => scene.to_bytes(),
    };

    let file = File::create(path)
        .with_context(|| format!("Failed to create output: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    writer.write_all(&bytes)?;
    writer.flush()?;

    tracing::info!(
        "Wrote {} meshes to {} ({:?}, {} bytes)",
        scene.meshes.len(),
        path.display(),
        format,
        bytes.len()
    );

    Ok(())
}

/// Read a converted scene, detecting the encoding from its magic bytes.
pub fn read_scene(path: &Path) -> Result<(SceneData, OutputFormat)> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read scene: {}", path.display()))?;

    if bytes.starts_with(SCENE_FORMAT.magic) {
        let scene = SceneData::from_bytes(&bytes)
            .with_context(|| format!("Failed to decode scene: {}", path.display()))?;
        return Ok((scene, OutputFormat::Binary));
    }

    let json = std::str::from_utf8(&bytes)
        .with_context(|| format!("Scene is neither binary nor UTF-8 JSON: {}", path.display()))?;
    let scene = SceneData::from_json(json)
        .with_context(|| format!("Failed to parse scene: {}", path.display()))?;
    Ok((scene, OutputFormat::Json))
}
