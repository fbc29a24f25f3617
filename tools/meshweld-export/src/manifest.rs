//! meshweld.toml batch manifest
//!
//! ```toml
//! [options]
//! mirror_x = true
//! skip_invalid_meshes = true
//! format = "binary"
//!
//! [[scenes]]
//! input = "scenes/hero.json"
//! output = "build/hero.mwscene"
//! ```
//!
//! Relative paths resolve against the manifest's directory.

use anyhow::{bail, Context, Result};
use hashbrown::HashSet;
use serde::Deserialize;
use std::path::{Component, Path, PathBuf};

use crate::output::{write_scene, OutputFormat};
use crate::scene::{convert_scene, load_source_scene, ExportOptions};

/// Default manifest file name
pub const DEFAULT_MANIFEST: &str = "meshweld.toml";

/// meshweld.toml manifest structure
#[derive(Debug, Deserialize)]
pub struct ExportManifest {
    #[serde(default)]
    pub options: ManifestOptions,
    #[serde(default)]
    pub scenes: Vec<SceneEntry>,
}

/// Options shared by every scene in the manifest
#[derive(Debug, Default, Deserialize)]
pub struct ManifestOptions {
    #[serde(default)]
    pub mirror_x: bool,
    #[serde(default)]
    pub skip_invalid_meshes: bool,
    /// Output encoding when an entry's output path doesn't imply one.
    /// Default: json
    #[serde(default)]
    pub format: OutputFormat,
}

/// Single scene entry
#[derive(Debug, Deserialize)]
pub struct SceneEntry {
    pub input: PathBuf,
    /// Defaults to the input path with the format's extension
    #[serde(default)]
    pub output: Option<PathBuf>,
}

/// A scene entry with its paths resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub format: OutputFormat,
}

impl ManifestOptions {
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            mirror_x: self.mirror_x,
            skip_invalid_meshes: self.skip_invalid_meshes,
        }
    }
}

impl ExportManifest {
    /// Load manifest from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse manifest from string
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse meshweld.toml")
    }

    /// Resolve every entry against `base_dir`, optionally redirecting outputs
    /// into `output_dir`.
    pub fn jobs(&self, base_dir: &Path, output_dir: Option<&Path>) -> Vec<BuildJob> {
        self.scenes
            .iter()
            .map(|entry| {
                let input = base_dir.join(&entry.input);
                let format = entry
                    .output
                    .as_deref()
                    .and_then(OutputFormat::from_path)
                    .unwrap_or(self.options.format);
                let mut output = match &entry.output {
                    Some(output) => base_dir.join(output),
                    None => format.default_output(&input),
                };
                if let (Some(dir), Some(file_name)) = (output_dir, output.file_name()) {
                    output = dir.join(file_name);
                }
                BuildJob {
                    input,
                    output,
                    format,
                }
            })
            .collect()
    }

    /// Checks the manifest without touching any scene file.
    pub fn validate(&self, base_dir: &Path, output_dir: Option<&Path>) -> Result<()> {
        if self.scenes.is_empty() {
            bail!("Manifest declares no scenes");
        }

        let jobs = self.jobs(base_dir, output_dir);
        let inputs: HashSet<PathBuf> = jobs.iter().map(|job| normalize(&job.input)).collect();

        let mut outputs = HashSet::new();
        for job in &jobs {
            let output = normalize(&job.output);
            if inputs.contains(&output) {
                bail!("Scene output would overwrite a scene input: {}", job.output.display());
            }
            if !outputs.insert(output) {
                bail!("Two scenes write to the same output: {}", job.output.display());
            }
        }

        Ok(())
    }
}

/// Lexically normalize a path so equivalent spellings compare equal.
///
/// Relative paths are anchored at the current directory; `.` is dropped and
/// `..` pops a preceding normal component.
fn normalize(path: &Path) -> PathBuf {
    let anchored = match std::env::current_dir() {
        Ok(cwd) if path.is_relative() => cwd.join(path),
        _ => path.to_path_buf(),
    };

    let mut normalized = PathBuf::new();
    for component in anchored.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !matches!(normalized.components().next_back(), Some(Component::Normal(_))) {
                    normalized.push(component);
                } else {
                    normalized.pop();
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}

/// Convert and write every scene in the manifest.
///
/// Returns the number of scenes written.
pub fn build_all(
    manifest: &ExportManifest,
    base_dir: &Path,
    output_dir: Option<&Path>,
) -> Result<usize> {
    manifest.validate(base_dir, output_dir)?;
    let options = manifest.options.export_options();

    let jobs = manifest.jobs(base_dir, output_dir);
    for job in &jobs {
        tracing::info!("Converting {} -> {}", job.input.display(), job.output.display());
        let source = load_source_scene(&job.input)?;
        let scene = convert_scene(&source, &options)
            .with_context(|| format!("Failed to convert scene: {}", job.input.display()))?;
        write_scene(&scene, &job.output, job.format)?;
    }

    Ok(jobs.len())
}
