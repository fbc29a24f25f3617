//! meshweld-export - mesh conversion tool
//!
//! Converts parsed source scenes (JSON) into render-ready indexed meshes
//! (.meshes.json or .mwscene)

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use meshweld_export::manifest::{self, ExportManifest};
use meshweld_export::{inspect, ExportOptions, OutputFormat};

#[derive(Parser)]
#[command(name = "meshweld-export")]
#[command(about = "Converts source meshes to indexed vertex buffers")]
#[command(version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a single source scene
    Convert {
        /// Input source scene (JSON)
        input: PathBuf,

        /// Output file (default: next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output encoding (default: from the output extension, else json)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Mirror meshes across the YZ plane (off by default; enable for scenes
        /// exported with the opposite X axis)
        #[arg(long)]
        mirror_x: bool,

        /// Skip meshes with malformed input instead of failing
        #[arg(long)]
        skip_invalid: bool,
    },

    /// Convert every scene listed in a manifest
    Build {
        /// Path to meshweld.toml manifest
        #[arg(default_value = manifest::DEFAULT_MANIFEST)]
        manifest: PathBuf,

        /// Output directory (overrides manifest paths)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate manifest without building
    Check {
        /// Path to meshweld.toml manifest
        #[arg(default_value = manifest::DEFAULT_MANIFEST)]
        manifest: PathBuf,
    },

    /// Print a summary of a converted scene
    Inspect {
        /// Converted .meshes.json or .mwscene file
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    match cli.command {
        Commands::Convert {
            input,
            output,
            format,
            mirror_x,
            skip_invalid,
        } => {
            let format = format
                .or_else(|| output.as_deref().and_then(OutputFormat::from_path))
                .unwrap_or_default();
            let output = output.unwrap_or_else(|| format.default_output(&input));
            tracing::info!("Converting {:?} -> {:?}", input, output);

            let options = ExportOptions {
                mirror_x,
                skip_invalid_meshes: skip_invalid,
            };
            let source = meshweld_export::load_source_scene(&input)?;
            let scene = meshweld_export::convert_scene(&source, &options)
                .with_context(|| format!("Failed to convert {:?}", input))?;
            meshweld_export::write_scene(&scene, &output, format)?;
            tracing::info!("Done!");
        }

        Commands::Build { manifest, output } => {
            tracing::info!("Building scenes from {:?}", manifest);
            let config = ExportManifest::load(&manifest)?;
            let base_dir = manifest_dir(&manifest);
            let count = manifest::build_all(&config, &base_dir, output.as_deref())?;
            tracing::info!("Build complete! {} scenes written", count);
        }

        Commands::Check { manifest } => {
            tracing::info!("Checking manifest {:?}", manifest);
            let config = ExportManifest::load(&manifest)?;
            config.validate(&manifest_dir(&manifest), None)?;
            tracing::info!("Manifest is valid!");
        }

        Commands::Inspect { input } => {
            inspect::inspect_file(&input)?;
        }
    }

    Ok(())
}

fn manifest_dir(manifest: &std::path::Path) -> PathBuf {
    manifest
        .parent()
        .map(PathBuf::from)
        .unwrap_or_default()
}
