//! remap: frame-index remapping from the command line
//!
//! Builds the frame table of a remapping filter and prints, for every output
//! frame, which clip and which input frame supplies it.
//!
//! # Usage
//!
//! ```bash
//! remap remap-frames --clip 100 --mappings "[0 99] [99 0]"
//! remap remap-frames-simple --clip 100 --file frames.txt --format json
//! remap rfs --clip 640x480:YUV420P8:25/1:100 --source-clip 640x480:YUV420P8:25/1:100 -m "[10 20]"
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

use frame_remap::adapters::toml_config::Settings;
use frame_remap::adapters::tracing_log::init_logging;
use frame_remap::cli::{commands, Cli, Commands};

/// Main entry point for the remap CLI
fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load(cli.config.as_deref(), &cli.overrides())
        .context("Failed to load configuration")?;
    init_logging(settings.log_level, settings.log_format);
    if let Some(path) = &settings.source {
        debug!("Configuration loaded from {}", path.display());
    }

    let format = settings.output_format;
    let rendered = match cli.command {
        Commands::RemapFrames(args) => {
            info!("Executing remap-frames command");
            commands::remap_frames(args, format)?
        }
        Commands::RemapFramesSimple(args) => {
            info!("Executing remap-frames-simple command");
            commands::remap_frames_simple(args, format)?
        }
        Commands::ReplaceFramesSimple(args) => {
            info!("Executing replace-frames-simple command");
            commands::replace_frames_simple(args, format)?
        }
        Commands::Filters => commands::list_filters(format)?,
    };

    print!("{}", rendered);
    Ok(())
}
