//! CLI module for frame-remap
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::adapters::toml_config::SettingsOverrides;
use crate::adapters::tracing_log::{LogFormat, LogLevel};
use crate::output::OutputFormat;

pub mod args;
pub mod commands;

/// Frame remapping driven by mapping text
///
/// Builds the frame table of one of the remapping filters from inline mappings
/// or a mapping file and prints where every output frame comes from.
#[derive(Parser, Debug)]
#[command(name = "remap")]
#[command(about = "Remap video frame indices from a mapping file or string")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Configuration file (default: ./remap.toml when present)
    #[arg(long, env = "REMAP_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,

    /// Log line format (full, pretty, compact, json)
    #[arg(long, global = true)]
    pub log_format: Option<LogFormat>,

    /// Report format (text, json, yaml)
    #[arg(long, global = true)]
    pub format: Option<OutputFormat>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Settings given on the command line
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            log_level: self.log_level,
            log_format: self.log_format,
            output_format: self.format,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Remap output frames to any input frames
    #[command(visible_alias = "remf")]
    RemapFrames(args::RemapFramesArgs),
    /// Build a new clip from a list of input frames
    #[command(visible_alias = "remfs")]
    RemapFramesSimple(args::RemapFramesSimpleArgs),
    /// Replace marked frames of a base clip with a source clip
    #[command(visible_alias = "rfs")]
    ReplaceFramesSimple(args::ReplaceFramesSimpleArgs),
    /// List the available filters
    Filters,
}
