//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

use crate::domain::errors::DomainError;
use crate::domain::model::ClipInfo;
use crate::filters::FilterArgs;

fn parse_clip(text: &str) -> Result<ClipInfo, DomainError> {
    ClipInfo::parse(text)
}

/// Mapping sources and report selection shared by every filter
#[derive(Args, Debug)]
pub struct MappingArgs {
    /// Inline mappings (take precedence over the file)
    #[arg(short, long)]
    pub mappings: Option<String>,

    /// Mapping file
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Report only this output frame
    #[arg(long)]
    pub frame: Option<usize>,
}

impl MappingArgs {
    pub fn filter_args(&self, mismatch: bool) -> FilterArgs {
        FilterArgs {
            filename: self.file.clone(),
            mappings: self.mappings.clone(),
            mismatch,
        }
    }
}

/// Arguments for the remap-frames command
#[derive(Args, Debug)]
pub struct RemapFramesArgs {
    /// Base clip: <frames> or <W>x<H>:<format>:<num>/<den>:<frames>
    #[arg(short, long, value_parser = parse_clip)]
    pub clip: ClipInfo,

    /// Clip frames are taken from (default: the base clip)
    #[arg(short, long, value_parser = parse_clip)]
    pub source_clip: Option<ClipInfo>,

    /// Accept clips with different dimensions, formats or frame rates
    #[arg(long)]
    pub mismatch: bool,

    #[command(flatten)]
    pub mapping: MappingArgs,
}

/// Arguments for the remap-frames-simple command
#[derive(Args, Debug)]
pub struct RemapFramesSimpleArgs {
    /// Input clip: <frames> or <W>x<H>:<format>:<num>/<den>:<frames>
    #[arg(short, long, value_parser = parse_clip)]
    pub clip: ClipInfo,

    #[command(flatten)]
    pub mapping: MappingArgs,
}

/// Arguments for the replace-frames-simple command
#[derive(Args, Debug)]
pub struct ReplaceFramesSimpleArgs {
    /// Base clip: <frames> or <W>x<H>:<format>:<num>/<den>:<frames>
    #[arg(short, long, value_parser = parse_clip)]
    pub clip: ClipInfo,

    /// Clip that replaces the marked frames
    #[arg(short, long, value_parser = parse_clip)]
    pub source_clip: ClipInfo,

    /// Accept clips with different dimensions, formats or frame rates
    #[arg(long)]
    pub mismatch: bool,

    #[command(flatten)]
    pub mapping: MappingArgs,
}
