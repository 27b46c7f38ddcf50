//! Command implementations

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::adapters::fs_source::FsTextSource;
use crate::cli::args::{RemapFramesArgs, RemapFramesSimpleArgs, ReplaceFramesSimpleArgs};
use crate::domain::model::FilterKind;
use crate::filters::{FrameMapper, RemapFrames, RemapFramesSimple, ReplaceFramesSimple};
use crate::output::{writer, MappingReport, OutputFormat};

/// Execute the remap-frames command
pub fn remap_frames(args: RemapFramesArgs, format: OutputFormat) -> Result<String> {
    info!("Base clip: {}", args.clip);
    if let Some(source) = &args.source_clip {
        info!("Source clip: {}", source);
    }

    let filter_args = args.mapping.filter_args(args.mismatch);
    let filter = RemapFrames::new(args.clip, args.source_clip, &filter_args, &FsTextSource)?;
    report(&filter, args.mapping.frame, format)
}

/// Execute the remap-frames-simple command
pub fn remap_frames_simple(args: RemapFramesSimpleArgs, format: OutputFormat) -> Result<String> {
    info!("Input clip: {}", args.clip);

    let filter_args = args.mapping.filter_args(false);
    let filter = RemapFramesSimple::new(args.clip, &filter_args, &FsTextSource)?;
    report(&filter, args.mapping.frame, format)
}

/// Execute the replace-frames-simple command
pub fn replace_frames_simple(args: ReplaceFramesSimpleArgs, format: OutputFormat) -> Result<String> {
    info!("Base clip: {}", args.clip);
    info!("Source clip: {}", args.source_clip);

    let filter_args = args.mapping.filter_args(args.mismatch);
    let filter = ReplaceFramesSimple::new(args.clip, args.source_clip, &filter_args, &FsTextSource)?;
    report(&filter, args.mapping.frame, format)
}

/// Render the frame table of a constructed filter
fn report<F: FrameMapper>(filter: &F, frame: Option<usize>, format: OutputFormat) -> Result<String> {
    let report = match frame {
        Some(frame) => MappingReport::single(filter, frame)?,
        None => MappingReport::from_filter(filter)?,
    };
    info!("{}: reporting {} frames", report.filter, report.entries.len());
    writer::render(&report, format).context("Failed to render mapping report")
}

#[derive(Debug, Serialize)]
struct FilterListing {
    name: &'static str,
    alias: &'static str,
    description: &'static str,
    signature: &'static str,
}

/// Execute the filters command
pub fn list_filters(format: OutputFormat) -> Result<String> {
    let listings: Vec<FilterListing> = FilterKind::ALL
        .into_iter()
        .map(|kind| FilterListing {
            name: kind.name(),
            alias: kind.alias(),
            description: kind.description(),
            signature: kind.signature(),
        })
        .collect();

    match format {
        OutputFormat::Text => {
            let mut text = String::new();
            for listing in &listings {
                text.push_str(&format!(
                    "{} ({}): {}\n    {}\n",
                    listing.name, listing.alias, listing.description, listing.signature
                ));
            }
            Ok(text)
        }
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&listings)
                .context("Failed to serialize filter list to JSON")?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Yaml => {
            serde_yaml::to_string(&listings).context("Failed to serialize filter list to YAML")
        }
    }
}
