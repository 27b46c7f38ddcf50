//! frame-remap library
//!
//! Frame-index remapping for video clips. A small line-oriented mapping
//! language, given inline or as a file, decides for every output frame which
//! input frame (or which of two clips) supplies it. Three filters share the
//! language:
//!
//! - [`filters::RemapFrames`]: redirect any output frame to any input frame
//! - [`filters::RemapFramesSimple`]: list the input frames of a new clip
//! - [`filters::ReplaceFramesSimple`]: take marked frames from a second clip

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod error;
pub mod filters;
pub mod mapping;
pub mod output;
pub mod ports;

// Re-export commonly used types
pub use domain::errors::{Cause, Diagnostic, DomainError};
pub use domain::model::{ClipInfo, ClipSlot, FilterKind, FrameRange, SourceKind};
pub use error::{RemapError, RemapResult};
pub use filters::{FilterArgs, FrameMapper, FrameRequest, RemapFrames, RemapFramesSimple, ReplaceFramesSimple};
pub use mapping::{MappingSources, ReindexTable, SelectorTable, SequenceTable, TableBuilder};
