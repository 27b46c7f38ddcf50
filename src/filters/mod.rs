//! Filters module
//!
//! Each filter owns its clips and a frozen mapping table, and answers one
//! question per output frame: which clip, and which frame of it.

use std::path::PathBuf;

use crate::domain::errors::DomainError;
use crate::domain::model::{ClipInfo, ClipSlot, FilterKind};
use crate::mapping::MappingSources;
use crate::ports::Clip;

pub mod remap;
pub mod remap_simple;
pub mod replace;

pub use remap::RemapFrames;
pub use remap_simple::RemapFramesSimple;
pub use replace::ReplaceFramesSimple;

/// Construction arguments shared by the filters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterArgs {
    /// Mapping file path
    pub filename: Option<PathBuf>,
    /// Inline mappings
    pub mappings: Option<String>,
    /// Accept clips that differ in size, format or frame rate
    pub mismatch: bool,
}

impl FilterArgs {
    pub fn with_mappings(mappings: impl Into<String>) -> Self {
        Self {
            mappings: Some(mappings.into()),
            ..Self::default()
        }
    }

    pub fn with_file(filename: impl Into<PathBuf>) -> Self {
        Self {
            filename: Some(filename.into()),
            ..Self::default()
        }
    }

    /// Mapping sources, with empty values treated as absent
    pub fn sources(&self) -> MappingSources {
        MappingSources {
            file: self
                .filename
                .clone()
                .filter(|path| !path.as_os_str().is_empty()),
            inline: self.mappings.clone().filter(|text| !text.is_empty()),
        }
    }
}

/// Frame the host should fetch for one output position
#[derive(Debug)]
pub struct FrameRequest<'a, C> {
    pub slot: ClipSlot,
    pub clip: &'a C,
    pub index: usize,
}

/// Per-frame query shared by every filter. Requests are O(1) and leave the
/// filter untouched, so they may run concurrently.
pub trait FrameMapper {
    type Clip: Clip;

    fn kind(&self) -> FilterKind;

    /// Properties of the clip the filter produces
    fn output_info(&self) -> &ClipInfo;

    fn request(&self, frame: usize) -> Result<FrameRequest<'_, Self::Clip>, DomainError>;

    fn num_frames(&self) -> usize {
        self.output_info().num_frames
    }
}

pub(crate) fn out_of_range(filter: FilterKind, frame: usize, frames: usize) -> DomainError {
    DomainError::FrameOutOfRange { filter, frame, frames }
}
