//! RemapFramesSimple: a new clip listed frame by frame

use tracing::info;

use crate::domain::errors::DomainError;
use crate::domain::model::{ClipInfo, ClipSlot, FilterKind};
use crate::filters::{out_of_range, FilterArgs, FrameMapper, FrameRequest};
use crate::mapping::{SequenceTable, TableBuilder};
use crate::ports::{Clip, TextSourcePort};

const FILTER: FilterKind = FilterKind::RemapFramesSimple;

/// Output frame `n` is input frame `table[n]`; the output is as long as the
/// list of literals.
#[derive(Debug)]
pub struct RemapFramesSimple<C> {
    clip: C,
    info: ClipInfo,
    table: SequenceTable,
}

impl<C: Clip> RemapFramesSimple<C> {
    /// Exactly one of the mapping file and inline mappings must be given.
    pub fn new(clip: C, args: &FilterArgs, text_port: &dyn TextSourcePort) -> Result<Self, DomainError> {
        let sources = args.sources();
        match (&sources.file, &sources.inline) {
            (None, None) => return Err(degenerate("Both filename and mappings cannot be empty")),
            (Some(_), Some(_)) => {
                return Err(degenerate("mappings and filename cannot be used together"))
            }
            _ => {}
        }

        let table = TableBuilder::new(text_port)
            .build(SequenceTable::new(clip.info().num_frames), &sources)?;
        if table.is_empty() {
            return Err(degenerate("Video length cannot be 0"));
        }

        let mut info = clip.info().clone();
        info.num_frames = table.len();
        info!(
            "RemapFramesSimple: {} input frames -> {} output frames",
            clip.info().num_frames,
            info.num_frames
        );

        Ok(Self { clip, info, table })
    }

    pub fn table(&self) -> &SequenceTable {
        &self.table
    }

    pub fn clip(&self) -> &C {
        &self.clip
    }
}

fn degenerate(reason: &str) -> DomainError {
    DomainError::Degenerate {
        filter: FILTER,
        reason: reason.to_string(),
    }
}

impl<C: Clip> FrameMapper for RemapFramesSimple<C> {
    type Clip = C;

    fn kind(&self) -> FilterKind {
        FILTER
    }

    fn output_info(&self) -> &ClipInfo {
        &self.info
    }

    fn request(&self, frame: usize) -> Result<FrameRequest<'_, C>, DomainError> {
        let index = self
            .table
            .get(frame)
            .ok_or_else(|| out_of_range(FILTER, frame, self.table.len()))?;
        Ok(FrameRequest {
            slot: ClipSlot::Base,
            clip: &self.clip,
            index,
        })
    }
}
