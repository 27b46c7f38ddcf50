//! ReplaceFramesSimple: take marked frames from a second clip

use tracing::info;

use crate::domain::errors::DomainError;
use crate::domain::model::{ClipInfo, ClipSlot, FilterKind};
use crate::domain::rules::ClipMatcher;
use crate::filters::{out_of_range, FilterArgs, FrameMapper, FrameRequest};
use crate::mapping::{SelectorTable, TableBuilder};
use crate::ports::{Clip, TextSourcePort};

/// Output frame `n` is frame `n` of the base clip, or of the source clip
/// when the mappings mark it.
#[derive(Debug)]
pub struct ReplaceFramesSimple<C> {
    base: C,
    source: C,
    info: ClipInfo,
    table: SelectorTable,
}

impl<C: Clip> ReplaceFramesSimple<C> {
    pub fn new(
        base: C,
        source: C,
        args: &FilterArgs,
        text_port: &dyn TextSourcePort,
    ) -> Result<Self, DomainError> {
        let info = ClipMatcher::resolve(
            FilterKind::ReplaceFramesSimple,
            base.info(),
            Some(source.info()),
            args.mismatch,
        )?;

        let table = TableBuilder::new(text_port)
            .build(SelectorTable::new(info.num_frames), &args.sources())?;

        let replaced = table
            .as_slice()
            .iter()
            .filter(|slot| **slot == ClipSlot::Source)
            .count();
        info!(
            "ReplaceFramesSimple: {} of {} frames taken from source clip",
            replaced,
            table.len()
        );

        Ok(Self {
            base,
            source,
            info,
            table,
        })
    }

    pub fn table(&self) -> &SelectorTable {
        &self.table
    }
}

impl<C: Clip> FrameMapper for ReplaceFramesSimple<C> {
    type Clip = C;

    fn kind(&self) -> FilterKind {
        FilterKind::ReplaceFramesSimple
    }

    fn output_info(&self) -> &ClipInfo {
        &self.info
    }

    fn request(&self, frame: usize) -> Result<FrameRequest<'_, C>, DomainError> {
        let slot = self
            .table
            .get(frame)
            .ok_or_else(|| out_of_range(FilterKind::ReplaceFramesSimple, frame, self.table.len()))?;
        let clip = match slot {
            ClipSlot::Base => &self.base,
            ClipSlot::Source => &self.source,
        };
        Ok(FrameRequest {
            slot,
            clip,
            index: frame,
        })
    }
}
