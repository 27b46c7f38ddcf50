//! RemapFrames: redirect every output frame to any input frame

use tracing::info;

use crate::domain::errors::DomainError;
use crate::domain::model::{ClipInfo, ClipSlot, FilterKind};
use crate::domain::rules::ClipMatcher;
use crate::filters::{out_of_range, FilterArgs, FrameMapper, FrameRequest};
use crate::mapping::{ReindexTable, TableBuilder};
use crate::ports::{Clip, TextSourcePort};

/// Serves output frame `n` from frame `table[n]` of the source clip, or of
/// the base clip when no source clip is given.
#[derive(Debug)]
pub struct RemapFrames<C> {
    base: C,
    source: Option<C>,
    info: ClipInfo,
    table: ReindexTable,
}

impl<C: Clip> RemapFrames<C> {
    pub fn new(
        base: C,
        source: Option<C>,
        args: &FilterArgs,
        text_port: &dyn TextSourcePort,
    ) -> Result<Self, DomainError> {
        let info = ClipMatcher::resolve(
            FilterKind::RemapFrames,
            base.info(),
            source.as_ref().map(|clip| clip.info()),
            args.mismatch,
        )?;

        let table = TableBuilder::new(text_port)
            .build(ReindexTable::identity(info.num_frames), &args.sources())?;

        info!(
            "RemapFrames: {} frames from {} clip",
            table.len(),
            if source.is_some() { "source" } else { "base" }
        );

        Ok(Self {
            base,
            source,
            info,
            table,
        })
    }

    pub fn table(&self) -> &ReindexTable {
        &self.table
    }

    pub fn base(&self) -> &C {
        &self.base
    }

    pub fn source(&self) -> Option<&C> {
        self.source.as_ref()
    }
}

impl<C: Clip> FrameMapper for RemapFrames<C> {
    type Clip = C;

    fn kind(&self) -> FilterKind {
        FilterKind::RemapFrames
    }

    fn output_info(&self) -> &ClipInfo {
        &self.info
    }

    fn request(&self, frame: usize) -> Result<FrameRequest<'_, C>, DomainError> {
        let index = self
            .table
            .get(frame)
            .ok_or_else(|| out_of_range(FilterKind::RemapFrames, frame, self.table.len()))?;

        Ok(match &self.source {
            Some(source) => FrameRequest {
                slot: ClipSlot::Source,
                clip: source,
                index,
            },
            None => FrameRequest {
                slot: ClipSlot::Base,
                clip: &self.base,
                index,
            },
        })
    }
}
