// Domain rules - Clip compatibility policy

use tracing::warn;

use crate::domain::errors::*;
use crate::domain::model::*;

/// Business rules for combining a base clip with a source clip
pub struct ClipMatcher;

impl ClipMatcher {
    /// Merge two clip descriptions. The first disagreeing property, in the
    /// order dimensions, format, frame rate, length, is reported; a disagreeing
    /// property becomes variable in the merged info, except length, where the
    /// longer clip wins.
    pub fn find_common(base: &ClipInfo, source: &ClipInfo) -> (ClipInfo, Option<MismatchCause>) {
        let mut common = base.clone();

        let mismatch = if base.dimensions != source.dimensions {
            common.dimensions = None;
            Some(MismatchCause::Dimensions)
        } else if base.format != source.format {
            common.format = None;
            Some(MismatchCause::Formats)
        } else if base.frame_rate != source.frame_rate {
            common.frame_rate = None;
            Some(MismatchCause::FrameRates)
        } else if base.num_frames != source.num_frames {
            common.num_frames = base.num_frames.max(source.num_frames);
            Some(MismatchCause::Lengths)
        } else {
            None
        };

        (common, mismatch)
    }

    /// Output clip info for a filter reading from `base` and optionally `source`.
    ///
    /// Lengths must always agree. Other mismatches are accepted only when
    /// `allow_mismatch` is set.
    pub fn resolve(
        filter: FilterKind,
        base: &ClipInfo,
        source: Option<&ClipInfo>,
        allow_mismatch: bool,
    ) -> Result<ClipInfo, DomainError> {
        let Some(source) = source else {
            return Ok(base.clone());
        };

        if base.num_frames != source.num_frames {
            return Err(DomainError::StreamMismatch {
                filter,
                cause: MismatchCause::Lengths,
            });
        }

        let (common, mismatch) = Self::find_common(base, source);
        match mismatch {
            None => Ok(common),
            Some(cause) if allow_mismatch => {
                warn!("{}: accepting clips with different {}", filter, cause);
                Ok(common)
            }
            Some(cause) => Err(DomainError::StreamMismatch { filter, cause }),
        }
    }
}
