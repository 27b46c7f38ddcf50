// Domain models - Core types for frame remapping

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// The three filters built on the mapping language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterKind {
    /// Redirect any output frame to any input frame
    RemapFrames,
    /// Build a new clip from a list of input frames
    RemapFramesSimple,
    /// Choose per frame between a base and a source clip
    ReplaceFramesSimple,
}

impl FilterKind {
    pub const ALL: [FilterKind; 3] = [
        FilterKind::RemapFrames,
        FilterKind::RemapFramesSimple,
        FilterKind::ReplaceFramesSimple,
    ];

    /// Name used in diagnostics and registration
    pub fn name(self) -> &'static str {
        match self {
            FilterKind::RemapFrames => "RemapFrames",
            FilterKind::RemapFramesSimple => "RemapFramesSimple",
            FilterKind::ReplaceFramesSimple => "ReplaceFramesSimple",
        }
    }

    /// Short registration alias
    pub fn alias(self) -> &'static str {
        match self {
            FilterKind::RemapFrames => "Remf",
            FilterKind::RemapFramesSimple => "Remfs",
            FilterKind::ReplaceFramesSimple => "Rfs",
        }
    }

    /// Resolve a registered name or alias
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == name || kind.alias() == name)
    }

    /// Host parameter declaration
    pub fn signature(self) -> &'static str {
        match self {
            FilterKind::RemapFrames => {
                "baseclip:clip;filename:data:opt;mappings:data:opt;sourceclip:clip:opt;mismatch:int:opt;"
            }
            FilterKind::RemapFramesSimple => "clip:clip;filename:data:opt;mappings:data:opt;",
            FilterKind::ReplaceFramesSimple => {
                "baseclip:clip;sourceclip:clip;filename:data:opt;mappings:data:opt;mismatch:int:opt;"
            }
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            FilterKind::RemapFrames => "Remap output frames to arbitrary input frames",
            FilterKind::RemapFramesSimple => "Build a clip from an explicit list of input frames",
            FilterKind::ReplaceFramesSimple => "Replace marked frames with frames from a second clip",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Origin of the mapping text being parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// A mapping file on disk
    TextFile,
    /// The inline mappings string
    Mappings,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::TextFile => f.write_str("text file"),
            SourceKind::Mappings => f.write_str("mappings"),
        }
    }
}

/// Zero-based parse position
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub line: usize,
    pub column: usize,
}

/// Inclusive frame range written as `[start end]`. `start` may exceed `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRange {
    pub start: usize,
    pub end: usize,
}

impl FrameRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn is_descending(&self) -> bool {
        self.start > self.end
    }

    /// Frames covered when walked upward; empty when descending
    pub fn frames(&self) -> std::ops::RangeInclusive<usize> {
        self.start..=self.end
    }
}

impl fmt::Display for FrameRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} {}]", self.start, self.end)
    }
}

/// Which clip an output frame is served from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipSlot {
    #[default]
    Base,
    Source,
}

impl fmt::Display for ClipSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipSlot::Base => f.write_str("base"),
            ClipSlot::Source => f.write_str("source"),
        }
    }
}

/// Frame dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Rational frame rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRate {
    pub num: u64,
    pub den: u64,
}

impl FrameRate {
    pub fn new(num: u64, den: u64) -> Result<Self, DomainError> {
        if num == 0 || den == 0 {
            return Err(DomainError::BadArgs(
                "Frame rate numerator and denominator must be positive".to_string(),
            ));
        }
        Ok(Self { num, den })
    }

    pub fn as_f64(&self) -> f64 {
        self.num as f64 / self.den as f64
    }
}

/// Clip properties relevant to remapping. `None` marks a property that
/// varies from frame to frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipInfo {
    pub dimensions: Option<Dimensions>,
    pub format: Option<String>,
    pub frame_rate: Option<FrameRate>,
    pub num_frames: usize,
}

impl ClipInfo {
    /// Clip known only by its length
    pub fn with_frames(num_frames: usize) -> Self {
        Self {
            dimensions: None,
            format: None,
            frame_rate: None,
            num_frames,
        }
    }

    /// Fully described clip
    pub fn new(
        width: u32,
        height: u32,
        format: impl Into<String>,
        frame_rate: FrameRate,
        num_frames: usize,
    ) -> Result<Self, DomainError> {
        if width == 0 || height == 0 {
            return Err(DomainError::BadArgs("Clip dimensions cannot be zero".to_string()));
        }
        let format = format.into();
        if format.is_empty() {
            return Err(DomainError::BadArgs("Clip format cannot be empty".to_string()));
        }
        Ok(Self {
            dimensions: Some(Dimensions { width, height }),
            format: Some(format),
            frame_rate: Some(frame_rate),
            num_frames,
        })
    }

    /// Parse `<frames>` or `<W>x<H>:<format>:<num>/<den>:<frames>`
    pub fn parse(text: &str) -> Result<Self, DomainError> {
        let trimmed = text.trim();
        let parts: Vec<&str> = trimmed.split(':').collect();

        match parts.as_slice() {
            [frames] => Ok(Self::with_frames(parse_frames(frames)?)),
            [size, format, rate, frames] => {
                let (width, height) = size
                    .split_once('x')
                    .ok_or_else(|| DomainError::BadArgs(format!("Invalid clip size: {}", size)))?;
                let width = width
                    .parse::<u32>()
                    .map_err(|_| DomainError::BadArgs(format!("Invalid clip width: {}", width)))?;
                let height = height
                    .parse::<u32>()
                    .map_err(|_| DomainError::BadArgs(format!("Invalid clip height: {}", height)))?;

                let (num, den) = rate.split_once('/').unwrap_or((rate, "1"));
                let num = num
                    .parse::<u64>()
                    .map_err(|_| DomainError::BadArgs(format!("Invalid frame rate: {}", rate)))?;
                let den = den
                    .parse::<u64>()
                    .map_err(|_| DomainError::BadArgs(format!("Invalid frame rate: {}", rate)))?;

                Self::new(width, height, *format, FrameRate::new(num, den)?, parse_frames(frames)?)
            }
            _ => Err(DomainError::BadArgs(format!(
                "Invalid clip description '{}'. Expected <frames> or <W>x<H>:<format>:<num>/<den>:<frames>",
                trimmed
            ))),
        }
    }
}

fn parse_frames(text: &str) -> Result<usize, DomainError> {
    text.parse::<usize>()
        .map_err(|_| DomainError::BadArgs(format!("Invalid frame count: {}", text)))
}

impl fmt::Display for ClipInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.dimensions {
            Some(d) => write!(f, "{}x{}", d.width, d.height)?,
            None => f.write_str("variable size")?,
        }
        write!(f, ", {}", self.format.as_deref().unwrap_or("variable format"))?;
        match self.frame_rate {
            Some(rate) => write!(f, ", {}/{} fps", rate.num, rate.den)?,
            None => f.write_str(", variable fps")?,
        }
        write!(f, ", {} frames", self.num_frames)
    }
}

/// First property on which two clips disagree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MismatchCause {
    Dimensions,
    Formats,
    FrameRates,
    Lengths,
}

impl fmt::Display for MismatchCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MismatchCause::Dimensions => f.write_str("dimensions"),
            MismatchCause::Formats => f.write_str("formats"),
            MismatchCause::FrameRates => f.write_str("frame rates"),
            MismatchCause::Lengths => f.write_str("lengths"),
        }
    }
}
