//! Mapping tables and the sink interface the parser writes into

use serde::Serialize;

use crate::domain::errors::DomainError;
use crate::domain::model::{ClipSlot, FilterKind, FrameRange};
use crate::mapping::parser::{Grammar, RemapDirective, SelectDirective, SequenceDirective};

/// Table that receives parsed directives in source order; later directives
/// override earlier ones at the same position.
pub trait TableSink {
    /// Directive syntax feeding this table
    type Directive: Grammar;

    /// Filter the grammar belongs to, used in diagnostics
    const FILTER: FilterKind;

    /// Exclusive upper bound for every frame literal
    fn frame_bound(&self) -> usize;

    /// Apply one directive. Every frame it carries is already bounds-checked.
    fn apply(&mut self, directive: Self::Directive);

    /// Policy for inline text that holds nothing but whitespace
    fn on_empty_inline(&self) -> Result<(), DomainError> {
        Ok(())
    }
}

/// Fixed-length output → input frame table, identity by default
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReindexTable {
    frames: Vec<usize>,
}

impl ReindexTable {
    pub fn identity(frame_count: usize) -> Self {
        Self {
            frames: (0..frame_count).collect(),
        }
    }

    pub fn get(&self, frame: usize) -> Option<usize> {
        self.frames.get(frame).copied()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.frames
    }

    /// Spread `output` across `input`, walking `output` in its own direction
    fn interpolate(&mut self, input: FrameRange, output: FrameRange) {
        let count = input.end - input.start + 1;
        let mut span = output.end as f64 - output.start as f64;
        span += if span < 0.0 { -1.0 } else { 1.0 };
        let step = span / count as f64;

        for i in 0..count {
            // Truncation: floor for every non-negative value, and never below 0.
            self.frames[input.start + i] = (output.start as f64 + step * i as f64) as usize;
        }
    }
}

impl TableSink for ReindexTable {
    type Directive = RemapDirective;
    const FILTER: FilterKind = FilterKind::RemapFrames;

    fn frame_bound(&self) -> usize {
        self.frames.len()
    }

    fn apply(&mut self, directive: RemapDirective) {
        match directive {
            RemapDirective::Single { frame, target } => self.frames[frame] = target,
            RemapDirective::RangeToSingle { range, target } => {
                for frame in range.frames() {
                    self.frames[frame] = target;
                }
            }
            RemapDirective::RangeToRange { input, output } => self.interpolate(input, output),
        }
    }
}

/// Append-only list of input frames; its length is the output length
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SequenceTable {
    frames: Vec<usize>,
    #[serde(skip)]
    input_frames: usize,
}

impl SequenceTable {
    /// Empty sequence drawing from a clip of `input_frames` frames
    pub fn new(input_frames: usize) -> Self {
        Self {
            frames: Vec::new(),
            input_frames,
        }
    }

    pub fn get(&self, frame: usize) -> Option<usize> {
        self.frames.get(frame).copied()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.frames
    }
}

impl TableSink for SequenceTable {
    type Directive = SequenceDirective;
    const FILTER: FilterKind = FilterKind::RemapFramesSimple;

    fn frame_bound(&self) -> usize {
        self.input_frames
    }

    fn apply(&mut self, directive: SequenceDirective) {
        self.frames.push(directive.0);
    }

    fn on_empty_inline(&self) -> Result<(), DomainError> {
        Err(DomainError::Degenerate {
            filter: Self::FILTER,
            reason: "Video length cannot be 0".to_string(),
        })
    }
}

/// Fixed-length per-frame choice between the base and the source clip
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectorTable {
    slots: Vec<ClipSlot>,
}

impl SelectorTable {
    /// Every frame starts on the base clip
    pub fn new(frame_count: usize) -> Self {
        Self {
            slots: vec![ClipSlot::Base; frame_count],
        }
    }

    pub fn get(&self, frame: usize) -> Option<ClipSlot> {
        self.slots.get(frame).copied()
    }

    /// Binary flag view: 0 for the base clip, 1 for the source clip
    pub fn flag(&self, frame: usize) -> Option<u8> {
        self.get(frame).map(|slot| match slot {
            ClipSlot::Base => 0,
            ClipSlot::Source => 1,
        })
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn as_slice(&self) -> &[ClipSlot] {
        &self.slots
    }
}

impl TableSink for SelectorTable {
    type Directive = SelectDirective;
    const FILTER: FilterKind = FilterKind::ReplaceFramesSimple;

    fn frame_bound(&self) -> usize {
        self.slots.len()
    }

    fn apply(&mut self, directive: SelectDirective) {
        match directive {
            SelectDirective::Frame(frame) => self.slots[frame] = ClipSlot::Source,
            SelectDirective::Range(range) => {
                for frame in range.frames() {
                    self.slots[frame] = ClipSlot::Source;
                }
            }
        }
    }
}
