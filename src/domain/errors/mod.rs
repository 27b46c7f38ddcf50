// Domain errors - Error types for the domain layer

use std::fmt;

use crate::domain::model::{FilterKind, MismatchCause, SourceKind};

/// What went wrong with a single token of mapping text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cause {
    /// Malformed or unexpected token
    Parse,
    /// Literal does not fit the integer range
    Overflow,
    /// Literal decodes but is not a frame of the clip
    IndexOutOfBounds,
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cause::Parse => write!(f, "Parse Error"),
            Cause::Overflow => write!(f, "Overflow Error"),
            Cause::IndexOutOfBounds => write!(f, "Index out of bounds"),
        }
    }
}

/// Located syntax diagnostic. `line` and `column` are zero-based and
/// rendered one-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub filter: FilterKind,
    pub cause: Cause,
    pub source: SourceKind,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} in {} at line {}, column {}",
            self.filter,
            self.cause,
            self.source,
            self.line + 1,
            self.column + 1
        )
    }
}

/// Domain-specific error types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Parse, overflow or bounds failure at a line/column
    Syntax(Diagnostic),
    /// Mapping file could not be opened
    SourceUnavailable { filter: FilterKind, path: String },
    /// Mapping file failed while being read
    SourceRead { filter: FilterKind, message: String },
    /// Filter precondition that does not depend on a token position
    Degenerate { filter: FilterKind, reason: String },
    /// Two clips cannot be combined
    StreamMismatch { filter: FilterKind, cause: MismatchCause },
    /// Frame query beyond the output clip
    FrameOutOfRange { filter: FilterKind, frame: usize, frames: usize },
    /// Invalid arguments provided
    BadArgs(String),
}

impl DomainError {
    /// Diagnostic carried by a syntax error, if any
    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            DomainError::Syntax(diagnostic) => Some(diagnostic),
            _ => None,
        }
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::Syntax(diagnostic) => write!(f, "{}", diagnostic),
            DomainError::SourceUnavailable { filter, .. } => {
                write!(f, "{}: Failed to open the timecodes file.", filter)
            }
            DomainError::SourceRead { filter, message } => {
                write!(f, "{}: Failed to read the timecodes file: {}", filter, message)
            }
            DomainError::Degenerate { filter, reason } => write!(f, "{}: {}", filter, reason),
            DomainError::StreamMismatch { filter, cause } => {
                write!(f, "{}: Clip {} don't match", filter, cause)
            }
            DomainError::FrameOutOfRange { filter, frame, frames } => write!(
                f,
                "{}: Frame {} requested from a clip of {} frames",
                filter, frame, frames
            ),
            DomainError::BadArgs(msg) => write!(f, "Bad arguments: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

impl From<Diagnostic> for DomainError {
    fn from(diagnostic: Diagnostic) -> Self {
        DomainError::Syntax(diagnostic)
    }
}
