//! Directive grammars and the line-by-line source parser

use std::io::BufRead;

use tracing::{debug, trace};

use crate::domain::errors::{Cause, DomainError};
use crate::domain::model::{FrameRange, SourceKind};
use crate::mapping::scanner::{starts_literal, LineScanner, RuleSet};
use crate::mapping::sink::TableSink;

/// Directive syntax of one filter, parsed a line at a time
pub trait Grammar: Sized + std::fmt::Debug {
    /// Parse every directive on the scanner's line, handing each to `emit`
    /// in source order.
    fn parse_line(
        scanner: &mut LineScanner<'_>,
        emit: &mut dyn FnMut(Self),
    ) -> Result<(), DomainError>;
}

/// Reindex grammar: one directive per line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemapDirective {
    /// `x y`
    Single { frame: usize, target: usize },
    /// `[x y] z`
    RangeToSingle { range: FrameRange, target: usize },
    /// `[x y] [z a]`
    RangeToRange { input: FrameRange, output: FrameRange },
}

impl Grammar for RemapDirective {
    fn parse_line(
        scanner: &mut LineScanner<'_>,
        emit: &mut dyn FnMut(Self),
    ) -> Result<(), DomainError> {
        scanner.skip_whitespace();
        match scanner.peek() {
            None | Some(b'#') => return Ok(()),
            Some(b) if starts_literal(b) => {
                let frame = scanner.read_frame()?;
                scanner.skip_whitespace();
                let target = scanner.read_frame()?;
                emit(RemapDirective::Single { frame, target });
            }
            Some(b'[') => {
                scanner.bump();
                let input = scanner.read_range()?;
                if input.is_descending() {
                    return Err(scanner.error(Cause::IndexOutOfBounds));
                }
                scanner.skip_whitespace();
                match scanner.peek() {
                    // A bare range has no target and changes nothing.
                    None => trace!("Untargeted range {} ignored", input),
                    Some(b) if starts_literal(b) => {
                        let target = scanner.read_frame()?;
                        emit(RemapDirective::RangeToSingle { range: input, target });
                    }
                    Some(b'[') => {
                        scanner.bump();
                        let output = scanner.read_range()?;
                        emit(RemapDirective::RangeToRange { input, output });
                    }
                    Some(_) => return Err(scanner.error(Cause::Parse)),
                }
            }
            Some(_) => return Err(scanner.error(Cause::Parse)),
        }
        scanner.expect_end()
    }
}

/// Sequence grammar: every literal is the next output frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceDirective(pub usize);

impl Grammar for SequenceDirective {
    fn parse_line(
        scanner: &mut LineScanner<'_>,
        emit: &mut dyn FnMut(Self),
    ) -> Result<(), DomainError> {
        loop {
            scanner.skip_whitespace();
            match scanner.peek() {
                None => return Ok(()),
                Some(b'#') => {
                    scanner.skip_rest();
                    return Ok(());
                }
                Some(b) if starts_literal(b) => emit(SequenceDirective(scanner.read_frame()?)),
                Some(_) => return Err(scanner.error(Cause::Parse)),
            }
        }
    }
}

/// Selector grammar: frames and ranges taken from the second clip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectDirective {
    /// `x`
    Frame(usize),
    /// `[x y]`; a descending range selects nothing
    Range(FrameRange),
}

impl Grammar for SelectDirective {
    fn parse_line(
        scanner: &mut LineScanner<'_>,
        emit: &mut dyn FnMut(Self),
    ) -> Result<(), DomainError> {
        loop {
            scanner.skip_whitespace();
            match scanner.peek() {
                None => return Ok(()),
                Some(b'#') => {
                    scanner.skip_rest();
                    return Ok(());
                }
                Some(b) if starts_literal(b) => emit(SelectDirective::Frame(scanner.read_frame()?)),
                Some(b'[') => {
                    scanner.bump();
                    emit(SelectDirective::Range(scanner.read_range()?));
                }
                Some(_) => return Err(scanner.error(Cause::Parse)),
            }
        }
    }
}

/// Parse a whole source into `sink`, one physical line at a time.
///
/// The first error aborts the parse; whatever the sink received before it is
/// the caller's to throw away.
pub fn parse_source<S, R>(sink: &mut S, reader: R, source: SourceKind) -> Result<(), DomainError>
where
    S: TableSink,
    R: BufRead,
{
    let rules = RuleSet {
        filter: S::FILTER,
        source,
        frame_count: sink.frame_bound(),
    };

    let mut directives = 0usize;
    for (line, bytes) in reader.split(b'\n').enumerate() {
        let bytes = bytes.map_err(|e| DomainError::SourceRead {
            filter: S::FILTER,
            message: e.to_string(),
        })?;
        let mut scanner = LineScanner::new(&bytes, line, rules);
        S::Directive::parse_line(&mut scanner, &mut |directive| {
            trace!(line = line + 1, ?directive, "directive");
            sink.apply(directive);
            directives += 1;
        })?;
    }

    debug!("{}: applied {} directives from {}", S::FILTER, directives, source);
    Ok(())
}

/// Parse inline mapping text. Whitespace-only text is handed to the sink's
/// empty-input policy instead of being parsed.
pub fn parse_inline<S: TableSink>(sink: &mut S, text: &str) -> Result<(), DomainError> {
    if text.bytes().all(crate::mapping::scanner::is_space) {
        return sink.on_empty_inline();
    }
    parse_source(sink, std::io::Cursor::new(text.as_bytes()), SourceKind::Mappings)
}
