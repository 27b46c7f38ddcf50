//! Line scanner primitives shared by every mapping grammar

use std::num::IntErrorKind;

use crate::domain::errors::{Cause, Diagnostic, DomainError};
use crate::domain::model::{Cursor, FilterKind, FrameRange, SourceKind};

/// Which rule set is reading, from where, and the exclusive frame bound
/// every literal is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSet {
    pub filter: FilterKind,
    pub source: SourceKind,
    pub frame_count: usize,
}

/// C `isspace` set
pub fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

/// Whether a byte can open an integer literal
pub fn starts_literal(byte: u8) -> bool {
    byte.is_ascii_digit() || byte == b'-'
}

/// Left-to-right scanner over one physical line
#[derive(Debug)]
pub struct LineScanner<'a> {
    text: &'a [u8],
    cursor: Cursor,
    rules: RuleSet,
}

impl<'a> LineScanner<'a> {
    pub fn new(text: &'a [u8], line: usize, rules: RuleSet) -> Self {
        Self {
            text,
            cursor: Cursor { line, column: 0 },
            rules,
        }
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn rules(&self) -> RuleSet {
        self.rules
    }

    /// Advance past whitespace; stops at the first other byte or end of line
    pub fn skip_whitespace(&mut self) {
        while self.cursor.column < self.text.len() && is_space(self.text[self.cursor.column]) {
            self.cursor.column += 1;
        }
    }

    /// Byte under the cursor, `None` at or past end of line
    pub fn peek(&self) -> Option<u8> {
        self.text.get(self.cursor.column).copied()
    }

    /// Step over the byte under the cursor
    pub fn bump(&mut self) {
        if self.cursor.column < self.text.len() {
            self.cursor.column += 1;
        }
    }

    /// Drop the rest of the line (trailing comment)
    pub fn skip_rest(&mut self) {
        self.cursor.column = self.text.len();
    }

    /// Only whitespace may remain on the line
    pub fn expect_end(&mut self) -> Result<(), DomainError> {
        self.skip_whitespace();
        if self.cursor.column != self.text.len() {
            return Err(self.error(Cause::Parse));
        }
        Ok(())
    }

    /// Error at the current column
    pub fn error(&self, cause: Cause) -> DomainError {
        self.error_at(cause, self.cursor.column)
    }

    pub fn error_at(&self, cause: Cause, column: usize) -> DomainError {
        DomainError::Syntax(Diagnostic {
            filter: self.rules.filter,
            cause,
            source: self.rules.source,
            line: self.cursor.line,
            column,
        })
    }

    /// Read one literal (`-`? digits) and check it lies in `[0, frame_count)`.
    ///
    /// Errors are reported at the token's first column. On success the cursor
    /// sits just past the last digit.
    pub fn read_frame(&mut self) -> Result<usize, DomainError> {
        let start = self.cursor.column;
        let mut end = start;
        if self.text.get(end) == Some(&b'-') {
            end += 1;
        }
        let digits = end;
        while end < self.text.len() && self.text[end].is_ascii_digit() {
            end += 1;
        }
        if end == digits {
            return Err(self.error_at(Cause::Parse, start));
        }
        self.cursor.column = end;

        // The token is ASCII by construction.
        let token = std::str::from_utf8(&self.text[start..end])
            .map_err(|_| self.error_at(Cause::Parse, start))?;
        let value = token.parse::<i32>().map_err(|e| match e.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                self.error_at(Cause::Overflow, start)
            }
            _ => self.error_at(Cause::Parse, start),
        })?;

        match usize::try_from(value) {
            Ok(frame) if frame < self.rules.frame_count => Ok(frame),
            _ => {
                self.cursor.column = start;
                Err(self.error(Cause::IndexOutOfBounds))
            }
        }
    }

    /// Read `start end]`; the opening `[` must already be consumed.
    /// Ordering of the two frames is left to the caller.
    pub fn read_range(&mut self) -> Result<FrameRange, DomainError> {
        self.skip_whitespace();
        let start = self.read_frame()?;
        self.skip_whitespace();
        let end = self.read_frame()?;
        self.skip_whitespace();
        if self.peek() != Some(b']') {
            return Err(self.error(Cause::Parse));
        }
        self.bump();
        Ok(FrameRange::new(start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(frame_count: usize) -> RuleSet {
        RuleSet {
            filter: FilterKind::RemapFrames,
            source: SourceKind::Mappings,
            frame_count,
        }
    }

    fn column_of(err: DomainError) -> (Cause, usize) {
        let diagnostic = err.diagnostic().cloned().expect("syntax error");
        (diagnostic.cause, diagnostic.column)
    }

    #[test]
    fn test_skip_whitespace_is_idempotent() {
        let mut scanner = LineScanner::new(b" \t\x0b 7", 0, rules(10));
        scanner.skip_whitespace();
        assert_eq!(scanner.cursor().column, 4);
        scanner.skip_whitespace();
        assert_eq!(scanner.cursor().column, 4);
        assert_eq!(scanner.peek(), Some(b'7'));
    }

    #[test]
    fn test_peek_past_end_is_none() {
        let mut scanner = LineScanner::new(b"  ", 0, rules(10));
        scanner.skip_whitespace();
        assert_eq!(scanner.peek(), None);
        scanner.bump();
        assert_eq!(scanner.cursor().column, 2);
    }

    #[test]
    fn test_read_frame_stops_after_digits() {
        let mut scanner = LineScanner::new(b"42 7", 0, rules(100));
        assert_eq!(scanner.read_frame().unwrap(), 42);
        assert_eq!(scanner.cursor().column, 2);
    }

    #[test]
    fn test_read_frame_accepts_last_frame_and_negative_zero() {
        assert_eq!(LineScanner::new(b"9", 0, rules(10)).read_frame().unwrap(), 9);
        assert_eq!(LineScanner::new(b"-0", 0, rules(10)).read_frame().unwrap(), 0);
    }

    #[test]
    fn test_read_frame_out_of_bounds_rewinds_to_token() {
        let mut scanner = LineScanner::new(b"  10", 0, rules(10));
        scanner.skip_whitespace();
        let err = scanner.read_frame().unwrap_err();
        assert_eq!(column_of(err), (Cause::IndexOutOfBounds, 2));
        assert_eq!(scanner.cursor().column, 2);

        let err = LineScanner::new(b"-3", 0, rules(10)).read_frame().unwrap_err();
        assert_eq!(column_of(err), (Cause::IndexOutOfBounds, 0));
    }

    #[test]
    fn test_read_frame_overflow() {
        let err = LineScanner::new(b"99999999999", 0, rules(10)).read_frame().unwrap_err();
        assert_eq!(column_of(err), (Cause::Overflow, 0));

        let err = LineScanner::new(b"-99999999999", 0, rules(10)).read_frame().unwrap_err();
        assert_eq!(column_of(err), (Cause::Overflow, 0));
    }

    #[test]
    fn test_read_frame_without_digits() {
        let err = LineScanner::new(b"x", 0, rules(10)).read_frame().unwrap_err();
        assert_eq!(column_of(err), (Cause::Parse, 0));

        let err = LineScanner::new(b"-", 0, rules(10)).read_frame().unwrap_err();
        assert_eq!(column_of(err), (Cause::Parse, 0));
    }

    #[test]
    fn test_read_range_requires_closing_bracket() {
        let mut scanner = LineScanner::new(b"[ 1  5 ] 3", 0, rules(10));
        scanner.bump();
        assert_eq!(scanner.read_range().unwrap(), FrameRange::new(1, 5));
        assert_eq!(scanner.cursor().column, 8);

        let mut scanner = LineScanner::new(b"[1 5 3]", 0, rules(10));
        scanner.bump();
        assert_eq!(column_of(scanner.read_range().unwrap_err()), (Cause::Parse, 5));

        let mut scanner = LineScanner::new(b"[1 5", 0, rules(10));
        scanner.bump();
        assert_eq!(column_of(scanner.read_range().unwrap_err()), (Cause::Parse, 4));
    }

    #[test]
    fn test_read_range_keeps_descending_order() {
        let mut scanner = LineScanner::new(b"[9 0]", 0, rules(10));
        scanner.bump();
        let range = scanner.read_range().unwrap();
        assert!(range.is_descending());
    }

    #[test]
    fn test_error_carries_rule_set() {
        let scanner = LineScanner::new(
            b"",
            4,
            RuleSet {
                filter: FilterKind::ReplaceFramesSimple,
                source: SourceKind::TextFile,
                frame_count: 1,
            },
        );
        assert_eq!(
            scanner.error(Cause::Parse).to_string(),
            "ReplaceFramesSimple: Parse Error in text file at line 5, column 1"
        );
    }
}
