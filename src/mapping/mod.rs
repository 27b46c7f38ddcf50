//! Mapping language module
//!
//! Mapping text is read line by line by a [`scanner::LineScanner`], turned into
//! directives by the [`parser::Grammar`] of the target table, and applied to a
//! [`sink::TableSink`] in source order. [`TableBuilder`] drives a whole build:
//! the mapping file first, the inline text second, so inline directives win
//! wherever both touch the same frame.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::domain::errors::DomainError;
use crate::domain::model::SourceKind;
use crate::ports::TextSourcePort;

pub mod parser;
pub mod scanner;
pub mod sink;

pub use parser::{parse_inline, parse_source, Grammar, RemapDirective, SelectDirective, SequenceDirective};
pub use scanner::{LineScanner, RuleSet};
pub use sink::{ReindexTable, SelectorTable, SequenceTable, TableSink};

/// Where mapping text comes from. Both may be present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingSources {
    /// Mapping file, parsed first
    pub file: Option<PathBuf>,
    /// Inline mappings, parsed second
    pub inline: Option<String>,
}

impl MappingSources {
    pub fn inline(text: impl Into<String>) -> Self {
        Self {
            file: None,
            inline: Some(text.into()),
        }
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            file: Some(path.into()),
            inline: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.file.is_none() && self.inline.is_none()
    }
}

/// Builds a mapping table from its sources in one pass
pub struct TableBuilder<'a> {
    text_port: &'a dyn TextSourcePort,
}

impl<'a> TableBuilder<'a> {
    pub fn new(text_port: &'a dyn TextSourcePort) -> Self {
        Self { text_port }
    }

    /// Fill `table` from `sources`. Any error drops the partially built table.
    pub fn build<S: TableSink>(&self, mut table: S, sources: &MappingSources) -> Result<S, DomainError> {
        if let Some(path) = &sources.file {
            let reader = self.text_port.open(path).map_err(|e| {
                debug!("{}: cannot open {}: {}", S::FILTER, path.display(), e);
                DomainError::SourceUnavailable {
                    filter: S::FILTER,
                    path: path.display().to_string(),
                }
            })?;
            debug!("{}: parsing mapping file {}", S::FILTER, path.display());
            parse_source(&mut table, reader, SourceKind::TextFile)?;
        }

        if let Some(text) = &sources.inline {
            parse_inline(&mut table, text)?;
        }

        info!("{}: mapping table built", S::FILTER);
        Ok(table)
    }
}
