//! Output module for mapping reports

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;
use crate::domain::model::{ClipInfo, ClipSlot, FilterKind};
use crate::error::RemapError;
use crate::filters::FrameMapper;

pub mod writer;

/// Report rendering format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => f.write_str("text"),
            OutputFormat::Json => f.write_str("json"),
            OutputFormat::Yaml => f.write_str("yaml"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = RemapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            other => Err(RemapError::Config {
                message: format!("Unknown output format: {}", other),
            }),
        }
    }
}

/// One output frame and where it comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    pub frame: usize,
    pub clip: ClipSlot,
    pub index: usize,
}

/// Resolved mapping of a constructed filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappingReport {
    pub filter: FilterKind,
    pub output: ClipInfo,
    pub entries: Vec<ReportEntry>,
}

impl MappingReport {
    /// Every output frame of `filter`
    pub fn from_filter<F: FrameMapper>(filter: &F) -> Result<Self, DomainError> {
        let entries = (0..filter.num_frames())
            .map(|frame| Self::entry(filter, frame))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            filter: filter.kind(),
            output: filter.output_info().clone(),
            entries,
        })
    }

    /// A single output frame of `filter`
    pub fn single<F: FrameMapper>(filter: &F, frame: usize) -> Result<Self, DomainError> {
        Ok(Self {
            filter: filter.kind(),
            output: filter.output_info().clone(),
            entries: vec![Self::entry(filter, frame)?],
        })
    }

    fn entry<F: FrameMapper>(filter: &F, frame: usize) -> Result<ReportEntry, DomainError> {
        let request = filter.request(frame)?;
        Ok(ReportEntry {
            frame,
            clip: request.slot,
            index: request.index,
        })
    }
}
