//! Report rendering

use std::fmt::Write as _;

use crate::error::{RemapError, RemapResult};
use crate::output::{MappingReport, OutputFormat};

/// Render `report` in the requested format
pub fn render(report: &MappingReport, format: OutputFormat) -> RemapResult<String> {
    match format {
        OutputFormat::Text => Ok(render_text(report)),
        OutputFormat::Json => serde_json::to_string_pretty(report)
            .map(|mut json| {
                json.push('\n');
                json
            })
            .map_err(|e| RemapError::Serialization {
                message: e.to_string(),
            }),
        OutputFormat::Yaml => serde_yaml::to_string(report).map_err(|e| RemapError::Serialization {
            message: e.to_string(),
        }),
    }
}

/// One `frame -> clip[index]` line per entry under a short header
fn render_text(report: &MappingReport) -> String {
    let mut text = String::new();
    let _ = writeln!(text, "{}: {}", report.filter, report.output);
    for entry in &report.entries {
        let _ = writeln!(text, "{} -> {}[{}]", entry.frame, entry.clip, entry.index);
    }
    text
}
