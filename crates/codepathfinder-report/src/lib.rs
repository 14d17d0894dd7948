//! Finding formatters (C10), exit policy (C11), and diff/limit filters (C12).

pub mod csv;
pub mod diff_filter;
pub mod exit_policy;
pub mod json;
pub mod sarif;
pub mod summary;
pub mod text;

#[cfg(test)]
mod test_support;

use std::fmt;
use std::str::FromStr;

use codepathfinder_common::{CoreError, EnrichedDetection, Result};

pub use summary::Summary;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Sarif,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = CoreError;

    fn from_str(raw: &str) -> std::result::Result<Self, Self::Err> {
        match raw.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "sarif" => Ok(Self::Sarif),
            "csv" => Ok(Self::Csv),
            _ => Err(CoreError::FormatWriteError(format!(
                "unknown output format {raw:?}"
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Text => "text",
            Self::Json => "json",
            Self::Sarif => "sarif",
            Self::Csv => "csv",
        };
        f.write_str(s)
    }
}

/// Render the given detections in `format`. `timestamp` is only used by the
/// JSON envelope; callers pass it in rather than this crate reading the
/// clock.
pub fn render(
    format: OutputFormat,
    detections: &[EnrichedDetection],
    timestamp: &str,
    errors: Vec<String>,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text::format(detections)),
        OutputFormat::Json => json::format(detections, timestamp, errors),
        OutputFormat::Sarif => sarif::format(detections),
        OutputFormat::Csv => Ok(csv::format(detections)),
    }
}
