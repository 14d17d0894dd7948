//! JSON formatter (§4.10): tool/scan/results/summary(/errors) envelope.

use serde::{Deserialize, Serialize};

use codepathfinder_common::{EnrichedDetection, Result};

use crate::summary::Summary;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

impl Default for ToolInfo {
    fn default() -> Self {
        Self {
            name: "Code Pathfinder".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanInfo {
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report<'a> {
    pub tool: ToolInfo,
    pub scan: ScanInfo,
    pub results: &'a [EnrichedDetection],
    pub summary: Summary,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

/// `timestamp` is injected by the caller (ISO-8601 UTC) — this crate never
/// reads the clock itself.
pub fn format(detections: &[EnrichedDetection], timestamp: &str, errors: Vec<String>) -> Result<String> {
    let report = Report {
        tool: ToolInfo::default(),
        scan: ScanInfo {
            timestamp: timestamp.to_string(),
        },
        results: detections,
        summary: Summary::build(detections),
        errors,
    };
    serde_json::to_string_pretty(&report).map_err(Into::into)
}
