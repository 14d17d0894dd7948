//! Per-run counts by severity and detection type (§4.10: "each formatter
//! consumes enriched detections plus a summary").

use serde::{Deserialize, Serialize};

use codepathfinder_common::{DetectionType, EnrichedDetection, Severity};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total: usize,
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub info: usize,
    pub pattern: usize,
    pub taint_local: usize,
    pub taint_global: usize,
}

impl Summary {
    pub fn build(detections: &[EnrichedDetection]) -> Self {
        let mut summary = Self {
            total: detections.len(),
            ..Self::default()
        };
        for d in detections {
            match d.rule.severity {
                Severity::Critical => summary.critical += 1,
                Severity::High => summary.high += 1,
                Severity::Medium => summary.medium += 1,
                Severity::Low => summary.low += 1,
                Severity::Info => summary.info += 1,
            }
            match d.detection_type {
                DetectionType::Pattern => summary.pattern += 1,
                DetectionType::TaintLocal => summary.taint_local += 1,
                DetectionType::TaintGlobal => summary.taint_global += 1,
            }
        }
        summary
    }
}
