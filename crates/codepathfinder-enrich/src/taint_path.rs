//! Taint-path skeleton construction (§4.9): "for global taint detections,
//! emit a two-node taint path with source and sink placeholders." Applied
//! to local taint detections too, since both nodes share a function FQN
//! there; structural (pattern) matches get no path at all.

use codepathfinder_common::{DetectionType, RawDetection, TaintNode};

pub fn build(raw: &RawDetection) -> Vec<TaintNode> {
    match raw.detection_type() {
        DetectionType::Pattern => Vec::new(),
        DetectionType::TaintLocal | DetectionType::TaintGlobal => vec![
            TaintNode {
                label: "source".to_string(),
                function_fqn: raw.function_fqn.clone(),
                line: raw.source_line,
            },
            TaintNode {
                label: "sink".to_string(),
                function_fqn: raw.function_fqn.clone(),
                line: raw.sink_line,
            },
        ],
    }
}
