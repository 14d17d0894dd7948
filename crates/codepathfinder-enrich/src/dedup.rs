//! Optional dedup-by-identity helper (§4.6: "dedup, if desired, happens at
//! the enrichment boundary").

use std::collections::HashSet;

use codepathfinder_common::RawDetection;

/// Keep only the first occurrence of each `(function FQN, source line, sink
/// line, sink call)` identity, preserving order.
pub fn dedup_by_identity(detections: Vec<RawDetection>) -> Vec<RawDetection> {
    let mut seen = HashSet::new();
    detections
        .into_iter()
        .filter(|d| {
            let id = (
                d.function_fqn.clone(),
                d.source_line,
                d.sink_line,
                d.sink_call.clone(),
            );
            seen.insert(id)
        })
        .collect()
}
