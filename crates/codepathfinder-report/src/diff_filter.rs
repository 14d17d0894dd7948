//! Diff/limit filter (C12, §4.12): retain only detections in a changed-file
//! set; pass through untouched when the set is empty.

use std::collections::HashSet;

use codepathfinder_common::EnrichedDetection;

pub fn apply(detections: Vec<EnrichedDetection>, changed_files: &HashSet<String>) -> Vec<EnrichedDetection> {
    if changed_files.is_empty() {
        return detections;
    }
    detections
        .into_iter()
        .filter(|d| {
            d.location
                .rel_path
                .as_deref()
                .is_some_and(|p| changed_files.contains(p))
        })
        .collect()
}
