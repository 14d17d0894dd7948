//! Finding enrichment (C9): location resolution, snippets, severity and CWE
//! metadata, taint-path skeletons.

pub mod cwe;
pub mod dedup;
pub mod file_cache;
pub mod location;
pub mod snippet;
pub mod taint_path;

use std::path::Path;

use codepathfinder_common::{CallGraph, EnrichedDetection, RawDetection, RuleMetadata, RuleRecord};

pub use dedup::dedup_by_identity;
pub use file_cache::FileCache;

/// Turn a raw detection plus its originating rule into a fully enriched
/// one. A missing source file does not abort enrichment (§7): the snippet
/// is simply empty.
pub fn enrich(
    raw: &RawDetection,
    graph: &CallGraph,
    rule: &RuleRecord,
    project_root: Option<&Path>,
    context: usize,
    cache: &mut FileCache,
) -> EnrichedDetection {
    let loc = location::resolve(graph, &raw.function_fqn, raw.sink_line, project_root);
    let snippet = if loc.abs_path.is_empty() {
        codepathfinder_common::Snippet::default()
    } else {
        cache
            .lines(Path::new(&loc.abs_path))
            .map(|lines| snippet::build(lines, raw.sink_line, context))
            .unwrap_or_default()
    };

    let mut references = rule.references.clone();
    references.extend(rule.cwe.iter().filter_map(|c| cwe::reference_url(c)));

    let rule_meta = RuleMetadata {
        id: rule.id.clone(),
        name: rule.name.clone(),
        severity: rule.severity,
        description: rule.description.clone(),
        cwe: rule.cwe.clone(),
        owasp: rule.owasp.clone(),
        references,
    };

    EnrichedDetection {
        function_fqn: raw.function_fqn.clone(),
        source_line: raw.source_line,
        sink_line: raw.sink_line,
        tainted_variable: raw.tainted_variable.clone(),
        sink_call: raw.sink_call.clone(),
        confidence: raw.confidence,
        sanitized: raw.sanitized,
        location: loc,
        snippet,
        rule: rule_meta,
        taint_path: taint_path::build(raw),
        detection_type: raw.detection_type(),
    }
}
