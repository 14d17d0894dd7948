//! Call matcher executor (C4): applies a call-matcher IR across the call
//! graph.

use codepathfinder_common::{CallGraph, CallMatcherIr, CallSite, MatchMode};

use crate::argument_eval;
use crate::pattern;

/// One call site accepted by a call matcher.
#[derive(Debug, Clone, Copy)]
pub struct CallMatch<'g> {
    pub function_fqn: &'g str,
    pub call_site: &'g CallSite,
    pub file: &'g str,
    pub line: usize,
    pub matched_pattern: &'g str,
}

/// Does `target` satisfy the matcher's pattern list under its match mode?
/// Returns the representative matched pattern on success.
fn matched_pattern<'m>(target: &str, matcher: &'m CallMatcherIr) -> Option<&'m str> {
    match matcher.match_mode {
        MatchMode::Any => matcher
            .patterns
            .iter()
            .find(|p| pattern::matches(target, p, matcher.wildcard_enabled))
            .map(String::as_str),
        MatchMode::All => {
            if !matcher.patterns.is_empty()
                && matcher
                    .patterns
                    .iter()
                    .all(|p| pattern::matches(target, p, matcher.wildcard_enabled))
            {
                matcher.patterns.first().map(String::as_str)
            } else {
                None
            }
        }
    }
}

/// Iterate all call sites of all functions; a call site matches when its
/// short target matches the pattern list (per match mode) and its
/// arguments satisfy the positional/keyword constraints (§4.3). Matches
/// are returned in call-graph iteration order.
///
/// `O(F · C · P + Σ constraints)` — no indexing or memoization (§4.4).
pub fn execute<'g>(matcher: &CallMatcherIr, graph: &'g CallGraph) -> Vec<CallMatch<'g>> {
    let mut results = Vec::new();
    for (func, sites) in graph.iter() {
        for site in sites {
            let Some(pat) = matched_pattern(&site.target, matcher) else {
                continue;
            };
            if !argument_eval::evaluate(&site.arguments, &matcher.positional, &matcher.keyword) {
                continue;
            }
            results.push(CallMatch {
                function_fqn: func.fqn.as_str(),
                call_site: site,
                file: func.file.as_str(),
                line: site.line(),
                matched_pattern: pat,
            });
        }
    }
    results
}
