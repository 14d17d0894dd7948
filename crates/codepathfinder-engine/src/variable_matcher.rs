//! Variable matcher executor (C5): finds variable references in call
//! arguments by name pattern.

use codepathfinder_common::{CallGraph, CallSite, Location, VariableMatcherIr};

use crate::pattern;

/// One variable reference accepted by a variable matcher.
#[derive(Debug, Clone, Copy)]
pub struct VariableMatch<'g> {
    pub function_fqn: &'g str,
    pub call_site: &'g CallSite,
    pub position: usize,
    pub variable_name: &'g str,
    pub location: &'g Location,
}

/// Iterate every argument of every call site; emit a match when the
/// argument is a variable reference whose textual value matches the
/// pattern (§4.5).
pub fn execute<'g>(matcher: &VariableMatcherIr, graph: &'g CallGraph) -> Vec<VariableMatch<'g>> {
    let mut results = Vec::new();
    for (func, sites) in graph.iter() {
        for site in sites {
            for arg in &site.arguments {
                if arg.is_variable && pattern::matches(&arg.value, &matcher.pattern, matcher.wildcard_enabled) {
                    results.push(VariableMatch {
                        function_fqn: func.fqn.as_str(),
                        call_site: site,
                        position: arg.position,
                        variable_name: arg.value.as_str(),
                        location: &site.location,
                    });
                }
            }
        }
    }
    results
}
