//! Dataflow executor (C6) — the heart of the system: intra- and
//! inter-procedural source→sink matching with sanitizer policy.

use codepathfinder_common::{CallGraph, CallMatcherIr, DataflowIr, RawDetection, Scope};

use crate::call_matcher;

/// One (function FQN, line, short call target) hit from a flattened
/// call-matcher list.
#[derive(Debug, Clone, Copy)]
struct Hit<'g> {
    fqn: &'g str,
    line: usize,
    target: &'g str,
}

/// Run every call matcher in `matchers` and union their hits, in the
/// iteration order each matcher itself produces (§4.6: "flattened
/// internally to pattern lists").
fn find_matching_calls<'g>(matchers: &[CallMatcherIr], graph: &'g CallGraph) -> Vec<Hit<'g>> {
    matchers
        .iter()
        .flat_map(|m| call_matcher::execute(m, graph))
        .map(|cm| Hit {
            fqn: cm.function_fqn,
            line: cm.line,
            target: cm.call_site.target.as_str(),
        })
        .collect()
}

/// True iff `line` lies strictly between `a` and `b`, in either ordering.
fn strictly_between(line: usize, a: usize, b: usize) -> bool {
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    line > low && line < high
}

/// Intra-procedural pass: Cartesian product of same-function source×sink
/// pairs, sanitizer-between flagging (§4.6 local mode).
fn local_pass(sources: &[Hit], sinks: &[Hit], sanitizers: &[Hit]) -> Vec<RawDetection> {
    let mut detections = Vec::new();
    for s in sources {
        for k in sinks {
            if s.fqn != k.fqn {
                continue;
            }
            let sanitized = sanitizers
                .iter()
                .any(|z| z.fqn == s.fqn && strictly_between(z.line, s.line, k.line));
            detections.push(RawDetection {
                function_fqn: s.fqn.to_string(),
                source_line: s.line,
                sink_line: k.line,
                tainted_variable: String::new(),
                sink_call: k.target.to_string(),
                confidence: 0.7,
                sanitized,
                scope: Some(Scope::Local),
            });
        }
    }
    detections
}

/// Inter-procedural pass: cross-function source/sink pairs connected by a
/// call-graph path, fully suppressed when any node on the path is a
/// sanitizer's function (§4.6 global mode). Does not include the local
/// pass's own detections — callers run both and concatenate.
fn global_pass(
    sources: &[Hit],
    sinks: &[Hit],
    sanitizers: &[Hit],
    graph: &CallGraph,
) -> Vec<RawDetection> {
    let mut detections = Vec::new();
    for s in sources {
        for k in sinks {
            if s.fqn == k.fqn {
                continue;
            }
            let Some(path) = graph.find_path(s.fqn, k.fqn) else {
                continue;
            };
            if path.len() < 2 {
                continue;
            }
            let path_has_sanitizer = path
                .iter()
                .any(|node| sanitizers.iter().any(|z| z.fqn == node));
            if path_has_sanitizer {
                continue;
            }
            detections.push(RawDetection {
                function_fqn: s.fqn.to_string(),
                source_line: s.line,
                sink_line: k.line,
                tainted_variable: String::new(),
                sink_call: k.target.to_string(),
                confidence: 0.8,
                sanitized: false,
                scope: Some(Scope::Global),
            });
        }
    }
    detections
}

/// Run the dataflow executor over a dataflow IR. Global scope runs the
/// local algorithm unmodified first, then adds cross-function detections
/// (§4.6). The sanitizer-semantics asymmetry — locally flagged-but-kept,
/// globally dropped — is deliberate and must not be unified.
pub fn execute(ir: &DataflowIr, graph: &CallGraph) -> Vec<RawDetection> {
    let sources = find_matching_calls(&ir.sources, graph);
    let sinks = find_matching_calls(&ir.sinks, graph);
    let sanitizers = find_matching_calls(&ir.sanitizers, graph);

    let mut detections = local_pass(&sources, &sinks, &sanitizers);
    if ir.scope == Scope::Global {
        detections.extend(global_pass(&sources, &sinks, &sanitizers, graph));
    }
    detections
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use codepathfinder_common::{
        Argument, CallSite, FunctionNode, Location, MatchMode, ResolutionStatus,
    };

    fn func(fqn: &str) -> FunctionNode {
        FunctionNode {
            fqn: fqn.to_string(),
            short_name: fqn.to_string(),
            file: "test.py".to_string(),
            start_line: 1,
            end_line: 50,
            class_name: String::new(),
        }
    }

    fn site(target: &str, line: usize) -> CallSite {
        CallSite {
            target: target.to_string(),
            resolved_target: String::new(),
            arguments: Vec::<Argument>::new(),
            location: Location::new("test.py", line),
            resolution: ResolutionStatus::Unresolved {
                reason: "external".to_string(),
            },
            type_hint: None,
        }
    }

    fn call_matcher(name: &str) -> CallMatcherIr {
        CallMatcherIr {
            patterns: vec![name.to_string()],
            wildcard_enabled: true,
            match_mode: MatchMode::Any,
            positional: Default::default(),
            keyword: Default::default(),
        }
    }

    fn dataflow_ir(sources: &str, sinks: &str, sanitizers: &[&str], scope: Scope) -> DataflowIr {
        DataflowIr {
            sources: vec![call_matcher(sources)],
            sinks: vec![call_matcher(sinks)],
            sanitizers: sanitizers.iter().map(|s| call_matcher(s)).collect(),
            propagation_hints: Vec::new(),
            scope,
        }
    }

    #[test]
    fn s1_local_match_no_sanitizer() {
        let graph = CallGraph::builder()
            .add_function(func("test.dangerous"))
            .add_call_site("test.dangerous", site("request.POST", 5))
            .add_call_site("test.dangerous", site("execute", 10))
            .build();
        let ir = dataflow_ir("request.POST", "execute", &[], Scope::Local);
        let detections = execute(&ir, &graph);
        assert_eq!(detections.len(), 1);
        let d = &detections[0];
        assert_eq!(d.function_fqn, "test.dangerous");
        assert_eq!(d.source_line, 5);
        assert_eq!(d.sink_line, 10);
        assert_eq!(d.sink_call, "execute");
        assert_eq!(d.scope, Some(Scope::Local));
        assert!((d.confidence - 0.7).abs() < f64::EPSILON);
        assert!(!d.sanitized);
    }

    #[test]
    fn s2_sanitizer_between() {
        let graph = CallGraph::builder()
            .add_function(func("test.dangerous"))
            .add_call_site("test.dangerous", site("request.POST", 5))
            .add_call_site("test.dangerous", site("escape_sql", 8))
            .add_call_site("test.dangerous", site("execute", 10))
            .build();
        let ir = dataflow_ir("request.POST", "execute", &["escape_sql"], Scope::Local);
        let detections = execute(&ir, &graph);
        assert_eq!(detections.len(), 1);
        assert!(detections[0].sanitized);
        assert_eq!(detections[0].source_line, 5);
        assert_eq!(detections[0].sink_line, 10);
    }

    #[test]
    fn s3_reverse_order_sanitizer_still_detected() {
        let graph = CallGraph::builder()
            .add_function(func("f"))
            .add_call_site("f", site("execute", 5))
            .add_call_site("f", site("escape_sql", 8))
            .add_call_site("f", site("request.POST", 12))
            .build();
        let ir = dataflow_ir("request.POST", "execute", &["escape_sql"], Scope::Local);
        let detections = execute(&ir, &graph);
        assert_eq!(detections.len(), 1);
        assert_eq!(detections[0].source_line, 12);
        assert_eq!(detections[0].sink_line, 5);
        assert!(detections[0].sanitized);
    }

    #[test]
    fn s4_no_cross_function_in_local() {
        let graph = CallGraph::builder()
            .add_function(func("funcA"))
            .add_function(func("funcB"))
            .add_call_site("funcA", site("request.GET", 5))
            .add_call_site("funcB", site("eval", 15))
            .add_edge("funcA", "funcB")
            .build();
        let ir = dataflow_ir("request.GET", "eval", &[], Scope::Local);
        assert!(execute(&ir, &graph).is_empty());
    }

    #[test]
    fn s5_global_cross_function() {
        let graph = CallGraph::builder()
            .add_function(func("funcA"))
            .add_function(func("funcB"))
            .add_call_site("funcA", site("request.GET", 5))
            .add_call_site("funcB", site("eval", 15))
            .add_edge("funcA", "funcB")
            .build();
        let ir = dataflow_ir("request.GET", "eval", &[], Scope::Global);
        let detections = execute(&ir, &graph);
        assert_eq!(detections.len(), 1);
        let d = &detections[0];
        assert_eq!(d.function_fqn, "funcA");
        assert_eq!(d.source_line, 5);
        assert_eq!(d.sink_line, 15);
        assert_eq!(d.sink_call, "eval");
        assert_eq!(d.scope, Some(Scope::Global));
        assert!((d.confidence - 0.8).abs() < f64::EPSILON);
        assert!(!d.sanitized);
    }

    #[test]
    fn s6_global_sanitizer_on_path_suppresses() {
        let graph = CallGraph::builder()
            .add_function(func("a"))
            .add_function(func("b"))
            .add_function(func("c"))
            .add_call_site("a", site("request.POST", 5))
            .add_call_site("b", site("escape_html", 10))
            .add_call_site("c", site("render", 15))
            .add_edge("a", "b")
            .add_edge("b", "c")
            .build();
        let ir = dataflow_ir("request.POST", "render", &["escape_html"], Scope::Global);
        assert!(execute(&ir, &graph).is_empty());
    }

    #[test]
    fn property5_local_fan_out_is_cartesian_product() {
        let graph = CallGraph::builder()
            .add_function(func("f"))
            .add_call_site("f", site("source", 1))
            .add_call_site("f", site("source", 2))
            .add_call_site("f", site("source", 3))
            .add_call_site("f", site("sink", 10))
            .add_call_site("f", site("sink", 11))
            .build();
        let ir = dataflow_ir("source", "sink", &[], Scope::Local);
        assert_eq!(execute(&ir, &graph).len(), 6);
    }

    #[test]
    fn no_path_is_not_an_error() {
        let graph = CallGraph::builder()
            .add_function(func("a"))
            .add_function(func("b"))
            .add_call_site("a", site("source", 5))
            .add_call_site("b", site("sink", 15))
            .build();
        let ir = dataflow_ir("source", "sink", &[], Scope::Global);
        assert!(execute(&ir, &graph).is_empty());
    }

    #[test]
    fn empty_sources_or_sinks_yields_no_detections() {
        let graph = CallGraph::builder()
            .add_function(func("f"))
            .add_call_site("f", site("sink", 10))
            .build();
        let ir = DataflowIr {
            sources: vec![],
            sinks: vec![call_matcher("sink")],
            sanitizers: vec![],
            propagation_hints: vec![],
            scope: Scope::Local,
        };
        assert!(execute(&ir, &graph).is_empty());
    }
}
