//! Rule dispatcher (C8): routes a matcher IR to the correct executor and
//! wraps results into raw detections with uniform shape.

use codepathfinder_common::{CallGraph, MatcherIr, RawDetection, Scope};

use crate::{call_matcher, dataflow, logic, variable_matcher};

/// Evaluate any matcher IR against the call graph, producing raw
/// detections. Call and variable matches are synthesized with confidence
/// 1.0, scope `local`, source-line = sink-line = match-line (§4.8).
/// Container-rule tokens produce no detections (§6).
pub fn dispatch_raw(ir: &MatcherIr, graph: &CallGraph) -> Vec<RawDetection> {
    match ir {
        MatcherIr::CallMatcher(m) => call_matcher::execute(m, graph)
            .into_iter()
            .map(|hit| RawDetection {
                function_fqn: hit.function_fqn.to_string(),
                source_line: hit.line,
                sink_line: hit.line,
                tainted_variable: String::new(),
                sink_call: hit.call_site.target.clone(),
                confidence: 1.0,
                sanitized: false,
                scope: Some(Scope::Local),
            })
            .collect(),
        MatcherIr::VariableMatcher(m) => variable_matcher::execute(m, graph)
            .into_iter()
            .map(|hit| RawDetection {
                function_fqn: hit.function_fqn.to_string(),
                source_line: hit.location.line,
                sink_line: hit.location.line,
                tainted_variable: hit.variable_name.to_string(),
                sink_call: String::new(),
                confidence: 1.0,
                sanitized: false,
                scope: Some(Scope::Local),
            })
            .collect(),
        MatcherIr::Dataflow(d) => dataflow::execute(d, graph),
        MatcherIr::LogicAnd(items) => logic::evaluate_and(items, graph),
        MatcherIr::LogicOr(items) => logic::evaluate_or(items, graph),
        MatcherIr::LogicNot(inner) => logic::evaluate_not(inner, graph),
        MatcherIr::Container { .. } => Vec::new(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use codepathfinder_common::{
        Argument, CallMatcherIr, CallSite, FunctionNode, Location, MatchMode, ResolutionStatus,
    };

    fn func(fqn: &str) -> FunctionNode {
        FunctionNode {
            fqn: fqn.to_string(),
            short_name: fqn.to_string(),
            file: "t.py".to_string(),
            start_line: 1,
            end_line: 20,
            class_name: String::new(),
        }
    }

    fn site(target: &str, line: usize) -> CallSite {
        CallSite {
            target: target.to_string(),
            resolved_target: String::new(),
            arguments: Vec::<Argument>::new(),
            location: Location::new("t.py", line),
            resolution: ResolutionStatus::Unresolved {
                reason: "external".to_string(),
            },
            type_hint: None,
        }
    }

    #[test]
    fn call_matcher_dispatch_synthesizes_structural_detection() {
        let graph = CallGraph::builder()
            .add_function(func("f"))
            .add_call_site("f", site("eval", 7))
            .build();
        let ir = MatcherIr::CallMatcher(CallMatcherIr {
            patterns: vec!["eval".to_string()],
            wildcard_enabled: true,
            match_mode: MatchMode::Any,
            positional: Default::default(),
            keyword: Default::default(),
        });
        let detections = dispatch_raw(&ir, &graph);
        assert_eq!(detections.len(), 1);
        let d = &detections[0];
        assert_eq!(d.source_line, 7);
        assert_eq!(d.sink_line, 7);
        assert_eq!(d.sink_call, "eval");
        assert!((d.confidence - 1.0).abs() < f64::EPSILON);
        assert_eq!(d.scope, Some(Scope::Local));
    }

    #[test]
    fn container_tag_produces_no_detections() {
        let graph = CallGraph::default();
        let ir = MatcherIr::Container {
            tag: "any_of".to_string(),
        };
        assert!(dispatch_raw(&ir, &graph).is_empty());
    }
}
