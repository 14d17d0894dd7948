//! Logic combinator (C7): recursive AND/OR/NOT of sub-matchers, defined at
//! the level of set membership of `(function FQN, line, kind)` triples.

use std::collections::HashSet;

use codepathfinder_common::{CallGraph, MatcherIr, RawDetection};

use crate::dispatcher;

type Identity = (String, usize, usize, String);

fn identity(d: &RawDetection) -> Identity {
    let (fqn, source, sink, call) = d.identity();
    (fqn.to_string(), source, sink, call.to_string())
}

/// `AND` accepts a result if every positive sub-matcher accepts it and no
/// `NOT` child rejects it. A `logic_not` child is evaluated for its
/// matched identities and used to exclude them from the intersection —
/// there is no sensible universe to invert a `NOT` against on its own, so
/// an `AND` made up only of `NOT` children yields nothing.
pub fn evaluate_and<'ir>(items: &'ir [MatcherIr], graph: &CallGraph) -> Vec<RawDetection> {
    let mut positive: Vec<Vec<RawDetection>> = Vec::new();
    let mut excluded: HashSet<Identity> = HashSet::new();

    for item in items {
        if let MatcherIr::LogicNot(inner) = item {
            for d in dispatcher::dispatch_raw(inner, graph) {
                excluded.insert(identity(&d));
            }
        } else {
            positive.push(dispatcher::dispatch_raw(item, graph));
        }
    }

    let Some((first, rest)) = positive.split_first() else {
        return Vec::new();
    };
    let mut common: HashSet<Identity> = first.iter().map(identity).collect();
    for set in rest {
        let ids: HashSet<Identity> = set.iter().map(identity).collect();
        common.retain(|id| ids.contains(id));
    }

    first
        .iter()
        .filter(|d| {
            let id = identity(d);
            common.contains(&id) && !excluded.contains(&id)
        })
        .cloned()
        .collect()
}

/// `OR` accepts a result if any sub-matcher accepts it. Union by identity,
/// keeping the first occurrence (and its metadata) in sub-matcher order.
pub fn evaluate_or(items: &[MatcherIr], graph: &CallGraph) -> Vec<RawDetection> {
    let mut seen: HashSet<Identity> = HashSet::new();
    let mut results = Vec::new();
    for item in items {
        for d in dispatcher::dispatch_raw(item, graph) {
            let id = identity(&d);
            if seen.insert(id) {
                results.push(d);
            }
        }
    }
    results
}

/// A standalone `NOT` (not nested under an `AND`) has no universe to
/// invert against, so it contributes no detections on its own.
pub fn evaluate_not(_inner: &MatcherIr, _graph: &CallGraph) -> Vec<RawDetection> {
    Vec::new()
}
