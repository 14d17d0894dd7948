use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::argument::Argument;
use crate::location::Location;

/// Why a call site's target could not be resolved to an FQN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ResolutionStatus {
    Resolved,
    Unresolved { reason: String },
}

impl ResolutionStatus {
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved)
    }
}

/// A type-inference hint attached to a call site. Per spec.md's Non-goals,
/// this is consumed only as an informational signal — never a primary
/// resolution mechanism.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeHint {
    pub type_name: String,
    pub confidence: f64,
}

/// One occurrence of a call expression in source code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallSite {
    /// Short callee name as written (e.g. `eval`, `request.GET`).
    pub target: String,
    /// Resolved target FQN; empty when unresolved.
    #[serde(default)]
    pub resolved_target: String,
    pub arguments: Vec<Argument>,
    pub location: Location,
    pub resolution: ResolutionStatus,
    pub type_hint: Option<TypeHint>,
}

impl CallSite {
    pub const fn line(&self) -> usize {
        self.location.line
    }
}

/// A function definition: the unique key is `fqn`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionNode {
    pub fqn: String,
    pub short_name: String,
    pub file: String,
    pub start_line: usize,
    pub end_line: usize,
    /// Containing class name; empty when the function is free-standing.
    #[serde(default)]
    pub class_name: String,
}

/// The call graph: functions, their call sites (in source order), and the
/// caller→callee edge set. Built once per scan, thereafter read-only —
/// all executors hold shared (`&`) references into it.
#[derive(Debug, Clone, Default)]
pub struct CallGraph {
    order: Vec<String>,
    functions: HashMap<String, FunctionNode>,
    call_sites: HashMap<String, Vec<CallSite>>,
    edges: HashMap<String, Vec<String>>,
    externals: HashSet<String>,
}

impl CallGraph {
    pub fn builder() -> CallGraphBuilder {
        CallGraphBuilder::default()
    }

    pub fn function(&self, fqn: &str) -> Option<&FunctionNode> {
        self.functions.get(fqn)
    }

    pub fn call_sites(&self, fqn: &str) -> &[CallSite] {
        self.call_sites.get(fqn).map_or(&[], Vec::as_slice)
    }

    pub fn callees(&self, fqn: &str) -> &[String] {
        self.edges.get(fqn).map_or(&[], Vec::as_slice)
    }

    pub fn is_external(&self, fqn: &str) -> bool {
        self.externals.contains(fqn)
    }

    /// Iterate `(function, call sites)` pairs in the graph's stored order.
    pub fn iter(&self) -> impl Iterator<Item = (&FunctionNode, &[CallSite])> {
        self.order.iter().filter_map(move |fqn| {
            let func = self.functions.get(fqn)?;
            Some((func, self.call_sites(fqn)))
        })
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Depth-first search for the first caller→callee path from `source`
    /// to `target`, in the edge list's stored order. Cycles are prevented
    /// by a visited set; depth is bounded only by graph size.
    pub fn find_path(&self, source: &str, target: &str) -> Option<Vec<String>> {
        if source == target {
            return None;
        }
        let mut visited = HashSet::new();
        let mut path = vec![source.to_string()];
        visited.insert(source.to_string());
        if self.dfs(source, target, &mut visited, &mut path) {
            Some(path)
        } else {
            None
        }
    }

    fn dfs(
        &self,
        current: &str,
        target: &str,
        visited: &mut HashSet<String>,
        path: &mut Vec<String>,
    ) -> bool {
        for callee in self.callees(current) {
            if callee == target {
                path.push(callee.clone());
                return true;
            }
            if visited.contains(callee) {
                continue;
            }
            visited.insert(callee.clone());
            path.push(callee.clone());
            if self.dfs(callee, target, visited, path) {
                return true;
            }
            path.pop();
        }
        false
    }

    /// Verify every resolved call site's target FQN is either a known
    /// function or a recorded external — the invariant from §3.
    pub fn validate(&self) -> Result<(), String> {
        for (fqn, sites) in &self.call_sites {
            for site in sites {
                if site.resolution.is_resolved()
                    && !site.resolved_target.is_empty()
                    && !self.functions.contains_key(&site.resolved_target)
                    && !self.externals.contains(&site.resolved_target)
                {
                    return Err(format!(
                        "call graph invariant violated: {fqn} calls resolved target \
                         {:?} which is neither a function node nor an external",
                        site.resolved_target
                    ));
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct CallGraphBuilder {
    graph: CallGraph,
}

impl CallGraphBuilder {
    pub fn add_function(mut self, node: FunctionNode) -> Self {
        if !self.graph.functions.contains_key(&node.fqn) {
            self.graph.order.push(node.fqn.clone());
        }
        self.graph.functions.insert(node.fqn.clone(), node);
        self
    }

    pub fn add_call_site(mut self, caller_fqn: impl Into<String>, site: CallSite) -> Self {
        self.graph
            .call_sites
            .entry(caller_fqn.into())
            .or_default()
            .push(site);
        self
    }

    pub fn add_edge(mut self, caller_fqn: impl Into<String>, callee_fqn: impl Into<String>) -> Self {
        let callee_fqn = callee_fqn.into();
        let list = self.graph.edges.entry(caller_fqn.into()).or_default();
        if !list.contains(&callee_fqn) {
            list.push(callee_fqn);
        }
        self
    }

    pub fn mark_external(mut self, fqn: impl Into<String>) -> Self {
        self.graph.externals.insert(fqn.into());
        self
    }

    pub fn build(self) -> CallGraph {
        self.graph
    }
}
