//! Deserializes the call graph handed over by the code-graph builder (§6:
//! "inputs from the code-graph builder" — a function-node map, a call-site
//! map, and a caller→callee edge map). Building that graph from source is
//! outside this engine's scope; this module only wires the external JSON
//! shape into `CallGraph`.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use codepathfinder_common::{CallGraph, CallSite, CoreError, FunctionNode, Result};

#[derive(Debug, Deserialize)]
struct GraphDocument {
    functions: Vec<FunctionNode>,
    #[serde(default)]
    call_sites: HashMap<String, Vec<CallSite>>,
    #[serde(default)]
    edges: HashMap<String, Vec<String>>,
    #[serde(default)]
    externals: Vec<String>,
}

pub fn load(path: &Path) -> Result<CallGraph> {
    let content = std::fs::read_to_string(path).map_err(|source| CoreError::MissingFile {
        path: path.to_path_buf(),
        source,
    })?;
    let doc: GraphDocument = serde_json::from_str(&content)?;

    let mut builder = CallGraph::builder();
    for func in doc.functions {
        builder = builder.add_function(func);
    }
    for (fqn, sites) in doc.call_sites {
        for site in sites {
            builder = builder.add_call_site(fqn.clone(), site);
        }
    }
    for (fqn, callees) in doc.edges {
        for callee in callees {
            builder = builder.add_edge(fqn.clone(), callee);
        }
    }
    for fqn in doc.externals {
        builder = builder.mark_external(fqn);
    }

    let graph = builder.build();
    graph.validate().map_err(|reason| CoreError::MalformedMatcher { reason })?;
    Ok(graph)
}
