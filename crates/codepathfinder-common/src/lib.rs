//! Shared data model for the analysis core: call graph, matcher IR, rule
//! records, detections, severity, and the error type all crates propagate.

pub mod argument;
pub mod call_graph;
pub mod detection;
pub mod error;
pub mod location;
pub mod matcher;
pub mod rule;
pub mod severity;

pub use argument::{Argument, ArgumentConstraint, ConstraintValue, PositionKey};
pub use call_graph::{CallGraph, CallGraphBuilder, CallSite, FunctionNode, ResolutionStatus, TypeHint};
pub use detection::{
    DetectionType, EnrichedDetection, RawDetection, ResolvedLocation, RuleMetadata, Snippet,
    SnippetLine, TaintNode,
};
pub use error::{CoreError, Result};
pub use location::Location;
pub use matcher::{CallMatcherIr, DataflowIr, MatchMode, MatcherIr, Scope, VariableMatcherIr};
pub use rule::{LoadedRules, RuleRecord};
pub use severity::{confidence_level, Severity};
