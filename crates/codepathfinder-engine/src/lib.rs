//! Pattern, call-graph, and dataflow matching engine: C1 through C8 of the
//! analysis pipeline.

pub mod argument_eval;
pub mod call_matcher;
pub mod dataflow;
pub mod dispatcher;
pub mod logic;
pub mod pattern;
pub mod variable_matcher;

pub use call_matcher::CallMatch;
pub use dispatcher::dispatch_raw;
pub use variable_matcher::VariableMatch;
