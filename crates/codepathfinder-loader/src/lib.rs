//! Rule-source loading boundary: a `RuleSource` trait plus a subprocess
//! implementation that spawns one sandboxed process per rule file with a
//! 30-second wall-clock deadline (§5, §6). The sandbox itself — whatever
//! interprets the rule file — is external; this crate owns only the
//! process-invocation, timeout, and output-parsing boundary.

mod process;

use std::path::Path;

use codepathfinder_common::{LoadedRules, Result};

pub use process::ProcessRuleSource;

/// One rule-set source: given a rule-file path, produce the parsed record
/// set. Implementations decide how the file's matcher program is executed.
pub trait RuleSource {
    fn load(&self, path: &Path) -> Result<LoadedRules>;
}
