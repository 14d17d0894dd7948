use serde::{Deserialize, Serialize};

use crate::matcher::Scope;
use crate::severity::Severity;

/// Detection type, derived from a raw detection's scope tag (§4.9):
/// empty → `Pattern`, `local` → `TaintLocal`, `global` → `TaintGlobal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DetectionType {
    Pattern,
    TaintLocal,
    TaintGlobal,
}

impl From<Option<Scope>> for DetectionType {
    fn from(scope: Option<Scope>) -> Self {
        match scope {
            None => Self::Pattern,
            Some(Scope::Local) => Self::TaintLocal,
            Some(Scope::Global) => Self::TaintGlobal,
        }
    }
}

/// A detection as produced by an executor, before enrichment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDetection {
    pub function_fqn: String,
    pub source_line: usize,
    pub sink_line: usize,
    #[serde(default)]
    pub tainted_variable: String,
    #[serde(default)]
    pub sink_call: String,
    pub confidence: f64,
    #[serde(default)]
    pub sanitized: bool,
    /// `None` for structural (pattern) matches; `Some` for dataflow
    /// detections, tagging local vs. global scope.
    pub scope: Option<Scope>,
}

impl RawDetection {
    /// Identity used for deduplication (§4.6) and for logic-combinator set
    /// membership (§4.7): `(function FQN, source line, sink line, sink
    /// call)`.
    pub fn identity(&self) -> (&str, usize, usize, &str) {
        (
            self.function_fqn.as_str(),
            self.source_line,
            self.sink_line,
            self.sink_call.as_str(),
        )
    }

    pub fn detection_type(&self) -> DetectionType {
        DetectionType::from(self.scope)
    }
}

/// One node in a taint-path skeleton.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaintNode {
    pub label: String,
    pub function_fqn: String,
    pub line: usize,
}

/// Rule metadata carried through from the rule-source record (§6) into the
/// enriched finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleMetadata {
    pub id: String,
    pub name: String,
    pub severity: Severity,
    pub description: String,
    #[serde(default)]
    pub cwe: Vec<String>,
    #[serde(default)]
    pub owasp: Vec<String>,
    #[serde(default)]
    pub references: Vec<String>,
}

/// A fully resolved source location (§4.9).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    pub abs_path: String,
    pub rel_path: Option<String>,
    pub line: usize,
    pub column: usize,
    pub function: String,
    pub class_name: String,
}

/// One line of a code snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetLine {
    pub number: usize,
    pub text: String,
    pub highlighted: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    pub lines: Vec<SnippetLine>,
}

/// A finding enriched with location, source context, and rule metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedDetection {
    pub function_fqn: String,
    pub source_line: usize,
    pub sink_line: usize,
    pub tainted_variable: String,
    pub sink_call: String,
    pub confidence: f64,
    pub sanitized: bool,
    pub location: ResolvedLocation,
    pub snippet: Snippet,
    pub rule: RuleMetadata,
    pub taint_path: Vec<TaintNode>,
    pub detection_type: DetectionType,
}
