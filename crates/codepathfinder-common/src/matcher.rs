use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::argument::ArgumentConstraint;
use crate::error::CoreError;

/// Whether a call matcher requires all patterns to match, or any one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    Any,
    All,
}

impl Default for MatchMode {
    fn default() -> Self {
        Self::Any
    }
}

/// Dataflow analysis scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Local,
    Global,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallMatcherIr {
    pub patterns: Vec<String>,
    #[serde(default = "default_true")]
    pub wildcard_enabled: bool,
    #[serde(default)]
    pub match_mode: MatchMode,
    #[serde(default)]
    pub positional: HashMap<String, ArgumentConstraint>,
    #[serde(default)]
    pub keyword: HashMap<String, ArgumentConstraint>,
}

const fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariableMatcherIr {
    pub pattern: String,
    #[serde(default = "default_true")]
    pub wildcard_enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataflowIr {
    pub sources: Vec<CallMatcherIr>,
    pub sinks: Vec<CallMatcherIr>,
    #[serde(default)]
    pub sanitizers: Vec<CallMatcherIr>,
    /// Informational only (§9 Open Question a) — never consulted by the
    /// executor, never changes detection semantics.
    #[serde(default)]
    pub propagation_hints: Vec<String>,
    pub scope: Scope,
}

/// The rule IR's tagged shape (§3). Unknown tags that are not one of the
/// recognized container-rule tokens are a runtime `CoreError`, never a
/// compile-time hole — the loader is external and untrusted (§9).
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum MatcherIr {
    CallMatcher(CallMatcherIr),
    VariableMatcher(VariableMatcherIr),
    Dataflow(Box<DataflowIr>),
    LogicAnd(Vec<MatcherIr>),
    LogicOr(Vec<MatcherIr>),
    LogicNot(Box<MatcherIr>),
    /// A container-rule matcher (`missing_instruction`, `instruction`,
    /// `service_has`, `service_missing`, `any_of`, `all_of`, `none_of`).
    /// These belong to a separate (Dockerfile/compose) analyzer and are
    /// accepted but produce no detections in this core (§6).
    Container { tag: String },
}

const CONTAINER_TAGS: &[&str] = &[
    "missing_instruction",
    "instruction",
    "service_has",
    "service_missing",
    "any_of",
    "all_of",
    "none_of",
];

impl MatcherIr {
    /// Parse a matcher IR from the loader's JSON shape. `type` selects the
    /// variant; `logic_and`/`logic_or` carry a `matchers` array,
    /// `logic_not` a `matcher` object.
    pub fn from_json(value: &Value) -> Result<Self, CoreError> {
        let tag = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| CoreError::MalformedMatcher {
                reason: "missing `type` field".to_string(),
            })?;

        match tag {
            "call_matcher" => {
                let ir: CallMatcherIr =
                    serde_json::from_value(value.clone()).map_err(|e| {
                        CoreError::MalformedMatcher {
                            reason: format!("call_matcher: {e}"),
                        }
                    })?;
                Ok(Self::CallMatcher(ir))
            }
            "variable_matcher" => {
                let ir: VariableMatcherIr =
                    serde_json::from_value(value.clone()).map_err(|e| {
                        CoreError::MalformedMatcher {
                            reason: format!("variable_matcher: {e}"),
                        }
                    })?;
                Ok(Self::VariableMatcher(ir))
            }
            "dataflow" => {
                let ir: DataflowIr = serde_json::from_value(value.clone()).map_err(|e| {
                    CoreError::MalformedMatcher {
                        reason: format!("dataflow: {e}"),
                    }
                })?;
                Ok(Self::Dataflow(Box::new(ir)))
            }
            "logic_and" | "logic_or" => {
                let raw = value.get("matchers").ok_or_else(|| CoreError::MalformedMatcher {
                    reason: format!("{tag}: missing `matchers` array"),
                })?;
                let items = raw.as_array().ok_or_else(|| CoreError::MalformedMatcher {
                    reason: format!("{tag}: `matchers` must be an array"),
                })?;
                if items.is_empty() {
                    return Err(CoreError::MalformedMatcher {
                        reason: format!("{tag}: `matchers` must be non-empty"),
                    });
                }
                let parsed = items
                    .iter()
                    .map(Self::from_json)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(if tag == "logic_and" {
                    Self::LogicAnd(parsed)
                } else {
                    Self::LogicOr(parsed)
                })
            }
            "logic_not" => {
                let inner = value.get("matcher").ok_or_else(|| CoreError::MalformedMatcher {
                    reason: "logic_not: missing `matcher` field".to_string(),
                })?;
                Ok(Self::LogicNot(Box::new(Self::from_json(inner)?)))
            }
            other if CONTAINER_TAGS.contains(&other) => Ok(Self::Container {
                tag: other.to_string(),
            }),
            other => Err(CoreError::UnknownMatcherType {
                tag: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_call_matcher() {
        let value = json!({
            "type": "call_matcher",
            "patterns": ["eval", "exec"],
            "wildcard_enabled": true,
            "match_mode": "any"
        });
        let ir = MatcherIr::from_json(&value).unwrap();
        assert!(matches!(ir, MatcherIr::CallMatcher(_)));
    }

    #[test]
    fn parses_nested_logic() {
        let value = json!({
            "type": "logic_and",
            "matchers": [
                {"type": "call_matcher", "patterns": ["eval"]},
                {"type": "logic_not", "matcher": {"type": "call_matcher", "patterns": ["escape"]}}
            ]
        });
        let ir = MatcherIr::from_json(&value).unwrap();
        match ir {
            MatcherIr::LogicAnd(items) => assert_eq!(items.len(), 2),
            _ => panic!("expected logic_and"),
        }
    }

    #[test]
    fn container_tags_are_accepted_as_no_op() {
        let value = json!({"type": "any_of"});
        let ir = MatcherIr::from_json(&value).unwrap();
        assert!(matches!(ir, MatcherIr::Container { .. }));
    }

    #[test]
    fn truly_unknown_tag_is_an_error() {
        let value = json!({"type": "wat"});
        let err = MatcherIr::from_json(&value).unwrap_err();
        assert!(matches!(err, CoreError::UnknownMatcherType { tag } if tag == "wat"));
    }

    #[test]
    fn logic_and_rejects_empty_list() {
        let value = json!({"type": "logic_and", "matchers": []});
        assert!(MatcherIr::from_json(&value).is_err());
    }
}
