use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;
use crate::matcher::MatcherIr;
use crate::severity::Severity;

/// A single rule, as loaded from a rule source (§6).
#[derive(Debug, Clone, Serialize)]
pub struct RuleRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cwe: Vec<String>,
    #[serde(default)]
    pub owasp: Vec<String>,
    #[serde(default)]
    pub references: Vec<String>,
    pub matcher: MatcherIr,
}

impl RuleRecord {
    /// Parse one rule object from the loader's JSON shape. `matcher` is
    /// itself a tagged `MatcherIr` and is parsed through
    /// `MatcherIr::from_json` rather than serde derive, for the same
    /// reason the top-level enum is hand-dispatched.
    pub fn from_json(value: &Value) -> Result<Self, CoreError> {
        let id = value
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| CoreError::MalformedMatcher {
                reason: "rule: missing `id` field".to_string(),
            })?
            .to_string();
        let name = value
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or(&id)
            .to_string();
        let severity = value
            .get("severity")
            .and_then(Value::as_str)
            .map(str::parse)
            .transpose()?
            .unwrap_or_default();
        let description = value
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string();
        let cwe = string_array(value, "cwe");
        let owasp = string_array(value, "owasp");
        let references = string_array(value, "references");
        let matcher_value = value.get("matcher").ok_or_else(|| CoreError::MalformedMatcher {
            reason: format!("rule {id:?}: missing `matcher` field"),
        })?;
        let matcher = MatcherIr::from_json(matcher_value)?;

        Ok(Self {
            id,
            name,
            severity,
            description,
            cwe,
            owasp,
            references,
            matcher,
        })
    }
}

fn string_array(value: &Value, key: &str) -> Vec<String> {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// The two shapes a rule source's top-level output may take (§6): a flat
/// array of rules, or a `{dockerfile, compose}` container-rule document
/// that this core accepts but does not evaluate.
#[derive(Debug, Default)]
pub struct LoadedRules {
    pub rules: Vec<RuleRecord>,
    /// Number of container-rule documents skipped (not an error).
    pub container_documents_skipped: usize,
    /// Per-rule parse failures (§7: "fatal for that rule only"). A rule
    /// file with some valid and some malformed entries still yields every
    /// valid `RuleRecord` in `rules`, with the malformed ones reported here
    /// instead of discarding the whole file.
    pub rule_errors: Vec<CoreError>,
}

impl LoadedRules {
    /// Parse the top-level JSON value produced by a rule source.
    pub fn from_json(value: &Value) -> Result<Self, CoreError> {
        match value {
            Value::Array(items) => {
                let mut rules = Vec::new();
                let mut rule_errors = Vec::new();
                for item in items {
                    match RuleRecord::from_json(item) {
                        Ok(rule) => rules.push(rule),
                        Err(err) => rule_errors.push(err),
                    }
                }
                Ok(Self {
                    rules,
                    container_documents_skipped: 0,
                    rule_errors,
                })
            }
            Value::Object(map) if map.contains_key("dockerfile") || map.contains_key("compose") => {
                Ok(Self {
                    rules: Vec::new(),
                    container_documents_skipped: 1,
                    rule_errors: Vec::new(),
                })
            }
            other => Err(CoreError::RuleParseError {
                rule_path: std::path::PathBuf::new(),
                reason: format!(
                    "expected a rule array or a {{dockerfile, compose}} document, got {other}"
                ),
            }),
        }
    }
}

/// A rule record deserialized directly (used by `check-rule` and tests
/// where the matcher shape is already known to be well-formed JSON text,
/// not routed through a rule source).
impl<'de> Deserialize<'de> for RuleRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_json(&value).map_err(serde::de::Error::custom)
    }
}
