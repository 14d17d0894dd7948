//! Wildcard pattern matching, tuple-element extraction, and value coercion.

use codepathfinder_common::ConstraintValue;

/// Strip one matching pair of leading/trailing quote characters, if present.
fn strip_quotes(s: &str) -> &str {
    let bytes = s.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        let last = bytes[bytes.len() - 1];
        if (first == b'\'' || first == b'"') && first == last {
            return &s[1..s.len() - 1];
        }
    }
    s
}

/// Trim whitespace, strip surrounding quotes, and fold boolean/null tokens
/// to their canonical lowercase spelling.
fn normalize_text(text: &str) -> String {
    let trimmed = strip_quotes(text.trim());
    let lower = trimmed.to_ascii_lowercase();
    match lower.as_str() {
        "true" => "true".to_string(),
        "false" => "false".to_string(),
        "none" | "null" | "nil" => "none".to_string(),
        _ => trimmed.to_string(),
    }
}

/// `matches(text, pattern, wildcard_enabled)` (§4.1).
///
/// With wildcards disabled, compares normalized `text` to `pattern` for
/// exact equality. With wildcards enabled, `pattern` may contain `*`
/// (zero or more characters) and `?` (exactly one).
pub fn matches(text: &str, pattern: &str, wildcard_enabled: bool) -> bool {
    let normalized = normalize_text(text);
    if wildcard_enabled {
        glob_match(&normalized, pattern)
    } else {
        normalized == pattern
    }
}

/// Two-pointer wildcard match with `*`-backtracking.
fn glob_match(text: &str, pattern: &str) -> bool {
    let s: Vec<char> = text.chars().collect();
    let p: Vec<char> = pattern.chars().collect();
    let (mut si, mut pi) = (0usize, 0usize);
    let mut star: Option<usize> = None;
    let mut star_match = 0usize;

    while si < s.len() {
        if pi < p.len() && (p[pi] == '?' || p[pi] == s[si]) {
            si += 1;
            pi += 1;
        } else if pi < p.len() && p[pi] == '*' {
            star = Some(pi);
            star_match = si;
            pi += 1;
        } else if let Some(star_pi) = star {
            pi = star_pi + 1;
            star_match += 1;
            si = star_match;
        } else {
            return false;
        }
    }

    while pi < p.len() && p[pi] == '*' {
        pi += 1;
    }
    pi == p.len()
}

/// `extract(literal, index)` (§4.1). Returns `None` for a not-ok result;
/// `Some(String::new())` is a valid (empty) extraction.
pub fn extract(literal: &str, index: usize) -> Option<String> {
    let trimmed = literal.trim();
    if !trimmed.starts_with('(') && !trimmed.starts_with('[') {
        return if index == 0 {
            Some(strip_quotes(trimmed).to_string())
        } else {
            None
        };
    }
    if trimmed.len() < 2 {
        return None;
    }
    let inner = &trimmed[1..trimmed.len() - 1];
    // Naive comma split — nested brackets are not understood (§9 Open
    // Question b). This is intentional: a reimplementation must not
    // second-guess the user's literal structure.
    let elements: Vec<&str> = if inner.trim().is_empty() {
        Vec::new()
    } else {
        inner.split(',').collect()
    };
    elements
        .get(index)
        .map(|raw| strip_quotes(raw.trim()).to_string())
}

/// Parse a boolean token per §4.1: `true/false/1/0` case-insensitively.
fn coerce_bool(text: &str) -> Option<bool> {
    match strip_quotes(text.trim()).to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

/// Parse a number token per §4.1: decimal, `0o`-octal, `0x`-hex, or float,
/// all compared as floating point.
fn coerce_number(text: &str) -> Option<f64> {
    let raw = strip_quotes(text.trim());
    let lower = raw.to_ascii_lowercase();
    if let Some(hex) = lower.strip_prefix("0x") {
        return i64::from_str_radix(hex, 16).ok().map(|v| v as f64);
    }
    if let Some(oct) = lower.strip_prefix("0o") {
        return i64::from_str_radix(oct, 8).ok().map(|v| v as f64);
    }
    raw.parse::<f64>().ok()
}

fn is_null_token(text: &str) -> bool {
    matches!(
        strip_quotes(text.trim()).to_ascii_lowercase().as_str(),
        "none" | "null" | "nil"
    )
}

/// Match extracted text against a constraint value (§4.1, §4.3). A list
/// value is the logical OR of matching against each element.
pub fn match_value(text: &str, value: &ConstraintValue, wildcard_enabled: bool) -> bool {
    match value {
        ConstraintValue::Str(s) => matches(text, s, wildcard_enabled),
        ConstraintValue::Bool(b) => coerce_bool(text) == Some(*b),
        ConstraintValue::Number(n) => coerce_number(text).is_some_and(|v| (v - n).abs() < f64::EPSILON),
        ConstraintValue::Null => is_null_token(text),
        ConstraintValue::List(items) => items
            .iter()
            .any(|item| match_value(text, item, wildcard_enabled)),
    }
}
