use serde::{Deserialize, Serialize};

/// One argument attached to a call site.
///
/// `value` is the textual representation exactly as it appears in source,
/// including surrounding quotes and tuple/list brackets for literals.
/// Keyword arguments are represented by the `name=value` textual
/// convention within `value` — there is no separate `name` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argument {
    pub value: String,
    pub is_variable: bool,
    pub position: usize,
}

impl Argument {
    pub const fn new(value: String, is_variable: bool, position: usize) -> Self {
        Self {
            value,
            is_variable,
            position,
        }
    }

    /// Split a `key=value` keyword argument on the first `=`, trimming
    /// whitespace on both sides. Returns `None` when there is no `=`, or
    /// when the key half is empty after trimming.
    pub fn as_keyword(&self) -> Option<(&str, &str)> {
        let (key, value) = self.value.split_once('=')?;
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        Some((key, value.trim()))
    }
}

/// A position key from a matcher's positional-argument constraint map:
/// either a plain index (`N`) or a tuple-element selector (`N[K]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionKey {
    Index(usize),
    TupleElement { position: usize, index: usize },
}

impl PositionKey {
    /// Parse `"N"` or `"N[K]"`. Any other shape is rejected — the caller
    /// (argument evaluation) treats a parse failure as constraint failure.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if let Some(bracket) = raw.find('[') {
            if !raw.ends_with(']') {
                return None;
            }
            let position: usize = raw[..bracket].parse().ok()?;
            let index: usize = raw[bracket + 1..raw.len() - 1].parse().ok()?;
            Some(Self::TupleElement { position, index })
        } else {
            raw.parse().ok().map(Self::Index)
        }
    }

    pub const fn base_position(self) -> usize {
        match self {
            Self::Index(p) | Self::TupleElement { position: p, .. } => p,
        }
    }
}

/// A constraint value: a scalar, or a list meaning OR-of-alternatives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConstraintValue {
    Str(String),
    Bool(bool),
    Number(f64),
    Null,
    List(Vec<ConstraintValue>),
}

/// An argument constraint: a value to match against, plus whether the
/// comparison is wildcard-enabled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArgumentConstraint {
    pub value: ConstraintValue,
    #[serde(default)]
    pub wildcard_enabled: bool,
}

impl ArgumentConstraint {
    pub const fn new(value: ConstraintValue, wildcard_enabled: bool) -> Self {
        Self {
            value,
            wildcard_enabled,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn position_key_parses_plain_index() {
        assert_eq!(PositionKey::parse("2"), Some(PositionKey::Index(2)));
    }

    #[test]
    fn position_key_parses_tuple_element() {
        assert_eq!(
            PositionKey::parse("0[1]"),
            Some(PositionKey::TupleElement {
                position: 0,
                index: 1
            })
        );
    }

    #[test]
    fn position_key_rejects_malformed() {
        assert_eq!(PositionKey::parse("0["), None);
        assert_eq!(PositionKey::parse("abc"), None);
    }

    #[test]
    fn keyword_split_takes_first_equals_and_trims() {
        let arg = Argument::new("Loader = FullLoader=x".to_string(), false, 0);
        assert_eq!(arg.as_keyword(), Some(("Loader", "FullLoader=x")));
    }

    #[test]
    fn keyword_rejects_empty_key() {
        let arg = Argument::new(" =value".to_string(), false, 0);
        assert_eq!(arg.as_keyword(), None);
    }

    #[test]
    fn keyword_accepts_empty_value() {
        let arg = Argument::new("key=".to_string(), false, 0);
        assert_eq!(arg.as_keyword(), Some(("key", "")));
    }
}
