use std::path::PathBuf;

/// Errors the core engine must distinguish, per the error-handling design.
///
/// Rule-scoped variants never abort a scan — the CLI driver catches them,
/// logs a warning, and folds them into the JSON `errors` array. Only
/// `InvalidSeverity` and `FormatWriteError` are fatal for the whole run.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("rule load timed out after {deadline_secs}s: {rule_path}")]
    RuleLoadTimeout {
        rule_path: PathBuf,
        deadline_secs: u64,
    },

    #[error("failed to parse rule output from {rule_path}: {reason}")]
    RuleParseError { rule_path: PathBuf, reason: String },

    #[error("unknown matcher type {tag:?}")]
    UnknownMatcherType { tag: String },

    #[error("malformed matcher: {reason}")]
    MalformedMatcher { reason: String },

    #[error("cannot read source file {path}: {source}")]
    MissingFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid severity token in fail-on policy: {token:?}")]
    InvalidSeverity { token: String },

    #[error("failed to write output: {0}")]
    FormatWriteError(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
