use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Finding severity, normalized to lowercase on the wire (§4.9, §4.11).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// All severities in the order the text formatter groups them.
    pub const ORDER: [Severity; 5] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
        Severity::Info,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Info => "info",
        }
    }

    /// `security-severity` score used by the SARIF formatter.
    pub const fn sarif_security_severity(self) -> f64 {
        match self {
            Self::Critical => 9.0,
            Self::High => 7.0,
            Self::Medium => 5.0,
            Self::Low | Self::Info => 3.0,
        }
    }

    /// SARIF result `level` mapping: critical/high → error, medium → warning,
    /// low/info → note.
    pub const fn sarif_level(self) -> &'static str {
        match self {
            Self::Critical | Self::High => "error",
            Self::Medium => "warning",
            Self::Low | Self::Info => "note",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.to_ascii_lowercase().as_str() {
            "critical" => Ok(Self::Critical),
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            "info" => Ok(Self::Info),
            _ => Err(CoreError::InvalidSeverity {
                token: raw.to_string(),
            }),
        }
    }
}

impl Default for Severity {
    fn default() -> Self {
        Self::Medium
    }
}

/// §9: "the literals 0.7 (local), 0.8 (global), 1.0 (structural)... ≥0.8
/// high, ≥0.5 medium, else low." Confidence is not clamped here; callers
/// are expected to pass values already in `[0.0, 1.0]`.
pub fn confidence_level(confidence: f64) -> Severity {
    if confidence >= 0.8 {
        Severity::High
    } else if confidence >= 0.5 {
        Severity::Medium
    } else {
        Severity::Low
    }
}
