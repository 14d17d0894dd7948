//! Exit policy (C11, §4.11): `had_errors` beats any matching severity beats
//! clean exit.

use codepathfinder_common::{CoreError, EnrichedDetection, Result, Severity};

pub const EXIT_ERROR: i32 = 2;
pub const EXIT_FINDINGS: i32 = 1;
pub const EXIT_SUCCESS: i32 = 0;

/// Parse the fail-on token list, case-insensitively, preserving the
/// offending token's original case in any error.
fn parse_fail_on(tokens: &[String]) -> Result<Vec<Severity>> {
    tokens.iter().map(|t| t.parse::<Severity>()).collect()
}

pub fn evaluate(detections: &[EnrichedDetection], fail_on: &[String], had_errors: bool) -> Result<i32> {
    if had_errors {
        return Ok(EXIT_ERROR);
    }
    let fail_on = parse_fail_on(fail_on)?;
    let any_match = detections
        .iter()
        .any(|d| fail_on.contains(&d.rule.severity));
    Ok(if any_match { EXIT_FINDINGS } else { EXIT_SUCCESS })
}
