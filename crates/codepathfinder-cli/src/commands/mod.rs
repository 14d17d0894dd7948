//! One module per subcommand, mirroring `tokf-cli::commands`'s
//! command-per-module convention.

pub mod check_rule;
pub mod rules_list;
pub mod scan;

/// Map a command result to a process exit code, logging the error the way
/// `tokf-cli`'s `or_exit` does. A config-class `CoreError` (an invalid
/// `--fail-on` token, or a formatter failure) exits 2, matching the same
/// code a scan with `had_errors` produces; anything else exits 1.
pub fn or_exit(result: anyhow::Result<i32>) -> i32 {
    match result {
        Ok(code) => code,
        Err(err) => {
            tracing::error!("{err:#}");
            match err.downcast_ref::<codepathfinder_common::CoreError>() {
                Some(
                    codepathfinder_common::CoreError::InvalidSeverity { .. }
                    | codepathfinder_common::CoreError::FormatWriteError(_),
                ) => 2,
                _ => 1,
            }
        }
    }
}
