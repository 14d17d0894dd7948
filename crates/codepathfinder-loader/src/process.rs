//! Subprocess-based `RuleSource`: runs the rule file as its own program,
//! enforcing a wall-clock deadline and parsing its full stdout as one JSON
//! document (§5: "output of the sandboxed process is consumed as a whole
//! — no streaming").

use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use codepathfinder_common::{CoreError, LoadedRules, Result};

use crate::RuleSource;

const DEFAULT_DEADLINE: Duration = Duration::from_secs(30);
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Runs `path` as a subprocess with no arguments, capturing stdout.
pub struct ProcessRuleSource {
    deadline: Duration,
}

impl Default for ProcessRuleSource {
    fn default() -> Self {
        Self {
            deadline: DEFAULT_DEADLINE,
        }
    }
}

impl ProcessRuleSource {
    pub const fn with_deadline(deadline: Duration) -> Self {
        Self { deadline }
    }

    fn run(&self, path: &Path) -> Result<String> {
        let mut child = Command::new(path)
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| CoreError::MissingFile {
                path: path.to_path_buf(),
                source,
            })?;

        let mut stdout = child.stdout.take().ok_or_else(|| {
            CoreError::RuleParseError {
                rule_path: path.to_path_buf(),
                reason: "rule subprocess did not expose stdout".to_string(),
            }
        })?;

        // Reading blocks until the pipe closes (process exit, or our kill
        // below forcing it closed), so it runs on its own thread while the
        // main thread polls for the deadline.
        let reader = thread::spawn(move || {
            let mut buf = String::new();
            stdout.read_to_string(&mut buf).map(|_| buf)
        });

        let start = Instant::now();
        loop {
            match child.try_wait() {
                Ok(Some(_status)) => break,
                Ok(None) => {
                    if start.elapsed() >= self.deadline {
                        let _ = child.kill();
                        let _ = child.wait();
                        let _ = reader.join();
                        return Err(CoreError::RuleLoadTimeout {
                            rule_path: path.to_path_buf(),
                            deadline_secs: self.deadline.as_secs(),
                        });
                    }
                    thread::sleep(POLL_INTERVAL);
                }
                Err(e) => {
                    return Err(CoreError::RuleParseError {
                        rule_path: path.to_path_buf(),
                        reason: format!("failed to poll rule subprocess: {e}"),
                    });
                }
            }
        }

        reader.join().map_or_else(
            |_| {
                Err(CoreError::RuleParseError {
                    rule_path: path.to_path_buf(),
                    reason: "rule subprocess stdout reader thread panicked".to_string(),
                })
            },
            |read_result| {
                read_result.map_err(|e| CoreError::RuleParseError {
                    rule_path: path.to_path_buf(),
                    reason: format!("failed to read rule subprocess stdout: {e}"),
                })
            },
        )
    }
}

impl RuleSource for ProcessRuleSource {
    fn load(&self, path: &Path) -> Result<LoadedRules> {
        let stdout = self.run(path)?;
        let value: serde_json::Value =
            serde_json::from_str(&stdout).map_err(|e| CoreError::RuleParseError {
                rule_path: path.to_path_buf(),
                reason: format!("invalid JSON from rule subprocess: {e}"),
            })?;
        let mut loaded = LoadedRules::from_json(&value).map_err(|e| match e {
            CoreError::RuleParseError { reason, .. } => CoreError::RuleParseError {
                rule_path: path.to_path_buf(),
                reason,
            },
            other => other,
        })?;

        // Per-rule errors carry no path of their own (they come from inside
        // the array); stamp this rule file's path onto each one so callers
        // can report which file a malformed rule came from.
        loaded.rule_errors = loaded
            .rule_errors
            .into_iter()
            .map(|e| CoreError::RuleParseError {
                rule_path: path.to_path_buf(),
                reason: e.to_string(),
            })
            .collect();
        Ok(loaded)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;

    fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        let mut f = fs::File::create(&path).unwrap();
        writeln!(f, "#!/bin/sh").unwrap();
        writeln!(f, "{body}").unwrap();
        drop(f);
        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).unwrap();
        path
    }

    #[test]
    fn parses_rule_array_from_subprocess_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let script = write_script(
            &dir,
            "rule.sh",
            r#"echo '[{"id":"PY-EVAL-001","matcher":{"type":"call_matcher","patterns":["eval"]}}]'"#,
        );
        let source = ProcessRuleSource::default();
        let loaded = source.load(&script).unwrap();
        assert_eq!(loaded.rules.len(), 1);
        assert_eq!(loaded.rules[0].id, "PY-EVAL-001");
    }

    #[test]
    fn skips_container_document_silently() {
        let dir = tempfile::tempdir().unwrap();
        let script = write_script(&dir, "rule.sh", r#"echo '{"dockerfile":[],"compose":[]}'"#);
        let source = ProcessRuleSource::default();
        let loaded = source.load(&script).unwrap();
        assert!(loaded.rules.is_empty());
        assert_eq!(loaded.container_documents_skipped, 1);
    }

    #[test]
    fn mixed_valid_and_malformed_rules_surfaces_both() {
        let dir = tempfile::tempdir().unwrap();
        let script = write_script(
            &dir,
            "rule.sh",
            r#"echo '[{"id":"A","matcher":{"type":"call_matcher","patterns":["eval"]}},{"id":"B","severity":"sev9","matcher":{"type":"call_matcher","patterns":["exec"]}}]'"#,
        );
        let source = ProcessRuleSource::default();
        let loaded = source.load(&script).unwrap();
        assert_eq!(loaded.rules.len(), 1);
        assert_eq!(loaded.rules[0].id, "A");
        assert_eq!(loaded.rule_errors.len(), 1);
        assert!(matches!(
            &loaded.rule_errors[0],
            CoreError::RuleParseError { rule_path, .. } if rule_path == &script
        ));
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let script = write_script(&dir, "rule.sh", "echo 'not json'");
        let source = ProcessRuleSource::default();
        let err = source.load(&script).unwrap_err();
        assert!(matches!(err, CoreError::RuleParseError { .. }));
    }

    #[test]
    fn exceeding_deadline_kills_process_and_times_out() {
        let dir = tempfile::tempdir().unwrap();
        let script = write_script(&dir, "rule.sh", "sleep 5");
        let source = ProcessRuleSource::with_deadline(Duration::from_millis(100));
        let err = source.load(&script).unwrap_err();
        assert!(matches!(err, CoreError::RuleLoadTimeout { .. }));
    }
}
