//! `check-rule`: load a single rule file through the same rule source a
//! scan would use, without running it against a graph.

use std::path::Path;

use codepathfinder_loader::{ProcessRuleSource, RuleSource};

pub fn run(path: &Path) -> anyhow::Result<i32> {
    let source = ProcessRuleSource::default();
    match source.load(path) {
        Ok(loaded) => {
            if loaded.container_documents_skipped > 0 {
                println!("{}: container-rule document, nothing to evaluate", path.display());
                return Ok(0);
            }
            println!("{}: {} rule(s) parsed ok", path.display(), loaded.rules.len());
            for rule in &loaded.rules {
                println!("  {} [{}] {}", rule.id, rule.severity, rule.name);
            }
            Ok(0)
        }
        Err(err) => {
            println!("{}: {err}", path.display());
            Ok(1)
        }
    }
}
