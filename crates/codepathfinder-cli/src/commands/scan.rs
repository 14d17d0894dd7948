//! `scan`: run every discoverable rule against a pre-built call graph and
//! render the findings.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use codepathfinder_enrich::FileCache;
use codepathfinder_loader::{ProcessRuleSource, RuleSource};
use codepathfinder_report::OutputFormat;

use crate::{config, graph_input, rules_discovery};

pub struct ScanArgs {
    pub graph: PathBuf,
    pub rule_dirs: Vec<PathBuf>,
    pub format: OutputFormat,
    pub fail_on: Vec<String>,
    pub diff_file: Option<PathBuf>,
    pub project_root: Option<PathBuf>,
    pub context: usize,
}

pub fn run(args: ScanArgs) -> anyhow::Result<i32> {
    let graph = graph_input::load(&args.graph)?;

    let rule_files = rules_discovery::discover(&args.rule_dirs);
    let source = ProcessRuleSource::default();

    let mut errors: Vec<String> = Vec::new();
    let mut raw_by_rule = Vec::new();

    for rule_path in &rule_files {
        match source.load(rule_path) {
            Ok(loaded) => {
                for err in &loaded.rule_errors {
                    tracing::warn!(rule_path = %rule_path.display(), "malformed rule skipped: {err}");
                    errors.push(err.to_string());
                }
                for rule in loaded.rules {
                    let raw = codepathfinder_engine::dispatch_raw(&rule.matcher, &graph);
                    let deduped = codepathfinder_enrich::dedup_by_identity(raw);
                    raw_by_rule.push((rule, deduped));
                }
            }
            Err(err) => {
                tracing::warn!(rule_path = %rule_path.display(), "rule load failed: {err}");
                errors.push(format!("{}: {err}", rule_path.display()));
            }
        }
    }

    let mut cache = FileCache::new();
    let mut enriched = Vec::new();
    for (rule, raws) in &raw_by_rule {
        for raw in raws {
            enriched.push(codepathfinder_enrich::enrich(
                raw,
                &graph,
                rule,
                args.project_root.as_deref(),
                args.context,
                &mut cache,
            ));
        }
    }

    let changed_files = load_changed_files(args.diff_file.as_deref())?;
    let enriched = codepathfinder_report::diff_filter::apply(enriched, &changed_files);

    let timestamp = chrono::Utc::now().to_rfc3339();
    let rendered = codepathfinder_report::render(args.format, &enriched, &timestamp, errors.clone())?;
    println!("{rendered}");

    let had_errors = !errors.is_empty();
    let code = codepathfinder_report::exit_policy::evaluate(&enriched, &args.fail_on, had_errors)?;
    Ok(code)
}

fn load_changed_files(diff_file: Option<&Path>) -> anyhow::Result<HashSet<String>> {
    let Some(path) = diff_file else {
        return Ok(HashSet::new());
    };
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("cannot read diff file {}: {e}", path.display()))?;
    Ok(content.lines().map(str::trim).filter(|l| !l.is_empty()).map(str::to_string).collect())
}

/// Merge a loaded `.codepathfinder.toml` with CLI-flag overrides. CLI flags
/// win (§1): a file value is only used when the corresponding flag was not
/// passed.
pub fn merge_fail_on(cli: Vec<String>, file: &config::FileConfig) -> Vec<String> {
    if cli.is_empty() {
        file.fail_on.clone()
    } else {
        cli
    }
}
