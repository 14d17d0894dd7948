mod commands;
mod config;
mod graph_input;
mod logging;
mod rules_discovery;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "codepathfinder",
    version,
    about = "Rule-driven static analysis for call-graph and AST taint detection"
)]
struct Cli {
    /// Path to `.codepathfinder.toml`. When omitted, discovered by walking
    /// up from the current directory.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run rules against a pre-built call graph and report findings
    Scan {
        /// Path to the call-graph JSON document produced by the code-graph builder
        #[arg(long)]
        graph: PathBuf,
        /// Directory to search for rule files (repeatable)
        #[arg(long = "rules", required = true)]
        rule_dirs: Vec<PathBuf>,
        /// Output format: text, json, sarif, or csv
        #[arg(long, default_value = "text")]
        format: String,
        /// Exit non-zero if any finding meets or exceeds these severities (repeatable)
        #[arg(long = "fail-on")]
        fail_on: Vec<String>,
        /// Restrict findings to files listed in this newline-delimited file
        #[arg(long)]
        diff_file: Option<PathBuf>,
        /// Project root for computing relative paths in findings
        #[arg(long)]
        project_root: Option<PathBuf>,
        /// Lines of context around each sink line in a snippet
        #[arg(long, default_value_t = 3)]
        context: usize,
    },
    /// Validate a single rule file without running it
    CheckRule {
        /// Path to the rule file
        path: PathBuf,
    },
    /// List loadable rule files under one or more directories
    Rules {
        #[command(subcommand)]
        action: RulesAction,
    },
}

#[derive(Subcommand)]
enum RulesAction {
    /// List loadable rule files
    List {
        /// Directory to search (repeatable)
        #[arg(required = true)]
        dirs: Vec<PathBuf>,
    },
}

fn main() {
    logging::init();
    let cli = Cli::parse();
    let code = commands::or_exit(run(cli));
    std::process::exit(code);
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    let file_config = resolve_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Scan {
            graph,
            rule_dirs,
            format,
            fail_on,
            diff_file,
            project_root,
            context,
        } => {
            let format = format.parse().map_err(|e| anyhow::anyhow!("{e}"))?;
            let fail_on = commands::scan::merge_fail_on(fail_on, &file_config);
            let diff_file = diff_file.or(file_config.diff_file.clone());
            let context = if context != 3 {
                context
            } else {
                file_config.context.unwrap_or(context)
            };
            let rule_dirs = if rule_dirs.is_empty() {
                file_config.rule_dirs.clone()
            } else {
                rule_dirs
            };
            commands::scan::run(commands::scan::ScanArgs {
                graph,
                rule_dirs,
                format,
                fail_on,
                diff_file,
                project_root,
                context,
            })
        }
        Commands::CheckRule { path } => commands::check_rule::run(&path),
        Commands::Rules {
            action: RulesAction::List { dirs },
        } => commands::rules_list::run(&dirs),
    }
}

fn resolve_config(explicit: Option<&std::path::Path>) -> anyhow::Result<config::FileConfig> {
    let path = match explicit {
        Some(p) => Some(p.to_path_buf()),
        None => {
            let cwd = std::env::current_dir()?;
            config::discover(&cwd)
        }
    };
    match path {
        Some(p) => config::load(&p),
        None => Ok(config::FileConfig::default()),
    }
}
