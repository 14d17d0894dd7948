//! `rules list`: enumerate loadable rule files under one or more
//! directories.

use std::path::PathBuf;

use crate::rules_discovery;

pub fn run(dirs: &[PathBuf]) -> anyhow::Result<i32> {
    let files = rules_discovery::discover(dirs);
    if files.is_empty() {
        println!("no rule files found");
        return Ok(0);
    }
    for file in &files {
        println!("{}", file.display());
    }
    Ok(0)
}
