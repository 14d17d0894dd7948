//! `.codepathfinder.toml` discovery and loading. Discovery walks up from
//! the current directory the way `tokf`'s filter resolution walks its
//! search path (grounded on `tokf-cli::config::tests_discovery`'s
//! directory-walking contract), rather than pinning to a single fixed
//! location.

use std::path::{Path, PathBuf};

use serde::Deserialize;

const CONFIG_FILE_NAME: &str = ".codepathfinder.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub rule_dirs: Vec<PathBuf>,
    pub fail_on: Vec<String>,
    pub format: Option<String>,
    pub context: Option<usize>,
    pub diff_file: Option<PathBuf>,
}

/// Walk up from `start` looking for `.codepathfinder.toml`, stopping at the
/// first ancestor that has one.
pub fn discover(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

pub fn load(path: &Path) -> anyhow::Result<FileConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("cannot read {}: {e}", path.display()))?;
    toml::from_str(&content).map_err(|e| anyhow::anyhow!("cannot parse {}: {e}", path.display()))
}
