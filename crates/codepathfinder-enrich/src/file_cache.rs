//! Read-once file-content cache keyed by absolute path (§4.9, §5 "the
//! enricher owns its file-content cache exclusively").

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use codepathfinder_common::{CoreError, Result};

#[derive(Debug, Default)]
pub struct FileCache {
    lines: HashMap<PathBuf, Vec<String>>,
}

impl FileCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached lines for `path`, reading and splitting the file
    /// on first access. A read failure is returned to the caller rather
    /// than cached — the next lookup will retry.
    pub fn lines(&mut self, path: &Path) -> Result<&[String]> {
        if !self.lines.contains_key(path) {
            let content = fs::read_to_string(path).map_err(|source| CoreError::MissingFile {
                path: path.to_path_buf(),
                source,
            })?;
            let lines: Vec<String> = content.lines().map(str::to_string).collect();
            self.lines.insert(path.to_path_buf(), lines);
        }
        Ok(self.lines[path].as_slice())
    }
}
