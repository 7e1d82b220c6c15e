use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::Result;

pub const DEFAULT_OUTPUT: &str = "output.ta";
pub const DEFAULT_IGNORE_FILE: &str = "FuncIgnore.db";
pub const DEFAULT_INCLUDE_DIR: &str = "./include";

/// Everything the analyzer needs besides the root path.
#[derive(Debug, Clone, Default)]
pub struct AnalysisConfig {
    /// Directories searched for `#include` targets, treated as user code.
    pub include_dirs: Vec<PathBuf>,

    /// Directories whose headers are classified as system headers.
    pub system_include_dirs: Vec<PathBuf>,

    /// Path patterns excluded from traversal.
    pub ignore_patterns: Vec<String>,
}

impl AnalysisConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_include_dirs(mut self, dirs: Vec<PathBuf>) -> Self {
        self.include_dirs = dirs;
        self
    }

    pub fn with_system_include_dirs(mut self, dirs: Vec<PathBuf>) -> Self {
        self.system_include_dirs = dirs;
        self
    }

    pub fn with_ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.ignore_patterns = patterns;
        self
    }
}

/// Reads the ignore list sidecar file.
///
/// Lines are trimmed; blank lines and `#` comments are dropped. A missing file
/// yields an empty list.
pub fn load_ignore_patterns(path: &Path) -> Result<Vec<String>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!("No ignore list at {}", path.display());
            return Ok(Vec::new());
        }
        Err(err) => return Err(err.into()),
    };

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}
