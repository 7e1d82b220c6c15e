use anyhow::Result;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::ignore::IgnoreList;

/// Extensions of translation units. Headers are reached through `#include`.
pub const SOURCE_EXTENSIONS: [&str; 4] = ["c", "cc", "cpp", "cxx"];

#[derive(Debug, Clone, Default)]
pub struct FileScanner {
    ignore: IgnoreList,
}

impl FileScanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ignore_list(ignore: IgnoreList) -> Self {
        Self { ignore }
    }

    /// C/C++ source files under `root_path`, sorted by path.
    pub fn scan_directory(&self, root_path: &Path) -> Result<Vec<PathBuf>> {
        if !root_path.is_dir() {
            anyhow::bail!("Not a directory: {}", root_path.display());
        }

        // Collect all entries first for parallel processing
        let entries: Vec<_> = WalkDir::new(root_path)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|entry| entry.file_type().is_file())
            .collect();

        let mut files: Vec<PathBuf> = entries
            .par_iter()
            .map(|entry| entry.path())
            .filter(|path| is_source_file(path))
            .filter(|path| !self.ignore.is_ignored(path))
            .map(Path::to_path_buf)
            .collect();

        files.sort();
        Ok(files)
    }
}

pub fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}
