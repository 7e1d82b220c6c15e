use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::Path;

use crate::error::{FuncGraphError, Result};

const GLOB_META: [char; 4] = ['*', '?', '[', '{'];

/// Path patterns excluded from traversal.
///
/// Patterns with glob metacharacters are matched as globs against the whole
/// path; any other pattern matches when it occurs anywhere in the path.
#[derive(Debug, Clone)]
pub struct IgnoreList {
    literals: Vec<String>,
    globs: GlobSet,
}

impl IgnoreList {
    pub fn new(patterns: &[String]) -> Result<Self> {
        let mut literals = Vec::new();
        let mut builder = GlobSetBuilder::new();

        for pattern in patterns {
            if pattern.contains(&GLOB_META[..]) {
                let glob = Glob::new(pattern).map_err(|source| FuncGraphError::IgnorePattern {
                    pattern: pattern.clone(),
                    source,
                })?;
                builder.add(glob);
            } else {
                literals.push(pattern.clone());
            }
        }

        let globs = builder
            .build()
            .map_err(|source| FuncGraphError::IgnorePattern {
                pattern: patterns.join(", "),
                source,
            })?;

        Ok(Self { literals, globs })
    }

    pub fn empty() -> Self {
        Self {
            literals: Vec::new(),
            globs: GlobSet::empty(),
        }
    }

    pub fn is_ignored(&self, path: &Path) -> bool {
        let text = path.to_string_lossy();
        self.literals.iter().any(|literal| text.contains(literal.as_str()))
            || self.globs.is_match(path)
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty() && self.globs.is_empty()
    }
}

impl Default for IgnoreList {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_patterns_match_substrings() {
        let list = IgnoreList::new(&["third_party/".to_string()]).unwrap();
        assert!(list.is_ignored(Path::new("/src/third_party/zlib/inflate.c")));
        assert!(!list.is_ignored(Path::new("/src/core/main.cpp")));
    }

    #[test]
    fn glob_patterns_match_whole_paths() {
        let list = IgnoreList::new(&["**/*_test.cpp".to_string()]).unwrap();
        assert!(list.is_ignored(Path::new("src/parser_test.cpp")));
        assert!(!list.is_ignored(Path::new("src/parser.cpp")));
    }

    #[test]
    fn invalid_globs_are_reported() {
        let err = IgnoreList::new(&["src/[".to_string()]).unwrap_err();
        assert!(matches!(err, FuncGraphError::IgnorePattern { .. }));
    }

    #[test]
    fn empty_list_ignores_nothing() {
        let list = IgnoreList::empty();
        assert!(list.is_empty());
        assert!(!list.is_ignored(Path::new("a.cpp")));
    }
}
