use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use crate::config::AnalysisConfig;
use crate::core::ignore::IgnoreList;
use crate::error::Result;

/// Where a file entered the translation unit from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOrigin {
    User,
    System,
}

/// Parsed `#include` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncludeDirective {
    /// `#include "name"`
    Quoted(String),
    /// `#include <name>`
    Angled(String),
}

impl IncludeDirective {
    /// Parses the directive's path token, quotes or brackets included.
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.trim();
        if let Some(name) = token.strip_prefix('"').and_then(|t| t.strip_suffix('"')) {
            return Some(Self::Quoted(name.to_string()));
        }
        if let Some(name) = token.strip_prefix('<').and_then(|t| t.strip_suffix('>')) {
            return Some(Self::Angled(name.to_string()));
        }
        None
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Quoted(name) | Self::Angled(name) => name,
        }
    }
}

/// Maps include directives to header files on disk.
#[derive(Debug, Clone, Default)]
pub struct IncludeResolver {
    user_dirs: Vec<PathBuf>,
    system_dirs: Vec<PathBuf>,
    ignore: IgnoreList,
}

impl IncludeResolver {
    pub fn new(user_dirs: Vec<PathBuf>, system_dirs: Vec<PathBuf>, ignore: IgnoreList) -> Self {
        Self {
            user_dirs,
            system_dirs,
            ignore,
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Result<Self> {
        Ok(Self::new(
            config.include_dirs.clone(),
            config.system_include_dirs.clone(),
            IgnoreList::new(&config.ignore_patterns)?,
        ))
    }

    /// Quoted includes search the including file's directory first and inherit
    /// its origin. Both forms then search user and system directories, in that
    /// order. Ignored headers resolve to `None`.
    pub fn resolve(
        &self,
        directive: &IncludeDirective,
        includer: &Path,
        includer_origin: FileOrigin,
    ) -> Option<(PathBuf, FileOrigin)> {
        let name = directive.name();

        let relative = match directive {
            IncludeDirective::Quoted(_) => includer
                .parent()
                .map(|dir| (dir.join(name), includer_origin)),
            IncludeDirective::Angled(_) => None,
        };

        let searched = self
            .user_dirs
            .iter()
            .map(|dir| (dir.join(name), FileOrigin::User))
            .chain(
                self.system_dirs
                    .iter()
                    .map(|dir| (dir.join(name), FileOrigin::System)),
            );

        let found = relative
            .into_iter()
            .chain(searched)
            .find(|(candidate, _)| candidate.is_file());

        match found {
            Some((path, _)) if self.ignore.is_ignored(&path) => {
                debug!("Ignoring header {}", path.display());
                None
            }
            Some(found) => Some(found),
            None => {
                trace!(include = name, "unresolved include");
                None
            }
        }
    }
}

/// Key used to parse each header at most once per translation unit.
pub fn visit_key(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
