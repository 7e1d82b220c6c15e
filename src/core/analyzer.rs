use anyhow::Result;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::extractor::{EntityExtractor, ExtractionStats};
use super::graph::GraphStore;
use super::ignore::IgnoreList;
use super::provider::TraversalProvider;
use super::scanner::FileScanner;
use crate::config::AnalysisConfig;
use crate::parsers::{CppTranslationUnit, IncludeResolver};

/// Units parsed concurrently before their events are handed to the extractor.
pub const PARSE_BATCH_SIZE: usize = 64;

#[derive(Debug)]
pub struct AnalysisReport {
    pub graph: GraphStore,
    pub units: usize,
    /// Units that could not be read or parsed at all.
    pub failed_units: Vec<PathBuf>,
    /// Units that parsed with syntax errors and contributed a partial result.
    pub units_with_errors: Vec<PathBuf>,
    pub stats: ExtractionStats,
}

impl AnalysisReport {
    fn empty() -> Self {
        Self {
            graph: GraphStore::new(),
            units: 0,
            failed_units: Vec::new(),
            units_with_errors: Vec::new(),
            stats: ExtractionStats::default(),
        }
    }

    pub fn has_compilation_errors(&self) -> bool {
        !self.failed_units.is_empty() || !self.units_with_errors.is_empty()
    }
}

pub struct CodebaseAnalyzer {
    file_scanner: FileScanner,
    includes: IncludeResolver,
    batch_size: usize,
}

impl CodebaseAnalyzer {
    pub fn new() -> Self {
        Self {
            file_scanner: FileScanner::new(),
            includes: IncludeResolver::default(),
            batch_size: PARSE_BATCH_SIZE,
        }
    }

    pub fn with_config(config: &AnalysisConfig) -> Result<Self> {
        let ignore = IgnoreList::new(&config.ignore_patterns)?;
        Ok(Self {
            file_scanner: FileScanner::with_ignore_list(ignore),
            includes: IncludeResolver::from_config(config)?,
            batch_size: PARSE_BATCH_SIZE,
        })
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Translation units under `root_path`, in the order they are analyzed.
    pub fn scan(&self, root_path: &Path) -> Result<Vec<PathBuf>> {
        self.file_scanner.scan_directory(root_path)
    }

    pub fn analyze(&self, root_path: &Path) -> Result<AnalysisReport> {
        let files = self.scan(root_path)?;
        Ok(self.analyze_files(&files))
    }

    /// Parses `files` in parallel batches and extracts their events in file
    /// order, so the graph matches a sequential run.
    pub fn analyze_files(&self, files: &[PathBuf]) -> AnalysisReport {
        if files.is_empty() {
            return AnalysisReport::empty();
        }

        let mut extractor = EntityExtractor::new();
        let mut report = AnalysisReport::empty();
        report.units = files.len();

        for batch in files.chunks(self.batch_size) {
            let parsed: Vec<(&PathBuf, Result<CppTranslationUnit>)> = batch
                .par_iter()
                .map(|path| (path, CppTranslationUnit::parse(path, &self.includes)))
                .collect();

            for (path, unit) in parsed {
                match unit {
                    Ok(unit) => {
                        if unit.has_syntax_errors() {
                            warn!(
                                "Syntax errors in {}; using recovered declarations",
                                path.display()
                            );
                            report.units_with_errors.push(path.clone());
                        }
                        debug!(
                            "Extracting {} ({} files, {} matches)",
                            path.display(),
                            unit.file_count(),
                            unit.events().len()
                        );
                        extractor.process_unit(&unit);
                    }
                    Err(err) => {
                        warn!("Failed to process {}: {}", path.display(), err);
                        report.failed_units.push(path.clone());
                    }
                }
            }
        }

        report.stats = extractor.stats();
        report.graph = extractor.into_graph();
        info!(
            "Extracted {} classes, {} functions, {} contains edges, {} call edges",
            report.graph.classes().len(),
            report.graph.functions().len(),
            report.graph.contains_edges().len(),
            report.graph.call_edges().len()
        );
        report
    }
}

impl Default for CodebaseAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
