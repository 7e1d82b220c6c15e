use serde::Serialize;
use std::borrow::Cow;
use std::fs;
use std::path::Path;

use super::IdMode;
use crate::core::{Edge, GraphStore};
use crate::error::{FuncGraphError, Result};

#[derive(Serialize)]
struct Meta {
    classes: usize,
    functions: usize,
    contains: usize,
    calls: usize,
    anonymized: bool,
}

#[derive(Serialize)]
struct CompactGraph<'a> {
    meta: Meta,
    classes: Vec<Cow<'a, str>>,
    functions: Vec<Cow<'a, str>>,
    /// `[class, function]` pairs
    contains: Vec<[Cow<'a, str>; 2]>,
    /// `[caller, callee]` pairs
    calls: Vec<[Cow<'a, str>; 2]>,
}

/// Single-document JSON rendition of the graph for programmatic consumers
pub struct JsonCompactFormatter {
    mode: IdMode,
    pretty: bool,
}

impl JsonCompactFormatter {
    pub fn new() -> Self {
        Self {
            mode: IdMode::Verbatim,
            pretty: false,
        }
    }

    pub fn with_mode(mut self, mode: IdMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn format_to_file(&self, graph: &GraphStore, output_path: &Path) -> Result<()> {
        let json_content = self.format_graph(graph)?;
        fs::write(output_path, json_content).map_err(|source| FuncGraphError::OutputWrite {
            path: output_path.to_path_buf(),
            source,
        })
    }

    pub fn format_graph(&self, graph: &GraphStore) -> Result<String> {
        let output = CompactGraph {
            meta: Meta {
                classes: graph.classes().len(),
                functions: graph.functions().len(),
                contains: graph.contains_edges().len(),
                calls: graph.call_edges().len(),
                anonymized: self.mode == IdMode::Anonymized,
            },
            classes: self.ids(graph.classes()),
            functions: self.ids(graph.functions()),
            contains: self.pairs(graph.contains_edges()),
            calls: self.pairs(graph.call_edges()),
        };

        let json = if self.pretty {
            serde_json::to_string_pretty(&output)?
        } else {
            serde_json::to_string(&output)?
        };
        Ok(json)
    }

    fn ids<'a>(&self, ids: &'a [String]) -> Vec<Cow<'a, str>> {
        ids.iter().map(|id| self.mode.render(id)).collect()
    }

    fn pairs<'a>(&self, edges: &'a [Edge]) -> Vec<[Cow<'a, str>; 2]> {
        edges
            .iter()
            .map(|edge| [self.mode.render(&edge.source_id), self.mode.render(&edge.target_id)])
            .collect()
    }
}

impl Default for JsonCompactFormatter {
    fn default() -> Self {
        Self::new()
    }
}
