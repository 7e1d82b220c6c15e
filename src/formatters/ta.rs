use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::info;

use super::IdMode;
use crate::core::{Edge, GraphStore};
use crate::error::{FuncGraphError, Result};

pub const CLASS_SCHEMA: &str = "cClass";
pub const FUNCTION_SCHEMA: &str = "cFunction";

/// Writes the graph in tuple-attribute form: class instances, function
/// instances, `contain` edges and `call` edges, one blank line between sections.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaFormatter {
    mode: IdMode,
}

impl TaFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mut self, mode: IdMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn anonymized() -> Self {
        Self::new().with_mode(IdMode::Anonymized)
    }

    /// Renders the whole graph as TA text.
    pub fn format_graph(&self, graph: &GraphStore) -> String {
        let mut out = String::new();

        for class in graph.classes() {
            out.push_str(&self.instance_line(class, CLASS_SCHEMA));
        }
        out.push('\n');

        for function in graph.functions() {
            out.push_str(&self.instance_line(function, FUNCTION_SCHEMA));
        }
        out.push('\n');

        for edge in graph.contains_edges() {
            out.push_str(&self.edge_line("contain", edge));
        }
        out.push('\n');

        for edge in graph.call_edges() {
            out.push_str(&self.edge_line("call", edge));
        }
        out
    }

    /// Opens `output_path` and writes the graph. Nothing is written when the
    /// file cannot be opened.
    pub fn format_to_file(&self, graph: &GraphStore, output_path: &Path) -> Result<()> {
        let output_error = |source: io::Error| FuncGraphError::OutputWrite {
            path: output_path.to_path_buf(),
            source,
        };

        let file = File::create(output_path).map_err(output_error)?;
        let mut writer = BufWriter::new(file);
        self.write_graph(graph, &mut writer)
            .and_then(|_| writer.flush())
            .map_err(output_error)?;

        info!(
            "Wrote {} nodes and {} edges to {}",
            graph.node_count(),
            graph.edge_count(),
            output_path.display()
        );
        Ok(())
    }

    pub fn write_graph<W: Write>(&self, graph: &GraphStore, writer: &mut W) -> io::Result<()> {
        writer.write_all(self.format_graph(graph).as_bytes())
    }

    fn instance_line(&self, id: &str, schema: &str) -> String {
        format!("$INSTANCE {} {}\n", self.mode.render(id), schema)
    }

    fn edge_line(&self, relation: &str, edge: &Edge) -> String {
        format!(
            "{} {} {}\n",
            relation,
            self.mode.render(&edge.source_id),
            self.mode.render(&edge.target_id)
        )
    }
}
