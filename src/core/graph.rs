use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Copy)]
pub enum EdgeType {
    Contains,
    Call,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Edge {
    pub edge_type: EdgeType,
    pub source_id: String,
    pub target_id: String,
}

impl Edge {
    pub fn new(edge_type: EdgeType, source_id: String, target_id: String) -> Self {
        Self {
            edge_type,
            source_id,
            target_id,
        }
    }
}

/// Functions, classes and the edges between them, accumulated over one run.
///
/// Node lists keep insertion order and reject exact duplicates. Edge lists are
/// append-only and may reference IDs that are not (yet) recorded as nodes.
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    functions: Vec<String>,
    function_index: HashSet<String>,
    classes: Vec<String>,
    class_index: HashSet<String>,
    contains: Vec<Edge>,
    calls: Vec<Edge>,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the function was already recorded.
    pub fn add_function(&mut self, id: String) -> bool {
        if self.function_index.contains(&id) {
            return false;
        }
        self.function_index.insert(id.clone());
        self.functions.push(id);
        true
    }

    /// Returns `false` when the class was already recorded.
    pub fn add_class(&mut self, name: String) -> bool {
        if self.class_index.contains(&name) {
            return false;
        }
        self.class_index.insert(name.clone());
        self.classes.push(name);
        true
    }

    pub fn add_contains(&mut self, class_id: String, function_id: String) {
        self.contains
            .push(Edge::new(EdgeType::Contains, class_id, function_id));
    }

    pub fn add_call(&mut self, caller_id: String, callee_id: String) {
        self.calls.push(Edge::new(EdgeType::Call, caller_id, callee_id));
    }

    pub fn has_function(&self, id: &str) -> bool {
        self.function_index.contains(id)
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.class_index.contains(name)
    }

    pub fn functions(&self) -> &[String] {
        &self.functions
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn contains_edges(&self) -> &[Edge] {
        &self.contains
    }

    pub fn call_edges(&self) -> &[Edge] {
        &self.calls
    }

    pub fn node_count(&self) -> usize {
        self.functions.len() + self.classes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.contains.len() + self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_count() == 0 && self.edge_count() == 0
    }
}
