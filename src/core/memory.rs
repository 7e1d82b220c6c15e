use std::path::{Path, PathBuf};

use super::provider::{HeaderClass, MatchEvent, NodeId, NodeKind, Signature, TraversalProvider};

#[derive(Debug, Clone)]
struct MemoryNode {
    kind: NodeKind,
    name: Option<String>,
    parent: Option<NodeId>,
    canonical: Option<NodeId>,
    semantic_context: Option<NodeId>,
    signature: Option<Signature>,
    location: HeaderClass,
    file: Option<PathBuf>,
}

/// Provider backed by a hand-built node table.
///
/// Lets front-ends other than the tree-sitter one feed the core, and gives tests
/// precise control over ancestors, canonical links and header classification.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    nodes: Vec<MemoryNode>,
    events: Vec<MatchEvent>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an unnamed container such as a translation unit or block.
    pub fn scope(&mut self, parent: Option<NodeId>) -> NodeId {
        self.push(NodeKind::Scope, None, parent, None)
    }

    pub fn namespace(&mut self, name: &str, parent: Option<NodeId>) -> NodeId {
        self.push(NodeKind::Namespace, Some(name), parent, None)
    }

    pub fn class(&mut self, name: &str, parent: Option<NodeId>) -> NodeId {
        self.push(NodeKind::Class, Some(name), parent, None)
    }

    pub fn anonymous_class(&mut self, parent: Option<NodeId>) -> NodeId {
        self.push(NodeKind::Class, None, parent, None)
    }

    pub fn function(
        &mut self,
        name: &str,
        return_type: &str,
        parameters: &[&str],
        parent: Option<NodeId>,
    ) -> NodeId {
        let signature = Signature::new(
            return_type,
            parameters.iter().map(|p| p.to_string()).collect(),
        );
        self.push(NodeKind::Function, Some(name), parent, Some(signature))
    }

    pub fn method(
        &mut self,
        name: &str,
        return_type: &str,
        parameters: &[&str],
        parent: Option<NodeId>,
    ) -> NodeId {
        let id = self.function(name, return_type, parameters, parent);
        self.nodes[id.0].kind = NodeKind::Method;
        id
    }

    pub fn set_canonical(&mut self, node: NodeId, canonical: NodeId) {
        self.nodes[node.0].canonical = Some(canonical);
    }

    pub fn set_semantic_context(&mut self, node: NodeId, context: NodeId) {
        self.nodes[node.0].semantic_context = Some(context);
    }

    pub fn set_location(&mut self, node: NodeId, location: HeaderClass) {
        self.nodes[node.0].location = location;
    }

    pub fn set_file(&mut self, node: NodeId, file: impl Into<PathBuf>) {
        self.nodes[node.0].file = Some(file.into());
    }

    pub fn push_event(&mut self, event: MatchEvent) {
        self.events.push(event);
    }

    fn push(
        &mut self,
        kind: NodeKind,
        name: Option<&str>,
        parent: Option<NodeId>,
        signature: Option<Signature>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(MemoryNode {
            kind,
            name: name.map(str::to_string),
            parent,
            canonical: None,
            semantic_context: None,
            signature,
            location: HeaderClass::UserCode,
            file: None,
        });
        id
    }
}

impl TraversalProvider for MemoryProvider {
    fn kind(&self, node: NodeId) -> NodeKind {
        self.nodes[node.0].kind
    }

    fn name(&self, node: NodeId) -> Option<&str> {
        self.nodes[node.0].name.as_deref()
    }

    fn signature(&self, node: NodeId) -> Option<&Signature> {
        self.nodes[node.0].signature.as_ref()
    }

    fn canonical(&self, node: NodeId) -> NodeId {
        self.nodes[node.0].canonical.unwrap_or(node)
    }

    fn parents(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes[node.0].parent.into_iter().collect()
    }

    fn semantic_context(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].semantic_context
    }

    fn classify_location(&self, node: NodeId) -> HeaderClass {
        self.nodes[node.0].location
    }

    fn source_file(&self, node: NodeId) -> Option<&Path> {
        self.nodes[node.0].file.as_deref()
    }

    fn events(&self) -> &[MatchEvent] {
        &self.events
    }
}
