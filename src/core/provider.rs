use std::path::Path;

/// Opaque handle to a node owned by one [`TraversalProvider`].
///
/// Handles are only meaningful for the provider that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Free function, including functions declared at block scope.
    Function,
    /// Function that is a member of a class.
    Method,
    /// Class, struct or union.
    Class,
    Namespace,
    /// Unnamed container (translation unit, block, template, linkage spec) or a
    /// qualifier scope the provider could not resolve to a declaration.
    Scope,
}

impl NodeKind {
    pub fn is_function(self) -> bool {
        matches!(self, NodeKind::Function | NodeKind::Method)
    }
}

/// Normalized type spellings of a function declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Signature {
    pub return_type: String,
    pub parameters: Vec<String>,
}

impl Signature {
    pub fn new(return_type: impl Into<String>, parameters: Vec<String>) -> Self {
        Self {
            return_type: return_type.into(),
            parameters,
        }
    }
}

/// Result of classifying a declaration's expansion location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderClass {
    SystemHeader,
    UserCode,
    /// The location could not be resolved.
    Unresolvable,
}

/// A typed match produced while traversing a translation unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchEvent {
    FunctionDefinition(NodeId),
    /// `caller` is the innermost function enclosing the call expression. `callee` is
    /// `None` when the call target is not a function declaration.
    Call {
        caller: NodeId,
        callee: Option<NodeId>,
    },
    ClassDeclaration(NodeId),
}

/// AST access consumed by the graph-construction core.
pub trait TraversalProvider {
    fn kind(&self, node: NodeId) -> NodeKind;

    /// Declared name, `None` for unnamed nodes.
    fn name(&self, node: NodeId) -> Option<&str>;

    /// Signature for `Function` and `Method` nodes.
    fn signature(&self, node: NodeId) -> Option<&Signature>;

    /// Representative declaration among all redeclarations of `node`.
    fn canonical(&self, node: NodeId) -> NodeId;

    /// Immediate syntactic parents of `node`. Empty at the root.
    fn parents(&self, node: NodeId) -> Vec<NodeId>;

    /// Every syntactic ancestor of `node`, nearest first.
    fn ancestors(&self, node: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut current = self.parents(node);
        while let Some(&parent) = current.first() {
            chain.push(parent);
            current = self.parents(parent);
        }
        chain
    }

    /// Semantic context of a class member that is not reachable through its syntactic
    /// ancestors, such as the class named by an out-of-line definition's qualifier.
    fn semantic_context(&self, node: NodeId) -> Option<NodeId>;

    fn classify_location(&self, node: NodeId) -> HeaderClass;

    /// File the declaration was spelled in.
    fn source_file(&self, node: NodeId) -> Option<&Path>;

    /// Match events in traversal order.
    fn events(&self) -> &[MatchEvent];
}
