use anyhow::Result;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tree_sitter::Node as TSNode;

use super::common::{
    extract_text, find_descendant_by_kind, normalize_spelling, TreeSitterParser,
};
use super::includes::{visit_key, FileOrigin, IncludeDirective, IncludeResolver};
use crate::core::provider::{
    HeaderClass, MatchEvent, NodeId, NodeKind, Signature, TraversalProvider,
};

/// Return type spelled for constructors and destructors.
const DEFAULT_RETURN_TYPE: &str = "void";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScopeTag {
    Unit,
    Block,
    Template,
    Linkage,
    /// Qualifier of an out-of-line definition with no visible declaration.
    Unresolved,
}

#[derive(Debug, Clone, Copy)]
struct Arity {
    min: usize,
    max: Option<usize>,
}

impl Arity {
    fn accepts(self, count: usize) -> bool {
        count >= self.min && self.max.map_or(true, |max| count <= max)
    }
}

#[derive(Debug, Clone)]
struct Entry {
    kind: NodeKind,
    tag: Option<ScopeTag>,
    name: Option<String>,
    parent: Option<NodeId>,
    context: Option<NodeId>,
    /// Qualified lookup path of this entry.
    path: String,
    /// Lookup path of the scope that owns this entry.
    owner_path: String,
    signature: Option<Signature>,
    arity: Arity,
    file: Option<usize>,
    canonical: NodeId,
}

impl Entry {
    fn scope(tag: ScopeTag, parent: Option<NodeId>, path: String, file: Option<usize>) -> Self {
        Self {
            kind: NodeKind::Scope,
            tag: Some(tag),
            name: None,
            parent,
            context: None,
            owner_path: path.clone(),
            path,
            signature: None,
            arity: Arity { min: 0, max: Some(0) },
            file,
            canonical: NodeId(0),
        }
    }
}

#[derive(Debug, Clone)]
struct SourceFile {
    path: PathBuf,
    origin: FileOrigin,
}

#[derive(Debug, Clone)]
enum CallTarget {
    Plain(String),
    Qualified { scope: String, name: String },
    Member(String),
}

impl CallTarget {
    fn name(&self) -> &str {
        match self {
            CallTarget::Plain(name) | CallTarget::Member(name) => name,
            CallTarget::Qualified { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone)]
struct PendingCall {
    caller: NodeId,
    target: Option<CallTarget>,
    arity: usize,
}

#[derive(Debug, Clone)]
enum Pending {
    Definition(NodeId),
    Class(NodeId),
    Call(PendingCall),
}

/// One C/C++ translation unit, with its resolvable includes, flattened into a
/// declaration arena that the graph core can query.
#[derive(Debug, Clone)]
pub struct CppTranslationUnit {
    path: PathBuf,
    files: Vec<SourceFile>,
    entries: Vec<Entry>,
    events: Vec<MatchEvent>,
    files_with_errors: usize,
}

impl CppTranslationUnit {
    pub fn parse(path: &Path, includes: &IncludeResolver) -> Result<Self> {
        let mut builder = UnitBuilder::new(includes)?;
        let root = builder.push(Entry::scope(ScopeTag::Unit, None, String::new(), None));
        builder.walk_file(path, FileOrigin::User, root, None)?;
        Ok(builder.finish(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the unit or any parsed header contains syntax errors.
    pub fn has_syntax_errors(&self) -> bool {
        self.files_with_errors > 0
    }

    /// Number of files parsed for this unit, headers included.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    fn entry(&self, node: NodeId) -> &Entry {
        &self.entries[node.0]
    }
}

impl TraversalProvider for CppTranslationUnit {
    fn kind(&self, node: NodeId) -> NodeKind {
        self.entry(node).kind
    }

    fn name(&self, node: NodeId) -> Option<&str> {
        self.entry(node).name.as_deref()
    }

    fn signature(&self, node: NodeId) -> Option<&Signature> {
        self.entry(node).signature.as_ref()
    }

    fn canonical(&self, node: NodeId) -> NodeId {
        self.entry(node).canonical
    }

    fn parents(&self, node: NodeId) -> Vec<NodeId> {
        self.entry(node).parent.into_iter().collect()
    }

    fn semantic_context(&self, node: NodeId) -> Option<NodeId> {
        self.entry(node).context
    }

    fn classify_location(&self, node: NodeId) -> HeaderClass {
        match self.entry(node).file.map(|file| self.files[file].origin) {
            Some(FileOrigin::System) => HeaderClass::SystemHeader,
            Some(FileOrigin::User) => HeaderClass::UserCode,
            None => HeaderClass::Unresolvable,
        }
    }

    fn source_file(&self, node: NodeId) -> Option<&Path> {
        self.entry(node)
            .file
            .map(|file| self.files[file].path.as_path())
    }

    fn events(&self) -> &[MatchEvent] {
        &self.events
    }
}

struct Frame<'t> {
    node: TSNode<'t>,
    parent: NodeId,
    caller: Option<NodeId>,
}

struct UnitBuilder<'a> {
    includes: &'a IncludeResolver,
    parser: TreeSitterParser,
    files: Vec<SourceFile>,
    visited: HashSet<PathBuf>,
    entries: Vec<Entry>,
    /// Lookup path of each class, namespace and unresolved qualifier.
    scopes: HashMap<String, NodeId>,
    /// Declaration key to the first function entry declaring it.
    declarations: HashMap<String, NodeId>,
    pending: Vec<Pending>,
    files_with_errors: usize,
}

impl<'a> UnitBuilder<'a> {
    fn new(includes: &'a IncludeResolver) -> Result<Self> {
        Ok(Self {
            includes,
            parser: TreeSitterParser::new(tree_sitter_cpp::language())?,
            files: Vec::new(),
            visited: HashSet::new(),
            entries: Vec::new(),
            scopes: HashMap::new(),
            declarations: HashMap::new(),
            pending: Vec::new(),
            files_with_errors: 0,
        })
    }

    fn push(&mut self, mut entry: Entry) -> NodeId {
        let id = NodeId(self.entries.len());
        entry.canonical = id;
        self.entries.push(entry);
        id
    }

    fn walk_file(
        &mut self,
        path: &Path,
        origin: FileOrigin,
        parent: NodeId,
        caller: Option<NodeId>,
    ) -> Result<()> {
        self.visited.insert(visit_key(path));

        let source = self.parser.read_source(path)?;
        let tree = self.parser.parse_source(&source, path)?;
        let file = self.files.len();
        self.files.push(SourceFile {
            path: path.to_path_buf(),
            origin,
        });

        let root = tree.root_node();
        if root.has_error() {
            self.files_with_errors += 1;
            debug!("Syntax errors in {}", path.display());
        }

        // Explicit stack: expression trees can nest deeper than the call stack allows.
        let mut stack = vec![Frame {
            node: root,
            parent,
            caller,
        }];
        while let Some(frame) = stack.pop() {
            let children = self.visit(frame, &source, file);
            stack.extend(children.into_iter().rev());
        }
        Ok(())
    }

    fn visit<'t>(&mut self, frame: Frame<'t>, source: &[u8], file: usize) -> Vec<Frame<'t>> {
        let Frame {
            node,
            parent,
            caller,
        } = frame;

        match node.kind() {
            "preproc_include" => {
                self.visit_include(&node, source, file, parent, caller);
                Vec::new()
            }
            "namespace_definition" => {
                let name = node
                    .child_by_field_name("name")
                    .map(|name| normalize_spelling(extract_text(&name, source)));
                let namespace = self.declare_scope(NodeKind::Namespace, name, parent, file);
                match node.child_by_field_name("body") {
                    Some(body) => child_frames(&body, namespace, caller),
                    None => Vec::new(),
                }
            }
            "linkage_specification" | "template_declaration" => {
                let tag = if node.kind() == "linkage_specification" {
                    ScopeTag::Linkage
                } else {
                    ScopeTag::Template
                };
                let scope = self.push_scope(tag, parent, file);
                child_frames(&node, scope, caller)
            }
            "class_specifier" | "struct_specifier" | "union_specifier" => {
                let Some(body) = node.child_by_field_name("body") else {
                    return Vec::new();
                };
                let name = node
                    .child_by_field_name("name")
                    .map(|name| simple_name(extract_text(&name, source)));
                let named = name.is_some();
                let class = self.declare_scope(NodeKind::Class, name, parent, file);
                if named {
                    self.pending.push(Pending::Class(class));
                }
                child_frames(&body, class, caller)
            }
            "function_definition" => {
                self.visit_function_definition(node, source, file, parent, caller)
            }
            "declaration" | "field_declaration" => {
                let mut cursor = node.walk();
                let declarators: Vec<TSNode> = node
                    .children_by_field_name("declarator", &mut cursor)
                    .collect();
                for declarator in declarators {
                    self.declare_function(&node, &declarator, source, file, parent);
                }
                child_frames(&node, parent, caller)
            }
            "friend_declaration" => {
                // Friend functions belong to the enclosing namespace, not the class.
                let scope = self.enclosing_non_class(parent);
                let mut cursor = node.walk();
                let frames = node
                    .named_children(&mut cursor)
                    .filter(|child| matches!(child.kind(), "function_definition" | "declaration"))
                    .map(|child| Frame {
                        node: child,
                        parent: scope,
                        caller,
                    })
                    .collect();
                frames
            }
            "call_expression" => {
                if let Some(caller) = caller {
                    let target = node
                        .child_by_field_name("function")
                        .and_then(|function| call_target(&function, source));
                    let arity = node
                        .child_by_field_name("arguments")
                        .map(|arguments| argument_count(&arguments))
                        .unwrap_or(0);
                    self.pending.push(Pending::Call(PendingCall {
                        caller,
                        target,
                        arity,
                    }));
                }
                child_frames(&node, parent, caller)
            }
            _ => child_frames(&node, parent, caller),
        }
    }

    fn visit_include(
        &mut self,
        node: &TSNode,
        source: &[u8],
        file: usize,
        parent: NodeId,
        caller: Option<NodeId>,
    ) {
        let Some(directive) = node
            .child_by_field_name("path")
            .and_then(|path| IncludeDirective::from_token(extract_text(&path, source)))
        else {
            return;
        };

        let includer = self.files[file].path.clone();
        let origin = self.files[file].origin;
        let Some((header, header_origin)) = self.includes.resolve(&directive, &includer, origin)
        else {
            return;
        };

        if self.visited.contains(&visit_key(&header)) {
            return;
        }

        if let Err(err) = self.walk_file(&header, header_origin, parent, caller) {
            warn!("Failed to parse header {}: {}", header.display(), err);
        }
    }

    fn visit_function_definition<'t>(
        &mut self,
        node: TSNode<'t>,
        source: &[u8],
        file: usize,
        parent: NodeId,
        caller: Option<NodeId>,
    ) -> Vec<Frame<'t>> {
        let function = node
            .child_by_field_name("declarator")
            .and_then(|declarator| {
                self.declare_function(&node, &declarator, source, file, parent)
                    .map(|function| (declarator, function))
            });

        let Some((declarator, function)) = function else {
            return child_frames(&node, parent, caller);
        };

        self.pending.push(Pending::Definition(function));
        let block = self.push_scope(ScopeTag::Block, function, file);

        let mut cursor = node.walk();
        let frames = node
            .children(&mut cursor)
            .filter(|child| *child != declarator)
            .map(|child| Frame {
                node: child,
                parent: block,
                caller: Some(function),
            })
            .collect();
        frames
    }

    /// Records a function entry when `declarator` declares a function.
    fn declare_function(
        &mut self,
        decl_node: &TSNode,
        declarator: &TSNode,
        source: &[u8],
        file: usize,
        lexical_parent: NodeId,
    ) -> Option<NodeId> {
        let shape = function_shape(*declarator, source)?;
        let (qualifier, name) = declared_name(&shape.name, source)?;
        let (parameters, arity) = parameter_types(&shape.parameters, source);
        let return_type = normalize_spelling(&format!(
            "{}{}",
            shape
                .return_type
                .unwrap_or_else(|| return_type(decl_node, source)),
            shape.return_suffix
        ));

        let (kind, parent, context) = if qualifier.is_empty() {
            let kind = if self.in_class(lexical_parent) {
                NodeKind::Method
            } else {
                NodeKind::Function
            };
            (kind, lexical_parent, None)
        } else {
            let scope = self.resolve_qualifier(&qualifier, lexical_parent);
            let kind = match self.entries[scope.0].kind {
                NodeKind::Namespace => NodeKind::Function,
                _ => NodeKind::Method,
            };
            (kind, scope, Some(scope))
        };

        let owner_path = self.entries[parent.0].path.clone();
        let local_name = format!("{}({})", name, parameters.join(","));
        let key = format!("{owner_path}|{local_name}");
        let path = qualify_path(&owner_path, &local_name);

        let id = self.push(Entry {
            kind,
            tag: None,
            name: Some(name),
            parent: Some(parent),
            context,
            path,
            owner_path,
            signature: Some(Signature::new(return_type, parameters)),
            arity,
            file: Some(file),
            canonical: NodeId(0),
        });
        let canonical = *self.declarations.entry(key).or_insert(id);
        self.entries[id.0].canonical = canonical;
        Some(id)
    }

    fn declare_scope(
        &mut self,
        kind: NodeKind,
        name: Option<String>,
        parent: NodeId,
        file: usize,
    ) -> NodeId {
        let parent_path = self.entries[parent.0].path.clone();
        let path = match &name {
            Some(name) => qualify_path(&parent_path, name),
            None => parent_path.clone(),
        };
        let named = name.is_some();

        let id = self.push(Entry {
            kind,
            tag: None,
            name,
            parent: Some(parent),
            context: None,
            path: path.clone(),
            owner_path: parent_path,
            signature: None,
            arity: Arity { min: 0, max: Some(0) },
            file: Some(file),
            canonical: NodeId(0),
        });
        if named {
            self.scopes.entry(path).or_insert(id);
        }
        id
    }

    fn push_scope(&mut self, tag: ScopeTag, parent: NodeId, file: usize) -> NodeId {
        let parent_path = &self.entries[parent.0].path;
        let path = match tag {
            ScopeTag::Block => format!("{parent_path}#"),
            _ => parent_path.clone(),
        };
        self.push(Entry::scope(tag, Some(parent), path, Some(file)))
    }

    /// Whether declarations directly under `scope` are class members.
    fn in_class(&self, scope: NodeId) -> bool {
        let mut current = Some(scope);
        while let Some(id) = current {
            let entry = &self.entries[id.0];
            match entry.tag {
                Some(ScopeTag::Template) | Some(ScopeTag::Linkage) => current = entry.parent,
                _ => return entry.kind == NodeKind::Class,
            }
        }
        false
    }

    /// Nearest scope enclosing `scope` that is not a class or a wrapper inside one.
    fn enclosing_non_class(&self, scope: NodeId) -> NodeId {
        let mut current = scope;
        while self.in_class(current) {
            match self.entries[current.0].parent {
                Some(parent) => current = parent,
                None => break,
            }
        }
        current
    }

    /// Finds the scope named by `qualifier` as seen from `lexical`, searching
    /// outward. Missing scopes are synthesized under `lexical`.
    fn resolve_qualifier(&mut self, qualifier: &[String], lexical: NodeId) -> NodeId {
        let joined = qualifier.join("::");
        let mut current = Some(lexical);
        while let Some(id) = current {
            let candidate = qualify_path(&self.entries[id.0].path, &joined);
            if let Some(&found) = self.scopes.get(&candidate) {
                return found;
            }
            current = self.entries[id.0].parent;
        }

        let mut parent = lexical;
        for segment in qualifier {
            let path = qualify_path(&self.entries[parent.0].path, segment);
            parent = match self.scopes.get(&path) {
                Some(&existing) => existing,
                None => {
                    let mut entry =
                        Entry::scope(ScopeTag::Unresolved, Some(parent), path.clone(), None);
                    entry.name = Some(segment.clone());
                    entry.owner_path = self.entries[parent.0].path.clone();
                    let id = self.push(entry);
                    self.scopes.insert(path, id);
                    id
                }
            };
        }
        parent
    }

    fn finish(self, path: &Path) -> CppTranslationUnit {
        let resolver = CallResolver::new(&self.entries);
        let events: Vec<MatchEvent> = self
            .pending
            .iter()
            .map(|pending| match pending {
                Pending::Definition(id) => MatchEvent::FunctionDefinition(*id),
                Pending::Class(id) => MatchEvent::ClassDeclaration(*id),
                Pending::Call(call) => MatchEvent::Call {
                    caller: call.caller,
                    callee: resolver.resolve(call),
                },
            })
            .collect();

        debug!(
            "Parsed {} ({} files, {} declarations, {} matches)",
            path.display(),
            self.files.len(),
            self.entries.len(),
            events.len()
        );

        CppTranslationUnit {
            path: path.to_path_buf(),
            files: self.files,
            entries: self.entries,
            events,
            files_with_errors: self.files_with_errors,
        }
    }
}

/// Syntactic name lookup for call expressions.
struct CallResolver<'e> {
    entries: &'e [Entry],
    by_name: HashMap<&'e str, Vec<NodeId>>,
}

impl<'e> CallResolver<'e> {
    fn new(entries: &'e [Entry]) -> Self {
        let mut by_name: HashMap<&str, Vec<NodeId>> = HashMap::new();
        for (index, entry) in entries.iter().enumerate() {
            let id = NodeId(index);
            if entry.kind.is_function() && entry.canonical == id {
                if let Some(name) = entry.name.as_deref() {
                    by_name.entry(name).or_default().push(id);
                }
            }
        }
        Self { entries, by_name }
    }

    fn resolve(&self, call: &PendingCall) -> Option<NodeId> {
        let target = call.target.as_ref()?;
        let candidates: Vec<NodeId> = self
            .by_name
            .get(target.name())?
            .iter()
            .copied()
            .filter(|&id| self.entries[id.0].arity.accepts(call.arity))
            .collect();

        match target {
            CallTarget::Plain(_) => self
                .nearest(call.caller, &candidates)
                .or_else(|| {
                    candidates
                        .iter()
                        .copied()
                        .find(|&id| self.entries[id.0].kind == NodeKind::Function)
                }),
            CallTarget::Qualified { scope, .. } => {
                let suffix = format!("::{scope}");
                candidates.iter().copied().find(|&id| {
                    let owner = &self.entries[id.0].owner_path;
                    owner == scope || owner.ends_with(&suffix)
                })
            }
            CallTarget::Member(_) => {
                let methods: Vec<NodeId> = candidates
                    .into_iter()
                    .filter(|&id| self.entries[id.0].kind == NodeKind::Method)
                    .collect();
                self.nearest(call.caller, &methods)
                    .or_else(|| methods.first().copied())
            }
        }
    }

    /// Candidate owned by the innermost scope enclosing `caller`.
    fn nearest(&self, caller: NodeId, candidates: &[NodeId]) -> Option<NodeId> {
        self.enclosing_paths(caller).iter().find_map(|scope| {
            candidates
                .iter()
                .copied()
                .find(|&id| self.entries[id.0].owner_path == *scope)
        })
    }

    /// Lookup paths from the caller's body outward to the unit scope.
    fn enclosing_paths(&self, caller: NodeId) -> Vec<String> {
        let entry = &self.entries[caller.0];
        let mut paths = vec![format!("{}#", entry.path)];
        let mut current = entry.parent;
        while let Some(id) = current {
            let path = &self.entries[id.0].path;
            if paths.last() != Some(path) {
                paths.push(path.clone());
            }
            current = self.entries[id.0].parent;
        }
        paths
    }
}

fn child_frames<'t>(node: &TSNode<'t>, parent: NodeId, caller: Option<NodeId>) -> Vec<Frame<'t>> {
    let mut cursor = node.walk();
    let frames = node
        .children(&mut cursor)
        .map(|child| Frame {
            node: child,
            parent,
            caller,
        })
        .collect();
    frames
}

fn qualify_path(base: &str, name: &str) -> String {
    if base.is_empty() {
        name.to_string()
    } else {
        format!("{base}::{name}")
    }
}

/// Last segment of a possibly qualified class name.
fn simple_name(text: &str) -> String {
    let normalized = normalize_spelling(text);
    match normalized.rsplit_once("::") {
        Some((_, last)) => last.to_string(),
        None => normalized,
    }
}

fn strip_template_arguments(segment: &str) -> String {
    match segment.split_once('<') {
        Some((head, _)) => head.to_string(),
        None => segment.to_string(),
    }
}

/// Parts of a declarator that declares a function.
struct FunctionShape<'t> {
    name: TSNode<'t>,
    /// Node whose `parameters` field holds the parameter list.
    parameters: TSNode<'t>,
    /// Set for conversion operators, whose return type is the target type.
    return_type: Option<String>,
    return_suffix: String,
}

fn function_shape<'t>(declarator: TSNode<'t>, source: &[u8]) -> Option<FunctionShape<'t>> {
    if let Some((function_declarator, return_suffix)) = unwrap_function_declarator(declarator) {
        return Some(FunctionShape {
            name: function_declarator.child_by_field_name("declarator")?,
            parameters: function_declarator,
            return_type: None,
            return_suffix,
        });
    }

    let cast = conversion_operator(declarator)?;
    let parameters = cast
        .child_by_field_name("declarator")
        .and_then(|abstract_declarator| {
            find_descendant_by_kind(&abstract_declarator, "abstract_function_declarator")
        })
        .unwrap_or(cast);
    Some(FunctionShape {
        name: declarator,
        parameters,
        return_type: Some(cast_target_type(&cast, source)?),
        return_suffix: String::new(),
    })
}

/// `operator T()` declarators, possibly qualified.
fn conversion_operator(node: TSNode) -> Option<TSNode> {
    match node.kind() {
        "operator_cast" => Some(node),
        "qualified_identifier" => conversion_operator(node.child_by_field_name("name")?),
        _ => None,
    }
}

fn cast_target_type(cast: &TSNode, source: &[u8]) -> Option<String> {
    let ty = cast.child_by_field_name("type")?;
    let mut parts = type_qualifiers(cast, source);
    parts.push(extract_text(&ty, source).to_string());
    Some(normalize_spelling(&parts.join(" ")))
}

/// Peels pointer and reference declarators off a function declarator and
/// returns the suffix they add to the return type.
fn unwrap_function_declarator(node: TSNode) -> Option<(TSNode, String)> {
    let mut current = node;
    let mut suffix = String::new();
    loop {
        match current.kind() {
            "function_declarator" => return Some((current, suffix)),
            "pointer_declarator" => {
                suffix.push('*');
                current = current.child_by_field_name("declarator")?;
            }
            "reference_declarator" => {
                let token = current.child(0)?;
                suffix.push_str(token.kind());
                current = current.named_child(0)?;
            }
            _ => return None,
        }
    }
}

/// Scope qualifier segments and simple name of a declarator name.
fn declared_name(node: &TSNode, source: &[u8]) -> Option<(Vec<String>, String)> {
    match node.kind() {
        "identifier" | "field_identifier" | "destructor_name" | "operator_name" => {
            Some((Vec::new(), normalize_spelling(extract_text(node, source))))
        }
        "operator_cast" => Some((
            Vec::new(),
            format!("operator {}", cast_target_type(node, source)?),
        )),
        "template_function" | "template_method" => {
            let name = node.child_by_field_name("name")?;
            declared_name(&name, source)
        }
        "qualified_identifier" => {
            let mut scope = Vec::new();
            let mut current = *node;
            loop {
                if let Some(segment) = current.child_by_field_name("scope") {
                    scope.push(strip_template_arguments(&normalize_spelling(extract_text(
                        &segment, source,
                    ))));
                }
                let name = current.child_by_field_name("name")?;
                if name.kind() == "qualified_identifier" {
                    current = name;
                    continue;
                }
                let (_, simple) = declared_name(&name, source)?;
                return Some((scope, simple));
            }
        }
        _ => None,
    }
}

fn type_qualifiers(node: &TSNode, source: &[u8]) -> Vec<String> {
    let mut cursor = node.walk();
    let qualifiers = node
        .children(&mut cursor)
        .filter(|child| child.kind() == "type_qualifier")
        .map(|child| extract_text(&child, source).to_string())
        .collect();
    qualifiers
}

fn return_type(decl_node: &TSNode, source: &[u8]) -> String {
    let Some(ty) = decl_node.child_by_field_name("type") else {
        return DEFAULT_RETURN_TYPE.to_string();
    };
    let mut parts = type_qualifiers(decl_node, source);
    parts.push(extract_text(&ty, source).to_string());
    normalize_spelling(&parts.join(" "))
}

fn parameter_types(function_declarator: &TSNode, source: &[u8]) -> (Vec<String>, Arity) {
    let Some(list) = function_declarator.child_by_field_name("parameters") else {
        return (Vec::new(), Arity { min: 0, max: Some(0) });
    };

    let mut parameters = Vec::new();
    let mut required = 0;
    let mut variadic = false;
    let mut cursor = list.walk();
    for child in list.children(&mut cursor) {
        match child.kind() {
            "parameter_declaration" => {
                parameters.push(parameter_type(&child, source));
                required += 1;
            }
            "optional_parameter_declaration" => parameters.push(parameter_type(&child, source)),
            "variadic_parameter_declaration" => {
                parameters.push(parameter_type(&child, source));
                variadic = true;
            }
            "..." => {
                parameters.push("...".to_string());
                variadic = true;
            }
            _ => {}
        }
    }

    if parameters.len() == 1 && parameters[0] == "void" {
        parameters.clear();
        required = 0;
    }

    let max = if variadic { None } else { Some(parameters.len()) };
    (parameters, Arity { min: required, max })
}

fn parameter_type(parameter: &TSNode, source: &[u8]) -> String {
    let mut parts = type_qualifiers(parameter, source);
    if let Some(ty) = parameter.child_by_field_name("type") {
        parts.push(extract_text(&ty, source).to_string());
    }
    let suffix = parameter
        .child_by_field_name("declarator")
        .map(|declarator| declarator_suffix(&declarator, source))
        .unwrap_or_default();
    normalize_spelling(&format!("{}{}", parts.join(" "), suffix))
}

/// Declarator text without the declared name, arrays decayed to pointers:
/// `*argv[]` becomes `**`.
fn declarator_suffix(declarator: &TSNode, source: &[u8]) -> String {
    let text = extract_text(declarator, source);
    let start = declarator.start_byte();
    let stripped = match find_descendant_by_kind(declarator, "identifier") {
        Some(name) => {
            let head = text.get(..name.start_byte() - start).unwrap_or("");
            let tail = text.get(name.end_byte() - start..).unwrap_or("");
            format!("{head}{tail}")
        }
        None => text.to_string(),
    };
    decay_arrays(&stripped)
}

fn decay_arrays(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut depth = 0usize;
    for c in text.chars() {
        match c {
            '[' => {
                if depth == 0 {
                    out.push('*');
                }
                depth += 1;
            }
            ']' => depth = depth.saturating_sub(1),
            _ if depth > 0 => {}
            c => out.push(c),
        }
    }
    out
}

fn call_target(function: &TSNode, source: &[u8]) -> Option<CallTarget> {
    match function.kind() {
        "identifier" => Some(CallTarget::Plain(extract_text(function, source).to_string())),
        "qualified_identifier" => {
            let (scope, name) = declared_name(function, source)?;
            if scope.is_empty() {
                Some(CallTarget::Plain(name))
            } else {
                Some(CallTarget::Qualified {
                    scope: scope.join("::"),
                    name,
                })
            }
        }
        "template_function" => {
            let name = function.child_by_field_name("name")?;
            call_target(&name, source)
        }
        "field_expression" => {
            let field = function.child_by_field_name("field")?;
            let (_, name) = declared_name(&field, source)?;
            Some(CallTarget::Member(name))
        }
        _ => None,
    }
}

fn argument_count(arguments: &TSNode) -> usize {
    let mut cursor = arguments.walk();
    let count = arguments
        .named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .count();
    count
}
