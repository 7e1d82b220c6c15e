//! Qualified, overload-safe identifiers for declarations.
//!
//! A function ID looks like `ns::Widget::void-resize-int-int`: the IDs of the
//! enclosing named scopes joined by [`SCOPE_SEPARATOR`], followed by the return
//! type, name and parameter types joined by [`SIGNATURE_DELIMITER`]. Program entry
//! points additionally carry their source file, e.g. `src/a.cpp--int-main`.

use super::provider::{NodeId, NodeKind, TraversalProvider};

pub const SCOPE_SEPARATOR: &str = "::";
pub const SIGNATURE_DELIMITER: char = '-';
pub const ENTRY_POINT_SEPARATOR: &str = "--";

/// Stands in for `:` inside a name component.
const SCOPE_SUBSTITUTE: char = '.';
/// Stands in for whitespace so an ID stays one token.
const WHITESPACE_SUBSTITUTE: char = '_';

const ENTRY_POINTS: [&str; 3] = ["int-main", "int-main-int-char**", "int-main-int-char**-char**"];

#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityResolver;

impl IdentityResolver {
    pub fn new() -> Self {
        Self
    }

    /// Computes the ID of `decl`. Redeclarations share the ID of their canonical
    /// declaration.
    pub fn resolve<P>(&self, provider: &P, decl: NodeId) -> String
    where
        P: TraversalProvider + ?Sized,
    {
        let decl = provider.canonical(decl);
        let base = self.base_name(provider, decl);

        let name = match self.named_parent(provider, decl) {
            Some(parent) => qualify(&self.resolve(provider, parent), &base),
            None if provider.kind(decl) == NodeKind::Method => {
                match provider.semantic_context(decl) {
                    Some(context) => qualify(&self.resolve(provider, context), &base),
                    None => base,
                }
            }
            None => base,
        };

        if ENTRY_POINTS.contains(&name.as_str()) {
            if let Some(file) = provider.source_file(decl) {
                let file = sanitize_component(&file.to_string_lossy());
                return format!("{file}{ENTRY_POINT_SEPARATOR}{name}");
            }
        }

        name
    }

    fn base_name<P>(&self, provider: &P, decl: NodeId) -> String
    where
        P: TraversalProvider + ?Sized,
    {
        let name = sanitize_component(provider.name(decl).unwrap_or_default());

        if !provider.kind(decl).is_function() {
            return name;
        }

        let Some(signature) = provider.signature(decl) else {
            return name;
        };

        let mut base = sanitize_component(&signature.return_type);
        base.push(SIGNATURE_DELIMITER);
        base.push_str(&name);
        for parameter in &signature.parameters {
            base.push(SIGNATURE_DELIMITER);
            base.push_str(&sanitize_component(parameter));
        }
        base
    }

    /// First ancestor that is a named declaration.
    fn named_parent<P>(&self, provider: &P, decl: NodeId) -> Option<NodeId>
    where
        P: TraversalProvider + ?Sized,
    {
        provider
            .ancestors(decl)
            .into_iter()
            .find(|&ancestor| provider.name(ancestor).is_some())
    }
}

fn qualify(parent: &str, base: &str) -> String {
    format!("{parent}{SCOPE_SEPARATOR}{base}")
}

/// Replaces characters that would collide with the scope separator or split the
/// ID into several output tokens.
pub fn sanitize_component(component: &str) -> String {
    component
        .chars()
        .map(|c| match c {
            ':' => SCOPE_SUBSTITUTE,
            c if c.is_whitespace() => WHITESPACE_SUBSTITUTE,
            c => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::memory::MemoryProvider;

    #[test]
    fn overloads_get_distinct_ids() {
        let mut ast = MemoryProvider::new();
        let tu = ast.scope(None);
        let a = ast.function("area", "double", &["double"], Some(tu));
        let b = ast.function("area", "double", &["double", "double"], Some(tu));
        let c = ast.function("area", "double", &["int"], Some(tu));

        let resolver = IdentityResolver::new();
        let ids: Vec<String> = [a, b, c].iter().map(|&f| resolver.resolve(&ast, f)).collect();

        assert_eq!(ids[0], "double-area-double");
        assert_eq!(ids[1], "double-area-double-double");
        assert_eq!(ids[2], "double-area-int");
    }

    #[test]
    fn unnamed_ancestors_are_skipped_during_qualification() {
        let mut ast = MemoryProvider::new();
        let tu = ast.scope(None);
        let ns = ast.namespace("geo", Some(tu));
        let linkage = ast.scope(Some(ns));
        let class = ast.class("Shape", Some(linkage));
        let template = ast.scope(Some(class));
        let method = ast.method("draw", "void", &[], Some(template));

        let id = IdentityResolver::new().resolve(&ast, method);
        assert_eq!(id, "geo::Shape::void-draw");
    }

    #[test]
    fn redeclarations_resolve_through_canonical_declaration() {
        let mut ast = MemoryProvider::new();
        let tu = ast.scope(None);
        let class = ast.class("A", Some(tu));
        let prototype = ast.method("bar", "void", &[], Some(class));
        let definition = ast.method("bar", "void", &[], Some(tu));
        ast.set_canonical(definition, prototype);

        let resolver = IdentityResolver::new();
        assert_eq!(resolver.resolve(&ast, definition), "A::void-bar");
        assert_eq!(
            resolver.resolve(&ast, definition),
            resolver.resolve(&ast, prototype)
        );
    }

    #[test]
    fn methods_without_named_ancestors_use_semantic_context() {
        let mut ast = MemoryProvider::new();
        let tu = ast.scope(None);
        let scope = ast.class("Widget", None);
        let method = ast.method("show", "void", &["bool"], Some(tu));
        ast.set_semantic_context(method, scope);

        assert_eq!(
            IdentityResolver::new().resolve(&ast, method),
            "Widget::void-show-bool"
        );
    }

    #[test]
    fn free_functions_ignore_semantic_context() {
        let mut ast = MemoryProvider::new();
        let scope = ast.namespace("ns", None);
        let function = ast.function("f", "int", &[], None);
        ast.set_semantic_context(function, scope);

        assert_eq!(IdentityResolver::new().resolve(&ast, function), "int-f");
    }

    #[test]
    fn entry_points_are_prefixed_with_their_file() {
        let mut ast = MemoryProvider::new();
        let tu = ast.scope(None);
        let main_a = ast.function("main", "int", &["int", "char**"], Some(tu));
        ast.set_file(main_a, "src/a.cpp");
        let main_b = ast.function("main", "int", &[], Some(tu));
        ast.set_file(main_b, "tools/b.cpp");

        let resolver = IdentityResolver::new();
        assert_eq!(resolver.resolve(&ast, main_a), "src/a.cpp--int-main-int-char**");
        assert_eq!(resolver.resolve(&ast, main_b), "tools/b.cpp--int-main");
    }

    #[test]
    fn namespaced_main_is_not_an_entry_point() {
        let mut ast = MemoryProvider::new();
        let ns = ast.namespace("app", None);
        let main = ast.function("main", "int", &[], Some(ns));
        ast.set_file(main, "a.cpp");

        assert_eq!(IdentityResolver::new().resolve(&ast, main), "app::int-main");
    }

    #[test]
    fn colons_and_whitespace_inside_components_are_replaced() {
        let mut ast = MemoryProvider::new();
        let ns = ast.namespace("io", None);
        let f = ast.function(
            "open",
            "std::unique_ptr<File>",
            &["const std::string&", "unsigned int"],
            Some(ns),
        );

        assert_eq!(
            IdentityResolver::new().resolve(&ast, f),
            "io::std..unique_ptr<File>-open-const_std..string&-unsigned_int"
        );
    }

    #[test]
    fn ids_are_stable_across_calls() {
        let mut ast = MemoryProvider::new();
        let ns = ast.namespace("n", None);
        let f = ast.function("g", "void", &["int"], Some(ns));

        let resolver = IdentityResolver::new();
        assert_eq!(resolver.resolve(&ast, f), resolver.resolve(&ast, f));
    }
}
