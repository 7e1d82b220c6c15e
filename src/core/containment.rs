use super::identity::IdentityResolver;
use super::provider::{NodeId, NodeKind, TraversalProvider};

/// Links a function to the nearest class that encloses it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContainmentResolver;

impl ContainmentResolver {
    pub fn new() -> Self {
        Self
    }

    /// Qualified ID of the class directly enclosing `function`, if any.
    ///
    /// The walk stops at the first class ancestor. Outer classes are never linked,
    /// and an anonymous class ends the walk without a result.
    pub fn enclosing_class<P>(
        &self,
        provider: &P,
        identity: &IdentityResolver,
        function: NodeId,
    ) -> Option<String>
    where
        P: TraversalProvider + ?Sized,
    {
        let class = provider
            .ancestors(function)
            .into_iter()
            .find(|&ancestor| provider.kind(ancestor) == NodeKind::Class)?;

        provider.name(class)?;
        Some(identity.resolve(provider, class))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::memory::MemoryProvider;

    #[test]
    fn nearest_class_wins_over_outer_classes() {
        let mut ast = MemoryProvider::new();
        let outer = ast.class("Outer", None);
        let inner = ast.class("Inner", Some(outer));
        let method = ast.method("run", "void", &[], Some(inner));

        let class = ContainmentResolver::new().enclosing_class(
            &ast,
            &IdentityResolver::new(),
            method,
        );
        assert_eq!(class.as_deref(), Some("Outer::Inner"));
    }

    #[test]
    fn free_functions_have_no_container() {
        let mut ast = MemoryProvider::new();
        let ns = ast.namespace("util", None);
        let function = ast.function("helper", "void", &[], Some(ns));

        let class = ContainmentResolver::new().enclosing_class(
            &ast,
            &IdentityResolver::new(),
            function,
        );
        assert!(class.is_none());
    }

    #[test]
    fn anonymous_class_stops_the_walk() {
        let mut ast = MemoryProvider::new();
        let named = ast.class("Named", None);
        let anonymous = ast.anonymous_class(Some(named));
        let method = ast.method("m", "void", &[], Some(anonymous));

        let class = ContainmentResolver::new().enclosing_class(
            &ast,
            &IdentityResolver::new(),
            method,
        );
        assert!(class.is_none());
    }
}
