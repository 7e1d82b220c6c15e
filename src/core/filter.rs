use tracing::trace;

use super::provider::{HeaderClass, NodeId, TraversalProvider};

/// Decides whether a declaration comes from a compiler or platform header.
///
/// Fails open: a location that cannot be resolved counts as user code, so one
/// pathological header never drops user declarations.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHeaderFilter;

impl SystemHeaderFilter {
    pub fn new() -> Self {
        Self
    }

    pub fn is_system_header<P>(&self, provider: &P, decl: Option<NodeId>) -> bool
    where
        P: TraversalProvider + ?Sized,
    {
        let Some(decl) = decl else {
            return false;
        };

        match provider.classify_location(decl) {
            HeaderClass::SystemHeader => true,
            HeaderClass::UserCode => false,
            HeaderClass::Unresolvable => {
                trace!(?decl, "unresolvable location, treating as user code");
                false
            }
        }
    }
}
