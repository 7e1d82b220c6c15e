use tracing::{debug, trace};

use super::containment::ContainmentResolver;
use super::filter::SystemHeaderFilter;
use super::graph::GraphStore;
use super::identity::{sanitize_component, IdentityResolver};
use super::provider::{MatchEvent, NodeId, TraversalProvider};

/// What a single match event did to the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extraction {
    Recorded,
    /// The node was already present.
    Duplicate,
    SystemHeader,
    /// The call target is not a function declaration.
    Unresolved,
    /// The declaration has nothing to record, such as an unnamed class.
    Skipped,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionStats {
    pub events: usize,
    pub recorded: usize,
    pub duplicates: usize,
    pub system_headers: usize,
    pub unresolved_calls: usize,
    pub skipped: usize,
}

impl ExtractionStats {
    fn count(&mut self, outcome: Extraction) {
        self.events += 1;
        match outcome {
            Extraction::Recorded => self.recorded += 1,
            Extraction::Duplicate => self.duplicates += 1,
            Extraction::SystemHeader => self.system_headers += 1,
            Extraction::Unresolved => self.unresolved_calls += 1,
            Extraction::Skipped => self.skipped += 1,
        }
    }
}

/// Turns match events into graph entities.
///
/// Owns the [`GraphStore`] for the whole run. Events must be fed sequentially;
/// providers that parse in parallel hand their events over one unit at a time.
#[derive(Debug, Default)]
pub struct EntityExtractor {
    identity: IdentityResolver,
    containment: ContainmentResolver,
    filter: SystemHeaderFilter,
    graph: GraphStore,
    stats: ExtractionStats,
}

impl EntityExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Processes every event the provider produced, in order.
    pub fn process_unit<P>(&mut self, provider: &P)
    where
        P: TraversalProvider + ?Sized,
    {
        for &event in provider.events() {
            self.process(provider, event);
        }
    }

    pub fn process<P>(&mut self, provider: &P, event: MatchEvent) -> Extraction
    where
        P: TraversalProvider + ?Sized,
    {
        let outcome = match event {
            MatchEvent::FunctionDefinition(decl) => self.record_function(provider, decl),
            MatchEvent::Call { caller, callee } => self.record_call(provider, caller, callee),
            MatchEvent::ClassDeclaration(decl) => self.record_class(provider, decl),
        };
        trace!(?event, ?outcome, "processed match");
        self.stats.count(outcome);
        outcome
    }

    fn record_function<P>(&mut self, provider: &P, decl: NodeId) -> Extraction
    where
        P: TraversalProvider + ?Sized,
    {
        if self.filter.is_system_header(provider, Some(decl)) {
            return Extraction::SystemHeader;
        }

        let canonical = provider.canonical(decl);
        let id = self.identity.resolve(provider, canonical);
        if !self.graph.add_function(id.clone()) {
            return Extraction::Duplicate;
        }

        if let Some(class_id) =
            self.containment
                .enclosing_class(provider, &self.identity, canonical)
        {
            self.graph.add_contains(class_id, id);
        }
        Extraction::Recorded
    }

    fn record_call<P>(&mut self, provider: &P, caller: NodeId, callee: Option<NodeId>) -> Extraction
    where
        P: TraversalProvider + ?Sized,
    {
        let Some(callee) = callee.filter(|&c| provider.kind(c).is_function()) else {
            return Extraction::Unresolved;
        };

        if self.filter.is_system_header(provider, Some(caller))
            || self.filter.is_system_header(provider, Some(callee))
        {
            return Extraction::SystemHeader;
        }

        let caller_id = self.identity.resolve(provider, caller);
        let callee_id = self.identity.resolve(provider, callee);
        self.graph.add_call(caller_id, callee_id);
        Extraction::Recorded
    }

    fn record_class<P>(&mut self, provider: &P, decl: NodeId) -> Extraction
    where
        P: TraversalProvider + ?Sized,
    {
        if self.filter.is_system_header(provider, Some(decl)) {
            return Extraction::SystemHeader;
        }

        let Some(name) = provider.name(decl) else {
            return Extraction::Skipped;
        };

        if self.graph.add_class(sanitize_component(name)) {
            Extraction::Recorded
        } else {
            Extraction::Duplicate
        }
    }

    pub fn graph(&self) -> &GraphStore {
        &self.graph
    }

    pub fn stats(&self) -> ExtractionStats {
        self.stats
    }

    /// Ends the run and hands over the accumulated graph.
    pub fn into_graph(self) -> GraphStore {
        debug!(stats = ?self.stats, "extraction finished");
        self.graph
    }
}
