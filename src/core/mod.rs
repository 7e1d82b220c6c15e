pub mod analyzer;
pub mod containment;
pub mod extractor;
pub mod filter;
pub mod graph;
pub mod identity;
pub mod ignore;
pub mod memory;
pub mod provider;
pub mod scanner;

pub use analyzer::{AnalysisReport, CodebaseAnalyzer};
pub use extractor::{EntityExtractor, Extraction, ExtractionStats};
pub use graph::{Edge, EdgeType, GraphStore};
pub use identity::IdentityResolver;
pub use ignore::IgnoreList;
pub use provider::{HeaderClass, MatchEvent, NodeId, NodeKind, Signature, TraversalProvider};
pub use scanner::FileScanner;
