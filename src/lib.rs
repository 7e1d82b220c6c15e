//! # funcgraph
//!
//! Function-call and class-containment graph extraction for C and C++ codebases.
//!
//! funcgraph parses every translation unit under a root directory with tree-sitter,
//! follows `#include`s into user and system headers, and records:
//!
//! - each class with a body,
//! - each function with a body, under an overload-safe qualified ID,
//! - `contain` edges from a class to the functions it encloses,
//! - `call` edges from a caller to each resolved callee.
//!
//! Declarations from system headers are left out. The graph is written in TA
//! (tuple-attribute) form, or as compact JSON, optionally with every ID replaced
//! by its SHA-256 digest.

pub mod config;
pub mod core;
pub mod error;
pub mod formatters;
pub mod parsers;

pub use crate::core::{AnalysisReport, CodebaseAnalyzer, GraphStore};
pub use error::{FuncGraphError, Result};
