//! Nearest-wins resolution of a requested-dependency graph.
//!
//! A [`DependencyGraph`] holds every request made while walking a project's dependencies, each
//! with the library it resolved to. [`DependencyGraph::analyze`] decides which of the requests
//! for each library wins, preferring the one nearest to the root, and reports the downgrades,
//! version conflicts and cycles it found on the way.

pub use disposition::Disposition;
pub use display::Dump;
pub use error::GraphError;
pub use graph::{DependencyGraph, GraphNode, NodeId, NodeKind};
pub use item::GraphItem;
pub use options::{AnalyzeOptions, AnalyzeOptionsBuilder, DEFAULT_MAX_ROUNDS};
pub use result::{AnalyzeResult, DowngradeResult, VersionConflictResult};
pub use tracker::Tracker;

mod analyze;
mod central;
mod display;
mod disposition;
mod error;
mod graph;
mod item;
mod nearest_wins;
mod options;
mod resolve;
mod result;
mod scratch;
mod tracker;
mod traversal;
