use crate::NodeId;

/// The outcome of [`crate::DependencyGraph::analyze`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalyzeResult {
    /// Nodes whose requested version was overridden by a lower request nearer to the root.
    pub downgrades: Vec<DowngradeResult>,
    /// Requests that the version selected for their library does not satisfy.
    pub version_conflicts: Vec<VersionConflictResult>,
    /// Nodes that were flagged as cycles, in breadth-first order.
    pub cycles: Vec<NodeId>,
    /// `false` if conflict resolution stopped at the round cap with nodes left undecided.
    pub complete: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DowngradeResult {
    /// The farther node, whose request was not honored.
    pub downgraded_from: NodeId,
    /// The nearer node that won.
    pub downgraded_to: NodeId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VersionConflictResult {
    /// The accepted node for the library.
    pub selected: NodeId,
    /// A request for the same library that the selected version does not satisfy.
    pub conflicting: NodeId,
}
