use tracing::debug;

use crate::nearest_wins::check_cycles_and_nearest_wins;
use crate::resolve::resolve_conflicts;
use crate::{
    AnalyzeOptions, AnalyzeResult, DependencyGraph, Disposition, DowngradeResult, GraphNode,
};

impl<T> DependencyGraph<T> {
    /// Resolve the graph with the default [`AnalyzeOptions`].
    ///
    /// See [`DependencyGraph::analyze_with`].
    pub fn analyze(&mut self) -> AnalyzeResult {
        self.analyze_with(&AnalyzeOptions::default())
    }

    /// Resolve the graph in place: every node that is still reachable ends up
    /// [`Disposition::Accepted`] or [`Disposition::Rejected`], with at most one accepted node per
    /// library, the one nearest to the root.
    ///
    /// Cycle nodes and potentially downgraded nodes are detached from their parents first. Only
    /// downgrades to a node that was accepted, from a node whose ancestors were all accepted, are
    /// reported.
    pub fn analyze_with(&mut self, options: &AnalyzeOptions) -> AnalyzeResult {
        let mut result = AnalyzeResult::default();

        check_cycles_and_nearest_wins(self, &mut result.cycles, &mut result.downgrades);
        let resolution = resolve_conflicts(self, options, &mut result.version_conflicts);
        result.complete = resolution.complete;

        result
            .downgrades
            .retain(|downgrade| self.is_relevant_downgrade(downgrade));

        debug!(
            "Analyzed {} nodes in {} rounds: {} cycles, {} downgrades, {} version conflicts",
            self.len(),
            resolution.rounds,
            result.cycles.len(),
            result.downgrades.len(),
            result.version_conflicts.len()
        );

        result
    }

    fn is_relevant_downgrade(&self, downgrade: &DowngradeResult) -> bool {
        let mut ancestors = std::iter::successors(
            self.node(downgrade.downgraded_from).parent(),
            GraphNode::parent,
        );
        self.disposition(downgrade.downgraded_to) == Disposition::Accepted
            && ancestors.all(|ancestor| ancestor.disposition() == Disposition::Accepted)
    }
}
