use tracing::trace;

use pkgraph_version::is_greater_than_or_equal_to;

use crate::scratch::{Rented, WorkingDowngrades};
use crate::traversal::walk;
use crate::{DependencyGraph, Disposition, DowngradeResult, NodeId};

struct CyclesAndDowngrades<'a> {
    cycles: &'a mut Vec<NodeId>,
    downgrades: &'a mut WorkingDowngrades,
}

/// Collect and detach cycle nodes, and detach potentially downgraded nodes, recording the nearer
/// node that downgraded each of them.
///
/// ```text
/// A -> B -> C -> D 2.0 (downgraded)
///        -> D 1.0
/// ```
///
/// A farther request is not a downgrade when the nearer one's resolved version still satisfies
/// it, which happens when no source had the nearer request's minimum and it was bumped up.
pub(crate) fn check_cycles_and_nearest_wins<T>(
    graph: &mut DependencyGraph<T>,
    cycles: &mut Vec<NodeId>,
    downgrades: &mut Vec<DowngradeResult>,
) {
    let mut working = Rented::<WorkingDowngrades>::rent();
    let mut context = CyclesAndDowngrades {
        cycles,
        downgrades: &mut working,
    };

    let root = graph.root();
    walk(graph, root, &mut context, check_node, |_, _, _| false);

    downgrades.extend(
        working
            .iter()
            .map(|(downgraded_from, downgraded_to)| DowngradeResult {
                downgraded_from: *downgraded_from,
                downgraded_to: *downgraded_to,
            }),
    );
}

fn check_node<T>(
    graph: &mut DependencyGraph<T>,
    id: NodeId,
    context: &mut CyclesAndDowngrades<'_>,
) {
    match graph.disposition(id) {
        Disposition::Cycle => {
            trace!("Found cycle at {}", graph.node(id).path());
            context.cycles.push(id);
            // The parent link survives, so the path can still be rendered.
            graph.detach(id);
            return;
        }
        Disposition::PotentiallyDowngraded => {}
        _ => return,
    }

    let node = graph.node(id);
    let key = node.key();
    for ancestor in std::iter::successors(node.parent(), |ancestor| ancestor.parent()) {
        for side in ancestor.children() {
            if side.id() == id || side.key().name != key.name {
                continue;
            }

            // Requests without a range, e.g. framework references, never downgrade.
            match (&side.key().version_range, &key.version_range) {
                (Some(side_range), Some(node_range))
                    if !is_greater_than_or_equal_to(side_range, node_range) =>
                {
                    let resolved = side.item().and_then(|item| item.key.version.as_ref());
                    if resolved.is_some_and(|version| node_range.satisfies(version)) {
                        continue;
                    }
                    trace!("{} is downgraded by {}", key, side.key());
                    context.downgrades.insert(id, side.id());
                }
                _ => {
                    context.downgrades.shift_remove(&id);
                }
            }
        }
    }

    graph.detach(id);
}
