//! Conflict resolution for central transitive dependencies.
//!
//! With central package management, a transitive dependency pinned centrally is uplifted to a
//! child of the root. Its subtree must not be reachable just because the root is: it lives only
//! as long as one of its foster parents, the nodes that originally requested it, does.

use rustc_hash::FxHashSet;
use tracing::trace;

use crate::resolve::reject_if_dead;
use crate::scratch::Rented;
use crate::traversal::{walk, walk_with_state};
use crate::{DependencyGraph, Disposition, NodeId, Tracker};

/// Reject the subtrees of central transitive nodes whose foster parents were all rejected, then
/// track every central transitive node that is still alive.
///
/// Rejecting one central transitive node can reject the foster parents of another, so rejection
/// repeats until nothing changes. Tracking waits until then.
pub(crate) fn reject_because_of_rejected_parents<T>(
    graph: &mut DependencyGraph<T>,
    tracker: &mut Tracker,
    central: &[NodeId],
) {
    let mut live = Rented::<FxHashSet<NodeId>>::rent();
    let alive = graph.disposition(graph.root()) != Disposition::Rejected;
    for start in central {
        walk_with_state(
            graph,
            *start,
            alive,
            &mut *live,
            |graph, id, alive, live| {
                let alive = reject_if_dead(graph, id, alive);
                if alive {
                    live.insert(id);
                }
                alive
            },
            |_, _, _| false,
        );
    }

    let mut pending = true;
    while pending {
        pending = false;
        for start in central {
            if graph.stored_disposition(*start) == Disposition::Acceptable
                && graph.are_all_parents_rejected(*start)
            {
                trace!(
                    "Rejecting {}, all of its parents were rejected",
                    graph.node(*start).id_and_range()
                );
                walk(
                    graph,
                    *start,
                    &mut (),
                    |graph, id, _| graph.store_disposition(id, Disposition::Rejected),
                    |_, _, _| false,
                );
                pending = true;
            }
        }
    }

    for id in live.iter() {
        if graph.disposition(*id) == Disposition::Rejected {
            continue;
        }
        if let Some(item) = graph.item(*id) {
            tracker.track(item);
        }
    }
}

/// Mark central transitive nodes ambiguous, along with their subtrees, when every foster parent
/// that is still alive is disputed or ambiguous itself.
///
/// Marking one node can make the foster parents of another ambiguous, so marking repeats until
/// nothing changes. A node without foster parents is never marked.
pub(crate) fn mark_ambiguous<T>(
    graph: &mut DependencyGraph<T>,
    tracker: &mut Tracker,
    central: &[NodeId],
) {
    loop {
        let mut marked = false;
        for start in central {
            let start = *start;
            if graph.disposition(start) != Disposition::Acceptable {
                continue;
            }
            let Some(item) = graph.item(start) else {
                continue;
            };
            if tracker.is_ambiguous(item) {
                continue;
            }

            let parents = graph.foster_parents(start);
            let contested = !parents.is_empty()
                && parents.iter().all(|parent| {
                    graph.disposition(*parent) == Disposition::Rejected
                        || graph.item(*parent).is_some_and(|item| {
                            tracker.is_disputed(item) || tracker.is_ambiguous(item)
                        })
                });
            if !contested {
                continue;
            }

            trace!(
                "Deferring {}, all of its parents are ambiguous",
                graph.node(start).id_and_range()
            );
            // Subtrees that are already ambiguous were marked along with their parents.
            walk(
                graph,
                start,
                tracker,
                |graph, id, tracker| {
                    if let Some(item) = graph.item(id) {
                        tracker.mark_ambiguous(item);
                    }
                },
                |graph, id, tracker| graph.item(id).is_some_and(|item| tracker.is_ambiguous(item)),
            );
            marked = true;
        }

        if !marked {
            break;
        }
    }
}
