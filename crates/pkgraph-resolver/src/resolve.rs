use tracing::{trace, warn};

use pkgraph_library::LibraryDependencyTarget;

use crate::scratch::{AcceptedLibraries, Rented};
use crate::traversal::{fold, walk, walk_with_state};
use crate::{
    AnalyzeOptions, DependencyGraph, Disposition, NodeId, Tracker, VersionConflictResult, central,
};

/// The state carried from parent to child while marking ambiguous nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WalkState {
    Walking,
    Rejected,
    Ambiguous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Resolution {
    /// `false` if some node was still undecided after the last round.
    pub(crate) complete: bool,
    pub(crate) rounds: usize,
}

/// Accept or reject every remaining node, one round at a time, until nothing is left to decide.
///
/// Each round sees which candidates are still reachable, defers every subtree beneath a library
/// with several reachable candidates, and decides the rest: the highest reachable version of a
/// library is accepted, every other candidate is rejected along with its subtree. Deferred
/// subtrees are decided in a later round, once the nearer disputes above them are settled.
///
/// Requests that the accepted version of their library does not satisfy are reported as
/// conflicts.
pub(crate) fn resolve_conflicts<T>(
    graph: &mut DependencyGraph<T>,
    options: &AnalyzeOptions,
    version_conflicts: &mut Vec<VersionConflictResult>,
) -> Resolution {
    let mut accepted = Rented::<AcceptedLibraries>::rent();
    let mut tracker = Rented::<Tracker>::rent();

    let root = graph.root();
    let central: Vec<NodeId> = graph
        .node(root)
        .child_ids()
        .iter()
        .copied()
        .filter(|child| graph.is_central_transitive(*child))
        .collect();
    let has_central = !central.is_empty();

    let mut incomplete = true;
    let mut rounds = 0;
    while incomplete && rounds < options.max_rounds {
        rounds += 1;

        // Picture what has not been rejected yet.
        walk_with_state(
            graph,
            root,
            true,
            &mut *tracker,
            track_live_node,
            |graph, id, _| has_central && graph.is_central_transitive(id),
        );

        if has_central {
            central::reject_because_of_rejected_parents(graph, &mut tracker, &central);
        }

        walk_with_state(
            graph,
            root,
            WalkState::Walking,
            &mut *tracker,
            mark_ambiguous_node,
            |_, _, _| false,
        );

        if has_central {
            central::mark_ambiguous(graph, &mut tracker, &central);
        }

        let mut context = TrackerAndAccepted {
            tracker: &tracker,
            accepted: &mut accepted,
        };
        walk_with_state(
            graph,
            root,
            true,
            &mut context,
            accept_or_reject_node,
            |_, _, _| false,
        );

        incomplete = fold(graph, root, false, |graph, id, incomplete| {
            incomplete || graph.disposition(id) == Disposition::Acceptable
        });

        tracker.clear();
    }

    if incomplete {
        warn!("Conflict resolution stopped after {rounds} rounds with nodes left undecided");
    }

    let mut context = ConflictsAndAccepted {
        accepted: &accepted,
        version_conflicts,
    };
    walk(graph, root, &mut context, detect_conflicts, |_, _, _| false);

    Resolution {
        complete: !incomplete,
        rounds,
    }
}

/// Reject the node if it is beneath a rejected node, or is rejected itself.
///
/// Returns `true` if the node is still alive.
pub(crate) fn reject_if_dead<T>(graph: &mut DependencyGraph<T>, id: NodeId, alive: bool) -> bool {
    if !alive || graph.disposition(id) == Disposition::Rejected {
        graph.store_disposition(id, Disposition::Rejected);
        return false;
    }
    true
}

fn track_live_node<T>(
    graph: &mut DependencyGraph<T>,
    id: NodeId,
    alive: bool,
    tracker: &mut Tracker,
) -> bool {
    if !reject_if_dead(graph, id, alive) {
        return false;
    }
    if let Some(item) = graph.item(id) {
        tracker.track(item);
    }
    true
}

/// ```text
/// Root -> B 1.0 -> D 1.0 -> X 1.0
/// Root -> C 1.0 -> D 2.0 -> Z 1.0
/// ```
///
/// In the first round, `D` is disputed, so `X` and `Z` are ambiguous and left alone while
/// `D 1.0` is rejected. In the second round `X` is no longer reachable, `Z` is no longer
/// ambiguous, and `D 2.0` and `Z 1.0` are accepted.
fn mark_ambiguous_node<T>(
    graph: &mut DependencyGraph<T>,
    id: NodeId,
    state: WalkState,
    tracker: &mut Tracker,
) -> WalkState {
    if graph.disposition(id) == Disposition::Rejected {
        return WalkState::Rejected;
    }
    let Some(item) = graph.item(id) else {
        return state;
    };
    match state {
        WalkState::Walking if tracker.is_disputed(item) => WalkState::Ambiguous,
        WalkState::Ambiguous => {
            tracker.mark_ambiguous(item);
            state
        }
        WalkState::Walking | WalkState::Rejected => state,
    }
}

struct TrackerAndAccepted<'a> {
    tracker: &'a Tracker,
    accepted: &'a mut AcceptedLibraries,
}

fn accept_or_reject_node<T>(
    graph: &mut DependencyGraph<T>,
    id: NodeId,
    alive: bool,
    context: &mut TrackerAndAccepted<'_>,
) -> bool {
    if !alive || graph.disposition(id) == Disposition::Rejected {
        return false;
    }

    let (ambiguous, best) = match graph.item(id) {
        Some(item) => (
            context.tracker.is_ambiguous(item),
            context.tracker.is_best_version(item),
        ),
        None => (false, true),
    };
    if ambiguous {
        return false;
    }

    if graph.disposition(id) == Disposition::Acceptable {
        let name = &graph.node(id).key().name;
        if best {
            trace!("Accepting {}", graph.node(id).id_and_range());
            context.accepted.insert(name.clone(), id);
            graph.store_disposition(id, Disposition::Accepted);
        } else {
            trace!("Rejecting {}", graph.node(id).id_and_range());
            graph.store_disposition(id, Disposition::Rejected);
        }
    }

    graph.disposition(id) == Disposition::Accepted
}

struct ConflictsAndAccepted<'a> {
    accepted: &'a AcceptedLibraries,
    version_conflicts: &'a mut Vec<VersionConflictResult>,
}

/// Report the children of an accepted node whose range the accepted version of their library does
/// not satisfy.
fn detect_conflicts<T>(
    graph: &mut DependencyGraph<T>,
    id: NodeId,
    context: &mut ConflictsAndAccepted<'_>,
) {
    if graph.disposition(id) != Disposition::Accepted {
        return;
    }

    for child in graph.node(id).children() {
        let key = child.key();
        let Some(&selected) = context.accepted.get(&key.name) else {
            continue;
        };
        if selected == child.id() {
            continue;
        }
        let Some(range) = &key.version_range else {
            continue;
        };
        let Some(selected_item) = graph.item(selected) else {
            continue;
        };
        let Some(version) = &selected_item.key.version else {
            continue;
        };

        // A project overrides a package of the same name, so it cannot conflict with one.
        let selected_type = LibraryDependencyTarget::from(selected_item.key.library_type);
        let projects = LibraryDependencyTarget::PROJECT | LibraryDependencyTarget::EXTERNAL_PROJECT;
        if selected_type.intersects(projects) || !key.type_constraint.intersects(selected_type) {
            continue;
        }

        if !range.satisfies(version) {
            trace!(
                "{} conflicts with the selected {}",
                child.path_with_last_range(),
                selected_item.key
            );
            context.version_conflicts.push(VersionConflictResult {
                selected,
                conflicting: child.id(),
            });
        }
    }
}
