//! Breadth-first walks over a [`DependencyGraph`].
//!
//! Every walk visits all nodes of one depth before any node of the next, children in order.
//! A skipped node is neither visited nor expanded.

use std::collections::VecDeque;

use crate::scratch::{Recycle, Rented};
use crate::{DependencyGraph, GraphNode, NodeId};

/// Visit every node beneath `start`, sharing `context` between the visitor and `skip`.
pub(crate) fn walk<T, C>(
    graph: &mut DependencyGraph<T>,
    start: NodeId,
    context: &mut C,
    mut visitor: impl FnMut(&mut DependencyGraph<T>, NodeId, &mut C),
    skip: impl Fn(&DependencyGraph<T>, NodeId, &C) -> bool,
) {
    let mut queue = Rented::<VecDeque<NodeId>>::rent();
    queue.push_back(start);
    while let Some(id) = queue.pop_front() {
        if skip(graph, id, context) {
            continue;
        }
        visitor(graph, id, context);
        queue.extend(graph.slot(id).children.iter().copied());
    }
}

/// Visit every node beneath `start`, handing each node the state its parent's visit returned.
pub(crate) fn walk_with_state<T, S, C>(
    graph: &mut DependencyGraph<T>,
    start: NodeId,
    initial: S,
    context: &mut C,
    mut visitor: impl FnMut(&mut DependencyGraph<T>, NodeId, S, &mut C) -> S,
    skip: impl Fn(&DependencyGraph<T>, NodeId, &C) -> bool,
) where
    S: Copy,
    VecDeque<(NodeId, S)>: Recycle,
{
    let mut queue = Rented::<VecDeque<(NodeId, S)>>::rent();
    queue.push_back((start, initial));
    while let Some((id, state)) = queue.pop_front() {
        if skip(graph, id, context) {
            continue;
        }
        let state = visitor(graph, id, state, context);
        queue.extend(graph.slot(id).children.iter().map(|child| (*child, state)));
    }
}

/// Thread a single accumulator through every node beneath `start`.
pub(crate) fn fold<T, S>(
    graph: &DependencyGraph<T>,
    start: NodeId,
    init: S,
    mut visitor: impl FnMut(&DependencyGraph<T>, NodeId, S) -> S,
) -> S {
    let mut queue = Rented::<VecDeque<NodeId>>::rent();
    let mut state = init;
    queue.push_back(start);
    while let Some(id) = queue.pop_front() {
        state = visitor(graph, id, state);
        queue.extend(graph.slot(id).children.iter().copied());
    }
    state
}

impl<T> DependencyGraph<T> {
    /// Visit every node reachable from the root, breadth-first.
    ///
    /// Nodes detached by [`DependencyGraph::analyze`] are no longer reachable.
    pub fn for_each<'graph>(&'graph self, visitor: impl FnMut(GraphNode<'graph, T>)) {
        self.for_each_from(&[self.root()], visitor);
    }

    /// Visit every node reachable from each of `starts`, breadth-first.
    ///
    /// Each start is walked to completion before the next one begins; a node reachable from
    /// several starts is visited once per start.
    ///
    /// # Panics
    ///
    /// Panics if a start does not belong to this graph.
    pub fn for_each_from<'graph>(
        &'graph self,
        starts: &[NodeId],
        mut visitor: impl FnMut(GraphNode<'graph, T>),
    ) {
        let mut queue = Rented::<VecDeque<NodeId>>::rent();
        for start in starts {
            queue.push_back(self.node(*start).id());
            while let Some(id) = queue.pop_front() {
                visitor(GraphNode { graph: self, id });
                queue.extend(self.slot(id).children.iter().copied());
            }
        }
    }
}
