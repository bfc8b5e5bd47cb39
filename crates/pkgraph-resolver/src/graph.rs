use std::fmt::{Display, Formatter};

use smallvec::SmallVec;

use pkgraph_library::LibraryRange;

use crate::{Disposition, GraphError, GraphItem};

/// The index of a node in a [`DependencyGraph`].
///
/// Ids are only meaningful for the graph that created them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[cfg(test)]
    pub(crate) fn from_index(index: usize) -> Self {
        Self(u32::try_from(index).unwrap())
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a node's disposition is determined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// The node's stored disposition is its disposition.
    Direct,
    /// The node was promoted to the root by central package management.
    ///
    /// It reads as [`Disposition::Rejected`] once every one of its foster parents, the nodes that
    /// originally requested it, has been rejected.
    Uplifted {
        foster_parents: SmallVec<[NodeId; 2]>,
    },
}

#[derive(Debug, Clone)]
pub(crate) struct NodeSlot<T> {
    pub(crate) key: LibraryRange,
    pub(crate) item: Option<GraphItem<T>>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) disposition: Disposition,
    pub(crate) kind: NodeKind,
}

/// A requested-dependency tree, rooted at the project being restored.
///
/// Nodes are stored in an arena and refer to each other by [`NodeId`]. Every node except the
/// root has exactly one parent, which lists it among its children. Parent links are kept even
/// when a node is detached from its parent's children, so the path to a pruned node can still be
/// rendered.
#[derive(Debug, Clone)]
pub struct DependencyGraph<T> {
    nodes: Vec<NodeSlot<T>>,
    root: NodeId,
}

impl<T> DependencyGraph<T> {
    /// Create a graph containing only the root node.
    pub fn new(key: LibraryRange, item: Option<GraphItem<T>>) -> Self {
        Self {
            nodes: vec![NodeSlot {
                key,
                item,
                parent: None,
                children: Vec::new(),
                disposition: Disposition::Acceptable,
                kind: NodeKind::Direct,
            }],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The number of nodes, including detached ones.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn check(&self, id: NodeId) -> Result<(), GraphError> {
        if id.index() < self.nodes.len() {
            Ok(())
        } else {
            Err(GraphError::UnknownNode(id))
        }
    }

    fn push(&mut self, parent: NodeId, slot: NodeSlot<T>) -> Result<NodeId, GraphError> {
        let id = u32::try_from(self.nodes.len())
            .map(NodeId)
            .map_err(|_| GraphError::TooManyNodes)?;
        self.nodes.push(slot);
        self.nodes[parent.index()].children.push(id);
        Ok(id)
    }

    /// Append a node as the last child of `parent`.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        key: LibraryRange,
        item: Option<GraphItem<T>>,
    ) -> Result<NodeId, GraphError> {
        self.check(parent)?;
        self.push(
            parent,
            NodeSlot {
                key,
                item,
                parent: Some(parent),
                children: Vec::new(),
                disposition: Disposition::Acceptable,
                kind: NodeKind::Direct,
            },
        )
    }

    /// Append an uplifted node as the last child of the root.
    ///
    /// The item is marked as central transitive.
    pub fn add_uplifted(
        &mut self,
        key: LibraryRange,
        item: GraphItem<T>,
        foster_parents: impl IntoIterator<Item = NodeId>,
    ) -> Result<NodeId, GraphError> {
        let foster_parents: SmallVec<[NodeId; 2]> = foster_parents.into_iter().collect();
        for parent in &foster_parents {
            self.check(*parent)?;
        }
        let root = self.root;
        self.push(
            root,
            NodeSlot {
                key,
                item: Some(item.with_central_transitive(true)),
                parent: Some(root),
                children: Vec::new(),
                disposition: Disposition::Acceptable,
                kind: NodeKind::Uplifted { foster_parents },
            },
        )
    }

    pub fn add_foster_parent(&mut self, node: NodeId, parent: NodeId) -> Result<(), GraphError> {
        self.check(node)?;
        self.check(parent)?;
        match &mut self.nodes[node.index()].kind {
            NodeKind::Uplifted { foster_parents } => {
                foster_parents.push(parent);
                Ok(())
            }
            NodeKind::Direct => Err(GraphError::NotUplifted(node)),
        }
    }

    /// Set the stored disposition of a node, e.g. to flag a cycle before analysis.
    pub fn set_disposition(
        &mut self,
        node: NodeId,
        disposition: Disposition,
    ) -> Result<(), GraphError> {
        self.check(node)?;
        self.nodes[node.index()].disposition = disposition;
        Ok(())
    }

    /// Returns a view of the node.
    ///
    /// # Panics
    ///
    /// Panics if the id does not belong to this graph.
    pub fn node(&self, id: NodeId) -> GraphNode<'_, T> {
        assert!(id.index() < self.nodes.len(), "unknown node `{id}`");
        GraphNode { graph: self, id }
    }

    /// Returns a view of the node, if it exists.
    pub fn get(&self, id: NodeId) -> Option<GraphNode<'_, T>> {
        (id.index() < self.nodes.len()).then_some(GraphNode { graph: self, id })
    }

    pub(crate) fn slot(&self, id: NodeId) -> &NodeSlot<T> {
        &self.nodes[id.index()]
    }

    pub(crate) fn item(&self, id: NodeId) -> Option<&GraphItem<T>> {
        self.nodes[id.index()].item.as_ref()
    }

    pub(crate) fn is_central_transitive(&self, id: NodeId) -> bool {
        self.item(id).is_some_and(|item| item.is_central_transitive)
    }

    pub(crate) fn stored_disposition(&self, id: NodeId) -> Disposition {
        self.nodes[id.index()].disposition
    }

    pub(crate) fn store_disposition(&mut self, id: NodeId, disposition: Disposition) {
        self.nodes[id.index()].disposition = disposition;
    }

    /// The effective disposition: uplifted nodes read as rejected once all their foster parents
    /// are rejected.
    pub(crate) fn disposition(&self, id: NodeId) -> Disposition {
        if self.are_all_parents_rejected(id) {
            Disposition::Rejected
        } else {
            self.stored_disposition(id)
        }
    }

    /// Returns `true` if the node has foster parents and every one of them is rejected.
    pub(crate) fn are_all_parents_rejected(&self, id: NodeId) -> bool {
        match &self.nodes[id.index()].kind {
            NodeKind::Uplifted { foster_parents } => {
                !foster_parents.is_empty()
                    && foster_parents
                        .iter()
                        .all(|parent| self.stored_disposition(*parent) == Disposition::Rejected)
            }
            NodeKind::Direct => false,
        }
    }

    pub(crate) fn foster_parents(&self, id: NodeId) -> &[NodeId] {
        match &self.nodes[id.index()].kind {
            NodeKind::Uplifted { foster_parents } => foster_parents,
            NodeKind::Direct => &[],
        }
    }

    /// Remove the node from its parent's children, keeping its own parent link.
    pub(crate) fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.nodes[id.index()].parent else {
            return;
        };
        let children = &mut self.nodes[parent.index()].children;
        if let Some(position) = children.iter().position(|child| *child == id) {
            children.remove(position);
        }
    }
}

/// A read-only view of one node in a [`DependencyGraph`].
pub struct GraphNode<'graph, T> {
    pub(crate) graph: &'graph DependencyGraph<T>,
    pub(crate) id: NodeId,
}

impl<T> Clone for GraphNode<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for GraphNode<'_, T> {}

impl<T> std::fmt::Debug for GraphNode<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphNode")
            .field("id", &self.id)
            .field("key", &self.key().to_string())
            .field("disposition", &self.disposition())
            .finish_non_exhaustive()
    }
}

impl<'graph, T> GraphNode<'graph, T> {
    fn slot(&self) -> &'graph NodeSlot<T> {
        self.graph.slot(self.id)
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The requested name, version range and type constraint.
    pub fn key(&self) -> &'graph LibraryRange {
        &self.slot().key
    }

    /// The library the request resolved to, if any.
    pub fn item(&self) -> Option<&'graph GraphItem<T>> {
        self.slot().item.as_ref()
    }

    pub fn parent(&self) -> Option<GraphNode<'graph, T>> {
        self.slot().parent.map(|parent| self.graph.node(parent))
    }

    pub fn child_ids(&self) -> &'graph [NodeId] {
        &self.slot().children
    }

    pub fn children(&self) -> impl Iterator<Item = GraphNode<'graph, T>> + 'graph {
        let graph = self.graph;
        self.slot()
            .children
            .iter()
            .map(move |child| GraphNode { graph, id: *child })
    }

    pub fn kind(&self) -> &'graph NodeKind {
        &self.slot().kind
    }

    /// The effective disposition; see [`NodeKind::Uplifted`].
    pub fn disposition(&self) -> Disposition {
        self.graph.disposition(self.id)
    }

    pub fn stored_disposition(&self) -> Disposition {
        self.graph.stored_disposition(self.id)
    }

    pub fn foster_parents(&self) -> &'graph [NodeId] {
        self.graph.foster_parents(self.id)
    }

    pub fn are_all_parents_rejected(&self) -> bool {
        self.graph.are_all_parents_rejected(self.id)
    }

    /// The number of parent links between this node and the root.
    pub fn depth(&self) -> usize {
        std::iter::successors(self.parent(), GraphNode::parent).count()
    }
}
