use std::str::FromStr;

use pkgraph_library::{LibraryDependencyTarget, LibraryIdentity, LibraryRange, LibraryType};
use pkgraph_normalize::LibraryName;
use pkgraph_resolver::{DependencyGraph, Disposition, GraphItem, GraphNode, NodeId};
use pkgraph_version::{LibraryVersion, VersionRange};
use rustc_hash::FxHashSet;

/// A graph under construction, rooted at the project `App 1.0.0`.
pub(crate) struct TestGraph {
    pub(crate) graph: DependencyGraph<()>,
}

impl TestGraph {
    pub(crate) fn new() -> Self {
        let key = LibraryRange::new(name("App"), None)
            .with_type_constraint(LibraryDependencyTarget::PROJECT);
        let item = GraphItem::new(
            LibraryIdentity::new(name("App"), LibraryVersion::new(1, 0, 0), LibraryType::Project),
            (),
        );
        Self {
            graph: DependencyGraph::new(key, Some(item)),
        }
    }

    pub(crate) fn root(&self) -> NodeId {
        self.graph.root()
    }

    /// Add a request for `name` with `range`, resolved to the package `name version`.
    pub(crate) fn package(
        &mut self,
        parent: NodeId,
        library: &str,
        range: &str,
        version: &str,
    ) -> NodeId {
        self.graph
            .add_child(parent, request(library, range), Some(package(library, version)))
            .unwrap()
    }

    /// Add a request that no source could satisfy.
    pub(crate) fn unresolved(&mut self, parent: NodeId, library: &str, range: &str) -> NodeId {
        self.graph
            .add_child(parent, request(library, range), None)
            .unwrap()
    }

    /// Add a centrally pinned transitive package as a child of the root.
    pub(crate) fn central(
        &mut self,
        library: &str,
        range: &str,
        version: &str,
        foster_parents: &[NodeId],
    ) -> NodeId {
        self.graph
            .add_uplifted(
                request(library, range),
                package(library, version),
                foster_parents.iter().copied(),
            )
            .unwrap()
    }

    pub(crate) fn flag(&mut self, node: NodeId, disposition: Disposition) {
        self.graph.set_disposition(node, disposition).unwrap();
    }
}

pub(crate) fn name(name: &str) -> LibraryName {
    LibraryName::from_str(name).unwrap()
}

pub(crate) fn request(library: &str, range: &str) -> LibraryRange {
    LibraryRange::new(name(library), Some(VersionRange::from_str(range).unwrap()))
}

pub(crate) fn package(library: &str, version: &str) -> GraphItem<()> {
    GraphItem::new(
        LibraryIdentity::new(
            name(library),
            LibraryVersion::from_str(version).unwrap(),
            LibraryType::Package,
        ),
        (),
    )
}

/// Returns `true` if the node and all of its ancestors are accepted.
fn is_selected(node: GraphNode<'_, ()>) -> bool {
    std::iter::successors(Some(node), GraphNode::parent)
        .all(|node| node.disposition() == Disposition::Accepted)
}

/// The selected libraries, e.g. `D 2.0.0`, in breadth-first order.
pub(crate) fn selected(graph: &DependencyGraph<()>) -> Vec<String> {
    let mut selected = Vec::new();
    graph.for_each(|node| {
        if is_selected(node) {
            selected.push(node.id_and_version_or_range());
        }
    });
    selected
}

/// At most one node is selected for each library.
pub(crate) fn assert_one_selected_per_library(graph: &DependencyGraph<()>) {
    let mut seen = FxHashSet::default();
    graph.for_each(|node| {
        if is_selected(node) {
            assert!(
                seen.insert(node.library_id().clone()),
                "{} is selected twice",
                node.library_id()
            );
        }
    });
}

/// Every reachable node was decided.
pub(crate) fn assert_decided(graph: &DependencyGraph<()>) {
    graph.for_each(|node| {
        assert!(
            matches!(
                node.disposition(),
                Disposition::Accepted | Disposition::Rejected
            ),
            "{} is {}",
            node.path(),
            node.disposition()
        );
    });
}
