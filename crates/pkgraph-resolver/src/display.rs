use std::borrow::Cow;
use std::fmt::{Display, Formatter};

use pkgraph_library::{LibraryDependencyTarget, LibraryType};
use pkgraph_normalize::LibraryName;
use pkgraph_version::{LibraryVersion, VersionRange};

use crate::{DependencyGraph, GraphNode, NodeId};

const NODE_ARROW: &str = " -> ";

impl<'graph, T> GraphNode<'graph, T> {
    /// The name of the resolved library, which carries the canonical casing, or else the
    /// requested name.
    pub fn library_id(&self) -> &'graph LibraryName {
        match self.item() {
            Some(item) => &item.key.name,
            None => &self.key().name,
        }
    }

    /// The resolved version, if the node was resolved.
    pub fn resolved_version(&self) -> Option<&'graph LibraryVersion> {
        self.item().and_then(|item| item.key.version.as_ref())
    }

    /// The requested range, or the range of all versions if none was requested.
    pub fn requested_range(&self) -> Cow<'graph, VersionRange> {
        match &self.key().version_range {
            Some(range) => Cow::Borrowed(range),
            None => Cow::Owned(VersionRange::all()),
        }
    }

    /// Returns `true` if the node resolved to a package, or is unresolved but allows one.
    pub fn is_package(&self) -> bool {
        self.item()
            .is_some_and(|item| item.key.library_type == LibraryType::Package)
            || self
                .key()
                .type_constraint_allows_any_of(LibraryDependencyTarget::PACKAGE)
    }

    /// The id and requested range, e.g. `B (>= 1.0.0)`.
    ///
    /// Projects never show a range, since only one instance of a project can exist in a graph.
    /// Floating ranges are shown without their float.
    pub fn id_and_range(&self) -> String {
        let id = self.library_id();
        if self.is_package() {
            let range = self.requested_range().to_non_snapshot_range();
            if range.has_lower_bound() || range.has_upper_bound() {
                return format!("{id} {}", range.pretty_print());
            }
        }
        id.to_string()
    }

    /// The id and resolved version, e.g. `B 1.0.0`, or the id and range if unresolved.
    pub fn id_and_version_or_range(&self) -> String {
        if !self.is_package() {
            return self.library_id().to_string();
        }
        match self.resolved_version() {
            Some(version) => format!("{} {version}", self.library_id()),
            None => self.id_and_range(),
        }
    }

    /// The chain from the root to this node, e.g. `A 1.0.0 -> B 1.0.0 -> C 2.0.0`.
    pub fn path(&self) -> String {
        self.render_path(false)
    }

    /// Like [`GraphNode::path`], but with the range of this node, e.g.
    /// `A 1.0.0 -> B 1.0.0 -> C (= 2.0.0)`.
    pub fn path_with_last_range(&self) -> String {
        self.render_path(true)
    }

    fn render_path(&self, last_range: bool) -> String {
        let mut segments: Vec<String> = std::iter::successors(Some(*self), GraphNode::parent)
            .enumerate()
            .map(|(index, node)| {
                if index == 0 && last_range {
                    node.id_and_range()
                } else {
                    node.id_and_version_or_range()
                }
            })
            .collect();
        segments.reverse();
        segments.join(NODE_ARROW)
    }
}

impl<T> DependencyGraph<T> {
    /// Follow the children named by `names`, starting at `start`.
    ///
    /// At each level, the first child whose requested name matches, ignoring case, is taken.
    /// Returns `None` if a step is missing.
    ///
    /// # Panics
    ///
    /// Panics if `start` does not belong to this graph.
    pub fn find_path(&self, start: NodeId, names: &[&str]) -> Option<NodeId> {
        let mut node = self.node(start);
        for name in names {
            node = node.children().find(|child| child.key().name.matches(name))?;
        }
        Some(node.id())
    }

    /// Render the tree reachable from the root, one node per line.
    ///
    /// ```text
    /// Root (Accepted) => Root 1.0.0
    /// ├─ A (>= 1.0.0) (Accepted) => A 1.0.0
    /// ├── B (>= 2.0.0) (Rejected) => B 2.0.0
    /// ```
    pub fn dump(&self) -> Dump<'_, T> {
        Dump { graph: self }
    }
}

/// The [`Display`] form of a [`DependencyGraph`]; see [`DependencyGraph::dump`].
pub struct Dump<'graph, T> {
    graph: &'graph DependencyGraph<T>,
}

impl<T> Display for Dump<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut stack = vec![(self.graph.root(), 0usize)];
        while let Some((id, level)) = stack.pop() {
            let node = self.graph.node(id);
            if level > 0 {
                write!(f, "├{} ", "─".repeat(level))?;
            }
            write!(f, "{} ({})", node.id_and_range(), node.disposition())?;
            match node.item() {
                Some(item) => writeln!(f, " => {}", item.key)?,
                None => writeln!(f, " => ???")?,
            }
            stack.extend(node.child_ids().iter().rev().map(|child| (*child, level + 1)));
        }
        Ok(())
    }
}
