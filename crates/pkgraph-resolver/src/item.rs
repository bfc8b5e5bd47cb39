use std::hash::{Hash, Hasher};

use pkgraph_library::LibraryIdentity;

/// One candidate resolution of a node: the library it resolved to, plus an opaque payload.
///
/// Two items are equal when they identify the same library and agree on whether they were
/// introduced by central package management; the payload is ignored.
#[derive(Debug, Clone)]
pub struct GraphItem<T> {
    pub key: LibraryIdentity,
    pub data: T,
    pub is_central_transitive: bool,
}

impl<T> GraphItem<T> {
    pub fn new(key: LibraryIdentity, data: T) -> Self {
        Self {
            key,
            data,
            is_central_transitive: false,
        }
    }

    #[must_use]
    pub fn with_central_transitive(mut self, is_central_transitive: bool) -> Self {
        self.is_central_transitive = is_central_transitive;
        self
    }
}

impl<T> PartialEq for GraphItem<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.is_central_transitive == other.is_central_transitive
    }
}

impl<T> Eq for GraphItem<T> {}

impl<T> Hash for GraphItem<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
        self.is_central_transitive.hash(state);
    }
}
