use rustc_hash::{FxHashMap, FxHashSet};

use pkgraph_library::LibraryIdentity;
use pkgraph_normalize::LibraryName;

use crate::GraphItem;

/// Per-round bookkeeping of the candidates reachable under each library name.
///
/// A name is *disputed* once two distinct items have been tracked for it, and *ambiguous* once
/// it has been marked so by the caller. Both facts only hold until [`Tracker::clear`].
#[derive(Debug, Default)]
pub struct Tracker {
    entries: FxHashMap<LibraryName, Entry>,
}

/// The identity of a tracked item, without its payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct TrackedItem {
    key: LibraryIdentity,
    central_transitive: bool,
}

impl<T> From<&GraphItem<T>> for TrackedItem {
    fn from(item: &GraphItem<T>) -> Self {
        Self {
            key: item.key.clone(),
            central_transitive: item.is_central_transitive,
        }
    }
}

#[derive(Debug, Default)]
struct Entry {
    items: Items,
    ambiguous: bool,
}

/// Most names only ever see one candidate, so a set is only allocated for the second.
#[derive(Debug, Default)]
enum Items {
    #[default]
    Empty,
    Single(TrackedItem),
    Many(FxHashSet<TrackedItem>),
}

impl Items {
    fn insert(&mut self, item: TrackedItem) {
        match self {
            Self::Empty => *self = Self::Single(item),
            Self::Single(existing) => {
                if *existing != item {
                    let mut items = FxHashSet::default();
                    items.insert(existing.clone());
                    items.insert(item);
                    *self = Self::Many(items);
                }
            }
            Self::Many(items) => {
                items.insert(item);
            }
        }
    }

    fn all(&self, mut predicate: impl FnMut(&TrackedItem) -> bool) -> bool {
        match self {
            Self::Empty => true,
            Self::Single(item) => predicate(item),
            Self::Many(items) => items.iter().all(predicate),
        }
    }
}

impl Tracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an item as reachable. Tracking an equal item again has no effect.
    pub fn track<T>(&mut self, item: &GraphItem<T>) {
        if let Some(entry) = self.entries.get_mut(&item.key.name) {
            entry.items.insert(TrackedItem::from(item));
        } else {
            self.entries.insert(
                item.key.name.clone(),
                Entry {
                    items: Items::Single(TrackedItem::from(item)),
                    ambiguous: false,
                },
            );
        }
    }

    /// Returns `true` if more than one distinct item has been tracked under the item's name.
    pub fn is_disputed<T>(&self, item: &GraphItem<T>) -> bool {
        self.entries
            .get(&item.key.name)
            .is_some_and(|entry| matches!(entry.items, Items::Many(_)))
    }

    pub fn is_ambiguous<T>(&self, item: &GraphItem<T>) -> bool {
        self.entries
            .get(&item.key.name)
            .is_some_and(|entry| entry.ambiguous)
    }

    pub fn mark_ambiguous<T>(&mut self, item: &GraphItem<T>) {
        if let Some(entry) = self.entries.get_mut(&item.key.name) {
            entry.ambiguous = true;
        } else {
            self.entries.insert(
                item.key.name.clone(),
                Entry {
                    items: Items::Empty,
                    ambiguous: true,
                },
            );
        }
    }

    /// Returns `true` if no tracked item under the same name has a higher version.
    ///
    /// An item whose name was never tracked has nothing to lose to.
    pub fn is_best_version<T>(&self, item: &GraphItem<T>) -> bool {
        self.entries.get(&item.key.name).is_none_or(|entry| {
            entry
                .items
                .all(|known| item.key.version >= known.key.version)
        })
    }

    /// Forget everything, keeping the allocation.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
