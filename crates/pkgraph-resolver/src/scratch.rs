//! Thread-local, single-slot recyclers for the collections a walk needs.
//!
//! Each recyclable type owns one slot per thread. Renting takes the parked value, or a fresh one
//! if the slot is empty (e.g. when walks nest). Dropping the rental clears the value and parks it
//! again, unless another rental already refilled the slot.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::ops::{Deref, DerefMut};
use std::thread::LocalKey;

use indexmap::IndexMap;
use rustc_hash::{FxBuildHasher, FxHashMap, FxHashSet};

use pkgraph_normalize::LibraryName;

use crate::resolve::WalkState;
use crate::{NodeId, Tracker};

/// Accepted nodes by library name.
pub(crate) type AcceptedLibraries = FxHashMap<LibraryName, NodeId>;

/// Downgraded nodes, mapped to the nearer node they were downgraded by, in discovery order.
pub(crate) type WorkingDowngrades = IndexMap<NodeId, NodeId, FxBuildHasher>;

pub(crate) trait Recycle: Default + 'static {
    fn slot() -> &'static LocalKey<RefCell<Option<Self>>>;

    /// Empty the value, keeping its allocation.
    fn reset(&mut self);
}

macro_rules! recycle {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Recycle for $ty {
                fn slot() -> &'static LocalKey<RefCell<Option<Self>>> {
                    thread_local! {
                        static SLOT: RefCell<Option<$ty>> = const { RefCell::new(None) };
                    }
                    &SLOT
                }

                fn reset(&mut self) {
                    self.clear();
                }
            }
        )*
    };
}

recycle!(
    VecDeque<NodeId>,
    VecDeque<(NodeId, bool)>,
    VecDeque<(NodeId, WalkState)>,
    AcceptedLibraries,
    WorkingDowngrades,
    FxHashSet<NodeId>,
    Tracker,
);

/// A value borrowed from its thread's slot, returned on drop.
pub(crate) struct Rented<T: Recycle> {
    value: T,
}

impl<T: Recycle> Rented<T> {
    pub(crate) fn rent() -> Self {
        let value = T::slot()
            .try_with(|slot| slot.borrow_mut().take())
            .ok()
            .flatten()
            .unwrap_or_default();
        Self { value }
    }
}

impl<T: Recycle> Deref for Rented<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T: Recycle> DerefMut for Rented<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.value
    }
}

impl<T: Recycle> Drop for Rented<T> {
    fn drop(&mut self) {
        let mut value = std::mem::take(&mut self.value);
        value.reset();
        // The slot is gone during thread teardown; the value is simply dropped then.
        let _ = T::slot().try_with(move |slot| {
            let mut slot = slot.borrow_mut();
            if slot.is_none() {
                *slot = Some(value);
            }
        });
    }
}
