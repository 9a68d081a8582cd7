use std::hash::Hash;

use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;

/// Set of items awaiting (re-)processing.
///
/// Inserting an item that is already pending is a no-op. Removal order is
/// unspecified; callers may only rely on every pending item eventually being
/// popped.
#[derive(Debug)]
pub(crate) struct Worklist<T> {
    pending: IndexSet<T, FxBuildHasher>,
}

impl<T: Eq + Hash> Worklist<T> {
    pub(crate) fn new() -> Self {
        Self {
            pending: IndexSet::with_hasher(FxBuildHasher),
        }
    }

    /// Returns `true` if `item` was not already pending.
    pub(crate) fn insert(&mut self, item: T) -> bool {
        self.pending.insert(item)
    }

    pub(crate) fn pop(&mut self) -> Option<T> {
        self.pending.pop()
    }

    pub(crate) fn len(&self) -> usize {
        self.pending.len()
    }
}
