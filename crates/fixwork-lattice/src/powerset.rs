use std::collections::BTreeSet;
use std::fmt;

use crate::{HasBottom, Lattice};

/// Subset lattice over an ordered element type.
///
/// Bottom is the empty set, join is union and meet is intersection. There is
/// no top: the universe of `T` is not known to the lattice. Any analysis that
/// only ever inserts elements drawn from a finite set terminates.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PowerSet<T: Ord> {
    elements: BTreeSet<T>,
}

impl<T: Ord> PowerSet<T> {
    pub fn new() -> Self {
        Self {
            elements: BTreeSet::new(),
        }
    }

    pub fn singleton(element: T) -> Self {
        let mut set = Self::new();
        set.insert(element);
        set
    }

    /// Insert `element`, returning `true` if it was not already present.
    pub fn insert(&mut self, element: T) -> bool {
        self.elements.insert(element)
    }

    /// Return a copy of `self` with `element` added.
    pub fn with(&self, element: T) -> Self
    where
        T: Clone,
    {
        let mut set = self.clone();
        set.insert(element);
        set
    }

    pub fn contains(&self, element: &T) -> bool {
        self.elements.contains(element)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterate the elements in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.elements.iter()
    }

    pub fn as_set(&self) -> &BTreeSet<T> {
        &self.elements
    }

    pub fn into_set(self) -> BTreeSet<T> {
        self.elements
    }
}

impl<T: Ord> Default for PowerSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + fmt::Debug> fmt::Debug for PowerSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.elements.iter()).finish()
    }
}

impl<T: Ord + fmt::Display> fmt::Display for PowerSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{element}")?;
        }
        write!(f, "}}")
    }
}

impl<T: Ord> FromIterator<T> for PowerSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            elements: iter.into_iter().collect(),
        }
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for PowerSet<T> {
    fn from(elements: [T; N]) -> Self {
        elements.into_iter().collect()
    }
}

impl<T: Ord> From<BTreeSet<T>> for PowerSet<T> {
    fn from(elements: BTreeSet<T>) -> Self {
        Self { elements }
    }
}

impl<T: Ord> IntoIterator for PowerSet<T> {
    type Item = T;
    type IntoIter = std::collections::btree_set::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl<'a, T: Ord> IntoIterator for &'a PowerSet<T> {
    type Item = &'a T;
    type IntoIter = std::collections::btree_set::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl<T: Ord> Extend<T> for PowerSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.elements.extend(iter);
    }
}

impl<T: Ord + Clone> Lattice for PowerSet<T> {
    fn join(&self, other: &Self) -> Self {
        self.elements.union(&other.elements).cloned().collect()
    }

    fn meet(&self, other: &Self) -> Self {
        self.elements
            .intersection(&other.elements)
            .cloned()
            .collect()
    }

    fn is_subseteq(&self, other: &Self) -> bool {
        self.elements.is_subset(&other.elements)
    }

    fn is_equivalent(&self, other: &Self) -> bool {
        self.elements == other.elements
    }
}

impl<T: Ord + Clone> HasBottom for PowerSet<T> {
    fn bottom() -> Self {
        Self::new()
    }

    fn is_bottom(&self) -> bool {
        self.is_empty()
    }
}
