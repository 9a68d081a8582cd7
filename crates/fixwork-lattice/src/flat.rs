use std::fmt;

use crate::{HasBottom, HasTop, Lattice};

/// Flat lattice over `T`: every concrete value sits between bottom and top
/// and distinct values are incomparable.
///
/// ```text
///        Top
///     /   |   \
///  V(a) V(b) V(c) ...
///     \   |   /
///       Bottom
/// ```
///
/// The height is 3, so any monotone analysis over it terminates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Flat<T> {
    Bottom,
    Value(T),
    Top,
}

impl<T> Flat<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Flat::Value(v) => Some(v),
            Flat::Bottom | Flat::Top => None,
        }
    }

    /// Apply `f` to a known value, keeping bottom and top as they are.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Flat<U> {
        match self {
            Flat::Bottom => Flat::Bottom,
            Flat::Value(v) => Flat::Value(f(v)),
            Flat::Top => Flat::Top,
        }
    }
}

impl<T> Default for Flat<T> {
    fn default() -> Self {
        Flat::Bottom
    }
}

impl<T> From<T> for Flat<T> {
    fn from(value: T) -> Self {
        Flat::Value(value)
    }
}

impl<T: fmt::Display> fmt::Display for Flat<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Flat::Bottom => write!(f, "⊥"),
            Flat::Value(v) => write!(f, "{v}"),
            Flat::Top => write!(f, "⊤"),
        }
    }
}

impl<T: Clone + Eq> Lattice for Flat<T> {
    fn join(&self, other: &Self) -> Self {
        match (self, other) {
            (Flat::Bottom, x) | (x, Flat::Bottom) => x.clone(),
            (Flat::Value(a), Flat::Value(b)) if a == b => Flat::Value(a.clone()),
            _ => Flat::Top,
        }
    }

    fn meet(&self, other: &Self) -> Self {
        match (self, other) {
            (Flat::Top, x) | (x, Flat::Top) => x.clone(),
            (Flat::Value(a), Flat::Value(b)) if a == b => Flat::Value(a.clone()),
            _ => Flat::Bottom,
        }
    }

    fn is_subseteq(&self, other: &Self) -> bool {
        match (self, other) {
            (Flat::Bottom, _) | (_, Flat::Top) => true,
            (Flat::Value(a), Flat::Value(b)) => a == b,
            _ => false,
        }
    }
}

impl<T: Clone + Eq> HasBottom for Flat<T> {
    fn bottom() -> Self {
        Flat::Bottom
    }
}

impl<T: Clone + Eq> HasTop for Flat<T> {
    fn top() -> Self {
        Flat::Top
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinct_values_join_to_top() {
        assert_eq!(Flat::Value(1).join(&Flat::Value(2)), Flat::Top);
        assert_eq!(Flat::Value(1).join(&Flat::Value(1)), Flat::Value(1));
        assert_eq!(Flat::Bottom.join(&Flat::Value(7)), Flat::Value(7));
    }

    #[test]
    fn distinct_values_meet_to_bottom() {
        assert_eq!(Flat::Value(1).meet(&Flat::Value(2)), Flat::Bottom);
        assert_eq!(Flat::Top.meet(&Flat::Value(3)), Flat::Value(3));
    }

    #[test]
    fn equivalence_matches_equality() {
        assert!(Flat::Value(4).is_equivalent(&Flat::Value(4)));
        assert!(!Flat::Value(4).is_equivalent(&Flat::Top));
        assert!(Flat::<i32>::Top.is_top());
        assert!(Flat::<i32>::Bottom.is_bottom());
    }

    #[test]
    fn value_is_only_known_for_constants() {
        assert_eq!(Flat::Value(5).value(), Some(&5));
        assert_eq!(Flat::<i32>::Bottom.value(), None);
        assert_eq!(Flat::<i32>::Top.value(), None);
    }

    #[test]
    fn map_preserves_extremes() {
        assert_eq!(Flat::Value(2).map(|v| v * 10), Flat::Value(20));
        assert_eq!(Flat::<i32>::Top.map(|v| v * 10), Flat::Top);
    }
}
