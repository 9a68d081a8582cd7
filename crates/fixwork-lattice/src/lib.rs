mod flat;
mod powerset;

pub use flat::Flat;
pub use powerset::PowerSet;

/// A join-semilattice with a meet and a partial order.
///
/// Abstract states handed to the fixpoint engines usually implement this.
/// Implementations must keep `is_subseteq` consistent with `join` and `meet`:
/// `a ⊑ b` iff `a ⊔ b == b` iff `a ⊓ b == a`.
pub trait Lattice {
    fn join(&self, other: &Self) -> Self;
    fn meet(&self, other: &Self) -> Self;
    fn is_subseteq(&self, other: &Self) -> bool;

    /// Two elements are equivalent when each is below the other.
    fn is_equivalent(&self, other: &Self) -> bool {
        self.is_subseteq(other) && other.is_subseteq(self)
    }
}

pub trait HasBottom: Lattice {
    fn bottom() -> Self;

    fn is_bottom(&self) -> bool
    where
        Self: Sized,
    {
        self.is_subseteq(&Self::bottom())
    }
}

pub trait HasTop: Lattice {
    fn top() -> Self;

    fn is_top(&self) -> bool
    where
        Self: Sized,
    {
        Self::top().is_subseteq(self)
    }
}
