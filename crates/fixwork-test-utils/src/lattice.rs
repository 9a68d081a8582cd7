//! Assertions for lattice algebraic laws.
//!
//! Each assertion checks its laws over every pair (and, where needed, every
//! triple) of the sample elements, gathers all violations, and panics once
//! with the full list.
//!
//! ```
//! use fixwork_lattice::Flat;
//! use fixwork_test_utils::lattice::assert_bounded_lattice_laws;
//!
//! assert_bounded_lattice_laws(&[Flat::Value(1), Flat::Value(2)]);
//! ```

use std::fmt::{Debug, Write};

use fixwork_lattice::{HasBottom, HasTop, Lattice};

#[derive(Default)]
struct Violations(Vec<String>);

impl Violations {
    fn push(&mut self, violation: String) {
        self.0.push(violation);
    }

    fn finish(self) {
        if self.0.is_empty() {
            return;
        }
        let mut msg = format!("{} lattice law violation(s):\n", self.0.len());
        for (i, violation) in self.0.iter().enumerate() {
            let _ = writeln!(msg, "  {}. {}", i + 1, violation);
        }
        panic!("{msg}");
    }
}

/// Join and meet are idempotent, commutative and associative, absorption
/// holds, and `is_subseteq` / `is_equivalent` agree with join and meet.
pub fn assert_lattice_laws<L: Lattice + PartialEq + Debug>(elements: &[L]) {
    let mut v = Violations::default();
    let samples: Vec<&L> = elements.iter().collect();
    check_lattice(&samples, &mut v);
    v.finish();
}

/// [`assert_lattice_laws`] plus the bottom laws, with `bottom()` added to the
/// samples.
pub fn assert_bottom_lattice_laws<L: HasBottom + PartialEq + Debug>(elements: &[L]) {
    let mut v = Violations::default();
    let samples = with_extra(elements, [L::bottom()]);
    check_lattice(&samples, &mut v);
    check_bottom(&samples, &mut v);
    v.finish();
}

/// [`assert_lattice_laws`] plus the bottom and top laws, with `bottom()` and
/// `top()` added to the samples.
pub fn assert_bounded_lattice_laws<L: HasBottom + HasTop + PartialEq + Debug>(elements: &[L]) {
    let mut v = Violations::default();
    let samples = with_extra(elements, [L::bottom(), L::top()]);
    check_lattice(&samples, &mut v);
    check_bottom(&samples, &mut v);
    check_top(&samples, &mut v);
    v.finish();
}

fn with_extra<'a, L, const N: usize>(elements: &'a [L], extra: [L; N]) -> Vec<Extra<'a, L>> {
    elements
        .iter()
        .map(Extra::Borrowed)
        .chain(extra.into_iter().map(Extra::Owned))
        .collect()
}

/// Sample element that is either caller-provided or added by the assertion.
enum Extra<'a, L> {
    Borrowed(&'a L),
    Owned(L),
}

impl<L> std::ops::Deref for Extra<'_, L> {
    type Target = L;

    fn deref(&self) -> &L {
        match self {
            Extra::Borrowed(l) => l,
            Extra::Owned(l) => l,
        }
    }
}

fn check_lattice<L, E>(elements: &[E], v: &mut Violations)
where
    L: Lattice + PartialEq + Debug,
    E: std::ops::Deref<Target = L>,
{
    for a in elements.iter().map(|e| &**e) {
        if a.join(a) != *a {
            v.push(format!("join not idempotent for {a:?}"));
        }
        if a.meet(a) != *a {
            v.push(format!("meet not idempotent for {a:?}"));
        }
        if !a.is_equivalent(a) {
            v.push(format!("{a:?} not equivalent to itself"));
        }
        for b in elements.iter().map(|e| &**e) {
            let join = a.join(b);
            let meet = a.meet(b);
            if join != b.join(a) {
                v.push(format!("join not commutative for {a:?}, {b:?}"));
            }
            if meet != b.meet(a) {
                v.push(format!("meet not commutative for {a:?}, {b:?}"));
            }
            if a.join(&meet) != *a || a.meet(&join) != *a {
                v.push(format!("absorption violated for {a:?}, {b:?}"));
            }
            let below = a.is_subseteq(b);
            if below != (join == *b) {
                v.push(format!(
                    "{a:?} ⊑ {b:?} is {below}, but {a:?} ⊔ {b:?} = {join:?}"
                ));
            }
            if below != (meet == *a) {
                v.push(format!(
                    "{a:?} ⊑ {b:?} is {below}, but {a:?} ⊓ {b:?} = {meet:?}"
                ));
            }
            if a.is_equivalent(b) != (a == b) {
                v.push(format!("equivalence of {a:?} and {b:?} disagrees with equality"));
            }
            for c in elements.iter().map(|e| &**e) {
                if join.join(c) != a.join(&b.join(c)) {
                    v.push(format!("join not associative for {a:?}, {b:?}, {c:?}"));
                }
                if meet.meet(c) != a.meet(&b.meet(c)) {
                    v.push(format!("meet not associative for {a:?}, {b:?}, {c:?}"));
                }
            }
        }
    }
}

fn check_bottom<L, E>(elements: &[E], v: &mut Violations)
where
    L: HasBottom + PartialEq + Debug,
    E: std::ops::Deref<Target = L>,
{
    let bottom = L::bottom();
    if !bottom.is_bottom() {
        v.push(format!("bottom() = {bottom:?} does not report is_bottom"));
    }
    for x in elements.iter().map(|e| &**e) {
        if !bottom.is_subseteq(x) {
            v.push(format!("bottom not below {x:?}"));
        }
        if bottom.join(x) != *x {
            v.push(format!("bottom is not the identity of join for {x:?}"));
        }
        if bottom.meet(x) != bottom {
            v.push(format!("bottom does not absorb meet with {x:?}"));
        }
    }
}

fn check_top<L, E>(elements: &[E], v: &mut Violations)
where
    L: HasTop + PartialEq + Debug,
    E: std::ops::Deref<Target = L>,
{
    let top = L::top();
    if !top.is_top() {
        v.push(format!("top() = {top:?} does not report is_top"));
    }
    for x in elements.iter().map(|e| &**e) {
        if !x.is_subseteq(&top) {
            v.push(format!("{x:?} not below top"));
        }
        if top.join(x) != top {
            v.push(format!("top does not absorb join with {x:?}"));
        }
        if top.meet(x) != *x {
            v.push(format!("top is not the identity of meet for {x:?}"));
        }
    }
}
