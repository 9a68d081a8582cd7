use fixwork_lattice::{Flat, HasBottom, HasTop, Lattice, PowerSet};
use fixwork_test_utils::lattice::{assert_bottom_lattice_laws, assert_bounded_lattice_laws};

#[test]
fn powerset_of_integers() {
    assert_bottom_lattice_laws(&[
        PowerSet::from([1]),
        PowerSet::from([2]),
        PowerSet::from([1, 2]),
        PowerSet::from([2, 3]),
        PowerSet::from([1, 2, 3]),
    ]);
}

#[test]
fn powerset_of_strings() {
    assert_bottom_lattice_laws(&[
        PowerSet::from(["%0".to_owned()]),
        PowerSet::from(["%0".to_owned(), "%1".to_owned()]),
        PowerSet::from(["Initial_x".to_owned()]),
    ]);
}

#[test]
fn flat_of_integers() {
    assert_bounded_lattice_laws(&[Flat::Value(-1), Flat::Value(0), Flat::Value(7)]);
}

#[test]
fn flat_of_nested_powersets() {
    assert_bounded_lattice_laws(&[
        Flat::Value(PowerSet::from([1])),
        Flat::Value(PowerSet::from([1, 2])),
    ]);
}

#[test]
fn flat_bounds_are_recognised() {
    assert!(Flat::<u8>::bottom().is_bottom());
    assert!(Flat::<u8>::top().is_top());
    assert!(!Flat::Value(3u8).is_bottom());
    assert!(Flat::Value(3u8).is_subseteq(&Flat::Top));
}

#[test]
fn powerset_join_chain_is_monotone() {
    let mut acc = PowerSet::<u32>::bottom();
    for i in 0..10 {
        let next = acc.join(&PowerSet::singleton(i));
        assert!(acc.is_subseteq(&next));
        assert!(!next.is_equivalent(&acc));
        acc = next;
    }
    assert_eq!(acc.len(), 10);
}
