//! Tests for ChainedChangeMove.

use super::*;

fn change(f: &Fixture, entity: &str, to: &str) -> ChainedChangeMove<ChainedSolution> {
    ChainedChangeMove::from_supply(
        f.var,
        f.director.supply(f.inverse),
        f.e(entity),
        Some(f.v(to)),
    )
}

#[test]
fn relocate_within_chain() {
    let mut f = Fixture::chains(&[&["a0", "a1", "a2", "a3"]]);
    let m = change(&f, "a2", "a0");

    assert_eq!(m.old_trailing_entity(), Some(f.e("a3")));
    assert_eq!(m.new_trailing_entity(), Some(f.e("a1")));
    assert!(m.is_doable(&f.director));

    let after = f.do_and_undo(&m);
    assert_chain(&after, &["a0", "a2", "a1", "a3"]);
    f.assert_chain(&["a0", "a1", "a2", "a3"]);
}

#[test]
fn relocate_to_other_chain() {
    let mut f = Fixture::chains(&[&["a0", "a1", "a2", "a3"], &["b0", "b1"]]);
    let m = change(&f, "a2", "b0");

    let after = f.do_and_undo(&m);
    assert_chain(&after, &["a0", "a1", "a3"]);
    assert_chain(&after, &["b0", "a2", "b1"]);
}

#[test]
fn relocate_behind_own_trailing_entity() {
    let mut f = Fixture::chains(&[&["a0", "a1", "a2", "a3"]]);
    let m = change(&f, "a1", "a2");

    let after = f.do_and_undo(&m);
    assert_chain(&after, &["a0", "a2", "a1", "a3"]);
}

#[test]
fn relocate_last_entity_to_chain_end() {
    let mut f = Fixture::chains(&[&["a0", "a1", "a2"], &["b0", "b1"]]);
    let m = change(&f, "a2", "b1");

    assert_eq!(m.old_trailing_entity(), None);
    assert_eq!(m.new_trailing_entity(), None);
    let after = f.do_and_undo(&m);
    assert_chain(&after, &["a0", "a1"]);
    assert_chain(&after, &["b0", "b1", "a2"]);
}

#[test]
fn assign_unassigned_entity() {
    let mut f = Fixture::new(
        ChainedSolution::with_chains(&[&["a0", "a1"]]).with_unassigned(&["x"]),
    );
    let m = change(&f, "x", "a0");

    let after = f.do_and_undo(&m);
    assert_chain(&after, &["a0", "x", "a1"]);
    assert_eq!(f.solution().entities[f.e("x")].previous, None);
}

#[test]
fn not_doable_without_change() {
    let f = Fixture::chains(&[&["a0", "a1", "a2"]]);

    assert!(!change(&f, "a2", "a1").is_doable(&f.director));
    assert!(!change(&f, "a2", "a2").is_doable(&f.director));
    assert!(change(&f, "a2", "a0").is_doable(&f.director));
}

#[test]
fn undo_swaps_trailing_entities() {
    let f = Fixture::chains(&[&["a0", "a1", "a2", "a3"]]);
    let m = change(&f, "a2", "a0");

    let undo = m.create_undo_move(&f.director).unwrap();
    assert_eq!(undo.entity(), f.e("a2"));
    assert_eq!(undo.to_value(), Some(f.v("a1")));
    assert_eq!(undo.old_trailing_entity(), Some(f.e("a1")));
    assert_eq!(undo.new_trailing_entity(), Some(f.e("a3")));
}

#[test]
fn display_and_introspection() {
    let f = Fixture::chains(&[&["a0", "a1", "a2"]]);
    let m = change(&f, "a2", "a0");

    assert_eq!(m.to_string(), "E1 -> A0");
    assert_eq!(m.planning_entities().as_slice(), &[1]);
    assert_eq!(m.planning_values().as_slice(), &[ChainValue::Anchor(0)]);
    assert_eq!(m.variable_name(), "previous");
    assert_eq!(m.descriptor_index(), 0);
}
