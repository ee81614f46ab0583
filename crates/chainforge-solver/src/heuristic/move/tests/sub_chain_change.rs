//! Tests for SubChainChangeMove, plain and reversing.

use super::*;

fn plain(f: &Fixture, first: &str, last: &str, to: &str) -> SubChainChangeMove<ChainedSolution> {
    SubChainChangeMove::new(f.var, f.inverse, f.sub(first, last), f.v(to))
}

fn reversing(f: &Fixture, first: &str, last: &str, to: &str) -> SubChainChangeMove<ChainedSolution> {
    SubChainChangeMove::reversing(f.var, f.inverse, f.sub(first, last), f.v(to))
}

fn two_lines() -> Fixture {
    Fixture::new(ChainedSolution::lines(2, 5))
}

#[test]
fn move_to_other_chain() {
    let mut f = two_lines();
    let m = plain(&f, "a2", "a4", "b1");

    let after = f.do_and_undo(&m);
    assert_chain(&after, &["a0", "a1", "a5"]);
    assert_chain(&after, &["b0", "b1", "a2", "a3", "a4", "b2", "b3", "b4", "b5"]);
}

#[test]
fn move_to_chain_end() {
    let mut f = two_lines();
    let m = plain(&f, "a1", "a2", "b5");

    let after = f.do_and_undo(&m);
    assert_chain(&after, &["a0", "a3", "a4", "a5"]);
    assert_chain(&after, &["b0", "b1", "b2", "b3", "b4", "b5", "a1", "a2"]);
}

#[test]
fn move_later_in_same_chain() {
    let mut f = two_lines();
    let m = plain(&f, "a1", "a2", "a4");

    let after = f.do_and_undo(&m);
    assert_chain(&after, &["a0", "a3", "a4", "a1", "a2", "a5"]);
}

#[test]
fn move_behind_own_trailing_entity() {
    let mut f = two_lines();
    let m = plain(&f, "a1", "a3", "a4");

    let after = f.do_and_undo(&m);
    assert_chain(&after, &["a0", "a4", "a1", "a2", "a3", "a5"]);
}

#[test]
fn reversing_to_other_chain() {
    let mut f = two_lines();
    let m = reversing(&f, "a3", "a5", "b1");

    let after = f.do_and_undo(&m);
    assert_chain(&after, &["a0", "a1", "a2"]);
    assert_chain(&after, &["b0", "b1", "a5", "a4", "a3", "b2", "b3", "b4", "b5"]);
}

#[test]
fn reversing_to_chain_start() {
    let mut f = two_lines();
    let m = reversing(&f, "a2", "a4", "b0");

    let after = f.do_and_undo(&m);
    assert_chain(&after, &["a0", "a1", "a5"]);
    assert_chain(&after, &["b0", "a4", "a3", "a2", "b1", "b2", "b3", "b4", "b5"]);
}

#[test]
fn reversing_in_place() {
    let mut f = two_lines();
    let m = reversing(&f, "a3", "a5", "a2");
    assert!(m.is_doable(&f.director));

    let after = f.do_and_undo(&m);
    assert_chain(&after, &["a0", "a1", "a2", "a5", "a4", "a3"]);

    let m = reversing(&f, "a2", "a4", "a1");
    let after = f.do_and_undo(&m);
    assert_chain(&after, &["a0", "a1", "a4", "a3", "a2", "a5"]);
}

#[test]
fn reversing_behind_own_trailing_entity() {
    let mut f = two_lines();
    let m = reversing(&f, "a1", "a3", "a4");

    let after = f.do_and_undo(&m);
    assert_chain(&after, &["a0", "a4", "a3", "a2", "a1", "a5"]);
}

#[test]
fn not_doable_into_itself_or_in_place() {
    let f = two_lines();

    assert!(!plain(&f, "a2", "a4", "a3").is_doable(&f.director));
    assert!(!plain(&f, "a2", "a4", "a4").is_doable(&f.director));
    assert!(!reversing(&f, "a2", "a4", "a2").is_doable(&f.director));
    assert!(!plain(&f, "a2", "a4", "a1").is_doable(&f.director));
    assert!(!reversing(&f, "a2", "a2", "a1").is_doable(&f.director));
    assert!(plain(&f, "a2", "a4", "a5").is_doable(&f.director));
}

#[test]
fn undo_reverses_sub_chain_for_reversing_move() {
    let f = two_lines();
    let m = reversing(&f, "a3", "a5", "b1");

    let undo = m.create_undo_move(&f.director).unwrap();
    assert_eq!(undo.sub_chain().first_entity(), f.e("a5"));
    assert_eq!(undo.sub_chain().last_entity(), f.e("a3"));
    assert_eq!(undo.to_value(), f.v("a2"));
    assert!(undo.is_reversing());
}

#[test]
fn display() {
    let f = two_lines();

    assert_eq!(plain(&f, "a2", "a4", "b0").to_string(), "[E1..E3] -> A1");
    assert_eq!(reversing(&f, "a2", "a4", "b0").to_string(), "[E1..E3] -reversing-> A1");
}
