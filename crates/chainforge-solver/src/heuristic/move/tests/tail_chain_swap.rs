//! Tests for TailChainSwapMove.

use super::*;

fn tail_swap(f: &Fixture, left: &str, right: &str) -> TailChainSwapMove<ChainedSolution> {
    TailChainSwapMove::new(f.var, f.inverse, f.anchor, f.e(left), f.v(right))
}

fn line() -> Fixture {
    Fixture::new(ChainedSolution::lines(1, 7))
}

#[test]
fn same_chain_right_value_earlier() {
    let mut f = line();

    let after = f.do_and_undo(&tail_swap(&f, "a4", "a1"));
    assert_chain(&after, &["a0", "a1", "a4", "a3", "a2", "a5", "a6", "a7"]);

    let after = f.do_and_undo(&tail_swap(&f, "a5", "a1"));
    assert_chain(&after, &["a0", "a1", "a5", "a4", "a3", "a2", "a6", "a7"]);

    let after = f.do_and_undo(&tail_swap(&f, "a7", "a1"));
    assert_chain(&after, &["a0", "a1", "a7", "a6", "a5", "a4", "a3", "a2"]);
}

#[test]
fn same_chain_right_value_is_anchor() {
    let mut f = line();

    let after = f.do_and_undo(&tail_swap(&f, "a3", "a0"));
    assert_chain(&after, &["a0", "a3", "a2", "a1", "a4", "a5", "a6", "a7"]);
}

#[test]
fn same_chain_right_value_later() {
    let mut f = line();

    let after = f.do_and_undo(&tail_swap(&f, "a1", "a4"));
    assert_chain(&after, &["a0", "a7", "a6", "a5", "a2", "a3", "a4", "a1"]);

    let after = f.do_and_undo(&tail_swap(&f, "a3", "a4"));
    assert_chain(&after, &["a0", "a7", "a6", "a5", "a4", "a3", "a2", "a1"]);

    let after = f.do_and_undo(&tail_swap(&f, "a2", "a6"));
    assert_chain(&after, &["a0", "a7", "a3", "a4", "a5", "a6", "a2", "a1"]);
}

#[test]
fn across_chains() {
    let mut f = Fixture::new(ChainedSolution::lines(2, 3));

    let after = f.do_and_undo(&tail_swap(&f, "a2", "b0"));
    assert_chain(&after, &["a0", "a1", "b1", "b2", "b3"]);
    assert_chain(&after, &["b0", "a2", "a3"]);

    let after = f.do_and_undo(&tail_swap(&f, "a2", "b3"));
    assert_chain(&after, &["a0", "a1"]);
    assert_chain(&after, &["b0", "b1", "b2", "b3", "a2", "a3"]);
}

#[test]
fn doability() {
    let f = Fixture::new(ChainedSolution::lines(2, 3));

    assert!(tail_swap(&f, "a2", "b0").is_doable(&f.director));
    assert!(tail_swap(&f, "b1", "a1").is_doable(&f.director));
    assert!(tail_swap(&f, "a1", "a2").is_doable(&f.director));
    assert!(tail_swap(&f, "a3", "a0").is_doable(&f.director));

    // Its own value, itself, and the value whose trailing entity is its own value.
    assert!(!tail_swap(&f, "a2", "a1").is_doable(&f.director));
    assert!(!tail_swap(&f, "a1", "a1").is_doable(&f.director));
    assert!(!tail_swap(&f, "a2", "a0").is_doable(&f.director));
    // Nothing trails the right value on the same chain.
    assert!(!tail_swap(&f, "a1", "a3").is_doable(&f.director));
}

#[test]
fn unassigned_entity_is_not_doable() {
    let f = Fixture::new(ChainedSolution::lines(1, 2).with_unassigned(&["x"]));

    assert!(!tail_swap(&f, "x", "a1").is_doable(&f.director));
    assert!(!tail_swap(&f, "a1", "x").is_doable(&f.director));
}

#[test]
fn undo_targets() {
    let f = Fixture::new(ChainedSolution::lines(2, 3));

    let undo = tail_swap(&f, "a2", "b0").create_undo_move(&f.director).unwrap();
    assert_eq!((undo.left_entity(), undo.right_value()), (f.e("a2"), f.v("a1")));

    let f = line();
    let undo = tail_swap(&f, "a4", "a1").create_undo_move(&f.director).unwrap();
    assert_eq!((undo.left_entity(), undo.right_value()), (f.e("a2"), f.v("a1")));
}

#[test]
fn display() {
    let f = Fixture::new(ChainedSolution::lines(2, 3));
    assert_eq!(tail_swap(&f, "a1", "b0").to_string(), "E0 <-tailChainSwap-> A1");
}
