//! Tests for SubChainRuinMove.

use super::*;

fn ruin(f: &Fixture, first: &str, last: &str) -> SubChainRuinMove<ChainedSolution> {
    SubChainRuinMove::new(f.var, f.inverse, f.sub(first, last))
}

#[test]
fn ruin_closes_gap_and_unassigns() {
    let mut f = Fixture::new(ChainedSolution::lines(1, 5));
    let m = ruin(&f, "a2", "a3");
    assert!(m.is_doable(&f.director));

    m.do_move(&mut f.director);

    f.assert_chain(&["a0", "a1", "a4", "a5"]);
    assert_eq!(f.solution().entities[f.e("a2")].previous, None);
    assert_eq!(f.solution().entities[f.e("a3")].previous, None);
    assert_chain_invariants(f.solution());
    f.assert_supplies_consistent();
}

#[test]
fn ruin_chain_tail() {
    let mut f = Fixture::new(ChainedSolution::lines(1, 3));
    let m = ruin(&f, "a2", "a3");

    m.do_move(&mut f.director);

    f.assert_chain(&["a0", "a1"]);
    assert_eq!(f.director.supply(f.anchor).get_anchor(f.e("a3")), None);
}

#[test]
fn ruin_is_not_doable_once_unassigned() {
    let mut f = Fixture::new(ChainedSolution::lines(1, 3));
    let m = ruin(&f, "a3", "a3");

    m.do_move(&mut f.director);

    assert!(!m.is_doable(&f.director));
}

#[test]
fn ruin_has_no_undo() {
    let f = Fixture::new(ChainedSolution::lines(1, 3));
    let m = ruin(&f, "a1", "a2");

    let err = m.create_undo_move(&f.director).unwrap_err();
    assert!(err.is_unsupported());
    assert!(matches!(err, SolverForgeError::UnsupportedOperation(_)));
    assert_eq!(m.to_string(), "ruin [E0..E1]");
}
