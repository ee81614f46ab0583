use chainforge_core::SolverForgeError;

use super::*;

fn started(k: usize, order: SelectionOrder) -> (ChainedDirector, KOptMoveSelector<ChainedSolution>) {
    let mut director = chained_director(ChainedSolution::lines(3, 4));
    let mut selector = KOptMoveSelector::new(entities(), values(), k, order).unwrap();
    selector.solving_started(&mut director);
    (director, selector)
}

#[test]
fn samples_k_minus_one_values() {
    for k in [2, 3, 5] {
        let (director, selector) = started(k, SelectionOrder::Random);
        let mut rng = rng();

        let moves: Vec<_> = selector.iter_moves(&director, &mut rng).take(50).collect();
        assert_eq!(moves.len(), 50);
        for m in &moves {
            let ChainedMove::KOpt(k_opt) = m else {
                panic!("expected a K-opt move, got {m}");
            };
            assert_eq!(k_opt.k(), k);
            assert_eq!(k_opt.values().len(), k - 1);
            assert!(k_opt.entity() < 12);
        }
    }
}

#[test]
fn inherit_resolves_to_random() {
    let (_director, selector) = started(3, SelectionOrder::Inherit);

    assert_eq!(selector.k(), 3);
    assert!(selector.is_never_ending());
}

#[test]
fn size_is_unsupported() {
    let (director, selector) = started(3, SelectionOrder::Random);

    assert!(!selector.is_countable());
    let err = selector.size(&director).unwrap_err();
    assert!(err.is_unsupported());
    assert!(matches!(err, SolverForgeError::UnsupportedOperation(_)));
}

#[test]
fn demands_anchor_supply() {
    let (mut director, mut selector) = started(3, SelectionOrder::Random);
    assert_eq!(anchor_count(&director), 1);

    selector.solving_ended(&mut director);
    assert_eq!(anchor_count(&director), 0);
}

#[test]
fn rejects_original_order_and_small_k() {
    let original = KOptMoveSelector::new(entities(), values(), 3, SelectionOrder::Original).unwrap_err();
    assert!(matches!(original, SolverForgeError::Config(_)));

    let small = KOptMoveSelector::new(entities(), values(), 1, SelectionOrder::Random).unwrap_err();
    assert!(matches!(small, SolverForgeError::Config(_)));
}
