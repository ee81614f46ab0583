use chainforge_core::{SolverForgeError, VariableDescriptor};
use chainforge_test::genuine_var;

use super::*;

/// A second chained variable over the same field.
fn next_var() -> VariableDescriptor<ChainedSolution> {
    VariableDescriptor::chained(
        "next",
        "ChainedEntity",
        1,
        |s| s.entities.len(),
        |s| s.anchors.len(),
        |s, i| s.entities[i].previous,
        |s, i, v| s.entities[i].previous = v,
    )
}

fn assert_config_error<T: std::fmt::Debug>(result: chainforge_core::Result<T>) {
    match result {
        Err(SolverForgeError::Config(_)) => {}
        other => panic!("expected a configuration error, got {other:?}"),
    }
}

#[test]
fn non_chained_variable_is_rejected() {
    let entities = FromSolutionEntitySelector::new(genuine_var());
    let values = ChainedValueSelector::new(genuine_var());

    assert_config_error(ChainedChangeMoveSelector::new(
        entities.clone(),
        values.clone(),
        SelectionOrder::Original,
    ));
    assert_config_error(TailChainSwapMoveSelector::new(
        entities.clone(),
        values.clone(),
        SelectionOrder::Original,
    ));
    assert_config_error(KOptMoveSelector::new(entities, values.clone(), 3, SelectionOrder::Random));
    assert_config_error(DefaultSubChainSelector::new(values, 1, 2, SelectionOrder::Original));
}

#[test]
fn mismatched_variables_are_rejected() {
    let others = FromSolutionEntitySelector::new(next_var());

    assert_config_error(ChainedChangeMoveSelector::new(
        others.clone(),
        values(),
        SelectionOrder::Original,
    ));
    assert_config_error(KOptMoveSelector::new(others, values(), 3, SelectionOrder::Random));

    let other_sub_chains =
        DefaultSubChainSelector::new(ChainedValueSelector::new(next_var()), 1, 1, SelectionOrder::Original)
            .unwrap();
    assert_config_error(SubChainChangeMoveSelector::new(
        other_sub_chains,
        values(),
        SelectionOrder::Original,
        false,
    ));

    let other_sub_chains =
        DefaultSubChainSelector::new(ChainedValueSelector::new(next_var()), 1, 1, SelectionOrder::Original)
            .unwrap();
    assert_config_error(SubChainSwapMoveSelector::with_right(
        sub_chains(1, 1),
        other_sub_chains,
        SelectionOrder::Original,
        false,
    ));
}

#[test]
fn original_order_over_never_ending_child_is_rejected() {
    let random_entities = entities().with_order(SelectionOrder::Random);

    assert_config_error(ChainedChangeMoveSelector::new(
        random_entities.clone(),
        values(),
        SelectionOrder::Original,
    ));
    assert_config_error(ChainedChangeMoveSelector::new(
        random_entities.clone(),
        values(),
        SelectionOrder::Inherit,
    ));
    assert!(ChainedChangeMoveSelector::new(random_entities, values(), SelectionOrder::Random).is_ok());

    let random_sub_chains = DefaultSubChainSelector::new(values(), 1, 2, SelectionOrder::Random).unwrap();
    assert_config_error(SubChainRuinMoveSelector::new(random_sub_chains, SelectionOrder::Original));
}

#[test]
fn sub_chain_bounds_are_checked() {
    assert_config_error(DefaultSubChainSelector::new(values(), 0, 2, SelectionOrder::Original));
    assert_config_error(DefaultSubChainSelector::new(values(), 3, 2, SelectionOrder::Original));
    assert_config_error(DefaultSubChainSelector::new(
        values().with_order(SelectionOrder::Random),
        1,
        2,
        SelectionOrder::Original,
    ));
    assert!(DefaultSubChainSelector::new(values(), 2, 2, SelectionOrder::Original).is_ok());
}

#[test]
fn inherit_resolves_to_original() {
    let selector = TailChainSwapMoveSelector::new(entities(), values(), SelectionOrder::Inherit).unwrap();
    assert!(!selector.is_never_ending());
}
