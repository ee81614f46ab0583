//! Tests for scope types.

use super::*;
use chainforge_config::ChainedSolverConfig;
use chainforge_core::{SimpleScore, SolverForgeError};
use chainforge_scoring::ScoreDirector;
use chainforge_test::{assert_chain, chained_director, previous_var, ChainedDirector, ChainedSolution};
use tracing_subscriber::EnvFilter;

use crate::heuristic::r#move::{ChainedMove, Move};
use crate::heuristic::selector::{
    ChainedChangeMoveSelector, ChainedValueSelector, FromSolutionEntitySelector, MoveSelector,
    SelectionOrder, TailChainSwapMoveSelector,
};

fn change_selector(order: SelectionOrder) -> ChainedChangeMoveSelector<ChainedSolution> {
    let var = previous_var();
    ChainedChangeMoveSelector::new(
        FromSolutionEntitySelector::new(var),
        ChainedValueSelector::new(var),
        order,
    )
    .unwrap()
}

fn tail_selector() -> TailChainSwapMoveSelector<ChainedSolution> {
    let var = previous_var();
    TailChainSwapMoveSelector::new(
        FromSolutionEntitySelector::new(var),
        ChainedValueSelector::new(var),
        SelectionOrder::Original,
    )
    .unwrap()
}

// Honors RUST_LOG, e.g. `RUST_LOG=chainforge_solver=debug`.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn scope(solution: ChainedSolution) -> SolverScope<ChainedSolution, ChainedDirector> {
    SolverScope::with_seed(chained_director(solution), 42)
}

#[test]
fn test_solver_scope_creation() {
    let scope = scope(ChainedSolution::lines(1, 2));

    assert!(scope.best_solution().is_none());
    assert!(scope.best_score().is_none());
    assert!(scope.elapsed().is_none());
    assert_eq!(scope.total_step_count(), 0);
}

#[test]
fn test_lifecycle_demands_and_releases_supplies() {
    init_tracing();
    let mut scope = scope(ChainedSolution::lines(2, 2));
    let mut selector = tail_selector();

    scope.start_solving(&mut selector);
    assert_eq!(scope.score_director().supply_manager().len(), 2);
    assert!(scope.elapsed().is_some());

    scope.start_step(&mut selector);
    scope.start_step(&mut selector);
    assert_eq!(scope.total_step_count(), 2);

    scope.end_solving(&mut selector);
    assert!(scope.score_director().supply_manager().is_empty());
}

#[test]
fn test_moves_follow_selector_size() {
    let mut scope = scope(ChainedSolution::lines(2, 2));
    let mut selector = change_selector(SelectionOrder::Original);
    scope.start_solving(&mut selector);

    let size = selector.size(scope.score_director()).unwrap();
    assert_eq!(size, 4 * 6);
    assert_eq!(scope.moves(&selector).count() as u64, size);

    scope.end_solving(&mut selector);
}

#[test]
fn test_same_seed_same_moves() {
    let sample = |seed: u64| {
        let config = ChainedSolverConfig::new().with_random_seed(seed);
        let mut scope: SolverScope<ChainedSolution, _> =
            SolverScope::from_config(chained_director(ChainedSolution::lines(3, 4)), &config);
        let mut selector = change_selector(SelectionOrder::Random);
        scope.start_solving(&mut selector);
        let moves: Vec<String> = scope.moves(&selector).take(20).map(|m| m.to_string()).collect();
        scope.end_solving(&mut selector);
        moves
    };

    assert_eq!(sample(7), sample(7));
    assert_ne!(sample(7), sample(8));
}

#[test]
fn test_update_best_solution_keeps_improvements_only() {
    let mut scope = scope(ChainedSolution::lines(1, 3));
    let mut selector = change_selector(SelectionOrder::Original);
    scope.start_solving(&mut selector);

    assert!(scope.update_best_solution());
    let first: SimpleScore = *scope.best_score().unwrap();
    assert!(!scope.update_best_solution());
    assert_eq!(*scope.best_score().unwrap(), first);
    assert_eq!(
        scope.best_solution().unwrap().snapshot(),
        scope.working_solution().snapshot()
    );

    scope.end_solving(&mut selector);
}

#[test]
fn test_worse_move_leaves_best_solution_behind() {
    let mut scope = scope(ChainedSolution::lines(1, 3));
    let mut selector = change_selector(SelectionOrder::Original);
    scope.start_solving(&mut selector);
    assert!(scope.update_best_solution());

    let m = scope
        .moves(&selector)
        .find(|m| m.to_string() == "E2 -> A0")
        .unwrap();
    assert!(m.is_doable(scope.score_director()));
    m.do_move(scope.score_director_mut());

    assert!(!scope.update_best_solution());
    assert_eq!(*scope.best_score().unwrap(), SimpleScore::of(-3));
    assert_eq!(scope.calculate_score(), SimpleScore::of(-6));

    scope.end_solving(&mut selector);
    let best = scope.best_solution().unwrap().clone();
    assert_chain(&best, &["a0", "a1", "a2", "a3"]);
    let working = scope.into_score_director().into_working_solution();
    assert_chain(&working, &["a0", "a3", "a1", "a2"]);
}

#[test]
fn test_rebase_all_onto_clone() {
    init_tracing();
    let mut source = scope(ChainedSolution::lines(2, 3));
    let mut source_selector = tail_selector();
    source.start_solving(&mut source_selector);
    let moves: Vec<ChainedMove<ChainedSolution>> = source.moves(&source_selector).collect();

    let mut destination = chained_director(source.working_solution().clone());
    let mut destination_selector = tail_selector();
    destination_selector.solving_started(&mut destination);

    let rebased = rebase_all(&moves, &destination).unwrap();
    assert_eq!(rebased.len(), moves.len());
    for (original, rebased) in moves.iter().zip(&rebased) {
        assert_eq!(original.to_string(), rebased.to_string());
        assert_eq!(original.is_doable(source.score_director()), rebased.is_doable(&destination));
    }

    destination_selector.solving_ended(&mut destination);
    source.end_solving(&mut source_selector);
}

#[test]
fn test_rebase_all_requires_demanded_supplies() {
    let mut source = scope(ChainedSolution::lines(2, 3));
    let mut selector = tail_selector();
    source.start_solving(&mut selector);
    let moves: Vec<_> = source.moves(&selector).take(5).collect();

    let bare = chained_director(source.working_solution().clone());
    let err = rebase_all(&moves, &bare).unwrap_err();
    assert!(matches!(err, SolverForgeError::InvalidState(_)));

    source.end_solving(&mut selector);
}

#[test]
fn test_rebase_all_of_nothing() {
    let destination = chained_director(ChainedSolution::lines(1, 1));
    assert!(rebase_all::<ChainedSolution, _>(&[], &destination).unwrap().is_empty());
}
