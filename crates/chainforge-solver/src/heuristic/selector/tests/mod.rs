//! Tests for selector module.

use chainforge_core::domain::supply::{AnchorVariableDemand, SingletonInverseVariableDemand};
use chainforge_core::VariableDescriptor;
use chainforge_scoring::ScoreDirector;
use chainforge_test::{chained_director, previous_var, ChainedDirector, ChainedSolution};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::*;
use crate::heuristic::r#move::ChainedMove;

mod construction;
mod k_opt;
mod properties;
mod sub_chain;

fn var() -> VariableDescriptor<ChainedSolution> {
    previous_var()
}

fn rng() -> StdRng {
    StdRng::seed_from_u64(0)
}

fn entities() -> FromSolutionEntitySelector<ChainedSolution> {
    FromSolutionEntitySelector::new(var())
}

fn values() -> ChainedValueSelector<ChainedSolution> {
    ChainedValueSelector::new(var())
}

fn sub_chains(minimum_size: usize, maximum_size: usize) -> DefaultSubChainSelector<ChainedSolution> {
    DefaultSubChainSelector::new(values(), minimum_size, maximum_size, SelectionOrder::Original).unwrap()
}

fn inverse_count(director: &ChainedDirector) -> usize {
    let demand = SingletonInverseVariableDemand::new(var()).unwrap();
    director.supply_manager().active_count(&demand)
}

fn anchor_count(director: &ChainedDirector) -> usize {
    let demand = AnchorVariableDemand::new(var()).unwrap();
    director.supply_manager().active_count(&demand)
}

/// Runs a started selector in its own order and renders every move.
fn rendered<M: MoveSelector<ChainedSolution>>(selector: &M, director: &ChainedDirector) -> Vec<String> {
    let mut rng = rng();
    selector
        .iter_moves(director, &mut rng)
        .map(|m: ChainedMove<ChainedSolution>| m.to_string())
        .collect()
}
