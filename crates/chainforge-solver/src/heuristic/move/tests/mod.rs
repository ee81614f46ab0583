//! Tests for the move module.

use super::*;
use chainforge_core::domain::supply::{AnchorVariableDemand, SingletonInverseVariableDemand};
use chainforge_core::{ChainValue, SolverForgeError, VariableDescriptor};
use chainforge_scoring::ScoreDirector;
use chainforge_test::{
    assert_chain, assert_chain_invariants, chained_director, previous_var, ChainedDirector,
    ChainedSolution,
};

mod chained_change;
mod sub_chain_change;
mod sub_chain_ruin;
mod tail_chain_swap;

/// A director over named chains with both supplies demanded.
struct Fixture {
    director: ChainedDirector,
    var: VariableDescriptor<ChainedSolution>,
    inverse: InverseId<ChainedSolution>,
    anchor: AnchorId<ChainedSolution>,
}

impl Fixture {
    fn new(solution: ChainedSolution) -> Self {
        let var = previous_var();
        let mut director = chained_director(solution);
        let inverse = director.demand(&SingletonInverseVariableDemand::new(var).unwrap());
        let anchor = director.demand(&AnchorVariableDemand::new(var).unwrap());
        Self {
            director,
            var,
            inverse,
            anchor,
        }
    }

    fn chains(chains: &[&[&str]]) -> Self {
        Self::new(ChainedSolution::with_chains(chains))
    }

    fn solution(&self) -> &ChainedSolution {
        self.director.working_solution()
    }

    fn e(&self, name: &str) -> usize {
        self.solution().entity(name)
    }

    fn v(&self, name: &str) -> ChainValue {
        self.solution().value(name)
    }

    /// Sub-chain from `first` to `last`, sized by walking the chain.
    fn sub(&self, first: &str, last: &str) -> SubChain {
        let inverse = self.director.supply(self.inverse);
        let (first, last) = (self.e(first), self.e(last));
        let mut size = 1;
        let mut current = first;
        while current != last {
            current = inverse.trailing_entity(current).expect("last is not after first");
            size += 1;
        }
        SubChain::new(first, last, size)
    }

    fn assert_chain(&self, names: &[&str]) {
        assert_chain(self.solution(), names);
    }

    /// Runs `m`, then its undo, checking the chain invariants after each.
    ///
    /// Returns the snapshot taken right after `m`.
    fn do_and_undo<M: Move<ChainedSolution>>(&mut self, m: &M) -> ChainedSolution {
        let before = self.solution().snapshot();
        let undo = m.create_undo_move(&self.director).unwrap();

        m.do_move(&mut self.director);
        assert_chain_invariants(self.solution());
        let after = self.solution().clone();

        assert!(undo.is_doable(&self.director), "undo of {m} is not doable");
        undo.do_move(&mut self.director);
        assert_chain_invariants(self.solution());
        assert_eq!(self.solution().snapshot(), before, "undo of {m} did not restore");
        self.assert_supplies_consistent();
        after
    }

    /// The inverse supply must agree with a fresh scan of the solution.
    fn assert_supplies_consistent(&self) {
        let solution = self.solution();
        let inverse = self.director.supply(self.inverse);
        for (idx, entity) in solution.entities.iter().enumerate() {
            if let Some(value) = entity.previous {
                assert_eq!(inverse.get_inverse_singleton(value), Some(idx));
            }
        }
    }
}
