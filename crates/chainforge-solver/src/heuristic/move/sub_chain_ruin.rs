//! SubChainRuinMove - detaches a sub-chain and unassigns its entities.
//!
//! Used by ruin-and-recreate neighborhoods. The move has no undo: a
//! construction step is expected to reinsert the entities.

use std::fmt;

use chainforge_core::{ChainValue, PlanningSolution, Result, SolverForgeError, VariableDescriptor};
use chainforge_scoring::ScoreDirector;
use smallvec::SmallVec;

use super::handles::{inverse_on, InverseId};
use super::rewire::Rewiring;
use super::sub_chain::SubChain;
use super::Move;

/// A move that closes the gap around a sub-chain and sets every entity in
/// it to unassigned.
#[derive(Clone)]
pub struct SubChainRuinMove<S> {
    variable: VariableDescriptor<S>,
    inverse: InverseId<S>,
    sub_chain: SubChain,
}

impl<S> fmt::Debug for SubChainRuinMove<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubChainRuinMove")
            .field("variable", &self.variable.name)
            .field("sub_chain", &self.sub_chain)
            .finish()
    }
}

impl<S> SubChainRuinMove<S> {
    pub fn new(variable: VariableDescriptor<S>, inverse: InverseId<S>, sub_chain: SubChain) -> Self {
        Self {
            variable,
            inverse,
            sub_chain,
        }
    }

    pub fn sub_chain(&self) -> SubChain {
        self.sub_chain
    }
}

impl<S: PlanningSolution> Move<S> for SubChainRuinMove<S> {
    fn is_doable<D: ScoreDirector<S>>(&self, score_director: &D) -> bool {
        let solution = score_director.working_solution();
        self.sub_chain
            .entity_list(score_director.supply(self.inverse))
            .iter()
            .any(|&entity| self.variable.get_value(solution, entity).is_some())
    }

    fn do_move<D: ScoreDirector<S>>(&self, score_director: &mut D) {
        let inverse = score_director.supply(self.inverse);
        let entities = self.sub_chain.entity_list(inverse);
        let old_first_value = self
            .sub_chain
            .first_value(&self.variable, score_director.working_solution());

        let mut plan = Rewiring::new();
        if let Some(trailing) = self.sub_chain.trailing_entity(inverse) {
            plan.set(trailing, old_first_value);
        }
        for &entity in entities.iter().rev() {
            plan.set(entity, None);
        }

        tracing::debug!(sub_chain = %self.sub_chain, size = entities.len(), "Ruining sub-chain");
        plan.apply(score_director, &self.variable);
    }

    fn create_undo_move<D: ScoreDirector<S>>(&self, _score_director: &D) -> Result<Self> {
        Err(SolverForgeError::UnsupportedOperation(format!(
            "{} cannot be undone; reinsert the entities with a construction step.",
            self
        )))
    }

    fn rebase<D: ScoreDirector<S>>(&self, destination: &D) -> Result<Self> {
        Ok(Self::new(
            self.variable,
            inverse_on(destination, self.variable)?,
            self.sub_chain.rebase(destination, &self.variable)?,
        ))
    }

    fn planning_entities(&self) -> SmallVec<[usize; 4]> {
        self.sub_chain.boundaries()
    }

    fn planning_values(&self) -> SmallVec<[ChainValue; 4]> {
        SmallVec::new()
    }

    fn descriptor_index(&self) -> usize {
        self.variable.descriptor_index
    }

    fn variable_name(&self) -> &str {
        self.variable.name
    }
}

impl<S> fmt::Display for SubChainRuinMove<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ruin {}", self.sub_chain)
    }
}
