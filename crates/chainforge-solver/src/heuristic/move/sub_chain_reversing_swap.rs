//! SubChainReversingSwapMove - exchanges two sub-chains and reverses both.

use std::fmt;

use chainforge_core::{ChainValue, PlanningSolution, Result, VariableDescriptor};
use chainforge_scoring::ScoreDirector;
use smallvec::SmallVec;

use super::handles::{inverse_on, InverseId};
use super::rewire::Rewiring;
use super::sub_chain::SubChain;
use super::sub_chain_swap::{swap_is_doable, SwapEnds};
use super::Move;

/// A move that exchanges two disjoint sub-chains and attaches each reversed.
///
/// Chains `a0..a5` and `b0..b3`, swapping `[a3..a5]` with `[b2..b3]`:
/// `a0-a1-a2-b3-b2` and `b0-b1-a5-a4-a3`.
#[derive(Clone)]
pub struct SubChainReversingSwapMove<S> {
    variable: VariableDescriptor<S>,
    inverse: InverseId<S>,
    left: SubChain,
    right: SubChain,
}

impl<S> fmt::Debug for SubChainReversingSwapMove<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubChainReversingSwapMove")
            .field("variable", &self.variable.name)
            .field("left", &self.left)
            .field("right", &self.right)
            .finish()
    }
}

impl<S> SubChainReversingSwapMove<S> {
    pub fn new(
        variable: VariableDescriptor<S>,
        inverse: InverseId<S>,
        left: SubChain,
        right: SubChain,
    ) -> Self {
        Self {
            variable,
            inverse,
            left,
            right,
        }
    }

    pub fn left(&self) -> SubChain {
        self.left
    }

    pub fn right(&self) -> SubChain {
        self.right
    }
}

impl<S: PlanningSolution> Move<S> for SubChainReversingSwapMove<S> {
    fn is_doable<D: ScoreDirector<S>>(&self, score_director: &D) -> bool {
        swap_is_doable(score_director, &self.variable, self.inverse, &self.left, &self.right)
    }

    fn do_move<D: ScoreDirector<S>>(&self, score_director: &mut D) {
        let inverse = score_director.supply(self.inverse);
        let ends = SwapEnds::read(
            &self.variable,
            score_director.working_solution(),
            inverse,
            &self.left,
            &self.right,
        );
        let left_entities = self.left.entity_list(inverse);
        let right_entities = self.right.entity_list(inverse);
        let (lf, rf) = (self.left.first_entity(), self.right.first_entity());

        let mut plan = Rewiring::new();
        if ends.right_follows_left(&self.left) {
            plan.attach_reversed(&right_entities, ends.left_first_value);
            plan.attach_reversed(&left_entities, Some(ChainValue::Entity(rf)));
            if let Some(trailing) = ends.right_trailing {
                plan.set(trailing, Some(ChainValue::Entity(lf)));
            }
        } else if ends.left_follows_right(&self.right) {
            plan.attach_reversed(&left_entities, ends.right_first_value);
            plan.attach_reversed(&right_entities, Some(ChainValue::Entity(lf)));
            if let Some(trailing) = ends.left_trailing {
                plan.set(trailing, Some(ChainValue::Entity(rf)));
            }
        } else {
            plan.attach_reversed(&left_entities, ends.right_first_value);
            if let Some(trailing) = ends.right_trailing {
                plan.set(trailing, Some(ChainValue::Entity(lf)));
            }
            plan.attach_reversed(&right_entities, ends.left_first_value);
            if let Some(trailing) = ends.left_trailing {
                plan.set(trailing, Some(ChainValue::Entity(rf)));
            }
        }
        plan.apply(score_director, &self.variable);
    }

    fn create_undo_move<D: ScoreDirector<S>>(&self, _score_director: &D) -> Result<Self> {
        Ok(Self::new(
            self.variable,
            self.inverse,
            self.right.reverse(),
            self.left.reverse(),
        ))
    }

    fn rebase<D: ScoreDirector<S>>(&self, destination: &D) -> Result<Self> {
        Ok(Self::new(
            self.variable,
            inverse_on(destination, self.variable)?,
            self.left.rebase(destination, &self.variable)?,
            self.right.rebase(destination, &self.variable)?,
        ))
    }

    fn planning_entities(&self) -> SmallVec<[usize; 4]> {
        let mut entities = self.left.boundaries();
        entities.extend(self.right.boundaries());
        entities
    }

    fn planning_values(&self) -> SmallVec<[ChainValue; 4]> {
        self.planning_entities()
            .into_iter()
            .map(ChainValue::Entity)
            .collect()
    }

    fn descriptor_index(&self) -> usize {
        self.variable.descriptor_index
    }

    fn variable_name(&self) -> &str {
        self.variable.name
    }
}

impl<S> fmt::Display for SubChainReversingSwapMove<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <-reversing-> {}", self.left, self.right)
    }
}
