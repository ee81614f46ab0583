//! SubChainChangeMove - relocates a whole sub-chain behind a new value.

use std::fmt;

use chainforge_core::{ChainValue, PlanningSolution, Result, SolverForgeError, VariableDescriptor};
use chainforge_scoring::ScoreDirector;
use smallvec::{smallvec, SmallVec};

use super::handles::{inverse_on, InverseId};
use super::rewire::Rewiring;
use super::sub_chain::SubChain;
use super::Move;

/// A move that detaches a sub-chain and attaches it behind `to_value`.
///
/// The plain form keeps the internal order. The reversing form attaches the
/// last entity to `to_value` and turns every inner link around; with
/// `to_value` equal to the first entity's current value it reverses the
/// sub-chain in place.
///
/// # Example
///
/// Chains `a0-a1-a2-a3-a4-a5` and `b0-b1`, reversing `[a3..a5]` behind `b1`:
/// `a0-a1-a2` and `b0-b1-a5-a4-a3`.
#[derive(Clone)]
pub struct SubChainChangeMove<S> {
    variable: VariableDescriptor<S>,
    inverse: InverseId<S>,
    sub_chain: SubChain,
    to_value: ChainValue,
    reversing: bool,
}

impl<S> fmt::Debug for SubChainChangeMove<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubChainChangeMove")
            .field("variable", &self.variable.name)
            .field("sub_chain", &self.sub_chain)
            .field("to_value", &self.to_value)
            .field("reversing", &self.reversing)
            .finish()
    }
}

impl<S> SubChainChangeMove<S> {
    /// Creates a move that keeps the sub-chain's internal order.
    pub fn new(
        variable: VariableDescriptor<S>,
        inverse: InverseId<S>,
        sub_chain: SubChain,
        to_value: ChainValue,
    ) -> Self {
        Self {
            variable,
            inverse,
            sub_chain,
            to_value,
            reversing: false,
        }
    }

    /// Creates a move that attaches the sub-chain reversed.
    pub fn reversing(
        variable: VariableDescriptor<S>,
        inverse: InverseId<S>,
        sub_chain: SubChain,
        to_value: ChainValue,
    ) -> Self {
        Self {
            reversing: true,
            ..Self::new(variable, inverse, sub_chain, to_value)
        }
    }

    pub fn sub_chain(&self) -> SubChain {
        self.sub_chain
    }

    pub fn to_value(&self) -> ChainValue {
        self.to_value
    }

    pub fn is_reversing(&self) -> bool {
        self.reversing
    }
}

impl<S: PlanningSolution> Move<S> for SubChainChangeMove<S> {
    fn is_doable<D: ScoreDirector<S>>(&self, score_director: &D) -> bool {
        let inverse = score_director.supply(self.inverse);
        if let ChainValue::Entity(target) = self.to_value {
            if self.sub_chain.entity_list(inverse).contains(&target) {
                return false;
            }
        }

        let Some(old_first_value) = self
            .sub_chain
            .first_value(&self.variable, score_director.working_solution())
        else {
            return false;
        };

        if old_first_value != self.to_value {
            return true;
        }
        // Same spot: only a reversal of two or more entities changes anything.
        self.reversing && self.sub_chain.size() > 1
    }

    fn do_move<D: ScoreDirector<S>>(&self, score_director: &mut D) {
        let inverse = score_director.supply(self.inverse);
        let entities = self.sub_chain.entity_list(inverse);
        let old_first_value = self
            .sub_chain
            .first_value(&self.variable, score_director.working_solution());
        let old_trailing = self.sub_chain.trailing_entity(inverse);
        let in_place = old_first_value == Some(self.to_value);
        let new_trailing = if in_place {
            old_trailing
        } else {
            inverse.get_inverse_singleton(self.to_value)
        };

        let first = self.sub_chain.first_entity();
        let last = self.sub_chain.last_entity();
        let mut plan = Rewiring::new();
        if !in_place {
            if let Some(trailing) = old_trailing {
                plan.set(trailing, old_first_value);
            }
        }
        if self.reversing {
            plan.attach_reversed(&entities, Some(self.to_value));
            if let Some(trailing) = new_trailing {
                plan.set(trailing, Some(ChainValue::Entity(first)));
            }
        } else {
            plan.set(first, Some(self.to_value));
            if let Some(trailing) = new_trailing {
                plan.set(trailing, Some(ChainValue::Entity(last)));
            }
        }

        tracing::trace!(
            sub_chain = %self.sub_chain,
            to = %self.to_value,
            reversing = self.reversing,
            writes = plan.writes().len(),
            "Moving sub-chain"
        );
        plan.apply(score_director, &self.variable);
    }

    fn create_undo_move<D: ScoreDirector<S>>(&self, score_director: &D) -> Result<Self> {
        let old_first_value = self
            .sub_chain
            .first_value(&self.variable, score_director.working_solution())
            .ok_or_else(|| {
                SolverForgeError::InvalidState(format!(
                    "Sub-chain {} is unassigned and cannot be moved back.",
                    self.sub_chain
                ))
            })?;

        let sub_chain = if self.reversing {
            self.sub_chain.reverse()
        } else {
            self.sub_chain
        };
        Ok(Self {
            sub_chain,
            to_value: old_first_value,
            ..self.clone()
        })
    }

    fn rebase<D: ScoreDirector<S>>(&self, destination: &D) -> Result<Self> {
        Ok(Self {
            variable: self.variable,
            inverse: inverse_on(destination, self.variable)?,
            sub_chain: self.sub_chain.rebase(destination, &self.variable)?,
            to_value: destination.look_up_working_value(&self.variable, self.to_value)?,
            reversing: self.reversing,
        })
    }

    fn planning_entities(&self) -> SmallVec<[usize; 4]> {
        self.sub_chain.boundaries()
    }

    fn planning_values(&self) -> SmallVec<[ChainValue; 4]> {
        smallvec![self.to_value]
    }

    fn descriptor_index(&self) -> usize {
        self.variable.descriptor_index
    }

    fn variable_name(&self) -> &str {
        self.variable.name
    }
}

impl<S> fmt::Display for SubChainChangeMove<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrow = if self.reversing { "-reversing->" } else { "->" };
        write!(f, "{} {} {}", self.sub_chain, arrow, self.to_value)
    }
}
