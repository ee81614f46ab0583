//! TailChainSwapMove - the chained 2-opt move.
//!
//! Cuts the chain in front of `left_entity` and in front of the entity
//! trailing `right_value`, then reconnects so that the left tail follows
//! `right_value`. Across chains the two tails are exchanged. Within one
//! chain the segment between both cuts is reversed.

use std::fmt;

use chainforge_core::{ChainValue, PlanningSolution, Result, SolverForgeError, VariableDescriptor};
use chainforge_scoring::ScoreDirector;
use smallvec::{smallvec, SmallVec};

use super::handles::{anchor_on, inverse_on, AnchorId, InverseId};
use super::rewire::{chain_of, Rewiring};
use super::Move;

/// A 2-opt move over a chained variable.
///
/// # Example
///
/// On the chain `a0-a1-...-a7`:
/// - `(a4, a1)` reverses `[a2..a4]`: `a0-a1-a4-a3-a2-a5-a6-a7`
/// - `(a1, a4)` gives `a0-a7-a6-a5-a2-a3-a4-a1`
///
/// Across chains `a0-a1-a2-a3` and `b0-b1`, `(a2, b0)` gives `a0-a1-b1`
/// and `b0-a2-a3`.
#[derive(Clone)]
pub struct TailChainSwapMove<S> {
    variable: VariableDescriptor<S>,
    inverse: InverseId<S>,
    anchor: AnchorId<S>,
    left_entity: usize,
    right_value: ChainValue,
}

impl<S> fmt::Debug for TailChainSwapMove<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TailChainSwapMove")
            .field("variable", &self.variable.name)
            .field("left_entity", &self.left_entity)
            .field("right_value", &self.right_value)
            .finish()
    }
}

impl<S> TailChainSwapMove<S> {
    pub fn new(
        variable: VariableDescriptor<S>,
        inverse: InverseId<S>,
        anchor: AnchorId<S>,
        left_entity: usize,
        right_value: ChainValue,
    ) -> Self {
        Self {
            variable,
            inverse,
            anchor,
            left_entity,
            right_value,
        }
    }

    pub fn left_entity(&self) -> usize {
        self.left_entity
    }

    pub fn right_value(&self) -> ChainValue {
        self.right_value
    }
}

/// Pre-move state of a tail chain swap.
struct TailEnds {
    left_value: ChainValue,
    right_entity: Option<usize>,
    left_anchor: usize,
    right_anchor: usize,
}

impl<S: PlanningSolution> TailChainSwapMove<S> {
    fn read_ends<D: ScoreDirector<S>>(&self, score_director: &D) -> Option<TailEnds> {
        let left_value = self
            .variable
            .get_value(score_director.working_solution(), self.left_entity)?;
        let anchors = score_director.supply(self.anchor);
        Some(TailEnds {
            left_value,
            right_entity: score_director
                .supply(self.inverse)
                .get_inverse_singleton(self.right_value),
            left_anchor: anchors.get_anchor(self.left_entity)?,
            right_anchor: anchors.get_anchor_of_value(self.right_value)?,
        })
    }
}

impl<S: PlanningSolution> Move<S> for TailChainSwapMove<S> {
    fn is_doable<D: ScoreDirector<S>>(&self, score_director: &D) -> bool {
        let Some(ends) = self.read_ends(score_director) else {
            return false;
        };
        if ends.left_value == self.right_value
            || self.right_value == ChainValue::Entity(self.left_entity)
            || ends.right_entity.map(ChainValue::Entity) == Some(ends.left_value)
        {
            return false;
        }
        ends.right_entity.is_some() || ends.left_anchor != ends.right_anchor
    }

    fn do_move<D: ScoreDirector<S>>(&self, score_director: &mut D) {
        let Some(ends) = self.read_ends(score_director) else {
            return;
        };

        let mut plan = Rewiring::new();
        if ends.left_anchor != ends.right_anchor {
            plan.set(self.left_entity, Some(self.right_value));
            if let Some(right_entity) = ends.right_entity {
                plan.set(right_entity, Some(ends.left_value));
            }
        } else {
            let limit = self.variable.entity_count(score_director.working_solution());
            let chain = chain_of(score_director.supply(self.inverse), ends.left_anchor, limit);
            let Some(left_pos) = chain.iter().position(|&e| e == self.left_entity) else {
                return;
            };
            // Position just behind the right cut: 0 for the anchor itself.
            let right_cut = match self.right_value {
                ChainValue::Anchor(_) => 0,
                ChainValue::Entity(entity) => match chain.iter().position(|&e| e == entity) {
                    Some(pos) => pos + 1,
                    None => return,
                },
            };

            let order: Vec<usize> = if right_cut <= left_pos {
                // Reverse [right_entity..left_entity] behind the right value.
                chain[..right_cut]
                    .iter()
                    .chain(chain[right_cut..=left_pos].iter().rev())
                    .chain(chain[left_pos + 1..].iter())
                    .copied()
                    .collect()
            } else {
                // Head [..=left], middle [left+1..right_cut], tail [right_cut..].
                chain[right_cut..]
                    .iter()
                    .rev()
                    .chain(chain[left_pos + 1..right_cut].iter())
                    .chain(chain[..=left_pos].iter().rev())
                    .copied()
                    .collect()
            };
            plan.relink(ends.left_anchor, order);
        }

        tracing::trace!(tail_chain_swap = %self, writes = plan.writes().len(), "Swapping tail chains");
        plan.apply(score_director, &self.variable);
    }

    fn create_undo_move<D: ScoreDirector<S>>(&self, score_director: &D) -> Result<Self> {
        let ends = self.read_ends(score_director).ok_or_else(|| {
            SolverForgeError::InvalidState(format!(
                "{self} reads an unassigned or detached entity."
            ))
        })?;

        if ends.left_anchor != ends.right_anchor {
            return Ok(Self {
                right_value: ends.left_value,
                ..self.clone()
            });
        }
        let right_entity = ends.right_entity.ok_or_else(|| {
            SolverForgeError::InvalidState(format!(
                "{self} has no entity after its right value within one chain."
            ))
        })?;
        Ok(Self {
            left_entity: right_entity,
            ..self.clone()
        })
    }

    fn rebase<D: ScoreDirector<S>>(&self, destination: &D) -> Result<Self> {
        Ok(Self::new(
            self.variable,
            inverse_on(destination, self.variable)?,
            anchor_on(destination, self.variable)?,
            destination.look_up_working_entity(&self.variable, self.left_entity)?,
            destination.look_up_working_value(&self.variable, self.right_value)?,
        ))
    }

    fn planning_entities(&self) -> SmallVec<[usize; 4]> {
        smallvec![self.left_entity]
    }

    fn planning_values(&self) -> SmallVec<[ChainValue; 4]> {
        smallvec![self.right_value]
    }

    fn descriptor_index(&self) -> usize {
        self.variable.descriptor_index
    }

    fn variable_name(&self) -> &str {
        self.variable.name
    }
}

impl<S> fmt::Display for TailChainSwapMove<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{} <-tailChainSwap-> {}", self.left_entity, self.right_value)
    }
}
