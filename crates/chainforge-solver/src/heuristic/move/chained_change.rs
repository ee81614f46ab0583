//! ChainedChangeMove - relocates one entity to a new predecessor.
//!
//! Closes the gap the entity leaves behind and splices it in front of
//! whoever trailed the new value. Both trailing entities are captured when
//! the move is created.

use std::fmt;

use chainforge_core::domain::supply::SingletonInverseVariableSupply;
use chainforge_core::{ChainValue, PlanningSolution, Result, VariableDescriptor};
use chainforge_scoring::ScoreDirector;
use smallvec::{smallvec, SmallVec};

use super::rewire::Rewiring;
use super::Move;

/// A move that points one chained entity at a new value.
///
/// # Example
///
/// Chain `A0 <- E1 <- E2 <- E3`, `ChainedChangeMove(E2, A0)`:
/// `E3` is pointed at `E1`, `E2` at `A0`, then `E1` at `E2`,
/// giving `A0 <- E2 <- E1 <- E3`.
#[derive(Clone)]
pub struct ChainedChangeMove<S> {
    variable: VariableDescriptor<S>,
    entity: usize,
    to_value: Option<ChainValue>,
    old_trailing_entity: Option<usize>,
    new_trailing_entity: Option<usize>,
}

impl<S> fmt::Debug for ChainedChangeMove<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainedChangeMove")
            .field("variable", &self.variable.name)
            .field("entity", &self.entity)
            .field("to_value", &self.to_value)
            .field("old_trailing_entity", &self.old_trailing_entity)
            .field("new_trailing_entity", &self.new_trailing_entity)
            .finish()
    }
}

impl<S> ChainedChangeMove<S> {
    /// Creates a move with explicitly captured trailing entities.
    pub fn new(
        variable: VariableDescriptor<S>,
        entity: usize,
        to_value: Option<ChainValue>,
        old_trailing_entity: Option<usize>,
        new_trailing_entity: Option<usize>,
    ) -> Self {
        Self {
            variable,
            entity,
            to_value,
            old_trailing_entity,
            new_trailing_entity,
        }
    }

    /// Creates a move, capturing both trailing entities from the inverse supply.
    pub fn from_supply(
        variable: VariableDescriptor<S>,
        inverse: &SingletonInverseVariableSupply<S>,
        entity: usize,
        to_value: Option<ChainValue>,
    ) -> Self {
        Self::new(
            variable,
            entity,
            to_value,
            inverse.trailing_entity(entity),
            to_value.and_then(|value| inverse.get_inverse_singleton(value)),
        )
    }

    pub fn entity(&self) -> usize {
        self.entity
    }

    pub fn to_value(&self) -> Option<ChainValue> {
        self.to_value
    }

    /// The entity that trailed the moved entity before the move.
    pub fn old_trailing_entity(&self) -> Option<usize> {
        self.old_trailing_entity
    }

    /// The entity that trailed the target value before the move.
    pub fn new_trailing_entity(&self) -> Option<usize> {
        self.new_trailing_entity
    }
}

impl<S: PlanningSolution> Move<S> for ChainedChangeMove<S> {
    fn is_doable<D: ScoreDirector<S>>(&self, score_director: &D) -> bool {
        let current = self
            .variable
            .get_value(score_director.working_solution(), self.entity);
        current != self.to_value && self.to_value != Some(ChainValue::Entity(self.entity))
    }

    fn do_move<D: ScoreDirector<S>>(&self, score_director: &mut D) {
        let old_value = self
            .variable
            .get_value(score_director.working_solution(), self.entity);

        let mut plan = Rewiring::new();
        if let Some(trailing) = self.old_trailing_entity {
            plan.set(trailing, old_value);
        }
        plan.set(self.entity, self.to_value);
        if let Some(trailing) = self.new_trailing_entity {
            plan.set(trailing, Some(ChainValue::Entity(self.entity)));
        }
        tracing::trace!(change = %self, "Changing chained variable");
        plan.apply(score_director, &self.variable);
    }

    fn create_undo_move<D: ScoreDirector<S>>(&self, score_director: &D) -> Result<Self> {
        let old_value = self
            .variable
            .get_value(score_director.working_solution(), self.entity);
        Ok(Self::new(
            self.variable,
            self.entity,
            old_value,
            self.new_trailing_entity,
            self.old_trailing_entity,
        ))
    }

    fn rebase<D: ScoreDirector<S>>(&self, destination: &D) -> Result<Self> {
        let var = &self.variable;
        Ok(Self::new(
            self.variable,
            destination.look_up_working_entity(var, self.entity)?,
            self.to_value
                .map(|value| destination.look_up_working_value(var, value))
                .transpose()?,
            self.old_trailing_entity
                .map(|entity| destination.look_up_working_entity(var, entity))
                .transpose()?,
            self.new_trailing_entity
                .map(|entity| destination.look_up_working_entity(var, entity))
                .transpose()?,
        ))
    }

    fn planning_entities(&self) -> SmallVec<[usize; 4]> {
        smallvec![self.entity]
    }

    fn planning_values(&self) -> SmallVec<[ChainValue; 4]> {
        self.to_value.into_iter().collect()
    }

    fn descriptor_index(&self) -> usize {
        self.variable.descriptor_index
    }

    fn variable_name(&self) -> &str {
        self.variable.name
    }
}

impl<S> fmt::Display for ChainedChangeMove<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_value {
            Some(value) => write!(f, "E{} -> {}", self.entity, value),
            None => write!(f, "E{} -> null", self.entity),
        }
    }
}
