//! Entity selectors for iterating over chained planning entities

use std::fmt;

use chainforge_core::{PlanningSolution, VariableDescriptor};
use chainforge_scoring::ScoreDirector;
use rand::rngs::StdRng;
use rand::Rng;

use super::SelectionOrder;

/// A reference to an entity within a solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityReference {
    /// Index of the entity descriptor.
    pub descriptor_index: usize,
    /// Index of the entity within its collection.
    pub entity_index: usize,
}

impl EntityReference {
    /// Creates a new entity reference.
    pub fn new(descriptor_index: usize, entity_index: usize) -> Self {
        Self {
            descriptor_index,
            entity_index,
        }
    }
}

/// An entity selector over every entity of one chained variable.
///
/// Unassigned entities are included so change moves can assign them.
pub struct FromSolutionEntitySelector<S> {
    variable: VariableDescriptor<S>,
    order: SelectionOrder,
}

impl<S> fmt::Debug for FromSolutionEntitySelector<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FromSolutionEntitySelector")
            .field("variable", &self.variable.name)
            .field("order", &self.order)
            .finish()
    }
}

impl<S> Clone for FromSolutionEntitySelector<S> {
    fn clone(&self) -> Self {
        Self {
            variable: self.variable,
            order: self.order,
        }
    }
}

impl<S: PlanningSolution> FromSolutionEntitySelector<S> {
    /// Creates a new entity selector for the entities of `variable`.
    pub fn new(variable: VariableDescriptor<S>) -> Self {
        Self {
            variable,
            order: SelectionOrder::Inherit,
        }
    }

    /// Sets the selection order.
    pub fn with_order(mut self, order: SelectionOrder) -> Self {
        self.order = order;
        self
    }

    pub fn variable(&self) -> &VariableDescriptor<S> {
        &self.variable
    }

    pub fn order(&self) -> SelectionOrder {
        self.order
    }

    /// Returns true if this selector samples endlessly.
    pub fn is_never_ending(&self) -> bool {
        self.order.is_random()
    }

    /// Iterates every entity in index order.
    pub fn iter<D: ScoreDirector<S>>(&self, score_director: &D) -> impl Iterator<Item = EntityReference> {
        let count = self.variable.entity_count(score_director.working_solution());
        let desc_idx = self.variable.descriptor_index;
        (0..count).map(move |i| EntityReference::new(desc_idx, i))
    }

    /// Picks one entity uniformly, or `None` if there are none.
    pub fn sample<D: ScoreDirector<S>>(
        &self,
        score_director: &D,
        rng: &mut StdRng,
    ) -> Option<EntityReference> {
        let count = self.variable.entity_count(score_director.working_solution());
        if count == 0 {
            return None;
        }
        Some(EntityReference::new(
            self.variable.descriptor_index,
            rng.random_range(0..count),
        ))
    }

    /// Returns the number of entities.
    pub fn size<D: ScoreDirector<S>>(&self, score_director: &D) -> u64 {
        self.variable.entity_count(score_director.working_solution()) as u64
    }
}
