//! Value selector for chained variables.

use std::fmt;

use chainforge_core::{ChainValue, PlanningSolution, VariableDescriptor};
use chainforge_scoring::ScoreDirector;
use rand::rngs::StdRng;
use rand::Rng;

use super::SelectionOrder;

/// Selects the values a chained variable can point at.
///
/// The value range of a chained variable is every anchor plus every entity
/// of that variable. Iteration yields the anchors first, then the entities,
/// each in index order.
pub struct ChainedValueSelector<S> {
    variable: VariableDescriptor<S>,
    order: SelectionOrder,
}

impl<S> fmt::Debug for ChainedValueSelector<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainedValueSelector")
            .field("variable", &self.variable.name)
            .field("order", &self.order)
            .finish()
    }
}

impl<S> Clone for ChainedValueSelector<S> {
    fn clone(&self) -> Self {
        Self {
            variable: self.variable,
            order: self.order,
        }
    }
}

impl<S: PlanningSolution> ChainedValueSelector<S> {
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

    pub fn is_never_ending(&self) -> bool {
        self.order.is_random()
    }

    /// Iterates every anchor, then every entity.
    pub fn iter<D: ScoreDirector<S>>(&self, score_director: &D) -> impl Iterator<Item = ChainValue> {
        let solution = score_director.working_solution();
        let anchors = self.variable.anchor_count(solution);
        let entities = self.variable.entity_count(solution);
        (0..anchors)
            .map(ChainValue::Anchor)
            .chain((0..entities).map(ChainValue::Entity))
    }

    /// Iterates the anchors only.
    pub fn iter_anchors<D: ScoreDirector<S>>(&self, score_director: &D) -> impl Iterator<Item = usize> {
        0..self.variable.anchor_count(score_director.working_solution())
    }

    /// Picks one value uniformly, or `None` if the range is empty.
    pub fn sample<D: ScoreDirector<S>>(&self, score_director: &D, rng: &mut StdRng) -> Option<ChainValue> {
        let solution = score_director.working_solution();
        let anchors = self.variable.anchor_count(solution);
        let total = anchors + self.variable.entity_count(solution);
        if total == 0 {
            return None;
        }
        let index = rng.random_range(0..total);
        Some(if index < anchors {
            ChainValue::Anchor(index)
        } else {
            ChainValue::Entity(index - anchors)
        })
    }

    /// Returns the number of values: anchors plus entities.
    pub fn size<D: ScoreDirector<S>>(&self, score_director: &D) -> u64 {
        let solution = score_director.working_solution();
        (self.variable.anchor_count(solution) + self.variable.entity_count(solution)) as u64
    }
}
