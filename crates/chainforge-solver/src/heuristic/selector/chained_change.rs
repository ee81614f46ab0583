//! Move selector for single-entity relocations.

use std::fmt;

use chainforge_core::{PlanningSolution, Result};
use chainforge_scoring::ScoreDirector;
use rand::rngs::StdRng;

use crate::heuristic::r#move::{ChainedChangeMove, ChainedMove};

use super::supplies::{require_chained, require_ending_children, require_same_variable, SessionSupplies};
use super::{ChainedValueSelector, FromSolutionEntitySelector, MoveSelector, SelectionOrder};

const NAME: &str = "chained change move selector";

/// Yields a [`ChainedChangeMove`] for every entity and value.
///
/// Trailing entities are captured from the inverse supply when each move
/// is produced.
pub struct ChainedChangeMoveSelector<S> {
    entity_selector: FromSolutionEntitySelector<S>,
    value_selector: ChainedValueSelector<S>,
    order: SelectionOrder,
    supplies: SessionSupplies<S>,
}

impl<S> fmt::Debug for ChainedChangeMoveSelector<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainedChangeMoveSelector")
            .field("entity_selector", &self.entity_selector)
            .field("value_selector", &self.value_selector)
            .field("order", &self.order)
            .finish()
    }
}

impl<S: PlanningSolution> ChainedChangeMoveSelector<S> {
    /// Creates the selector.
    ///
    /// # Errors
    ///
    /// Returns [`SolverForgeError::Config`](chainforge_core::SolverForgeError::Config)
    /// if the variable is not chained, the child selectors disagree on the
    /// variable, or original order wraps a never-ending child.
    pub fn new(
        entity_selector: FromSolutionEntitySelector<S>,
        value_selector: ChainedValueSelector<S>,
        order: SelectionOrder,
    ) -> Result<Self> {
        let variable = *value_selector.variable();
        require_chained(&variable, NAME)?;
        require_same_variable(&variable, entity_selector.variable(), NAME)?;
        let order = order.resolve(SelectionOrder::Inherit);
        require_ending_children(
            order,
            entity_selector.is_never_ending() || value_selector.is_never_ending(),
            NAME,
        )?;
        Ok(Self {
            entity_selector,
            value_selector,
            order,
            supplies: SessionSupplies::inverse_only(variable)?,
        })
    }
}

impl<S: PlanningSolution> MoveSelector<S> for ChainedChangeMoveSelector<S> {
    fn iter_moves<'a, D: ScoreDirector<S>>(
        &'a self,
        score_director: &'a D,
        rng: &'a mut StdRng,
    ) -> impl Iterator<Item = ChainedMove<S>> + 'a {
        let variable = *self.value_selector.variable();
        let inverse = score_director.supply(self.supplies.inverse());
        let values = &self.value_selector;

        let moves: Box<dyn Iterator<Item = ChainedMove<S>> + 'a> = if self.order.is_random() {
            Box::new(std::iter::from_fn(move || {
                let entity = self.entity_selector.sample(score_director, rng)?;
                let value = values.sample(score_director, rng)?;
                Some(ChainedMove::from(ChainedChangeMove::from_supply(
                    variable,
                    inverse,
                    entity.entity_index,
                    Some(value),
                )))
            }))
        } else {
            Box::new(self.entity_selector.iter(score_director).flat_map(move |entity| {
                values.iter(score_director).map(move |value| {
                    ChainedMove::from(ChainedChangeMove::from_supply(
                        variable,
                        inverse,
                        entity.entity_index,
                        Some(value),
                    ))
                })
            }))
        };
        moves
    }

    fn size<D: ScoreDirector<S>>(&self, score_director: &D) -> Result<u64> {
        Ok(self.entity_selector.size(score_director) * self.value_selector.size(score_director))
    }

    fn is_never_ending(&self) -> bool {
        self.order.is_random()
    }

    fn solving_started<D: ScoreDirector<S>>(&mut self, score_director: &mut D) {
        self.supplies.demand(score_director);
    }

    fn solving_ended<D: ScoreDirector<S>>(&mut self, score_director: &mut D) {
        self.supplies.cancel(score_director);
    }
}
