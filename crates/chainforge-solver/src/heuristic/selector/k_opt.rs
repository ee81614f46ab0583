//! Random K-opt move selector.

use std::fmt;

use chainforge_core::{PlanningSolution, Result, SolverForgeError};
use chainforge_scoring::ScoreDirector;
use rand::rngs::StdRng;
use smallvec::SmallVec;

use crate::heuristic::r#move::{ChainedMove, KOptMove};

use super::supplies::{require_chained, require_same_variable, SessionSupplies};
use super::{ChainedValueSelector, FromSolutionEntitySelector, MoveSelector, SelectionOrder};

const NAME: &str = "K-opt move selector";

/// Samples one entity and `k - 1` values per [`KOptMove`].
///
/// The neighborhood is only ever sampled: original order is rejected at
/// construction and `size` is unsupported.
pub struct KOptMoveSelector<S> {
    entity_selector: FromSolutionEntitySelector<S>,
    value_selector: ChainedValueSelector<S>,
    k: usize,
    supplies: SessionSupplies<S>,
}

impl<S> fmt::Debug for KOptMoveSelector<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KOptMoveSelector")
            .field("entity_selector", &self.entity_selector)
            .field("value_selector", &self.value_selector)
            .field("k", &self.k)
            .finish()
    }
}

impl<S: PlanningSolution> KOptMoveSelector<S> {
    /// Creates the selector.
    ///
    /// # Errors
    ///
    /// Returns [`SolverForgeError::Config`] for original order, `k < 2` or a
    /// variable that is not chained. `Inherit` resolves to random.
    pub fn new(
        entity_selector: FromSolutionEntitySelector<S>,
        value_selector: ChainedValueSelector<S>,
        k: usize,
        order: SelectionOrder,
    ) -> Result<Self> {
        let variable = *value_selector.variable();
        require_chained(&variable, NAME)?;
        require_same_variable(&variable, entity_selector.variable(), NAME)?;
        if !order.resolve(SelectionOrder::Random).is_random() {
            return Err(SolverForgeError::Config(format!(
                "The {NAME} of {} supports random selection only, not {:?}.",
                variable.simple_name(),
                order
            )));
        }
        if k < 2 {
            return Err(SolverForgeError::Config(format!(
                "The {NAME} of {} needs k >= 2, got {k}.",
                variable.simple_name()
            )));
        }
        Ok(Self {
            entity_selector,
            value_selector,
            k,
            supplies: SessionSupplies::with_anchor(variable)?,
        })
    }

    pub fn k(&self) -> usize {
        self.k
    }
}

impl<S: PlanningSolution> MoveSelector<S> for KOptMoveSelector<S> {
    fn iter_moves<'a, D: ScoreDirector<S>>(
        &'a self,
        score_director: &'a D,
        rng: &'a mut StdRng,
    ) -> impl Iterator<Item = ChainedMove<S>> + 'a {
        let variable = *self.value_selector.variable();
        let (inverse, anchor) = (self.supplies.inverse(), self.supplies.anchor());

        std::iter::from_fn(move || {
            let entity = self.entity_selector.sample(score_director, rng)?;
            let values = (1..self.k)
                .map(|_| self.value_selector.sample(score_director, rng))
                .collect::<Option<SmallVec<[_; 4]>>>()?;
            Some(ChainedMove::from(KOptMove::new(
                variable,
                inverse,
                anchor,
                entity.entity_index,
                values,
            )))
        })
    }

    fn size<D: ScoreDirector<S>>(&self, _score_director: &D) -> Result<u64> {
        Err(SolverForgeError::UnsupportedOperation(format!(
            "The {NAME} of {} cannot count its random neighborhood.",
            self.value_selector.variable().simple_name()
        )))
    }

    fn is_countable(&self) -> bool {
        false
    }

    fn is_never_ending(&self) -> bool {
        true
    }

    fn solving_started<D: ScoreDirector<S>>(&mut self, score_director: &mut D) {
        self.supplies.demand(score_director);
    }

    fn solving_ended<D: ScoreDirector<S>>(&mut self, score_director: &mut D) {
        self.supplies.cancel(score_director);
    }
}
