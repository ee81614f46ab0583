//! The move selector contract.

use std::fmt::Debug;

use chainforge_core::{PlanningSolution, Result};
use chainforge_scoring::ScoreDirector;
use rand::rngs::StdRng;

use crate::heuristic::r#move::ChainedMove;

/// A selector that yields chained moves for one neighborhood.
///
/// Moves are produced lazily against the score director's current working
/// solution. Original order iterates a finite neighborhood; random order
/// samples forever and relies on the caller to stop pulling.
///
/// # Lifecycle
///
/// `solving_started` demands the supplies the moves need, `step_started`
/// refreshes per-step caches and `solving_ended` releases the supplies.
/// Iterating outside `solving_started..solving_ended` panics.
pub trait MoveSelector<S: PlanningSolution>: Send + Debug {
    /// Returns an iterator over moves.
    fn iter_moves<'a, D: ScoreDirector<S>>(
        &'a self,
        score_director: &'a D,
        rng: &'a mut StdRng,
    ) -> impl Iterator<Item = ChainedMove<S>> + 'a;

    /// Returns the number of moves an original-order iteration yields.
    ///
    /// # Errors
    ///
    /// Returns [`SolverForgeError::UnsupportedOperation`](chainforge_core::SolverForgeError::UnsupportedOperation)
    /// when the neighborhood cannot be counted.
    fn size<D: ScoreDirector<S>>(&self, score_director: &D) -> Result<u64>;

    /// Returns true if `size` is supported.
    fn is_countable(&self) -> bool {
        true
    }

    /// Returns true if iteration never terminates on its own.
    fn is_never_ending(&self) -> bool;

    fn solving_started<D: ScoreDirector<S>>(&mut self, score_director: &mut D);

    fn step_started<D: ScoreDirector<S>>(&mut self, _score_director: &D) {}

    fn solving_ended<D: ScoreDirector<S>>(&mut self, score_director: &mut D);
}
