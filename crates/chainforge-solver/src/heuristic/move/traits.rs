//! Move trait definition.

use std::fmt::{Debug, Display};

use chainforge_core::{ChainValue, PlanningSolution, Result};
use chainforge_scoring::ScoreDirector;
use smallvec::SmallVec;

/// A move that rewires one chained variable.
///
/// Moves are fully typed and hold plain indices plus supply handles, so they
/// are cheap to clone and safe to send to another thread.
///
/// # Contract
///
/// - `is_doable` only reads. A move that is not doable must not be executed.
/// - `do_move` writes exclusively through
///   [`ScoreDirector::change_variable_facade`], so every supply stays current.
/// - `create_undo_move` is called on the pre-move state. Executing the
///   returned move right after `do_move` restores every variable exactly.
/// - `rebase` maps the move onto another clone of the working solution.
pub trait Move<S: PlanningSolution>: Send + Sync + Debug + Display + Clone {
    /// Returns true if this move changes the solution and keeps it valid.
    fn is_doable<D: ScoreDirector<S>>(&self, score_director: &D) -> bool;

    /// Executes this move on the working solution.
    fn do_move<D: ScoreDirector<S>>(&self, score_director: &mut D);

    /// Creates the move that reverts this one.
    ///
    /// Must be called before `do_move`. Moves without an exact inverse
    /// return [`SolverForgeError::UnsupportedOperation`](chainforge_core::SolverForgeError).
    fn create_undo_move<D: ScoreDirector<S>>(&self, score_director: &D) -> Result<Self>;

    /// Translates every entity, value and supply handle onto `destination`.
    fn rebase<D: ScoreDirector<S>>(&self, destination: &D) -> Result<Self>;

    /// Returns the entities this move touches, for tabu bookkeeping.
    fn planning_entities(&self) -> SmallVec<[usize; 4]>;

    /// Returns the values this move assigns, for tabu bookkeeping.
    fn planning_values(&self) -> SmallVec<[ChainValue; 4]>;

    /// Returns the descriptor index of the entity type this move affects.
    fn descriptor_index(&self) -> usize;

    /// Returns the variable name this move affects.
    fn variable_name(&self) -> &str;
}
