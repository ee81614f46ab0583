// Parallel replay of moves onto another working solution.

use chainforge_core::{PlanningSolution, Result};
use chainforge_scoring::ScoreDirector;
use rayon::prelude::*;

use crate::heuristic::r#move::{ChainedMove, Move};

/// Rebases every move onto the working solution of `destination`.
///
/// The moves and the destination are only read, so the batch is rebased in
/// parallel. The output keeps the input order.
///
/// # Errors
///
/// Fails with the first error any move reports: a value without a
/// counterpart, or a supply `destination` has not demanded.
pub fn rebase_all<S, D>(moves: &[ChainedMove<S>], destination: &D) -> Result<Vec<ChainedMove<S>>>
where
    S: PlanningSolution,
    D: ScoreDirector<S> + Sync,
{
    let rebased = moves
        .par_iter()
        .map(|m| m.rebase(destination))
        .collect::<Result<Vec<_>>>()?;
    tracing::debug!(moves = rebased.len(), "Rebased moves");
    Ok(rebased)
}
