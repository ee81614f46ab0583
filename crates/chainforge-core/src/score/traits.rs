//! The score contract consumed by score directors.

use std::fmt::{Debug, Display};

/// Objective value of a working solution.
///
/// Higher is better. Moves never inspect scores themselves; the score
/// director recalculates after writes and `SolverScope` compares results
/// to keep the best solution. Undoing a move must give back an equal score.
pub trait Score: Copy + Debug + Display + Send + Sync + Ord + 'static {
    /// Returns true if `self` strictly improves on `other`.
    fn is_better_than(&self, other: &Self) -> bool {
        self > other
    }
}
