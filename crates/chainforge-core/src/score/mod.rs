//! Scores compared by the solver scope and checked after undo moves.

mod simple;
mod traits;

pub use simple::SimpleScore;
pub use traits::Score;
