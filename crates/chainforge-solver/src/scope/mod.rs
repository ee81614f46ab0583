//! Scope types for a solving session.
//!
//! - `SolverScope`: owns the score director and the session RNG, and drives
//!   the lifecycle of move selectors
//! - `rebase_all`: replays moves of one session onto another session's clone

mod rebase;
mod solver;

#[cfg(test)]
mod tests;

pub use rebase::rebase_all;
pub use solver::SolverScope;
