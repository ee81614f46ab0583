//! Score director implementations.
//!
//! # Score Director Types
//!
//! - [`SimpleScoreDirector`] - Full recalculation, owns the supply registry
//! - [`WorkingObjectLookup`] - Planning-id table used to rebase moves

mod lookup;
mod simple;
mod traits;


pub use lookup::WorkingObjectLookup;
pub use simple::SimpleScoreDirector;
pub use traits::ScoreDirector;
