//! Score director and working-solution facade for chainforge.
//!
//! The score director is the only way a move mutates the working solution:
//! - `change_variable_facade` writes one chained pointer and keeps every
//!   demanded supply current through before/after notifications
//! - `look_up_working_value` maps values across solution clones for rebasing
//! - scores are recalculated lazily after changes

pub mod director;

pub use director::{ScoreDirector, SimpleScoreDirector, WorkingObjectLookup};
