//! Shared chained-variable test fixtures for chainforge crates.
//!
//! - [`chained`] - Named anchors and entities, chain builders and assertions
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! chainforge-test = { workspace = true }
//! ```
//!
//! Then build chains by name, with the first name of every chain being its anchor:
//!
//! ```
//! use chainforge_test::chained::{assert_chain, ChainedSolution};
//!
//! let solution = ChainedSolution::with_chains(&[&["a0", "a1", "a2"], &["b0", "b1"]]);
//! assert_chain(&solution, &["a0", "a1", "a2"]);
//! assert_chain(&solution, &["b0", "b1"]);
//! ```

pub mod chained;

pub use chained::{
    assert_chain, assert_chain_invariants, chained_director, distance_score, genuine_var,
    previous_var, ChainedAnchor, ChainedDirector, ChainedEntity, ChainedSolution,
};
