//! Move system for chained planning variables.
//!
//! Moves rewrite predecessor pointers of a chained variable. Each move reads
//! the pre-move chain once, plans its writes and applies them through the
//! score director, which keeps the inverse and anchor supplies current.
//!
//! # Architecture
//!
//! - `ChainedChangeMove<S>` - relocates one entity
//! - `SubChainChangeMove<S>` - relocates a sub-chain, optionally reversed
//! - `SubChainSwapMove<S>` - exchanges two sub-chains
//! - `SubChainReversingSwapMove<S>` - exchanges and reverses two sub-chains
//! - `SubChainRuinMove<S>` - unassigns a sub-chain (not undoable)
//! - `TailChainSwapMove<S>` - 2-opt over chains
//! - `KOptMove<S>` - rotates K predecessor pointers
//! - `ChainedMove<S>` - enum over all of the above
//!
//! Undo moves are created before `do_move`, from the pre-move state.

mod chained;
mod chained_change;
mod handles;
mod k_opt;
mod rewire;
mod sub_chain;
mod sub_chain_change;
mod sub_chain_reversing_swap;
mod sub_chain_ruin;
mod sub_chain_swap;
mod tail_chain_swap;
mod traits;

#[cfg(test)]
mod tests;

pub use chained::ChainedMove;
pub use chained_change::ChainedChangeMove;
pub use handles::{AnchorId, InverseId};
pub use k_opt::KOptMove;
pub use sub_chain::SubChain;
pub use sub_chain_change::SubChainChangeMove;
pub use sub_chain_reversing_swap::SubChainReversingSwapMove;
pub use sub_chain_ruin::SubChainRuinMove;
pub use sub_chain_swap::SubChainSwapMove;
pub use tail_chain_swap::TailChainSwapMove;
pub use traits::Move;

pub(crate) use rewire::chain_of;
