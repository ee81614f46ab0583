//! Selectors for chained entities, values, sub-chains and moves.
//!
//! Entity, value and sub-chain selectors are the building blocks; the move
//! selectors combine them into the chained neighborhoods:
//!
//! - `ChainedChangeMoveSelector` - entity x value
//! - `SubChainChangeMoveSelector` - sub-chain x value, optional reversing twins
//! - `SubChainSwapMoveSelector` - sub-chain pairs, optional reversing twins
//! - `SubChainRuinMoveSelector` - sub-chains
//! - `TailChainSwapMoveSelector` - entity x value
//! - `KOptMoveSelector` - entity x (k - 1) values, random only

mod any;
mod chained_change;
pub mod entity;
mod k_opt;
mod move_selector;
mod selection_order;
pub mod sub_chain;
mod sub_chain_change;
mod sub_chain_ruin;
mod sub_chain_swap;
mod supplies;
mod tail_chain_swap;
pub mod value;

#[cfg(test)]
mod tests;

pub use any::AnyChainedMoveSelector;
pub use chained_change::ChainedChangeMoveSelector;
pub use entity::{EntityReference, FromSolutionEntitySelector};
pub use k_opt::KOptMoveSelector;
pub use move_selector::MoveSelector;
pub use selection_order::SelectionOrder;
pub use sub_chain::DefaultSubChainSelector;
pub use sub_chain_change::SubChainChangeMoveSelector;
pub use sub_chain_ruin::SubChainRuinMoveSelector;
pub use sub_chain_swap::SubChainSwapMoveSelector;
pub use tail_chain_swap::TailChainSwapMoveSelector;
pub use value::ChainedValueSelector;
