//! chainforge solver - local search moves over chained planning variables
//!
//! This crate provides:
//! - Chained moves: change, sub-chain change/swap/ruin, tail chain swap, K-opt
//! - Move selectors that enumerate or sample those neighborhoods
//! - Configuration wiring (builder module)
//! - A solver scope that drives selector lifecycles and rebases moves

pub mod builder;
pub mod heuristic;
pub mod scope;

pub use builder::{build_move_selector, MoveSelectorBuilder};
pub use heuristic::{
    // Move types
    AnchorId,
    // Selectors
    AnyChainedMoveSelector,
    ChainedChangeMove,
    ChainedChangeMoveSelector,
    ChainedMove,
    ChainedValueSelector,
    DefaultSubChainSelector,
    EntityReference,
    FromSolutionEntitySelector,
    InverseId,
    KOptMove,
    KOptMoveSelector,
    Move,
    MoveSelector,
    SelectionOrder,
    SubChain,
    SubChainChangeMove,
    SubChainChangeMoveSelector,
    SubChainReversingSwapMove,
    SubChainRuinMove,
    SubChainRuinMoveSelector,
    SubChainSwapMove,
    SubChainSwapMoveSelector,
    TailChainSwapMove,
    TailChainSwapMoveSelector,
};
pub use scope::{rebase_all, SolverScope};
