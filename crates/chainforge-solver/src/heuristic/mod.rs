//! Chained-variable moves and the selectors that generate them.

pub mod r#move;
pub mod selector;

pub use r#move::{
    AnchorId, ChainedChangeMove, ChainedMove, InverseId, KOptMove, Move, SubChain,
    SubChainChangeMove, SubChainReversingSwapMove, SubChainRuinMove, SubChainSwapMove,
    TailChainSwapMove,
};
pub use selector::{
    AnyChainedMoveSelector, ChainedChangeMoveSelector, ChainedValueSelector,
    DefaultSubChainSelector, EntityReference, FromSolutionEntitySelector, KOptMoveSelector,
    MoveSelector, SelectionOrder, SubChainChangeMoveSelector, SubChainRuinMoveSelector,
    SubChainSwapMoveSelector, TailChainSwapMoveSelector,
};
