//! ChainedMove - the union of every chained move type.

use std::fmt;

use chainforge_core::{ChainValue, PlanningSolution, Result};
use chainforge_scoring::ScoreDirector;
use smallvec::SmallVec;

use super::{
    ChainedChangeMove, KOptMove, Move, SubChainChangeMove, SubChainReversingSwapMove,
    SubChainRuinMove, SubChainSwapMove, TailChainSwapMove,
};

/// Any chained move, dispatched by `match`.
///
/// Move selectors yield this type so one local search loop can mix
/// neighborhoods without boxing.
#[derive(Clone)]
pub enum ChainedMove<S> {
    Change(ChainedChangeMove<S>),
    SubChainChange(SubChainChangeMove<S>),
    SubChainSwap(SubChainSwapMove<S>),
    SubChainReversingSwap(SubChainReversingSwapMove<S>),
    SubChainRuin(SubChainRuinMove<S>),
    TailChainSwap(TailChainSwapMove<S>),
    KOpt(KOptMove<S>),
}

macro_rules! dispatch {
    ($self:expr, $m:ident => $body:expr) => {
        match $self {
            ChainedMove::Change($m) => $body,
            ChainedMove::SubChainChange($m) => $body,
            ChainedMove::SubChainSwap($m) => $body,
            ChainedMove::SubChainReversingSwap($m) => $body,
            ChainedMove::SubChainRuin($m) => $body,
            ChainedMove::TailChainSwap($m) => $body,
            ChainedMove::KOpt($m) => $body,
        }
    };
}

macro_rules! rewrap {
    ($self:expr, $m:ident => $body:expr) => {
        match $self {
            ChainedMove::Change($m) => ChainedMove::Change($body),
            ChainedMove::SubChainChange($m) => ChainedMove::SubChainChange($body),
            ChainedMove::SubChainSwap($m) => ChainedMove::SubChainSwap($body),
            ChainedMove::SubChainReversingSwap($m) => ChainedMove::SubChainReversingSwap($body),
            ChainedMove::SubChainRuin($m) => ChainedMove::SubChainRuin($body),
            ChainedMove::TailChainSwap($m) => ChainedMove::TailChainSwap($body),
            ChainedMove::KOpt($m) => ChainedMove::KOpt($body),
        }
    };
}

impl<S> ChainedMove<S> {
    /// Short name of the move kind, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            ChainedMove::Change(_) => "ChainedChange",
            ChainedMove::SubChainChange(m) if m.is_reversing() => "SubChainReversingChange",
            ChainedMove::SubChainChange(_) => "SubChainChange",
            ChainedMove::SubChainSwap(_) => "SubChainSwap",
            ChainedMove::SubChainReversingSwap(_) => "SubChainReversingSwap",
            ChainedMove::SubChainRuin(_) => "SubChainRuin",
            ChainedMove::TailChainSwap(_) => "TailChainSwap",
            ChainedMove::KOpt(_) => "KOpt",
        }
    }
}

impl<S: PlanningSolution> Move<S> for ChainedMove<S> {
    fn is_doable<D: ScoreDirector<S>>(&self, score_director: &D) -> bool {
        dispatch!(self, m => m.is_doable(score_director))
    }

    fn do_move<D: ScoreDirector<S>>(&self, score_director: &mut D) {
        dispatch!(self, m => m.do_move(score_director))
    }

    fn create_undo_move<D: ScoreDirector<S>>(&self, score_director: &D) -> Result<Self> {
        Ok(rewrap!(self, m => m.create_undo_move(score_director)?))
    }

    fn rebase<D: ScoreDirector<S>>(&self, destination: &D) -> Result<Self> {
        Ok(rewrap!(self, m => m.rebase(destination)?))
    }

    fn planning_entities(&self) -> SmallVec<[usize; 4]> {
        dispatch!(self, m => m.planning_entities())
    }

    fn planning_values(&self) -> SmallVec<[ChainValue; 4]> {
        dispatch!(self, m => m.planning_values())
    }

    fn descriptor_index(&self) -> usize {
        dispatch!(self, m => m.descriptor_index())
    }

    fn variable_name(&self) -> &str {
        dispatch!(self, m => m.variable_name())
    }
}

impl<S> fmt::Debug for ChainedMove<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        dispatch!(self, m => fmt::Debug::fmt(m, f))
    }
}

impl<S> fmt::Display for ChainedMove<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        dispatch!(self, m => fmt::Display::fmt(m, f))
    }
}

macro_rules! impl_from {
    ($($variant:ident($ty:ident)),* $(,)?) => {
        $(
            impl<S> From<$ty<S>> for ChainedMove<S> {
                fn from(m: $ty<S>) -> Self {
                    ChainedMove::$variant(m)
                }
            }
        )*
    };
}

impl_from!(
    Change(ChainedChangeMove),
    SubChainChange(SubChainChangeMove),
    SubChainSwap(SubChainSwapMove),
    SubChainReversingSwap(SubChainReversingSwapMove),
    SubChainRuin(SubChainRuinMove),
    TailChainSwap(TailChainSwapMove),
    KOpt(KOptMove),
);
