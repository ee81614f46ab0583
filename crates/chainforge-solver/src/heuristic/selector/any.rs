//! A move selector over every chained neighborhood.

use std::fmt;

use chainforge_core::{PlanningSolution, Result};
use chainforge_scoring::ScoreDirector;
use rand::rngs::StdRng;

use crate::heuristic::r#move::ChainedMove;

use super::{
    ChainedChangeMoveSelector, KOptMoveSelector, MoveSelector, SubChainChangeMoveSelector,
    SubChainRuinMoveSelector, SubChainSwapMoveSelector, TailChainSwapMoveSelector,
};

/// One of the six chained move selectors, chosen at runtime.
///
/// Built from configuration by [`build_move_selector`](crate::build_move_selector).
pub enum AnyChainedMoveSelector<S> {
    ChainedChange(ChainedChangeMoveSelector<S>),
    SubChainChange(SubChainChangeMoveSelector<S>),
    SubChainSwap(SubChainSwapMoveSelector<S>),
    SubChainRuin(SubChainRuinMoveSelector<S>),
    TailChainSwap(TailChainSwapMoveSelector<S>),
    KOpt(KOptMoveSelector<S>),
}

macro_rules! each {
    ($self:expr, $s:ident => $body:expr) => {
        match $self {
            AnyChainedMoveSelector::ChainedChange($s) => $body,
            AnyChainedMoveSelector::SubChainChange($s) => $body,
            AnyChainedMoveSelector::SubChainSwap($s) => $body,
            AnyChainedMoveSelector::SubChainRuin($s) => $body,
            AnyChainedMoveSelector::TailChainSwap($s) => $body,
            AnyChainedMoveSelector::KOpt($s) => $body,
        }
    };
}

impl<S> fmt::Debug for AnyChainedMoveSelector<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnyChainedMoveSelector::ChainedChange(s) => f.debug_tuple("ChainedChange").field(s).finish(),
            AnyChainedMoveSelector::SubChainChange(s) => f.debug_tuple("SubChainChange").field(s).finish(),
            AnyChainedMoveSelector::SubChainSwap(s) => f.debug_tuple("SubChainSwap").field(s).finish(),
            AnyChainedMoveSelector::SubChainRuin(s) => f.debug_tuple("SubChainRuin").field(s).finish(),
            AnyChainedMoveSelector::TailChainSwap(s) => f.debug_tuple("TailChainSwap").field(s).finish(),
            AnyChainedMoveSelector::KOpt(s) => f.debug_tuple("KOpt").field(s).finish(),
        }
    }
}

impl<S> AnyChainedMoveSelector<S> {
    /// Short name of the neighborhood, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            AnyChainedMoveSelector::ChainedChange(_) => "chained_change",
            AnyChainedMoveSelector::SubChainChange(_) => "sub_chain_change",
            AnyChainedMoveSelector::SubChainSwap(_) => "sub_chain_swap",
            AnyChainedMoveSelector::SubChainRuin(_) => "sub_chain_ruin",
            AnyChainedMoveSelector::TailChainSwap(_) => "tail_chain_swap",
            AnyChainedMoveSelector::KOpt(_) => "k_opt",
        }
    }
}

impl<S: PlanningSolution> MoveSelector<S> for AnyChainedMoveSelector<S> {
    fn iter_moves<'a, D: ScoreDirector<S>>(
        &'a self,
        score_director: &'a D,
        rng: &'a mut StdRng,
    ) -> impl Iterator<Item = ChainedMove<S>> + 'a {
        each!(self, s => Box::new(s.iter_moves(score_director, rng))
            as Box<dyn Iterator<Item = ChainedMove<S>> + 'a>)
    }

    fn size<D: ScoreDirector<S>>(&self, score_director: &D) -> Result<u64> {
        each!(self, s => s.size(score_director))
    }

    fn is_countable(&self) -> bool {
        each!(self, s => s.is_countable())
    }

    fn is_never_ending(&self) -> bool {
        each!(self, s => s.is_never_ending())
    }

    fn solving_started<D: ScoreDirector<S>>(&mut self, score_director: &mut D) {
        each!(self, s => s.solving_started(score_director))
    }

    fn step_started<D: ScoreDirector<S>>(&mut self, score_director: &D) {
        each!(self, s => s.step_started(score_director))
    }

    fn solving_ended<D: ScoreDirector<S>>(&mut self, score_director: &mut D) {
        each!(self, s => s.solving_ended(score_director))
    }
}

macro_rules! impl_from {
    ($($variant:ident($ty:ident)),* $(,)?) => {
        $(
            impl<S> From<$ty<S>> for AnyChainedMoveSelector<S> {
                fn from(selector: $ty<S>) -> Self {
                    AnyChainedMoveSelector::$variant(selector)
                }
            }
        )*
    };
}

impl_from!(
    ChainedChange(ChainedChangeMoveSelector),
    SubChainChange(SubChainChangeMoveSelector),
    SubChainSwap(SubChainSwapMoveSelector),
    SubChainRuin(SubChainRuinMoveSelector),
    TailChainSwap(TailChainSwapMoveSelector),
    KOpt(KOptMoveSelector),
);
