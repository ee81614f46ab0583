//! Move selector for sub-chain swaps.

use std::fmt;

use chainforge_core::{PlanningSolution, Result, VariableDescriptor};
use chainforge_scoring::ScoreDirector;
use rand::rngs::StdRng;

use crate::heuristic::r#move::{
    ChainedMove, InverseId, SubChain, SubChainReversingSwapMove, SubChainSwapMove,
};

use super::supplies::{require_chained, require_ending_children, require_same_variable, SessionSupplies};
use super::{DefaultSubChainSelector, MoveSelector, SelectionOrder};

const NAME: &str = "sub-chain swap move selector";

/// Yields a [`SubChainSwapMove`] for pairs of sub-chains.
///
/// With a single shared sub-chain selector, original order visits every
/// unordered pair once. A distinct right selector yields every ordered
/// `(left, right)` combination. With `select_reversing_move_too` each swap
/// is followed by a [`SubChainReversingSwapMove`] of the same pair.
pub struct SubChainSwapMoveSelector<S> {
    left_sub_chain_selector: DefaultSubChainSelector<S>,
    right_sub_chain_selector: Option<DefaultSubChainSelector<S>>,
    order: SelectionOrder,
    select_reversing_move_too: bool,
    supplies: SessionSupplies<S>,
}

impl<S> fmt::Debug for SubChainSwapMoveSelector<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubChainSwapMoveSelector")
            .field("left_sub_chain_selector", &self.left_sub_chain_selector)
            .field("right_sub_chain_selector", &self.right_sub_chain_selector)
            .field("order", &self.order)
            .field("select_reversing_move_too", &self.select_reversing_move_too)
            .finish()
    }
}

impl<S: PlanningSolution> SubChainSwapMoveSelector<S> {
    /// Creates a selector that pairs sub-chains of one selector.
    pub fn new(
        sub_chain_selector: DefaultSubChainSelector<S>,
        order: SelectionOrder,
        select_reversing_move_too: bool,
    ) -> Result<Self> {
        Self::build(sub_chain_selector, None, order, select_reversing_move_too)
    }

    /// Creates a selector that pairs left sub-chains with right sub-chains.
    pub fn with_right(
        left_sub_chain_selector: DefaultSubChainSelector<S>,
        right_sub_chain_selector: DefaultSubChainSelector<S>,
        order: SelectionOrder,
        select_reversing_move_too: bool,
    ) -> Result<Self> {
        Self::build(
            left_sub_chain_selector,
            Some(right_sub_chain_selector),
            order,
            select_reversing_move_too,
        )
    }

    fn build(
        left: DefaultSubChainSelector<S>,
        right: Option<DefaultSubChainSelector<S>>,
        order: SelectionOrder,
        select_reversing_move_too: bool,
    ) -> Result<Self> {
        let variable = *left.variable();
        require_chained(&variable, NAME)?;
        if let Some(right) = &right {
            require_same_variable(&variable, right.variable(), NAME)?;
        }
        let order = order.resolve(SelectionOrder::Inherit);
        let child_never_ending =
            left.is_never_ending() || right.as_ref().is_some_and(|r| r.is_never_ending());
        require_ending_children(order, child_never_ending, NAME)?;
        Ok(Self {
            left_sub_chain_selector: left,
            right_sub_chain_selector: right,
            order,
            select_reversing_move_too,
            supplies: SessionSupplies::inverse_only(variable)?,
        })
    }

    fn right(&self) -> &DefaultSubChainSelector<S> {
        self.right_sub_chain_selector
            .as_ref()
            .unwrap_or(&self.left_sub_chain_selector)
    }
}

fn swap<S>(
    variable: VariableDescriptor<S>,
    inverse: InverseId<S>,
    left: SubChain,
    right: SubChain,
    reversing: bool,
) -> ChainedMove<S> {
    if reversing {
        SubChainReversingSwapMove::new(variable, inverse, left, right).into()
    } else {
        SubChainSwapMove::new(variable, inverse, left, right).into()
    }
}

impl<S: PlanningSolution> MoveSelector<S> for SubChainSwapMoveSelector<S> {
    fn iter_moves<'a, D: ScoreDirector<S>>(
        &'a self,
        _score_director: &'a D,
        rng: &'a mut StdRng,
    ) -> impl Iterator<Item = ChainedMove<S>> + 'a {
        let variable = *self.left_sub_chain_selector.variable();
        let inverse = self.supplies.inverse();
        let with_twin = self.select_reversing_move_too;
        let expand = move |(left, right): (SubChain, SubChain)| {
            let twin = with_twin.then(|| swap(variable, inverse, left, right, true));
            std::iter::once(swap(variable, inverse, left, right, false)).chain(twin)
        };

        let moves: Box<dyn Iterator<Item = ChainedMove<S>> + 'a> = if self.order.is_random() {
            let mut pending: Option<ChainedMove<S>> = None;
            Box::new(std::iter::from_fn(move || {
                if let Some(twin) = pending.take() {
                    return Some(twin);
                }
                let left = self.left_sub_chain_selector.sample(rng)?;
                let right = self.right().sample(rng)?;
                if with_twin {
                    pending = Some(swap(variable, inverse, left, right, true));
                }
                Some(swap(variable, inverse, left, right, false))
            }))
        } else if let Some(right_selector) = &self.right_sub_chain_selector {
            Box::new(
                self.left_sub_chain_selector
                    .iter()
                    .flat_map(move |left| right_selector.iter().map(move |right| (left, right)))
                    .flat_map(expand),
            )
        } else {
            let sub_chains: Vec<SubChain> = self.left_sub_chain_selector.iter().collect();
            let n = sub_chains.len();
            Box::new(
                (0..n)
                    .flat_map(move |i| ((i + 1)..n).map(move |j| (i, j)))
                    .map(move |(i, j)| (sub_chains[i], sub_chains[j]))
                    .flat_map(expand),
            )
        };
        moves
    }

    fn size<D: ScoreDirector<S>>(&self, _score_director: &D) -> Result<u64> {
        let left = self.left_sub_chain_selector.size();
        let pairs = match &self.right_sub_chain_selector {
            Some(right) => left * right.size(),
            None => left * left.saturating_sub(1) / 2,
        };
        Ok(if self.select_reversing_move_too { pairs * 2 } else { pairs })
    }

    fn is_never_ending(&self) -> bool {
        self.order.is_random()
    }

    fn solving_started<D: ScoreDirector<S>>(&mut self, score_director: &mut D) {
        self.supplies.demand(score_director);
        self.left_sub_chain_selector.solving_started(score_director);
        if let Some(right) = &mut self.right_sub_chain_selector {
            right.solving_started(score_director);
        }
    }

    fn step_started<D: ScoreDirector<S>>(&mut self, score_director: &D) {
        self.left_sub_chain_selector.step_started(score_director);
        if let Some(right) = &mut self.right_sub_chain_selector {
            right.step_started(score_director);
        }
    }

    fn solving_ended<D: ScoreDirector<S>>(&mut self, score_director: &mut D) {
        self.left_sub_chain_selector.solving_ended(score_director);
        if let Some(right) = &mut self.right_sub_chain_selector {
            right.solving_ended(score_director);
        }
        self.supplies.cancel(score_director);
    }
}
