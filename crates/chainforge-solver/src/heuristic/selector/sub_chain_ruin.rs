//! Move selector for ruining sub-chains.

use std::fmt;

use chainforge_core::{PlanningSolution, Result};
use chainforge_scoring::ScoreDirector;
use rand::rngs::StdRng;

use crate::heuristic::r#move::{ChainedMove, SubChainRuinMove};

use super::supplies::{require_chained, require_ending_children, SessionSupplies};
use super::{DefaultSubChainSelector, MoveSelector, SelectionOrder};

const NAME: &str = "sub-chain ruin move selector";

/// Yields a [`SubChainRuinMove`] for every sub-chain.
pub struct SubChainRuinMoveSelector<S> {
    sub_chain_selector: DefaultSubChainSelector<S>,
    order: SelectionOrder,
    supplies: SessionSupplies<S>,
}

impl<S> fmt::Debug for SubChainRuinMoveSelector<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubChainRuinMoveSelector")
            .field("sub_chain_selector", &self.sub_chain_selector)
            .field("order", &self.order)
            .finish()
    }
}

impl<S: PlanningSolution> SubChainRuinMoveSelector<S> {
    pub fn new(sub_chain_selector: DefaultSubChainSelector<S>, order: SelectionOrder) -> Result<Self> {
        let variable = *sub_chain_selector.variable();
        require_chained(&variable, NAME)?;
        let order = order.resolve(SelectionOrder::Inherit);
        require_ending_children(order, sub_chain_selector.is_never_ending(), NAME)?;
        Ok(Self {
            sub_chain_selector,
            order,
            supplies: SessionSupplies::inverse_only(variable)?,
        })
    }
}

impl<S: PlanningSolution> MoveSelector<S> for SubChainRuinMoveSelector<S> {
    fn iter_moves<'a, D: ScoreDirector<S>>(
        &'a self,
        _score_director: &'a D,
        rng: &'a mut StdRng,
    ) -> impl Iterator<Item = ChainedMove<S>> + 'a {
        let variable = *self.sub_chain_selector.variable();
        let inverse = self.supplies.inverse();
        let ruin = move |sub_chain| ChainedMove::from(SubChainRuinMove::new(variable, inverse, sub_chain));

        let moves: Box<dyn Iterator<Item = ChainedMove<S>> + 'a> = if self.order.is_random() {
            Box::new(std::iter::from_fn(move || self.sub_chain_selector.sample(rng).map(ruin)))
        } else {
            Box::new(self.sub_chain_selector.iter().map(ruin))
        };
        moves
    }

    fn size<D: ScoreDirector<S>>(&self, _score_director: &D) -> Result<u64> {
        Ok(self.sub_chain_selector.size())
    }

    fn is_never_ending(&self) -> bool {
        self.order.is_random()
    }

    fn solving_started<D: ScoreDirector<S>>(&mut self, score_director: &mut D) {
        self.supplies.demand(score_director);
        self.sub_chain_selector.solving_started(score_director);
    }

    fn step_started<D: ScoreDirector<S>>(&mut self, score_director: &D) {
        self.sub_chain_selector.step_started(score_director);
    }

    fn solving_ended<D: ScoreDirector<S>>(&mut self, score_director: &mut D) {
        self.sub_chain_selector.solving_ended(score_director);
        self.supplies.cancel(score_director);
    }
}
