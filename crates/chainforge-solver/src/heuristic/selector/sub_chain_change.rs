//! Move selector for sub-chain relocations.

use std::fmt;

use chainforge_core::{ChainValue, PlanningSolution, Result, VariableDescriptor};
use chainforge_scoring::ScoreDirector;
use rand::rngs::StdRng;

use crate::heuristic::r#move::{ChainedMove, InverseId, SubChain, SubChainChangeMove};

use super::supplies::{require_chained, require_ending_children, require_same_variable, SessionSupplies};
use super::{ChainedValueSelector, DefaultSubChainSelector, MoveSelector, SelectionOrder};

const NAME: &str = "sub-chain change move selector";

/// Yields a [`SubChainChangeMove`] for every sub-chain and value.
///
/// With `select_reversing_move_too`, every move is directly followed by
/// its reversing twin, in both orders.
pub struct SubChainChangeMoveSelector<S> {
    sub_chain_selector: DefaultSubChainSelector<S>,
    value_selector: ChainedValueSelector<S>,
    order: SelectionOrder,
    select_reversing_move_too: bool,
    supplies: SessionSupplies<S>,
}

impl<S> fmt::Debug for SubChainChangeMoveSelector<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubChainChangeMoveSelector")
            .field("sub_chain_selector", &self.sub_chain_selector)
            .field("value_selector", &self.value_selector)
            .field("order", &self.order)
            .field("select_reversing_move_too", &self.select_reversing_move_too)
            .finish()
    }
}

impl<S: PlanningSolution> SubChainChangeMoveSelector<S> {
    pub fn new(
        sub_chain_selector: DefaultSubChainSelector<S>,
        value_selector: ChainedValueSelector<S>,
        order: SelectionOrder,
        select_reversing_move_too: bool,
    ) -> Result<Self> {
        let variable = *sub_chain_selector.variable();
        require_chained(&variable, NAME)?;
        require_same_variable(&variable, value_selector.variable(), NAME)?;
        let order = order.resolve(SelectionOrder::Inherit);
        require_ending_children(
            order,
            sub_chain_selector.is_never_ending() || value_selector.is_never_ending(),
            NAME,
        )?;
        Ok(Self {
            sub_chain_selector,
            value_selector,
            order,
            select_reversing_move_too,
            supplies: SessionSupplies::inverse_only(variable)?,
        })
    }

    pub fn is_selecting_reversing_moves(&self) -> bool {
        self.select_reversing_move_too
    }
}

fn change<S>(
    variable: VariableDescriptor<S>,
    inverse: InverseId<S>,
    sub_chain: SubChain,
    value: ChainValue,
    reversing: bool,
) -> ChainedMove<S> {
    if reversing {
        SubChainChangeMove::reversing(variable, inverse, sub_chain, value).into()
    } else {
        SubChainChangeMove::new(variable, inverse, sub_chain, value).into()
    }
}

impl<S: PlanningSolution> MoveSelector<S> for SubChainChangeMoveSelector<S> {
    fn iter_moves<'a, D: ScoreDirector<S>>(
        &'a self,
        score_director: &'a D,
        rng: &'a mut StdRng,
    ) -> impl Iterator<Item = ChainedMove<S>> + 'a {
        let variable = *self.sub_chain_selector.variable();
        let inverse = self.supplies.inverse();
        let with_twin = self.select_reversing_move_too;
        let values = &self.value_selector;

        let moves: Box<dyn Iterator<Item = ChainedMove<S>> + 'a> = if self.order.is_random() {
            let mut pending: Option<ChainedMove<S>> = None;
            Box::new(std::iter::from_fn(move || {
                if let Some(twin) = pending.take() {
                    return Some(twin);
                }
                let sub_chain = self.sub_chain_selector.sample(rng)?;
                let value = values.sample(score_director, rng)?;
                if with_twin {
                    pending = Some(change(variable, inverse, sub_chain, value, true));
                }
                Some(change(variable, inverse, sub_chain, value, false))
            }))
        } else {
            Box::new(self.sub_chain_selector.iter().flat_map(move |sub_chain| {
                values.iter(score_director).flat_map(move |value| {
                    let twin = with_twin.then(|| change(variable, inverse, sub_chain, value, true));
                    std::iter::once(change(variable, inverse, sub_chain, value, false)).chain(twin)
                })
            }))
        };
        moves
    }

    fn size<D: ScoreDirector<S>>(&self, score_director: &D) -> Result<u64> {
        let size = self.sub_chain_selector.size() * self.value_selector.size(score_director);
        Ok(if self.select_reversing_move_too { size * 2 } else { size })
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
