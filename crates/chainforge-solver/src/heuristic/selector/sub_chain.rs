//! Sub-chain selector.
//!
//! Enumerates contiguous runs of entities within the chains of one chained
//! variable. The chains are walked forward from every anchor once per step
//! and cached; iteration and sampling then work on the cache alone.

use std::fmt;

use chainforge_core::{PlanningSolution, Result, SolverForgeError, VariableDescriptor};
use chainforge_scoring::ScoreDirector;
use rand::rngs::StdRng;
use rand::Rng;

use crate::heuristic::r#move::{chain_of, SubChain};

use super::supplies::{require_chained, SessionSupplies};
use super::{ChainedValueSelector, SelectionOrder};

/// Selects sub-chains of `minimum_size..=maximum_size` entities.
///
/// Per chain of length `L`, with `n = L - min + 1` and
/// `m = if max >= L { 0 } else { L - max }`, there are
/// `n(n+1)/2 - m(m+1)/2` sub-chains.
///
/// Random order picks a chain uniformly, then a sub-chain of that chain
/// uniformly, so sub-chains of short chains are favoured.
pub struct DefaultSubChainSelector<S> {
    value_selector: ChainedValueSelector<S>,
    minimum_size: usize,
    maximum_size: usize,
    order: SelectionOrder,
    supplies: SessionSupplies<S>,
    anchor_trailing_chains: Option<Vec<Vec<usize>>>,
}

impl<S> fmt::Debug for DefaultSubChainSelector<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultSubChainSelector")
            .field("value_selector", &self.value_selector)
            .field("minimum_size", &self.minimum_size)
            .field("maximum_size", &self.maximum_size)
            .field("order", &self.order)
            .field(
                "cached_chains",
                &self.anchor_trailing_chains.as_ref().map(Vec::len),
            )
            .finish()
    }
}

impl<S: PlanningSolution> DefaultSubChainSelector<S> {
    /// Creates a sub-chain selector over the anchors of `value_selector`.
    ///
    /// Pass `usize::MAX` as `maximum_size` for unbounded sub-chains.
    ///
    /// # Errors
    ///
    /// Returns [`SolverForgeError::Config`] if the variable is not chained,
    /// if `minimum_size` is 0 or above `maximum_size`, or if the value
    /// selector never ends.
    pub fn new(
        value_selector: ChainedValueSelector<S>,
        minimum_size: usize,
        maximum_size: usize,
        order: SelectionOrder,
    ) -> Result<Self> {
        let variable = *value_selector.variable();
        require_chained(&variable, "sub-chain selector")?;
        if minimum_size < 1 {
            return Err(SolverForgeError::Config(format!(
                "The sub-chain selector of {} needs a minimum size of at least 1.",
                variable.simple_name()
            )));
        }
        if maximum_size < minimum_size {
            return Err(SolverForgeError::Config(format!(
                "The sub-chain selector of {} has a maximum size ({}) below its minimum size ({}).",
                variable.simple_name(),
                maximum_size,
                minimum_size
            )));
        }
        if value_selector.is_never_ending() {
            return Err(SolverForgeError::Config(format!(
                "The sub-chain selector of {} needs a value selector that ends.",
                variable.simple_name()
            )));
        }
        Ok(Self {
            value_selector,
            minimum_size,
            maximum_size,
            order,
            supplies: SessionSupplies::inverse_only(variable)?,
            anchor_trailing_chains: None,
        })
    }

    pub fn variable(&self) -> &VariableDescriptor<S> {
        self.value_selector.variable()
    }

    pub fn minimum_size(&self) -> usize {
        self.minimum_size
    }

    pub fn maximum_size(&self) -> usize {
        self.maximum_size
    }

    pub fn is_never_ending(&self) -> bool {
        self.order.is_random()
    }

    /// Demands the inverse supply and builds the chain cache.
    pub fn solving_started<D: ScoreDirector<S>>(&mut self, score_director: &mut D) {
        self.supplies.demand(score_director);
        self.rebuild(score_director);
    }

    /// Rebuilds the chain cache from the current working solution.
    pub fn step_started<D: ScoreDirector<S>>(&mut self, score_director: &D) {
        self.rebuild(score_director);
    }

    /// Releases the inverse supply and drops the cache.
    pub fn solving_ended<D: ScoreDirector<S>>(&mut self, score_director: &mut D) {
        self.supplies.cancel(score_director);
        self.anchor_trailing_chains = None;
    }

    fn rebuild<D: ScoreDirector<S>>(&mut self, score_director: &D) {
        let inverse = score_director.supply(self.supplies.inverse());
        let limit = self.variable().entity_count(score_director.working_solution());
        let chains: Vec<Vec<usize>> = self
            .value_selector
            .iter_anchors(score_director)
            .map(|anchor| chain_of(inverse, anchor, limit))
            .filter(|chain| chain.len() >= self.minimum_size)
            .collect();
        tracing::debug!(
            variable = self.variable().name,
            chains = chains.len(),
            "Cached anchor trailing chains"
        );
        self.anchor_trailing_chains = Some(chains);
    }

    fn chains(&self) -> &[Vec<usize>] {
        match &self.anchor_trailing_chains {
            Some(chains) => chains,
            None => panic!(
                "The sub-chain selector of {} is used before solving started.",
                self.variable().simple_name()
            ),
        }
    }

    /// Number of sub-chains starting at `from` in a chain of `len` entities.
    fn count_from(&self, len: usize, from: usize) -> usize {
        let available = len - from;
        if available < self.minimum_size {
            0
        } else {
            available.min(self.maximum_size) - self.minimum_size + 1
        }
    }

    /// Number of sub-chains in a chain of `len` entities.
    fn count_in_chain(&self, len: usize) -> u64 {
        if len < self.minimum_size {
            return 0;
        }
        let n = (len - self.minimum_size + 1) as u64;
        let m = if self.maximum_size >= len {
            0
        } else {
            (len - self.maximum_size) as u64
        };
        n * (n + 1) / 2 - m * (m + 1) / 2
    }

    /// Returns the number of sub-chains in the cache.
    pub fn size(&self) -> u64 {
        self.chains()
            .iter()
            .map(|chain| self.count_in_chain(chain.len()))
            .sum()
    }

    /// Iterates every sub-chain: per chain, per first entity, by size.
    pub fn iter(&self) -> impl Iterator<Item = SubChain> + '_ {
        let (min, max) = (self.minimum_size, self.maximum_size);
        self.chains().iter().flat_map(move |chain| {
            (0..chain.len()).flat_map(move |from| {
                let upper = (chain.len() - from).min(max);
                (min..=upper).map(move |size| SubChain::new(chain[from], chain[from + size - 1], size))
            })
        })
    }

    /// Picks a chain uniformly, then one of its sub-chains uniformly.
    pub fn sample(&self, rng: &mut StdRng) -> Option<SubChain> {
        let chains = self.chains();
        if chains.is_empty() {
            return None;
        }
        let chain = &chains[rng.random_range(0..chains.len())];
        let count = self.count_in_chain(chain.len());
        let mut index = rng.random_range(0..count) as usize;
        for from in 0..chain.len() {
            let here = self.count_from(chain.len(), from);
            if index < here {
                let size = self.minimum_size + index;
                return Some(SubChain::new(chain[from], chain[from + size - 1], size));
            }
            index -= here;
        }
        None
    }
}
