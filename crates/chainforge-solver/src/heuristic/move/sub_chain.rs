//! SubChain - a contiguous run of entities in one chain.

use std::collections::HashSet;
use std::fmt;

use chainforge_core::domain::supply::SingletonInverseVariableSupply;
use chainforge_core::{ChainValue, PlanningSolution, Result, VariableDescriptor};
use chainforge_scoring::ScoreDirector;
use smallvec::{smallvec, SmallVec};

use super::rewire::walk_forward;

/// Names the entities `[first..last]` of one chain, in chain order.
///
/// A sub-chain is a view: it stores only its boundaries and its size, and
/// resolves the entities in between through the singleton inverse supply.
/// Equality and hashing use the boundaries alone, so a sub-chain can be
/// logged or compared after its chain changed.
///
/// A reversed sub-chain swaps its boundaries. It is only meaningful once
/// the entities it names really run from `last` to `first`, which is the
/// state right after a reversing move.
#[derive(Clone, Copy, Debug)]
pub struct SubChain {
    first: usize,
    last: usize,
    size: usize,
}

impl SubChain {
    /// Creates a sub-chain of `size` entities from `first` to `last`.
    pub fn new(first: usize, last: usize, size: usize) -> Self {
        debug_assert!(size >= 1);
        debug_assert!(size > 1 || first == last);
        Self { first, last, size }
    }

    /// Creates a sub-chain of one entity.
    pub fn single(entity: usize) -> Self {
        Self::new(entity, entity, 1)
    }

    /// Builds a sub-chain over entities given in chain order.
    ///
    /// Returns `None` for an empty slice.
    pub fn from_entities(entities: &[usize]) -> Option<Self> {
        let first = *entities.first()?;
        let last = *entities.last()?;
        Some(Self::new(first, last, entities.len()))
    }

    /// First entity in chain order.
    pub fn first_entity(&self) -> usize {
        self.first
    }

    /// Last entity in chain order.
    pub fn last_entity(&self) -> usize {
        self.last
    }

    /// Returns the distinct boundary entities.
    pub fn boundaries(&self) -> SmallVec<[usize; 4]> {
        if self.first == self.last {
            smallvec![self.first]
        } else {
            smallvec![self.first, self.last]
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Resolves the entities from first to last.
    ///
    /// Stops early if the chain ends before `last` is reached.
    pub fn entity_list<S>(
        &self,
        inverse: &SingletonInverseVariableSupply<S>,
    ) -> SmallVec<[usize; 8]> {
        walk_forward(inverse, self.first, self.last, self.size)
    }

    /// Returns the current value of the first entity.
    pub fn first_value<S>(&self, variable: &VariableDescriptor<S>, solution: &S) -> Option<ChainValue> {
        variable.get_value(solution, self.first)
    }

    /// Returns the entity trailing the last entity.
    pub fn trailing_entity<S>(&self, inverse: &SingletonInverseVariableSupply<S>) -> Option<usize> {
        inverse.trailing_entity(self.last)
    }

    /// Returns true if any entity of this sub-chain also belongs to `other`.
    ///
    /// Hashes the larger of the two entity lists.
    pub fn intersects<S>(&self, other: &SubChain, inverse: &SingletonInverseVariableSupply<S>) -> bool {
        let mine = self.entity_list(inverse);
        let theirs = other.entity_list(inverse);
        let (larger, smaller) = if mine.len() >= theirs.len() {
            (mine, theirs)
        } else {
            (theirs, mine)
        };
        let lookup: HashSet<usize> = larger.into_iter().collect();
        smaller.iter().any(|entity| lookup.contains(entity))
    }

    /// Returns the same entities with swapped boundaries.
    pub fn reverse(&self) -> SubChain {
        SubChain::new(self.last, self.first, self.size)
    }

    /// Maps both boundaries onto `destination`'s working solution.
    pub fn rebase<S, D>(&self, destination: &D, variable: &VariableDescriptor<S>) -> Result<SubChain>
    where
        S: PlanningSolution,
        D: ScoreDirector<S>,
    {
        Ok(SubChain::new(
            destination.look_up_working_entity(variable, self.first)?,
            destination.look_up_working_entity(variable, self.last)?,
            self.size,
        ))
    }

    /// Renders the boundaries, e.g. `[E2..E4]`.
    pub fn to_dotted_string(&self) -> String {
        format!("[E{}..E{}]", self.first, self.last)
    }
}

impl PartialEq for SubChain {
    fn eq(&self, other: &Self) -> bool {
        self.first == other.first && self.last == other.last
    }
}

impl Eq for SubChain {}

impl std::hash::Hash for SubChain {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.first.hash(state);
        self.last.hash(state);
    }
}

impl fmt::Display for SubChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_dotted_string())
    }
}
