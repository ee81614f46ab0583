//! Write plans shared by the chained moves.
//!
//! Every chained move reads the pre-move state once, records the pointer
//! writes it needs and only then applies them. Reads never observe a
//! half-executed move.

use chainforge_core::domain::supply::SingletonInverseVariableSupply;
use chainforge_core::{ChainValue, PlanningSolution, VariableDescriptor};
use chainforge_scoring::ScoreDirector;
use smallvec::SmallVec;

/// Ordered predecessor writes for one variable.
#[derive(Debug, Default)]
pub(crate) struct Rewiring {
    writes: SmallVec<[(usize, Option<ChainValue>); 8]>,
}

impl Rewiring {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Points `entity` at `value`.
    pub(crate) fn set(&mut self, entity: usize, value: Option<ChainValue>) {
        self.writes.push((entity, value));
    }

    /// Hangs `segment` (given in chain order) reversed behind `head`.
    ///
    /// The old tail points at `head`, then every entity points at its old
    /// successor, from the old tail back to the old head.
    pub(crate) fn attach_reversed(&mut self, segment: &[usize], head: Option<ChainValue>) {
        let mut previous = head;
        for &entity in segment.iter().rev() {
            self.set(entity, previous);
            previous = Some(ChainValue::Entity(entity));
        }
    }

    /// Rebuilds a whole chain from `anchor` in the given entity order.
    pub(crate) fn relink(&mut self, anchor: usize, order: impl IntoIterator<Item = usize>) {
        let mut previous = ChainValue::Anchor(anchor);
        for entity in order {
            self.set(entity, Some(previous));
            previous = ChainValue::Entity(entity);
        }
    }

    /// Returns the planned writes, in order.
    pub(crate) fn writes(&self) -> &[(usize, Option<ChainValue>)] {
        &self.writes
    }

    /// Applies the plan through the score director.
    ///
    /// Writes that would not change the current value are skipped.
    pub(crate) fn apply<S, D>(self, score_director: &mut D, variable: &VariableDescriptor<S>)
    where
        S: PlanningSolution,
        D: ScoreDirector<S>,
    {
        for (entity, value) in self.writes {
            if variable.get_value(score_director.working_solution(), entity) != value {
                score_director.change_variable_facade(variable, entity, value);
            }
        }
    }
}

/// Collects the entities from `first` to `last` following trailing pointers.
///
/// The walk stops after `limit` entities or when the chain ends, so a
/// malformed range yields a truncated list instead of looping.
pub(crate) fn walk_forward<S>(
    inverse: &SingletonInverseVariableSupply<S>,
    first: usize,
    last: usize,
    limit: usize,
) -> SmallVec<[usize; 8]> {
    let mut entities = SmallVec::new();
    let mut current = Some(first);
    while let Some(entity) = current {
        entities.push(entity);
        if entity == last || entities.len() >= limit {
            break;
        }
        current = inverse.trailing_entity(entity);
    }
    entities
}

/// Returns the entities of the chain rooted at `anchor`, in chain order.
pub(crate) fn chain_of<S>(
    inverse: &SingletonInverseVariableSupply<S>,
    anchor: usize,
    limit: usize,
) -> Vec<usize> {
    let mut chain = Vec::new();
    let mut current = inverse.get_inverse_singleton(ChainValue::Anchor(anchor));
    while let Some(entity) = current {
        if chain.len() >= limit {
            break;
        }
        chain.push(entity);
        current = inverse.trailing_entity(entity);
    }
    chain
}
