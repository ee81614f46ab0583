//! SubChainSwapMove - exchanges the positions of two sub-chains.

use std::fmt;

use chainforge_core::domain::supply::SingletonInverseVariableSupply;
use chainforge_core::{ChainValue, PlanningSolution, Result, VariableDescriptor};
use chainforge_scoring::ScoreDirector;
use smallvec::SmallVec;

use super::handles::{inverse_on, InverseId};
use super::rewire::Rewiring;
use super::sub_chain::SubChain;
use super::Move;

/// Pre-move linkage around two sub-chains.
pub(crate) struct SwapEnds {
    pub(crate) left_first_value: Option<ChainValue>,
    pub(crate) right_first_value: Option<ChainValue>,
    pub(crate) left_trailing: Option<usize>,
    pub(crate) right_trailing: Option<usize>,
}

impl SwapEnds {
    pub(crate) fn read<S>(
        variable: &VariableDescriptor<S>,
        solution: &S,
        inverse: &SingletonInverseVariableSupply<S>,
        left: &SubChain,
        right: &SubChain,
    ) -> Self {
        Self {
            left_first_value: left.first_value(variable, solution),
            right_first_value: right.first_value(variable, solution),
            left_trailing: left.trailing_entity(inverse),
            right_trailing: right.trailing_entity(inverse),
        }
    }

    /// True when `right` directly trails `left`.
    pub(crate) fn right_follows_left(&self, left: &SubChain) -> bool {
        self.right_first_value == Some(ChainValue::Entity(left.last_entity()))
    }

    /// True when `left` directly trails `right`.
    pub(crate) fn left_follows_right(&self, right: &SubChain) -> bool {
        self.left_first_value == Some(ChainValue::Entity(right.last_entity()))
    }
}

/// Both sub-chains must be assigned and share no entity.
pub(crate) fn swap_is_doable<S: PlanningSolution, D: ScoreDirector<S>>(
    score_director: &D,
    variable: &VariableDescriptor<S>,
    inverse: InverseId<S>,
    left: &SubChain,
    right: &SubChain,
) -> bool {
    let solution = score_director.working_solution();
    if left.first_value(variable, solution).is_none() || right.first_value(variable, solution).is_none() {
        return false;
    }
    !left.intersects(right, score_director.supply(inverse))
}

/// A move that exchanges two disjoint sub-chains, keeping their order.
///
/// Works across chains and within one chain, including two sub-chains that
/// are directly adjacent.
#[derive(Clone)]
pub struct SubChainSwapMove<S> {
    variable: VariableDescriptor<S>,
    inverse: InverseId<S>,
    left: SubChain,
    right: SubChain,
}

impl<S> fmt::Debug for SubChainSwapMove<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubChainSwapMove")
            .field("variable", &self.variable.name)
            .field("left", &self.left)
            .field("right", &self.right)
            .finish()
    }
}

impl<S> SubChainSwapMove<S> {
    pub fn new(
        variable: VariableDescriptor<S>,
        inverse: InverseId<S>,
        left: SubChain,
        right: SubChain,
    ) -> Self {
        Self {
            variable,
            inverse,
            left,
            right,
        }
    }

    pub fn left(&self) -> SubChain {
        self.left
    }

    pub fn right(&self) -> SubChain {
        self.right
    }
}

impl<S: PlanningSolution> Move<S> for SubChainSwapMove<S> {
    fn is_doable<D: ScoreDirector<S>>(&self, score_director: &D) -> bool {
        swap_is_doable(score_director, &self.variable, self.inverse, &self.left, &self.right)
    }

    fn do_move<D: ScoreDirector<S>>(&self, score_director: &mut D) {
        let ends = SwapEnds::read(
            &self.variable,
            score_director.working_solution(),
            score_director.supply(self.inverse),
            &self.left,
            &self.right,
        );
        let (lf, ll) = (self.left.first_entity(), self.left.last_entity());
        let (rf, rl) = (self.right.first_entity(), self.right.last_entity());

        let mut plan = Rewiring::new();
        if ends.right_follows_left(&self.left) {
            plan.set(rf, ends.left_first_value);
            plan.set(lf, Some(ChainValue::Entity(rl)));
            if let Some(trailing) = ends.right_trailing {
                plan.set(trailing, Some(ChainValue::Entity(ll)));
            }
        } else if ends.left_follows_right(&self.right) {
            plan.set(lf, ends.right_first_value);
            plan.set(rf, Some(ChainValue::Entity(ll)));
            if let Some(trailing) = ends.left_trailing {
                plan.set(trailing, Some(ChainValue::Entity(rl)));
            }
        } else {
            plan.set(lf, ends.right_first_value);
            plan.set(rf, ends.left_first_value);
            if let Some(trailing) = ends.left_trailing {
                plan.set(trailing, Some(ChainValue::Entity(rl)));
            }
            if let Some(trailing) = ends.right_trailing {
                plan.set(trailing, Some(ChainValue::Entity(ll)));
            }
        }
        plan.apply(score_director, &self.variable);
    }

    fn create_undo_move<D: ScoreDirector<S>>(&self, _score_director: &D) -> Result<Self> {
        Ok(Self::new(self.variable, self.inverse, self.right, self.left))
    }

    fn rebase<D: ScoreDirector<S>>(&self, destination: &D) -> Result<Self> {
        Ok(Self::new(
            self.variable,
            inverse_on(destination, self.variable)?,
            self.left.rebase(destination, &self.variable)?,
            self.right.rebase(destination, &self.variable)?,
        ))
    }

    fn planning_entities(&self) -> SmallVec<[usize; 4]> {
        let mut entities = self.left.boundaries();
        entities.extend(self.right.boundaries());
        entities
    }

    fn planning_values(&self) -> SmallVec<[ChainValue; 4]> {
        self.planning_entities()
            .into_iter()
            .map(ChainValue::Entity)
            .collect()
    }

    fn descriptor_index(&self) -> usize {
        self.variable.descriptor_index
    }

    fn variable_name(&self) -> &str {
        self.variable.name
    }
}

impl<S> fmt::Display for SubChainSwapMove<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <-> {}", self.left, self.right)
    }
}
