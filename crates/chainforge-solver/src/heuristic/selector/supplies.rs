// Supplies a selector demands for the length of one solving session.

use std::fmt;

use chainforge_core::domain::supply::{AnchorVariableDemand, SingletonInverseVariableDemand};
use chainforge_core::{PlanningSolution, Result, SolverForgeError, VariableDescriptor};
use chainforge_scoring::ScoreDirector;

use crate::heuristic::r#move::{AnchorId, InverseId};

use super::SelectionOrder;

// Fails unless `variable` is chained.
pub(crate) fn require_chained<S>(variable: &VariableDescriptor<S>, selector: &str) -> Result<()> {
    if variable.is_chained() {
        Ok(())
    } else {
        Err(SolverForgeError::Config(format!(
            "The {selector} requires a chained variable, but {} is not chained.",
            variable.simple_name()
        )))
    }
}

// Fails unless both descriptors name the same variable.
pub(crate) fn require_same_variable<S>(
    expected: &VariableDescriptor<S>,
    actual: &VariableDescriptor<S>,
    selector: &str,
) -> Result<()> {
    if expected.is_same_variable(actual) {
        Ok(())
    } else {
        Err(SolverForgeError::Config(format!(
            "The {selector} wraps selectors of different variables: {} and {}.",
            expected.simple_name(),
            actual.simple_name()
        )))
    }
}

// Fails when an original-order selector wraps a never-ending child.
pub(crate) fn require_ending_children(
    order: SelectionOrder,
    child_never_ending: bool,
    selector: &str,
) -> Result<()> {
    if order.is_random() || !child_never_ending {
        Ok(())
    } else {
        Err(SolverForgeError::Config(format!(
            "The {selector} iterates in original order, but wraps a never-ending selector."
        )))
    }
}

// Demand handles for the inverse and, optionally, the anchor supply.
pub(crate) struct SessionSupplies<S> {
    inverse_demand: SingletonInverseVariableDemand<S>,
    anchor_demand: Option<AnchorVariableDemand<S>>,
    inverse: Option<InverseId<S>>,
    anchor: Option<AnchorId<S>>,
}

impl<S> fmt::Debug for SessionSupplies<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionSupplies")
            .field("inverse", &self.inverse)
            .field("anchor", &self.anchor)
            .finish()
    }
}

impl<S: PlanningSolution> SessionSupplies<S> {
    pub(crate) fn inverse_only(variable: VariableDescriptor<S>) -> Result<Self> {
        Ok(Self {
            inverse_demand: SingletonInverseVariableDemand::new(variable)?,
            anchor_demand: None,
            inverse: None,
            anchor: None,
        })
    }

    pub(crate) fn with_anchor(variable: VariableDescriptor<S>) -> Result<Self> {
        Ok(Self {
            anchor_demand: Some(AnchorVariableDemand::new(variable)?),
            ..Self::inverse_only(variable)?
        })
    }

    pub(crate) fn demand<D: ScoreDirector<S>>(&mut self, score_director: &mut D) {
        self.inverse = Some(score_director.demand(&self.inverse_demand));
        if let Some(demand) = &self.anchor_demand {
            self.anchor = Some(score_director.demand(demand));
        }
    }

    pub(crate) fn cancel<D: ScoreDirector<S>>(&mut self, score_director: &mut D) {
        if self.inverse.take().is_some() {
            score_director.cancel(&self.inverse_demand);
        }
        if let (Some(demand), Some(_)) = (&self.anchor_demand, self.anchor.take()) {
            score_director.cancel(demand);
        }
    }

    // Panics outside a solving session.
    pub(crate) fn inverse(&self) -> InverseId<S> {
        match self.inverse {
            Some(id) => id,
            None => panic!(
                "The singleton inverse supply of {} is used outside a solving session.",
                self.inverse_demand.variable().simple_name()
            ),
        }
    }

    // Panics outside a solving session or when no anchor supply was requested.
    pub(crate) fn anchor(&self) -> AnchorId<S> {
        match self.anchor {
            Some(id) => id,
            None => panic!(
                "The anchor supply of {} is used outside a solving session.",
                self.inverse_demand.variable().simple_name()
            ),
        }
    }
}
