//! Anchor supply for O(1) "which chain does this entity belong to?" lookups.

use std::any::Any;
use std::collections::HashSet;

use super::inverse::InverseIndex;
use super::{DemandKey, Supply, SupplyDemand};
use crate::domain::{ChainValue, VariableDescriptor};
use crate::error::{Result, SolverForgeError};

/// Index-based anchor supply for a chained variable.
///
/// Tracks, for every entity, the anchor its chain is rooted at. Entities that
/// are unassigned, or that hang off an unassigned entity, have no anchor.
///
/// After every change the changed entity's anchor is re-derived by following
/// predecessors, then pushed forward to everything trailing it. Because each
/// write is resolved against the live solution, the supply is exact after the
/// last write of a move no matter in which order the move rewired pointers.
///
/// # Example
///
/// ```
/// use chainforge_core::domain::supply::AnchorVariableSupply;
/// use chainforge_core::{ChainValue, VariableDescriptor};
///
/// struct Plan { previous: Vec<Option<ChainValue>> }
///
/// let var = VariableDescriptor::<Plan>::chained(
///     "previous", "Visit", 0,
///     |p| p.previous.len(), |_| 2,
///     |p, i| p.previous[i], |p, i, v| p.previous[i] = v,
/// );
/// // A0 <- E0 <- E1 and A1 <- E2
/// let plan = Plan {
///     previous: vec![
///         Some(ChainValue::Anchor(0)),
///         Some(ChainValue::Entity(0)),
///         Some(ChainValue::Anchor(1)),
///     ],
/// };
///
/// let supply = AnchorVariableSupply::new(&plan, var);
/// assert_eq!(supply.get_anchor(1), Some(0));
/// assert_eq!(supply.get_anchor(2), Some(1));
/// assert_eq!(supply.get_anchor_of_value(ChainValue::Anchor(1)), Some(1));
/// ```
pub struct AnchorVariableSupply<S> {
    variable: VariableDescriptor<S>,
    anchors: Vec<Option<usize>>,
    index: InverseIndex,
}

impl<S> AnchorVariableSupply<S> {
    /// Creates a supply initialized from `solution`.
    pub fn new(solution: &S, variable: VariableDescriptor<S>) -> Self {
        let mut supply = Self {
            variable,
            anchors: Vec::new(),
            index: InverseIndex::default(),
        };
        supply.rebuild(solution);
        supply
    }

    /// Returns the anchor of `entity`'s chain.
    #[inline]
    pub fn get_anchor(&self, entity: usize) -> Option<usize> {
        self.anchors.get(entity).copied().flatten()
    }

    /// Returns the anchor of a value: anchors are their own anchor.
    #[inline]
    pub fn get_anchor_of_value(&self, value: ChainValue) -> Option<usize> {
        match value {
            ChainValue::Anchor(anchor) => Some(anchor),
            ChainValue::Entity(entity) => self.get_anchor(entity),
        }
    }

    /// Returns the entities currently rooted at `anchor`, in index order.
    pub fn entities_for_anchor(&self, anchor: usize) -> Vec<usize> {
        self.anchors
            .iter()
            .enumerate()
            .filter_map(|(entity, a)| (*a == Some(anchor)).then_some(entity))
            .collect()
    }

    fn rebuild(&mut self, solution: &S) {
        let entity_count = self.variable.entity_count(solution);
        self.index.rebuild(solution, &self.variable);
        self.anchors.clear();
        self.anchors.resize(entity_count, None);

        for anchor in 0..self.variable.anchor_count(solution) {
            let mut value = ChainValue::Anchor(anchor);
            let mut steps = 0;
            while let Some(entity) = self.index.get(value) {
                if steps > entity_count {
                    break;
                }
                self.anchors[entity] = Some(anchor);
                value = ChainValue::Entity(entity);
                steps += 1;
            }
        }
    }

    fn resolve_anchor(&self, solution: &S, entity: usize) -> Option<usize> {
        let limit = self.variable.entity_count(solution);
        let mut current = entity;
        for _ in 0..=limit {
            match self.variable.get_value(solution, current)? {
                ChainValue::Anchor(anchor) => return Some(anchor),
                ChainValue::Entity(previous) if previous == entity => return None,
                ChainValue::Entity(previous) => current = previous,
            }
        }
        None
    }

    fn propagate(&mut self, entity: usize, anchor: Option<usize>) {
        let mut visited = HashSet::new();
        let mut pending = vec![entity];
        while let Some(current) = pending.pop() {
            if !visited.insert(current) {
                continue;
            }
            if current >= self.anchors.len() {
                self.anchors.resize(current + 1, None);
            }
            self.anchors[current] = anchor;
            pending.extend_from_slice(self.index.get_all(ChainValue::Entity(current)));
        }
    }
}

impl<S> std::fmt::Debug for AnchorVariableSupply<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnchorVariableSupply")
            .field("variable", &self.variable.name)
            .field("anchors", &self.anchors)
            .finish()
    }
}

impl<S: 'static> Supply<S> for AnchorVariableSupply<S> {
    fn reset_working_solution(&mut self, solution: &S) {
        self.rebuild(solution);
    }

    fn before_variable_changed(
        &mut self,
        solution: &S,
        variable: &VariableDescriptor<S>,
        entity: usize,
    ) {
        if let Some(old) = variable.get_value(solution, entity) {
            self.index.remove(old, entity);
        }
    }

    fn after_variable_changed(
        &mut self,
        solution: &S,
        variable: &VariableDescriptor<S>,
        entity: usize,
    ) {
        if let Some(new) = variable.get_value(solution, entity) {
            self.index.insert(new, entity);
        }
        let anchor = self.resolve_anchor(solution, entity);
        tracing::trace!(entity, ?anchor, "Anchor supply updated");
        self.propagate(entity, anchor);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Demand for an [`AnchorVariableSupply`] of one chained variable.
pub struct AnchorVariableDemand<S> {
    variable: VariableDescriptor<S>,
}

impl<S> AnchorVariableDemand<S> {
    /// Creates the demand.
    ///
    /// # Errors
    /// Returns [`SolverForgeError::DomainModel`] if the variable is not chained.
    pub fn new(variable: VariableDescriptor<S>) -> Result<Self> {
        if !variable.is_chained() {
            return Err(SolverForgeError::DomainModel(format!(
                "An anchor supply requires a chained variable, but {} is not chained.",
                variable.simple_name()
            )));
        }
        Ok(Self { variable })
    }

    /// Returns the demanded variable.
    pub fn variable(&self) -> &VariableDescriptor<S> {
        &self.variable
    }
}

impl<S> Clone for AnchorVariableDemand<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for AnchorVariableDemand<S> {}

impl<S> std::fmt::Debug for AnchorVariableDemand<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AnchorVariableDemand({})", self.variable.simple_name())
    }
}

impl<S: 'static> SupplyDemand<S> for AnchorVariableDemand<S> {
    type Output = AnchorVariableSupply<S>;

    fn demand_key(&self) -> DemandKey {
        DemandKey::new::<AnchorVariableSupply<S>>(self.variable.descriptor_index, self.variable.name)
    }

    fn create_supply(&self, solution: &S) -> Self::Output {
        AnchorVariableSupply::new(solution, self.variable)
    }
}
