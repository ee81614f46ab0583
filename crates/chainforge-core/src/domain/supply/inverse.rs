//! Singleton inverse supply for O(1) "who points to this value?" lookups.
//!
//! # Zero-Erasure Design
//!
//! - **Index-based**: Stores `value -> entity_index` mappings, not cloned entities
//! - **Owned**: No `Arc`, `RwLock`, or interior mutability - uses `&mut self`

use std::any::Any;
use std::collections::HashMap;

use smallvec::SmallVec;

use super::{DemandKey, Supply, SupplyDemand};
use crate::domain::{ChainValue, VariableDescriptor};
use crate::error::{Result, SolverForgeError};

/// Reverse index from a chained value to the entities pointing at it.
///
/// At rest every value has at most one entry. Between two writes of the same
/// move a value can briefly have two, so entries are kept as a tiny multimap
/// and nothing is lost when the first of them is rerouted.
#[derive(Debug, Default, Clone)]
pub(crate) struct InverseIndex {
    map: HashMap<ChainValue, SmallVec<[usize; 2]>>,
}

impl InverseIndex {
    pub(crate) fn rebuild<S>(&mut self, solution: &S, variable: &VariableDescriptor<S>) {
        self.map.clear();
        for entity in 0..variable.entity_count(solution) {
            if let Some(value) = variable.get_value(solution, entity) {
                self.insert(value, entity);
            }
        }
    }

    #[inline]
    pub(crate) fn get(&self, value: ChainValue) -> Option<usize> {
        self.map.get(&value).and_then(|entities| entities.last().copied())
    }

    #[inline]
    pub(crate) fn get_all(&self, value: ChainValue) -> &[usize] {
        self.map.get(&value).map_or(&[], |entities| entities.as_slice())
    }

    #[inline]
    pub(crate) fn insert(&mut self, value: ChainValue, entity: usize) {
        self.map.entry(value).or_default().push(entity);
    }

    pub(crate) fn remove(&mut self, value: ChainValue, entity: usize) {
        if let Some(entities) = self.map.get_mut(&value) {
            if let Some(pos) = entities.iter().position(|&e| e == entity) {
                entities.swap_remove(pos);
            }
            if entities.is_empty() {
                self.map.remove(&value);
            }
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.map.values().map(|entities| entities.len()).sum()
    }
}

/// Index-based singleton inverse supply for a chained variable.
///
/// For a chained variable where `entity.previous = value`, this supply answers:
/// "Given `value`, which entity index has `previous == value`?" That entity
/// is the *trailing entity* of `value`.
///
/// # Example
///
/// ```
/// use chainforge_core::domain::supply::SingletonInverseVariableSupply;
/// use chainforge_core::{ChainValue, VariableDescriptor};
///
/// struct Plan { previous: Vec<Option<ChainValue>> }
///
/// let var = VariableDescriptor::<Plan>::chained(
///     "previous", "Visit", 0,
///     |p| p.previous.len(), |_| 1,
///     |p, i| p.previous[i], |p, i, v| p.previous[i] = v,
/// );
/// // A0 <- E0 <- E1, E2 unassigned
/// let plan = Plan {
///     previous: vec![Some(ChainValue::Anchor(0)), Some(ChainValue::Entity(0)), None],
/// };
///
/// let supply = SingletonInverseVariableSupply::new(&plan, var);
/// assert_eq!(supply.get_inverse_singleton(ChainValue::Anchor(0)), Some(0));
/// assert_eq!(supply.trailing_entity(0), Some(1));
/// assert_eq!(supply.trailing_entity(1), None);
/// assert_eq!(supply.len(), 2);
/// ```
pub struct SingletonInverseVariableSupply<S> {
    variable: VariableDescriptor<S>,
    index: InverseIndex,
}

impl<S> SingletonInverseVariableSupply<S> {
    /// Creates a supply initialized from `solution`.
    pub fn new(solution: &S, variable: VariableDescriptor<S>) -> Self {
        let mut index = InverseIndex::default();
        index.rebuild(solution, &variable);
        Self { variable, index }
    }

    /// Returns the entity whose variable points at `value`, if any.
    #[inline]
    pub fn get_inverse_singleton(&self, value: ChainValue) -> Option<usize> {
        self.index.get(value)
    }

    /// Returns the trailing entity of an entity, if any.
    #[inline]
    pub fn trailing_entity(&self, entity: usize) -> Option<usize> {
        self.index.get(ChainValue::Entity(entity))
    }

    /// Returns the number of assigned entities tracked.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns true if no assigned entity is tracked.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the tracked variable.
    pub fn variable(&self) -> &VariableDescriptor<S> {
        &self.variable
    }
}

impl<S> std::fmt::Debug for SingletonInverseVariableSupply<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SingletonInverseVariableSupply")
            .field("variable", &self.variable.name)
            .field("tracked", &self.index.len())
            .finish()
    }
}

impl<S: 'static> Supply<S> for SingletonInverseVariableSupply<S> {
    fn reset_working_solution(&mut self, solution: &S) {
        self.index.rebuild(solution, &self.variable);
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
            tracing::trace!(entity, value = %new, "Inverse supply updated");
            self.index.insert(new, entity);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Demand for a [`SingletonInverseVariableSupply`] of one chained variable.
pub struct SingletonInverseVariableDemand<S> {
    variable: VariableDescriptor<S>,
}

impl<S> SingletonInverseVariableDemand<S> {
    /// Creates the demand.
    ///
    /// # Errors
    /// Returns [`SolverForgeError::DomainModel`] if the variable is not chained.
    pub fn new(variable: VariableDescriptor<S>) -> Result<Self> {
        if !variable.is_chained() {
            return Err(SolverForgeError::DomainModel(format!(
                "A singleton inverse supply requires a chained variable, but {} is not chained.",
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

impl<S> Clone for SingletonInverseVariableDemand<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for SingletonInverseVariableDemand<S> {}

impl<S> std::fmt::Debug for SingletonInverseVariableDemand<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SingletonInverseVariableDemand({})", self.variable.simple_name())
    }
}

impl<S: 'static> SupplyDemand<S> for SingletonInverseVariableDemand<S> {
    type Output = SingletonInverseVariableSupply<S>;

    fn demand_key(&self) -> DemandKey {
        DemandKey::new::<SingletonInverseVariableSupply<S>>(
            self.variable.descriptor_index,
            self.variable.name,
        )
    }

    fn create_supply(&self, solution: &S) -> Self::Output {
        SingletonInverseVariableSupply::new(solution, self.variable)
    }
}
