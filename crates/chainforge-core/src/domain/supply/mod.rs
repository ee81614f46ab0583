//! Supply infrastructure for chained variable relationship tracking.
//!
//! Supplies provide efficient access to derived information about chained
//! variables: who points to a value (singleton inverse) and which anchor an
//! entity ultimately traces back to.
//!
//! The supply pattern enables O(1) lookups that would otherwise require O(n) scans.
//!
//! # Architecture
//!
//! - [`Supply`]: A cache kept current through before/after change notifications
//! - [`SupplyDemand`]: Request a specific supply type from the manager
//! - [`SupplyManager`]: Registry owned by one solving session
//! - [`SupplyId`]: Typed handle returned by a demand

mod anchor;
mod inverse;


pub use anchor::{AnchorVariableDemand, AnchorVariableSupply};
pub use inverse::{SingletonInverseVariableDemand, SingletonInverseVariableSupply};

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use super::VariableDescriptor;

/// A cache derived from the working solution.
///
/// The manager forwards every variable change to every live supply, bracketed
/// by `before_variable_changed` (old value still visible) and
/// `after_variable_changed` (new value visible).
pub trait Supply<S>: Send + Sync + 'static {
    /// Rebuilds the supply from scratch for a (new) working solution.
    fn reset_working_solution(&mut self, solution: &S);

    /// Called before `entity`'s value of `variable` is overwritten.
    fn before_variable_changed(
        &mut self,
        solution: &S,
        variable: &VariableDescriptor<S>,
        entity: usize,
    );

    /// Called after `entity`'s value of `variable` was overwritten.
    fn after_variable_changed(
        &mut self,
        solution: &S,
        variable: &VariableDescriptor<S>,
        entity: usize,
    );

    /// Upcast used by the manager to hand out typed references.
    fn as_any(&self) -> &dyn Any;
}

/// Trait for requesting a specific type of supply.
///
/// A demand describes what supply is needed. The `SupplyManager` uses
/// demands to create or retrieve the appropriate supply instance.
pub trait SupplyDemand<S>: Send + Sync {
    /// The type of supply this demand requests.
    type Output: Supply<S>;

    /// Returns a unique key identifying this specific demand.
    ///
    /// Demands for the same variable must return equal keys.
    fn demand_key(&self) -> DemandKey;

    /// Creates a supply initialized from the current working solution.
    fn create_supply(&self, solution: &S) -> Self::Output;
}

/// A unique key identifying a supply demand.
///
/// The key combines the supply type with the variable it tracks,
/// allowing multiple supplies of the same type for different variables.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DemandKey {
    /// The type of supply being requested.
    pub supply_type: TypeId,
    /// Index of the entity descriptor owning the variable.
    pub descriptor_index: usize,
    /// The name of the variable this supply tracks.
    pub variable_name: &'static str,
}

impl DemandKey {
    /// Creates a new demand key for supply type `T`.
    pub fn new<T: 'static>(descriptor_index: usize, variable_name: &'static str) -> Self {
        Self {
            supply_type: TypeId::of::<T>(),
            descriptor_index,
            variable_name,
        }
    }
}

/// Typed handle to a supply held by a [`SupplyManager`].
///
/// Handles are plain indices: they are `Copy`, can be stored inside
/// selectors and moves, and are resolved against the manager on use.
pub struct SupplyId<T> {
    slot: usize,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> SupplyId<T> {
    fn new(slot: usize) -> Self {
        Self {
            slot,
            _phantom: PhantomData,
        }
    }

    /// Returns the raw slot index.
    pub fn slot(&self) -> usize {
        self.slot
    }
}

impl<T> Clone for SupplyId<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SupplyId<T> {}

impl<T> PartialEq for SupplyId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.slot == other.slot
    }
}

impl<T> Eq for SupplyId<T> {}

impl<T> fmt::Debug for SupplyId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SupplyId({})", self.slot)
    }
}

struct SupplySlot<S> {
    key: DemandKey,
    supply: Box<dyn Supply<S>>,
    active_demands: usize,
}

/// Registry holding the supplies of one solving session.
///
/// Supplies are created on the first demand and reference counted:
/// every `demand` must be paired with a `cancel`, and the supply is dropped
/// when the last demand is cancelled. Slots are never reused within a
/// session, so a stale [`SupplyId`] resolves to `None` instead of to an
/// unrelated supply.
///
/// # Example
///
/// ```
/// use chainforge_core::domain::supply::{SingletonInverseVariableDemand, SupplyManager};
/// use chainforge_core::{ChainValue, VariableDescriptor};
///
/// struct Plan { previous: Vec<Option<ChainValue>> }
///
/// let var = VariableDescriptor::<Plan>::chained(
///     "previous", "Visit", 0,
///     |p| p.previous.len(), |_| 1,
///     |p, i| p.previous[i], |p, i, v| p.previous[i] = v,
/// );
/// let plan = Plan { previous: vec![Some(ChainValue::Anchor(0)), Some(ChainValue::Entity(0))] };
///
/// let demand = SingletonInverseVariableDemand::new(var).unwrap();
/// let mut manager = SupplyManager::new();
/// let id = manager.demand(&demand, &plan);
///
/// let inverse = manager.get(id).unwrap();
/// assert_eq!(inverse.get_inverse_singleton(ChainValue::Entity(0)), Some(1));
///
/// assert!(manager.cancel(&demand));
/// assert!(manager.get(id).is_none());
/// ```
pub struct SupplyManager<S> {
    slots: Vec<Option<SupplySlot<S>>>,
    by_key: HashMap<DemandKey, usize>,
}

impl<S: 'static> Default for SupplyManager<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: 'static> SupplyManager<S> {
    /// Creates a new empty supply manager.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            by_key: HashMap::new(),
        }
    }

    /// Gets or creates the supply for the given demand.
    ///
    /// A new supply is initialized from `solution`. An existing supply is
    /// shared and its demand count incremented.
    pub fn demand<D: SupplyDemand<S>>(&mut self, demand: &D, solution: &S) -> SupplyId<D::Output> {
        let key = demand.demand_key();

        if let Some(&slot) = self.by_key.get(&key) {
            if let Some(entry) = self.slots[slot].as_mut() {
                entry.active_demands += 1;
                tracing::trace!(
                    variable = key.variable_name,
                    active = entry.active_demands,
                    "Shared existing supply"
                );
                return SupplyId::new(slot);
            }
        }

        let slot = self.slots.len();
        tracing::debug!(variable = key.variable_name, slot, "Created supply");
        self.slots.push(Some(SupplySlot {
            key: key.clone(),
            supply: Box::new(demand.create_supply(solution)),
            active_demands: 1,
        }));
        self.by_key.insert(key, slot);
        SupplyId::new(slot)
    }

    /// Cancels one demand.
    ///
    /// Returns false if there was no active demand for it. The supply is
    /// dropped once its last demand is cancelled.
    pub fn cancel<D: SupplyDemand<S>>(&mut self, demand: &D) -> bool {
        let key = demand.demand_key();
        let Some(&slot) = self.by_key.get(&key) else {
            return false;
        };
        let Some(entry) = self.slots[slot].as_mut() else {
            return false;
        };

        entry.active_demands -= 1;
        if entry.active_demands == 0 {
            tracing::debug!(variable = key.variable_name, slot, "Released supply");
            self.slots[slot] = None;
            self.by_key.remove(&key);
        }
        true
    }

    /// Resolves a supply handle.
    ///
    /// Returns `None` if the supply was released.
    pub fn get<T: Supply<S>>(&self, id: SupplyId<T>) -> Option<&T> {
        self.slots
            .get(id.slot)
            .and_then(|entry| entry.as_ref())
            .and_then(|entry| entry.supply.as_any().downcast_ref::<T>())
    }

    /// Returns the handle of the live supply for a demand, without demanding it.
    pub fn id_of<D: SupplyDemand<S>>(&self, demand: &D) -> Option<SupplyId<D::Output>> {
        self.by_key
            .get(&demand.demand_key())
            .map(|&slot| SupplyId::new(slot))
    }

    /// Looks up the live supply for a demand without changing its count.
    pub fn lookup<D: SupplyDemand<S>>(&self, demand: &D) -> Option<&D::Output> {
        self.get(self.id_of(demand)?)
    }

    /// Returns the number of active demands for a demand's supply.
    pub fn active_count<D: SupplyDemand<S>>(&self, demand: &D) -> usize {
        self.by_key
            .get(&demand.demand_key())
            .and_then(|&slot| self.slots[slot].as_ref())
            .map_or(0, |entry| entry.active_demands)
    }

    /// Rebuilds every live supply for a new working solution.
    pub fn reset_working_solution(&mut self, solution: &S) {
        for entry in self.slots.iter_mut().flatten() {
            entry.supply.reset_working_solution(solution);
        }
    }

    /// Forwards a before-change notification to every live supply.
    pub fn before_variable_changed(
        &mut self,
        solution: &S,
        variable: &VariableDescriptor<S>,
        entity: usize,
    ) {
        for entry in self.slots.iter_mut().flatten() {
            if entry.key.descriptor_index == variable.descriptor_index
                && entry.key.variable_name == variable.name
            {
                entry.supply.before_variable_changed(solution, variable, entity);
            }
        }
    }

    /// Forwards an after-change notification to every live supply.
    pub fn after_variable_changed(
        &mut self,
        solution: &S,
        variable: &VariableDescriptor<S>,
        entity: usize,
    ) {
        for entry in self.slots.iter_mut().flatten() {
            if entry.key.descriptor_index == variable.descriptor_index
                && entry.key.variable_name == variable.name
            {
                entry.supply.after_variable_changed(solution, variable, entity);
            }
        }
    }

    /// Drops every supply, regardless of outstanding demands.
    pub fn clear(&mut self) {
        for entry in self.slots.iter_mut() {
            *entry = None;
        }
        self.by_key.clear();
    }

    /// Returns the number of live supplies.
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    /// Returns true if no supplies are live.
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

impl<S> fmt::Debug for SupplyManager<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupplyManager")
            .field("supply_count", &self.by_key.len())
            .finish()
    }
}
