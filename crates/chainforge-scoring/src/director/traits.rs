// Score director trait definition.

use chainforge_core::domain::supply::{Supply, SupplyDemand, SupplyId, SupplyManager};
use chainforge_core::{ChainValue, PlanningSolution, Result, SolverForgeError, VariableDescriptor};

// The score director manages the working solution of one solving session.
//
// It is responsible for:
// - Maintaining the working solution
// - Calculating scores
// - Notifying the session's supplies about every variable change
// - Mapping values of another solution clone onto its own working solution
pub trait ScoreDirector<S: PlanningSolution>: Send {
    // Returns a reference to the working solution.
    fn working_solution(&self) -> &S;

    // Returns a mutable reference to the working solution.
    //
    // Writes through this reference bypass the supplies; call
    // `reset_supplies` afterwards.
    fn working_solution_mut(&mut self) -> &mut S;

    // Calculates and returns the current score.
    fn calculate_score(&mut self) -> S::Score;

    // Returns the supply registry of this session.
    fn supply_manager(&self) -> &SupplyManager<S>;

    // Returns the supply registry of this session.
    fn supply_manager_mut(&mut self) -> &mut SupplyManager<S>;

    // Demands a supply, creating it from the working solution on first demand.
    fn demand<D: SupplyDemand<S>>(&mut self, demand: &D) -> SupplyId<D::Output>;

    // Called before a chained variable is changed.
    fn before_variable_changed(&mut self, variable: &VariableDescriptor<S>, entity: usize);

    // Called after a chained variable is changed.
    fn after_variable_changed(&mut self, variable: &VariableDescriptor<S>, entity: usize);

    // Writes one variable, bracketed by before/after notifications.
    //
    // Every move mutates the working solution through this method only.
    fn change_variable_facade(
        &mut self,
        variable: &VariableDescriptor<S>,
        entity: usize,
        value: Option<ChainValue>,
    ) {
        self.before_variable_changed(variable, entity);
        variable.set_value(self.working_solution_mut(), entity, value);
        self.after_variable_changed(variable, entity);
    }

    // Cancels one demand; the supply is dropped with its last demand.
    fn cancel<D: SupplyDemand<S>>(&mut self, demand: &D) -> bool {
        self.supply_manager_mut().cancel(demand)
    }

    // Resolves a supply handle.
    //
    // # Panics
    // Panics if the supply was already released. Holding a handle past its
    // `cancel` is a lifecycle bug in the caller.
    fn supply<T: Supply<S>>(&self, id: SupplyId<T>) -> &T {
        match self.supply_manager().get(id) {
            Some(supply) => supply,
            None => panic!(
                "Supply {:?} of type {} was used after it was released.",
                id,
                std::any::type_name::<T>()
            ),
        }
    }

    // Rebuilds every supply after direct writes to the working solution.
    fn reset_supplies(&mut self);

    // Maps a value from another working-solution clone onto this one.
    //
    // The default treats clones as index-identical and only checks bounds.
    fn look_up_working_value(
        &self,
        variable: &VariableDescriptor<S>,
        value: ChainValue,
    ) -> Result<ChainValue> {
        index_identity_lookup(variable, self.working_solution(), value)
    }

    // Maps an entity from another working-solution clone onto this one.
    fn look_up_working_entity(
        &self,
        variable: &VariableDescriptor<S>,
        entity: usize,
    ) -> Result<usize> {
        match self.look_up_working_value(variable, ChainValue::Entity(entity))? {
            ChainValue::Entity(idx) => Ok(idx),
            other => Err(SolverForgeError::Internal(format!(
                "Entity E{entity} was looked up as {other}."
            ))),
        }
    }
}

// Looks up a value in an index-identical clone: only bounds are checked.
pub(crate) fn index_identity_lookup<S>(
    variable: &VariableDescriptor<S>,
    solution: &S,
    value: ChainValue,
) -> Result<ChainValue> {
    let (index, count) = match value {
        ChainValue::Anchor(idx) => (idx, variable.anchor_count(solution)),
        ChainValue::Entity(idx) => (idx, variable.entity_count(solution)),
    };
    if index < count {
        Ok(value)
    } else {
        Err(SolverForgeError::InvalidState(format!(
            "The value {} has no counterpart in the working solution of {}.",
            value,
            variable.simple_name()
        )))
    }
}
