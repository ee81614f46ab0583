// Resolution of supply handles on another score director.

use chainforge_core::domain::supply::{
    AnchorVariableDemand, AnchorVariableSupply, SingletonInverseVariableDemand,
    SingletonInverseVariableSupply, SupplyDemand, SupplyId,
};
use chainforge_core::{PlanningSolution, Result, SolverForgeError, VariableDescriptor};
use chainforge_scoring::ScoreDirector;

/// Handle of a singleton inverse supply.
pub type InverseId<S> = SupplyId<SingletonInverseVariableSupply<S>>;
/// Handle of an anchor supply.
pub type AnchorId<S> = SupplyId<AnchorVariableSupply<S>>;

fn resolve<S, D, T>(destination: &D, demand: &T, kind: &str) -> Result<SupplyId<T::Output>>
where
    S: PlanningSolution,
    D: ScoreDirector<S>,
    T: SupplyDemand<S>,
{
    destination.supply_manager().id_of(demand).ok_or_else(|| {
        SolverForgeError::InvalidState(format!(
            "The destination score director has no {kind} supply for {}. Demand it before rebasing moves.",
            demand.demand_key().variable_name
        ))
    })
}

// Finds the singleton inverse supply already demanded on `destination`.
pub(crate) fn inverse_on<S, D>(destination: &D, variable: VariableDescriptor<S>) -> Result<InverseId<S>>
where
    S: PlanningSolution,
    D: ScoreDirector<S>,
{
    let demand = SingletonInverseVariableDemand::new(variable)?;
    resolve(destination, &demand, "singleton inverse")
}

// Finds the anchor supply already demanded on `destination`.
pub(crate) fn anchor_on<S, D>(destination: &D, variable: VariableDescriptor<S>) -> Result<AnchorId<S>>
where
    S: PlanningSolution,
    D: ScoreDirector<S>,
{
    let demand = AnchorVariableDemand::new(variable)?;
    resolve(destination, &demand, "anchor")
}
