//! Simple score director with full recalculation.

use chainforge_core::domain::supply::{SupplyDemand, SupplyId, SupplyManager};
use chainforge_core::{ChainValue, PlanningSolution, Result, SolverForgeError, VariableDescriptor};

use super::lookup::WorkingObjectLookup;
use super::traits::{index_identity_lookup, ScoreDirector};

/// A simple score director that recalculates the full score on demand.
///
/// The calculator is stored as a concrete generic type parameter, not as `Arc<dyn Fn>`.
/// The director owns the session's [`SupplyManager`], so supplies are scoped
/// to the working solution they were built from.
///
/// # Example
///
/// ```
/// use chainforge_core::domain::supply::SingletonInverseVariableDemand;
/// use chainforge_core::{ChainValue, PlanningSolution, SimpleScore, VariableDescriptor};
/// use chainforge_scoring::{ScoreDirector, SimpleScoreDirector};
///
/// #[derive(Clone)]
/// struct Plan { previous: Vec<Option<ChainValue>>, score: Option<SimpleScore> }
///
/// impl PlanningSolution for Plan {
///     type Score = SimpleScore;
///     fn score(&self) -> Option<SimpleScore> { self.score }
///     fn set_score(&mut self, score: Option<SimpleScore>) { self.score = score; }
/// }
///
/// let var = VariableDescriptor::<Plan>::chained(
///     "previous", "Visit", 0,
///     |p| p.previous.len(), |_| 1,
///     |p, i| p.previous[i], |p, i, v| p.previous[i] = v,
/// );
/// let plan = Plan { previous: vec![Some(ChainValue::Anchor(0)), None], score: None };
/// let assigned = |p: &Plan| SimpleScore::of(p.previous.iter().flatten().count() as i64);
///
/// let mut director = SimpleScoreDirector::new(plan, assigned);
/// let inverse = director.demand(&SingletonInverseVariableDemand::new(var).unwrap());
///
/// director.change_variable_facade(&var, 1, Some(ChainValue::Entity(0)));
///
/// assert_eq!(director.supply(inverse).trailing_entity(0), Some(1));
/// assert_eq!(director.calculate_score(), SimpleScore::of(2));
/// ```
pub struct SimpleScoreDirector<S: PlanningSolution, C> {
    working_solution: S,
    score_calculator: C,
    supply_manager: SupplyManager<S>,
    lookup: Option<WorkingObjectLookup>,
    score_dirty: bool,
    cached_score: Option<S::Score>,
    change_count: u64,
}

impl<S, C> SimpleScoreDirector<S, C>
where
    S: PlanningSolution,
    C: Fn(&S) -> S::Score + Send + Sync,
{
    /// Creates a new SimpleScoreDirector.
    pub fn new(solution: S, score_calculator: C) -> Self {
        SimpleScoreDirector {
            working_solution: solution,
            score_calculator,
            supply_manager: SupplyManager::new(),
            lookup: None,
            score_dirty: true,
            cached_score: None,
            change_count: 0,
        }
    }

    /// Replaces the working solution and rebuilds every live supply.
    pub fn set_working_solution(&mut self, solution: S) {
        self.working_solution = solution;
        self.lookup = None;
        self.supply_manager.reset_working_solution(&self.working_solution);
        self.mark_dirty();
    }

    /// Registers the clone whose moves will be rebased onto this director.
    ///
    /// Afterwards `look_up_working_value` matches values by planning id
    /// instead of by index.
    pub fn register_rebase_source(
        &mut self,
        variable: &VariableDescriptor<S>,
        source: &S,
    ) -> Result<()> {
        let lookup = WorkingObjectLookup::build(variable, source, &self.working_solution)?;
        tracing::debug!(
            variable = variable.name,
            mapped = lookup.len(),
            "Registered rebase source"
        );
        self.lookup = Some(lookup);
        Ok(())
    }

    /// Returns the number of variable writes since creation.
    pub fn change_count(&self) -> u64 {
        self.change_count
    }

    /// Consumes the director, returning the working solution.
    pub fn into_working_solution(self) -> S {
        self.working_solution
    }

    fn mark_dirty(&mut self) {
        self.score_dirty = true;
    }
}

impl<S, C> ScoreDirector<S> for SimpleScoreDirector<S, C>
where
    S: PlanningSolution,
    C: Fn(&S) -> S::Score + Send + Sync,
{
    fn working_solution(&self) -> &S {
        &self.working_solution
    }

    fn working_solution_mut(&mut self) -> &mut S {
        self.mark_dirty();
        &mut self.working_solution
    }

    fn calculate_score(&mut self) -> S::Score {
        if !self.score_dirty {
            if let Some(score) = self.cached_score {
                return score;
            }
        }

        let score = (self.score_calculator)(&self.working_solution);
        self.working_solution.set_score(Some(score));
        self.cached_score = Some(score);
        self.score_dirty = false;
        score
    }

    fn supply_manager(&self) -> &SupplyManager<S> {
        &self.supply_manager
    }

    fn supply_manager_mut(&mut self) -> &mut SupplyManager<S> {
        &mut self.supply_manager
    }

    fn demand<D: SupplyDemand<S>>(&mut self, demand: &D) -> SupplyId<D::Output> {
        self.supply_manager.demand(demand, &self.working_solution)
    }

    fn before_variable_changed(&mut self, variable: &VariableDescriptor<S>, entity: usize) {
        self.mark_dirty();
        self.supply_manager
            .before_variable_changed(&self.working_solution, variable, entity);
    }

    fn after_variable_changed(&mut self, variable: &VariableDescriptor<S>, entity: usize) {
        self.change_count += 1;
        self.supply_manager
            .after_variable_changed(&self.working_solution, variable, entity);
    }

    fn reset_supplies(&mut self) {
        self.supply_manager.reset_working_solution(&self.working_solution);
        self.mark_dirty();
    }

    fn look_up_working_value(
        &self,
        variable: &VariableDescriptor<S>,
        value: ChainValue,
    ) -> Result<ChainValue> {
        let Some(lookup) = self.lookup.as_ref().filter(|l| l.is_for(variable)) else {
            return index_identity_lookup(variable, &self.working_solution, value);
        };

        lookup.look_up(value).ok_or_else(|| {
            SolverForgeError::InvalidState(format!(
                "The value {} has no planning-id counterpart in the working solution of {}.",
                value,
                variable.simple_name()
            ))
        })
    }
}

impl<S: PlanningSolution, C> std::fmt::Debug for SimpleScoreDirector<S, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimpleScoreDirector")
            .field("supplies", &self.supply_manager)
            .field("score_dirty", &self.score_dirty)
            .field("change_count", &self.change_count)
            .finish()
    }
}
