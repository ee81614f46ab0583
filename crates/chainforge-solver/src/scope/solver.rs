//! Solver-level scope.

use std::time::{Duration, Instant};

use chainforge_config::ChainedSolverConfig;
use chainforge_core::{PlanningSolution, Score};
use chainforge_scoring::ScoreDirector;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::heuristic::r#move::ChainedMove;
use crate::heuristic::selector::MoveSelector;

/// Top-level scope for one solving session.
///
/// Generic over `D: ScoreDirector<S>` for zero type erasure. Each search
/// thread owns its own scope, and so its own working solution and supplies.
pub struct SolverScope<S: PlanningSolution, D: ScoreDirector<S>> {
    score_director: D,
    best_solution: Option<S>,
    best_score: Option<S::Score>,
    rng: StdRng,
    start_time: Option<Instant>,
    total_step_count: u64,
}

impl<S: PlanningSolution, D: ScoreDirector<S>> SolverScope<S, D> {
    pub fn new(score_director: D) -> Self {
        Self::with_rng(score_director, StdRng::from_os_rng())
    }

    pub fn with_seed(score_director: D, seed: u64) -> Self {
        Self::with_rng(score_director, StdRng::seed_from_u64(seed))
    }

    /// Seeds the session RNG from `random_seed` when one is configured.
    pub fn from_config(score_director: D, config: &ChainedSolverConfig) -> Self {
        match config.random_seed {
            Some(seed) => Self::with_seed(score_director, seed),
            None => Self::new(score_director),
        }
    }

    fn with_rng(score_director: D, rng: StdRng) -> Self {
        Self {
            score_director,
            best_solution: None,
            best_score: None,
            rng,
            start_time: None,
            total_step_count: 0,
        }
    }

    /// Starts the session and lets `selector` demand its supplies.
    pub fn start_solving<M: MoveSelector<S>>(&mut self, selector: &mut M) {
        self.start_time = Some(Instant::now());
        self.total_step_count = 0;
        selector.solving_started(&mut self.score_director);
        tracing::info!(
            selector = ?selector,
            supplies = self.score_director.supply_manager().len(),
            "Solving started"
        );
    }

    /// Starts a step and lets `selector` refresh its caches.
    pub fn start_step<M: MoveSelector<S>>(&mut self, selector: &mut M) {
        self.total_step_count += 1;
        selector.step_started(&self.score_director);
        tracing::debug!(step = self.total_step_count, "Step started");
    }

    /// Ends the session and lets `selector` release its supplies.
    pub fn end_solving<M: MoveSelector<S>>(&mut self, selector: &mut M) {
        selector.solving_ended(&mut self.score_director);
        tracing::info!(
            steps = self.total_step_count,
            elapsed_ms = self.elapsed().map_or(0, |d| d.as_millis()),
            "Solving ended"
        );
    }

    /// Iterates the moves of `selector` with the session RNG.
    pub fn moves<'a, M: MoveSelector<S>>(
        &'a mut self,
        selector: &'a M,
    ) -> impl Iterator<Item = ChainedMove<S>> + 'a {
        selector.iter_moves(&self.score_director, &mut self.rng)
    }

    pub fn elapsed(&self) -> Option<Duration> {
        self.start_time.map(|t| t.elapsed())
    }

    pub fn score_director(&self) -> &D {
        &self.score_director
    }

    pub fn score_director_mut(&mut self) -> &mut D {
        &mut self.score_director
    }

    pub fn working_solution(&self) -> &S {
        self.score_director.working_solution()
    }

    pub fn calculate_score(&mut self) -> S::Score {
        self.score_director.calculate_score()
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    pub fn best_solution(&self) -> Option<&S> {
        self.best_solution.as_ref()
    }

    pub fn best_score(&self) -> Option<&S::Score> {
        self.best_score.as_ref()
    }

    /// Keeps a clone of the working solution if it beats the best so far.
    pub fn update_best_solution(&mut self) -> bool {
        let current_score = self.score_director.calculate_score();
        let is_better = match &self.best_score {
            None => true,
            Some(best) => current_score.is_better_than(best),
        };
        if is_better {
            tracing::debug!(score = %current_score, step = self.total_step_count, "New best solution");
            self.best_solution = Some(self.score_director.working_solution().clone());
            self.best_score = Some(current_score);
        }
        is_better
    }

    pub fn total_step_count(&self) -> u64 {
        self.total_step_count
    }

    /// Consumes the scope, returning the score director.
    pub fn into_score_director(self) -> D {
        self.score_director
    }
}
