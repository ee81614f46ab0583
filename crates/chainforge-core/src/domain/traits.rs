//! The solution trait.

use crate::score::Score;

/// A working solution holding chained entities and their anchors.
///
/// Entities and anchors live in arenas owned by the solution and are
/// addressed by index. The solver never adds or removes them; it only
/// rewrites the chained variables, through a
/// [`VariableDescriptor`](super::VariableDescriptor) and the score director.
///
/// Each search thread works on its own clone, hence `Clone + Send + Sync`.
///
/// ```
/// use chainforge_core::{PlanningSolution, SimpleScore};
///
/// #[derive(Clone)]
/// struct Route {
///     previous: Vec<Option<usize>>,
///     score: Option<SimpleScore>,
/// }
///
/// impl PlanningSolution for Route {
///     type Score = SimpleScore;
///
///     fn score(&self) -> Option<SimpleScore> {
///         self.score
///     }
///
///     fn set_score(&mut self, score: Option<SimpleScore>) {
///         self.score = score;
///     }
///
///     fn is_initialized(&self) -> bool {
///         self.previous.iter().all(Option::is_some)
///     }
/// }
/// ```
pub trait PlanningSolution: Clone + Send + Sync + 'static {
    type Score: Score;

    /// Last score written by the score director, if any.
    fn score(&self) -> Option<Self::Score>;

    fn set_score(&mut self, score: Option<Self::Score>);

    /// False while any chained entity is unassigned, e.g. after a ruin move.
    fn is_initialized(&self) -> bool {
        true
    }
}
