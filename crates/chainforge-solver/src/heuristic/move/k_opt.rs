//! K-opt move for chained variables.
//!
//! K-opt removes K edges and reconnects the resulting pieces. Over a chained
//! variable an edge is a predecessor pointer, so cutting K edges and
//! reconnecting them is a rotation of K pointers:
//!
//! ```text
//! entity            -> values[0]
//! trailing(v[0])    -> values[1]
//! ...
//! trailing(v[K-2])  -> old value of entity
//! ```
//!
//! Every cut value keeps exactly one trailing entity, so the singleton
//! inverse survives. The rotation may close a cycle, which `is_doable`
//! rejects.
//!
//! # Example
//!
//! Chains `a0-a1-a2-a3`, `b0-b1-b2` and `c0-c1-c2`, `KOptMove(a2, [b0, c1])`:
//! `a2 -> b0`, `b1 -> c1`, `c2 -> a1`, giving `a0-a1-c2`, `b0-a2-a3` and
//! `c0-c1-b1-b2`.

use std::collections::HashMap;
use std::fmt;

use chainforge_core::{ChainValue, PlanningSolution, Result, SolverForgeError, VariableDescriptor};
use chainforge_scoring::ScoreDirector;
use smallvec::{smallvec, SmallVec};

use super::handles::{anchor_on, inverse_on, AnchorId, InverseId};
use super::rewire::Rewiring;
use super::Move;

/// A rotation of K predecessor pointers around one entity.
#[derive(Clone)]
pub struct KOptMove<S> {
    variable: VariableDescriptor<S>,
    inverse: InverseId<S>,
    anchor: AnchorId<S>,
    entity: usize,
    values: SmallVec<[ChainValue; 4]>,
}

impl<S> fmt::Debug for KOptMove<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KOptMove")
            .field("variable", &self.variable.name)
            .field("entity", &self.entity)
            .field("values", &self.values)
            .finish()
    }
}

impl<S> KOptMove<S> {
    /// Creates a move over `values.len() + 1` cut points.
    pub fn new(
        variable: VariableDescriptor<S>,
        inverse: InverseId<S>,
        anchor: AnchorId<S>,
        entity: usize,
        values: impl IntoIterator<Item = ChainValue>,
    ) -> Self {
        Self {
            variable,
            inverse,
            anchor,
            entity,
            values: values.into_iter().collect(),
        }
    }

    pub fn entity(&self) -> usize {
        self.entity
    }

    pub fn values(&self) -> &[ChainValue] {
        &self.values
    }

    /// Number of cut points.
    pub fn k(&self) -> usize {
        self.values.len() + 1
    }
}

impl<S: PlanningSolution> KOptMove<S> {
    fn plan<D: ScoreDirector<S>>(&self, score_director: &D, old_value: ChainValue) -> Rewiring {
        let inverse = score_director.supply(self.inverse);
        let mut plan = Rewiring::new();
        plan.set(self.entity, self.values.first().copied());
        for (i, &value) in self.values.iter().enumerate() {
            let Some(trailing) = inverse.get_inverse_singleton(value) else {
                continue;
            };
            let next = self.values.get(i + 1).copied().unwrap_or(old_value);
            plan.set(trailing, Some(next));
        }
        plan
    }

    /// True when every cut point lies on its own chain.
    fn cuts_on_distinct_chains<D: ScoreDirector<S>>(&self, score_director: &D) -> bool {
        let anchors = score_director.supply(self.anchor);
        let mut seen: SmallVec<[usize; 4]> = SmallVec::new();
        let cut_anchors = std::iter::once(anchors.get_anchor(self.entity))
            .chain(self.values.iter().map(|&v| anchors.get_anchor_of_value(v)));
        for anchor in cut_anchors {
            match anchor {
                Some(anchor) if !seen.contains(&anchor) => seen.push(anchor),
                _ => return false,
            }
        }
        true
    }

    /// Walks every rewritten entity back over the planned pointers.
    fn closes_cycle<D: ScoreDirector<S>>(&self, score_director: &D, plan: &Rewiring) -> bool {
        let solution = score_director.working_solution();
        let overlay: HashMap<usize, Option<ChainValue>> = plan.writes().iter().copied().collect();
        let limit = self.variable.entity_count(solution);

        for &(start, _) in plan.writes() {
            let mut current = start;
            let mut steps = 0;
            loop {
                let value = match overlay.get(&current) {
                    Some(&value) => value,
                    None => self.variable.get_value(solution, current),
                };
                match value {
                    Some(ChainValue::Entity(previous)) => {
                        if previous == start || steps > limit {
                            return true;
                        }
                        current = previous;
                        steps += 1;
                    }
                    _ => break,
                }
            }
        }
        false
    }
}

impl<S: PlanningSolution> Move<S> for KOptMove<S> {
    fn is_doable<D: ScoreDirector<S>>(&self, score_director: &D) -> bool {
        if self.values.is_empty() {
            return false;
        }
        let Some(old_value) = self
            .variable
            .get_value(score_director.working_solution(), self.entity)
        else {
            return false;
        };

        for (i, &value) in self.values.iter().enumerate() {
            if value == old_value
                || value == ChainValue::Entity(self.entity)
                || self.values[..i].contains(&value)
            {
                return false;
            }
        }

        if self.cuts_on_distinct_chains(score_director) {
            return true;
        }
        let plan = self.plan(score_director, old_value);
        !self.closes_cycle(score_director, &plan)
    }

    fn do_move<D: ScoreDirector<S>>(&self, score_director: &mut D) {
        let Some(old_value) = self
            .variable
            .get_value(score_director.working_solution(), self.entity)
        else {
            return;
        };
        let plan = self.plan(score_director, old_value);
        tracing::trace!(k_opt = %self, writes = plan.writes().len(), "Rotating cut points");
        plan.apply(score_director, &self.variable);
    }

    fn create_undo_move<D: ScoreDirector<S>>(&self, score_director: &D) -> Result<Self> {
        let old_value = self
            .variable
            .get_value(score_director.working_solution(), self.entity)
            .ok_or_else(|| {
                SolverForgeError::InvalidState(format!("{self} starts from an unassigned entity."))
            })?;

        // The first cut goes back to the old value, the others rotate backwards.
        let mut values: SmallVec<[ChainValue; 4]> = smallvec![old_value];
        values.extend(self.values.iter().skip(1).rev().copied());
        Ok(Self {
            values,
            ..self.clone()
        })
    }

    fn rebase<D: ScoreDirector<S>>(&self, destination: &D) -> Result<Self> {
        let values = self
            .values
            .iter()
            .map(|&value| destination.look_up_working_value(&self.variable, value))
            .collect::<Result<SmallVec<[ChainValue; 4]>>>()?;
        Ok(Self {
            variable: self.variable,
            inverse: inverse_on(destination, self.variable)?,
            anchor: anchor_on(destination, self.variable)?,
            entity: destination.look_up_working_entity(&self.variable, self.entity)?,
            values,
        })
    }

    fn planning_entities(&self) -> SmallVec<[usize; 4]> {
        smallvec![self.entity]
    }

    fn planning_values(&self) -> SmallVec<[ChainValue; 4]> {
        self.values.clone()
    }

    fn descriptor_index(&self) -> usize {
        self.variable.descriptor_index
    }

    fn variable_name(&self) -> &str {
        self.variable.name
    }
}

impl<S> fmt::Display for KOptMove<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.entity)?;
        for value in &self.values {
            write!(f, " -kOpt-> {value}")?;
        }
        Ok(())
    }
}
