//! Planning-id based lookup between working-solution clones.

use std::collections::HashMap;

use chainforge_core::{ChainValue, Result, SolverForgeError, VariableDescriptor};

/// Maps the values of a source solution onto a working solution by planning id.
///
/// Clones produced by `Clone` are index-identical and need no table. This
/// lookup is for clones whose arenas may be ordered differently, e.g. a
/// solution reloaded from storage.
#[derive(Debug, Clone, Default)]
pub struct WorkingObjectLookup {
    descriptor_index: usize,
    variable_name: &'static str,
    values: HashMap<ChainValue, ChainValue>,
}

impl WorkingObjectLookup {
    /// Builds the lookup from `source` values to `working` values.
    ///
    /// # Errors
    /// Returns [`SolverForgeError::DomainModel`] if the descriptor has no
    /// planning id extractors, and [`SolverForgeError::InvalidState`] if an
    /// id is duplicated in the working solution.
    pub fn build<S>(variable: &VariableDescriptor<S>, source: &S, working: &S) -> Result<Self> {
        let (Some(entity_id), Some(anchor_id)) = (variable.entity_id, variable.anchor_id) else {
            return Err(SolverForgeError::DomainModel(format!(
                "The variable {} has no planning ids, so values cannot be looked up by id.",
                variable.simple_name()
            )));
        };

        let mut working_entities = HashMap::new();
        for idx in 0..variable.entity_count(working) {
            if working_entities.insert(entity_id(working, idx), idx).is_some() {
                return Err(SolverForgeError::InvalidState(format!(
                    "Duplicate entity planning id {} in the working solution.",
                    entity_id(working, idx)
                )));
            }
        }
        let mut working_anchors = HashMap::new();
        for idx in 0..variable.anchor_count(working) {
            if working_anchors.insert(anchor_id(working, idx), idx).is_some() {
                return Err(SolverForgeError::InvalidState(format!(
                    "Duplicate anchor planning id {} in the working solution.",
                    anchor_id(working, idx)
                )));
            }
        }

        let mut values = HashMap::new();
        for idx in 0..variable.entity_count(source) {
            if let Some(&target) = working_entities.get(&entity_id(source, idx)) {
                values.insert(ChainValue::Entity(idx), ChainValue::Entity(target));
            }
        }
        for idx in 0..variable.anchor_count(source) {
            if let Some(&target) = working_anchors.get(&anchor_id(source, idx)) {
                values.insert(ChainValue::Anchor(idx), ChainValue::Anchor(target));
            }
        }

        Ok(Self {
            descriptor_index: variable.descriptor_index,
            variable_name: variable.name,
            values,
        })
    }

    /// Returns true if this lookup was built for `variable`.
    pub fn is_for<S>(&self, variable: &VariableDescriptor<S>) -> bool {
        self.descriptor_index == variable.descriptor_index && self.variable_name == variable.name
    }

    /// Maps one source value.
    pub fn look_up(&self, value: ChainValue) -> Option<ChainValue> {
        self.values.get(&value).copied()
    }

    /// Returns the number of mapped values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if nothing is mapped.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
