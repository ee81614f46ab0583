//! Planning variable metadata.
//!
//! A [`VariableDescriptor`] is the typed, zero-erasure handle through which
//! moves and supplies read and write a chained variable: plain function
//! pointers over the solution, no reflection and no `dyn Any`.

use std::fmt;

use super::ChainValue;

/// The type of a planning variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableType {
    /// A normal planning variable that takes values from a value range.
    Genuine,
    /// A chained variable whose value is an anchor or another entity.
    Chained,
}

impl VariableType {
    /// Returns true if this is a chained variable.
    pub fn is_chained(&self) -> bool {
        matches!(self, VariableType::Chained)
    }
}

/// Descriptor for a chained (or genuine) planning variable of solution `S`.
///
/// All accessors are function pointers, so the descriptor is `Copy` for
/// every `S` and can be captured by value inside moves.
///
/// # Example
///
/// ```
/// use chainforge_core::{ChainValue, VariableDescriptor};
///
/// struct Plan {
///     previous: Vec<Option<ChainValue>>,
///     vehicles: usize,
/// }
///
/// let var = VariableDescriptor::<Plan>::chained(
///     "previous",
///     "Visit",
///     0,
///     |p| p.previous.len(),
///     |p| p.vehicles,
///     |p, i| p.previous[i],
///     |p, i, v| p.previous[i] = v,
/// );
///
/// let mut plan = Plan { previous: vec![Some(ChainValue::Anchor(0)), None], vehicles: 1 };
/// var.set_value(&mut plan, 1, Some(ChainValue::Entity(0)));
///
/// assert!(var.is_chained());
/// assert_eq!(var.get_value(&plan, 1), Some(ChainValue::Entity(0)));
/// assert_eq!(var.simple_name(), "Visit.previous");
/// ```
pub struct VariableDescriptor<S> {
    /// Name of the variable on its entity class.
    pub name: &'static str,
    /// Name of the entity class owning the variable.
    pub entity_class: &'static str,
    /// Index of the entity descriptor within the solution.
    pub descriptor_index: usize,
    /// Genuine or chained.
    pub variable_type: VariableType,
    /// Number of planning entities carrying this variable.
    pub entity_count: fn(&S) -> usize,
    /// Number of anchors this variable can point at.
    pub anchor_count: fn(&S) -> usize,
    /// Reads the variable of one entity.
    pub getter: fn(&S, usize) -> Option<ChainValue>,
    /// Writes the variable of one entity. Never call directly from a move;
    /// go through the score director so supplies stay current.
    pub setter: fn(&mut S, usize, Option<ChainValue>),
    /// Stable planning id of an entity, used to match clones when rebasing.
    pub entity_id: Option<fn(&S, usize) -> u64>,
    /// Stable planning id of an anchor, used to match clones when rebasing.
    pub anchor_id: Option<fn(&S, usize) -> u64>,
}

impl<S> VariableDescriptor<S> {
    /// Creates a descriptor for a chained variable.
    pub fn chained(
        name: &'static str,
        entity_class: &'static str,
        descriptor_index: usize,
        entity_count: fn(&S) -> usize,
        anchor_count: fn(&S) -> usize,
        getter: fn(&S, usize) -> Option<ChainValue>,
        setter: fn(&mut S, usize, Option<ChainValue>),
    ) -> Self {
        Self {
            name,
            entity_class,
            descriptor_index,
            variable_type: VariableType::Chained,
            entity_count,
            anchor_count,
            getter,
            setter,
            entity_id: None,
            anchor_id: None,
        }
    }

    /// Creates a descriptor for a genuine (non-chained) variable.
    pub fn genuine(
        name: &'static str,
        entity_class: &'static str,
        descriptor_index: usize,
        entity_count: fn(&S) -> usize,
        anchor_count: fn(&S) -> usize,
        getter: fn(&S, usize) -> Option<ChainValue>,
        setter: fn(&mut S, usize, Option<ChainValue>),
    ) -> Self {
        Self {
            variable_type: VariableType::Genuine,
            ..Self::chained(
                name,
                entity_class,
                descriptor_index,
                entity_count,
                anchor_count,
                getter,
                setter,
            )
        }
    }

    /// Attaches planning id extractors for entities and anchors.
    pub fn with_planning_ids(
        mut self,
        entity_id: fn(&S, usize) -> u64,
        anchor_id: fn(&S, usize) -> u64,
    ) -> Self {
        self.entity_id = Some(entity_id);
        self.anchor_id = Some(anchor_id);
        self
    }

    /// Returns true if this is a chained variable.
    #[inline]
    pub fn is_chained(&self) -> bool {
        self.variable_type.is_chained()
    }

    /// Returns true if both descriptors describe the same variable.
    #[inline]
    pub fn is_same_variable(&self, other: &Self) -> bool {
        self.descriptor_index == other.descriptor_index && self.name == other.name
    }

    /// Reads the variable of `entity`.
    #[inline]
    pub fn get_value(&self, solution: &S, entity: usize) -> Option<ChainValue> {
        (self.getter)(solution, entity)
    }

    /// Writes the variable of `entity`.
    #[inline]
    pub fn set_value(&self, solution: &mut S, entity: usize, value: Option<ChainValue>) {
        (self.setter)(solution, entity, value)
    }

    /// Returns the number of entities.
    #[inline]
    pub fn entity_count(&self, solution: &S) -> usize {
        (self.entity_count)(solution)
    }

    /// Returns the number of anchors.
    #[inline]
    pub fn anchor_count(&self, solution: &S) -> usize {
        (self.anchor_count)(solution)
    }

    /// Returns `EntityClass.variable`, used in diagnostics.
    pub fn simple_name(&self) -> String {
        format!("{}.{}", self.entity_class, self.name)
    }
}

impl<S> Clone for VariableDescriptor<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for VariableDescriptor<S> {}

impl<S> PartialEq for VariableDescriptor<S> {
    fn eq(&self, other: &Self) -> bool {
        self.is_same_variable(other)
    }
}

impl<S> Eq for VariableDescriptor<S> {}

impl<S> fmt::Debug for VariableDescriptor<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariableDescriptor")
            .field("name", &self.name)
            .field("entity_class", &self.entity_class)
            .field("descriptor_index", &self.descriptor_index)
            .field("variable_type", &self.variable_type)
            .finish()
    }
}
