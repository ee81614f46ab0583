//! Values a chained planning variable can point at.

use std::fmt;

/// The value of a chained planning variable.
///
/// A chained entity points either at a fixed anchor (the root of a chain,
/// e.g. a vehicle) or at another entity (its predecessor). Both are indices
/// into the working solution's arenas.
///
/// # Example
///
/// ```
/// use chainforge_core::ChainValue;
///
/// let depot = ChainValue::Anchor(0);
/// let visit = ChainValue::Entity(3);
///
/// assert!(depot.is_anchor());
/// assert_eq!(visit.entity(), Some(3));
/// assert_eq!(format!("{depot} <- {visit}"), "A0 <- E3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChainValue {
    /// A chain root. Anchors are never chained themselves.
    Anchor(usize),
    /// Another planning entity of the same chained variable.
    Entity(usize),
}

impl ChainValue {
    /// Returns true if this value is an anchor.
    #[inline]
    pub fn is_anchor(&self) -> bool {
        matches!(self, ChainValue::Anchor(_))
    }

    /// Returns true if this value is a planning entity.
    #[inline]
    pub fn is_entity(&self) -> bool {
        matches!(self, ChainValue::Entity(_))
    }

    /// Returns the entity index, if this value is an entity.
    #[inline]
    pub fn entity(&self) -> Option<usize> {
        match self {
            ChainValue::Entity(idx) => Some(*idx),
            ChainValue::Anchor(_) => None,
        }
    }

    /// Returns the anchor index, if this value is an anchor.
    #[inline]
    pub fn anchor(&self) -> Option<usize> {
        match self {
            ChainValue::Anchor(idx) => Some(*idx),
            ChainValue::Entity(_) => None,
        }
    }
}

impl fmt::Display for ChainValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainValue::Anchor(idx) => write!(f, "A{idx}"),
            ChainValue::Entity(idx) => write!(f, "E{idx}"),
        }
    }
}
