//! Selection order configuration for selectors.

use chainforge_config::SelectionOrderConfig;

/// Defines the order in which elements are selected from a selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SelectionOrder {
    /// Inherit the selection order from the enclosing selector.
    ///
    /// Resolves to `Original` when nothing encloses it.
    #[default]
    Inherit,

    /// Select elements in their original order.
    ///
    /// Iteration is deterministic and terminates.
    Original,

    /// Sample elements at random, with replacement.
    ///
    /// Iteration never terminates on its own.
    Random,
}

impl SelectionOrder {
    /// Resolves `Inherit` against the enclosing selector's order.
    ///
    /// The result is never `Inherit`.
    pub fn resolve(self, inherited: SelectionOrder) -> SelectionOrder {
        match (self, inherited) {
            (SelectionOrder::Inherit, SelectionOrder::Inherit) => SelectionOrder::Original,
            (SelectionOrder::Inherit, inherited) => inherited,
            (order, _) => order,
        }
    }

    /// Returns `true` if this selection order samples at random.
    pub fn is_random(&self) -> bool {
        matches!(self, SelectionOrder::Random)
    }
}

impl From<SelectionOrderConfig> for SelectionOrder {
    fn from(config: SelectionOrderConfig) -> Self {
        match config {
            SelectionOrderConfig::Inherit => SelectionOrder::Inherit,
            SelectionOrderConfig::Original => SelectionOrder::Original,
            SelectionOrderConfig::Random => SelectionOrder::Random,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inherit_takes_the_enclosing_order() {
        assert_eq!(SelectionOrder::Inherit.resolve(SelectionOrder::Random), SelectionOrder::Random);
        assert_eq!(SelectionOrder::Inherit.resolve(SelectionOrder::Original), SelectionOrder::Original);
    }

    #[test]
    fn test_top_level_inherit_iterates_in_order() {
        let order = SelectionOrder::Inherit.resolve(SelectionOrder::Inherit);
        assert_eq!(order, SelectionOrder::Original);
        assert!(!order.is_random());
    }

    #[test]
    fn test_explicit_order_wins() {
        assert_eq!(SelectionOrder::Original.resolve(SelectionOrder::Random), SelectionOrder::Original);
        assert_eq!(SelectionOrder::Random.resolve(SelectionOrder::Inherit), SelectionOrder::Random);
    }

    #[test]
    fn test_from_config() {
        assert_eq!(SelectionOrder::from(SelectionOrderConfig::Random), SelectionOrder::Random);
        assert_eq!(SelectionOrder::from(SelectionOrderConfig::Original), SelectionOrder::Original);
        assert_eq!(SelectionOrder::from(SelectionOrderConfig::Inherit), SelectionOrder::Inherit);
    }
}
