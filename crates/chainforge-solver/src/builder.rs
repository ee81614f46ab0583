//! Builder module for constructing move selectors from configuration
//!
//! This module provides the wiring between `chainforge_config` types and
//! the selectors of the `heuristic` module.

use chainforge_config::{ChainedSolverConfig, MoveSelectorConfig, SubChainConfig};
use chainforge_core::{PlanningSolution, Result, VariableDescriptor};

use crate::heuristic::selector::{
    AnyChainedMoveSelector, ChainedChangeMoveSelector, ChainedValueSelector,
    DefaultSubChainSelector, FromSolutionEntitySelector, KOptMoveSelector, SelectionOrder,
    SubChainChangeMoveSelector, SubChainRuinMoveSelector, SubChainSwapMoveSelector,
    TailChainSwapMoveSelector,
};

/// Builds one move selector over `variable` from its configuration.
///
/// Shorthand for [`MoveSelectorBuilder::build`].
pub fn build_move_selector<S: PlanningSolution>(
    config: &MoveSelectorConfig,
    variable: VariableDescriptor<S>,
) -> Result<AnyChainedMoveSelector<S>> {
    MoveSelectorBuilder::build(config, variable)
}

/// Builder for constructing move selectors from configuration.
pub struct MoveSelectorBuilder;

impl MoveSelectorBuilder {
    /// Builds one move selector over `variable`.
    ///
    /// Child entity and value selectors inherit the move selector's order.
    /// Sub-chain selectors always iterate in original order; random move
    /// selectors sample them directly.
    ///
    /// # Errors
    ///
    /// Returns [`SolverForgeError::Config`](chainforge_core::SolverForgeError::Config)
    /// if the configuration is invalid for `variable`.
    pub fn build<S: PlanningSolution>(
        config: &MoveSelectorConfig,
        variable: VariableDescriptor<S>,
    ) -> Result<AnyChainedMoveSelector<S>> {
        let order = SelectionOrder::from(config.selection_order());
        let entities = || FromSolutionEntitySelector::new(variable);
        let values = || ChainedValueSelector::new(variable);

        let selector: AnyChainedMoveSelector<S> = match config {
            MoveSelectorConfig::ChainedChange(_) => {
                ChainedChangeMoveSelector::new(entities(), values(), order)?.into()
            }
            MoveSelectorConfig::SubChainChange(c) => SubChainChangeMoveSelector::new(
                Self::sub_chain_selector(variable, &c.sub_chain)?,
                values(),
                order,
                c.select_reversing_move_too,
            )?
            .into(),
            MoveSelectorConfig::SubChainSwap(c) => {
                let left = Self::sub_chain_selector(variable, &c.sub_chain)?;
                match &c.secondary_sub_chain {
                    Some(secondary) => SubChainSwapMoveSelector::with_right(
                        left,
                        Self::sub_chain_selector(variable, secondary)?,
                        order,
                        c.select_reversing_move_too,
                    )?,
                    None => SubChainSwapMoveSelector::new(left, order, c.select_reversing_move_too)?,
                }
                .into()
            }
            MoveSelectorConfig::SubChainRuin(c) => {
                SubChainRuinMoveSelector::new(Self::sub_chain_selector(variable, &c.sub_chain)?, order)?
                    .into()
            }
            MoveSelectorConfig::TailChainSwap(_) => {
                TailChainSwapMoveSelector::new(entities(), values(), order)?.into()
            }
            MoveSelectorConfig::KOpt(c) => KOptMoveSelector::new(entities(), values(), c.k, order)?.into(),
        };

        tracing::debug!(
            variable = variable.name,
            selector = selector.kind(),
            order = ?order,
            "Built move selector"
        );
        Ok(selector)
    }

    /// Builds every move selector of `config`, in declaration order.
    pub fn build_all<S: PlanningSolution>(
        config: &ChainedSolverConfig,
        variable: VariableDescriptor<S>,
    ) -> Result<Vec<AnyChainedMoveSelector<S>>> {
        config.validate()?;
        config
            .move_selectors
            .iter()
            .map(|selector| Self::build(selector, variable))
            .collect()
    }

    fn sub_chain_selector<S: PlanningSolution>(
        variable: VariableDescriptor<S>,
        config: &SubChainConfig,
    ) -> Result<DefaultSubChainSelector<S>> {
        DefaultSubChainSelector::new(
            ChainedValueSelector::new(variable).with_order(SelectionOrder::Original),
            config.minimum_size,
            config.maximum_size.unwrap_or(usize::MAX),
            SelectionOrder::Original,
        )
    }
}
