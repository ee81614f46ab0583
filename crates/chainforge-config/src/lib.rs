//! Configuration for chainforge move selectors.
//!
//! Load the chained neighborhoods of a local search from TOML or YAML
//! instead of wiring selectors in code.
//!
//! # Examples
//!
//! ```
//! use chainforge_config::{ChainedSolverConfig, MoveSelectorConfig, SelectionOrderConfig};
//!
//! let config = ChainedSolverConfig::from_toml_str(r#"
//!     random_seed = 7
//!
//!     [[move_selectors]]
//!     type = "chained_change"
//!
//!     [[move_selectors]]
//!     type = "sub_chain_swap"
//!     selection_order = "random"
//!     maximum_size = 3
//!     select_reversing_move_too = true
//! "#).unwrap();
//!
//! assert_eq!(config.random_seed, Some(7));
//! assert_eq!(config.move_selectors.len(), 2);
//! assert_eq!(
//!     config.move_selectors[1].selection_order(),
//!     SelectionOrderConfig::Random
//! );
//! ```

use std::path::Path;

use chainforge_core::SolverForgeError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<ConfigError> for SolverForgeError {
    fn from(err: ConfigError) -> Self {
        SolverForgeError::Config(err.to_string())
    }
}

/// Move selectors of one chained local search.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ChainedSolverConfig {
    /// Random seed for reproducible results.
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Move selector configurations, in the order they are tried.
    #[serde(default)]
    pub move_selectors: Vec<MoveSelectorConfig>,
}

impl ChainedSolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML or YAML file, chosen by extension.
    ///
    /// Files without a `.yaml`/`.yml` extension are read as TOML.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, does not parse, or fails
    /// [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml_str(&contents),
            _ => Self::from_toml_str(&contents),
        }
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Adds a move selector.
    pub fn with_move_selector(mut self, selector: MoveSelectorConfig) -> Self {
        self.move_selectors.push(selector);
        self
    }

    /// Checks the bounds that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.move_selectors.iter().try_for_each(MoveSelectorConfig::validate)
    }
}

/// Selection order as written in configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionOrderConfig {
    /// Resolved by the selector builder.
    #[default]
    Inherit,
    Original,
    Random,
}

/// Size bounds of the sub-chains a selector produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SubChainConfig {
    #[serde(default = "default_minimum_size")]
    pub minimum_size: usize,

    /// Unbounded when absent.
    #[serde(default)]
    pub maximum_size: Option<usize>,
}

fn default_minimum_size() -> usize {
    1
}

impl Default for SubChainConfig {
    fn default() -> Self {
        Self {
            minimum_size: default_minimum_size(),
            maximum_size: None,
        }
    }
}

impl SubChainConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.minimum_size < 1 {
            return Err(ConfigError::Invalid(format!(
                "minimum_size ({}) must be at least 1",
                self.minimum_size
            )));
        }
        match self.maximum_size {
            Some(max) if max < self.minimum_size => Err(ConfigError::Invalid(format!(
                "maximum_size ({}) must not be below minimum_size ({})",
                max, self.minimum_size
            ))),
            _ => Ok(()),
        }
    }
}

/// Move selector configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MoveSelectorConfig {
    /// Relocates single entities.
    ChainedChange(ChainedChangeConfig),

    /// Relocates sub-chains.
    SubChainChange(SubChainChangeConfig),

    /// Exchanges pairs of sub-chains.
    SubChainSwap(SubChainSwapConfig),

    /// Unassigns sub-chains.
    SubChainRuin(SubChainRuinConfig),

    /// 2-opt over chains.
    TailChainSwap(TailChainSwapConfig),

    /// Random K-opt.
    KOpt(KOptConfig),
}

impl MoveSelectorConfig {
    /// Returns the configured selection order.
    pub fn selection_order(&self) -> SelectionOrderConfig {
        match self {
            MoveSelectorConfig::ChainedChange(c) => c.selection_order,
            MoveSelectorConfig::SubChainChange(c) => c.selection_order,
            MoveSelectorConfig::SubChainSwap(c) => c.selection_order,
            MoveSelectorConfig::SubChainRuin(c) => c.selection_order,
            MoveSelectorConfig::TailChainSwap(c) => c.selection_order,
            MoveSelectorConfig::KOpt(c) => c.selection_order,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match self {
            MoveSelectorConfig::SubChainChange(c) => c.sub_chain.validate(),
            MoveSelectorConfig::SubChainSwap(c) => c.sub_chain.validate(),
            MoveSelectorConfig::SubChainRuin(c) => c.sub_chain.validate(),
            MoveSelectorConfig::KOpt(c) if c.k < 2 => Err(ConfigError::Invalid(format!(
                "k_opt needs k >= 2, got {}",
                c.k
            ))),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ChainedChangeConfig {
    #[serde(default)]
    pub selection_order: SelectionOrderConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SubChainChangeConfig {
    #[serde(default)]
    pub selection_order: SelectionOrderConfig,

    #[serde(flatten)]
    pub sub_chain: SubChainConfig,

    /// Also emit the reversing twin of every move.
    #[serde(default)]
    pub select_reversing_move_too: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SubChainSwapConfig {
    #[serde(default)]
    pub selection_order: SelectionOrderConfig,

    #[serde(flatten)]
    pub sub_chain: SubChainConfig,

    /// Bounds of the right-hand sub-chains. Shares the left bounds when absent.
    #[serde(default)]
    pub secondary_sub_chain: Option<SubChainConfig>,

    /// Also emit the reversing twin of every move.
    #[serde(default)]
    pub select_reversing_move_too: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SubChainRuinConfig {
    #[serde(default)]
    pub selection_order: SelectionOrderConfig,

    #[serde(flatten)]
    pub sub_chain: SubChainConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TailChainSwapConfig {
    #[serde(default)]
    pub selection_order: SelectionOrderConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct KOptConfig {
    /// Must resolve to random; original order is rejected by the builder.
    #[serde(default = "random_order")]
    pub selection_order: SelectionOrderConfig,

    /// Number of cut points.
    #[serde(default = "default_k")]
    pub k: usize,
}

fn random_order() -> SelectionOrderConfig {
    SelectionOrderConfig::Random
}

fn default_k() -> usize {
    3
}

impl Default for KOptConfig {
    fn default() -> Self {
        Self {
            selection_order: random_order(),
            k: default_k(),
        }
    }
}

#[cfg(test)]
mod tests;
