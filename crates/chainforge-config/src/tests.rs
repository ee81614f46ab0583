//! Tests for move selector configuration.

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        random_seed = 42

        [[move_selectors]]
        type = "chained_change"
        selection_order = "original"

        [[move_selectors]]
        type = "sub_chain_change"
        minimum_size = 2
        maximum_size = 4
        select_reversing_move_too = true

        [[move_selectors]]
        type = "k_opt"
    "#;

    let config = ChainedSolverConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.random_seed, Some(42));
    assert_eq!(config.move_selectors.len(), 3);
    assert_eq!(
        config.move_selectors[0],
        MoveSelectorConfig::ChainedChange(ChainedChangeConfig {
            selection_order: SelectionOrderConfig::Original,
        })
    );
    assert_eq!(
        config.move_selectors[1],
        MoveSelectorConfig::SubChainChange(SubChainChangeConfig {
            selection_order: SelectionOrderConfig::Inherit,
            sub_chain: SubChainConfig {
                minimum_size: 2,
                maximum_size: Some(4),
            },
            select_reversing_move_too: true,
        })
    );
    assert_eq!(
        config.move_selectors[2],
        MoveSelectorConfig::KOpt(KOptConfig::default())
    );
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        random_seed: 3
        move_selectors:
          - type: sub_chain_swap
            selection_order: random
            maximum_size: 2
            secondary_sub_chain:
              minimum_size: 1
              maximum_size: 1
          - type: tail_chain_swap
          - type: sub_chain_ruin
    "#;

    let config = ChainedSolverConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.random_seed, Some(3));

    let MoveSelectorConfig::SubChainSwap(swap) = &config.move_selectors[0] else {
        panic!("expected a sub_chain_swap, got {:?}", config.move_selectors[0]);
    };
    assert_eq!(swap.sub_chain.minimum_size, 1);
    assert_eq!(swap.sub_chain.maximum_size, Some(2));
    assert_eq!(
        swap.secondary_sub_chain,
        Some(SubChainConfig {
            minimum_size: 1,
            maximum_size: Some(1),
        })
    );
    assert!(!swap.select_reversing_move_too);
    assert_eq!(
        config.move_selectors[1].selection_order(),
        SelectionOrderConfig::Inherit
    );
}

#[test]
fn test_builder() {
    let config = ChainedSolverConfig::new()
        .with_random_seed(9)
        .with_move_selector(MoveSelectorConfig::TailChainSwap(TailChainSwapConfig::default()));

    assert_eq!(config.random_seed, Some(9));
    assert_eq!(config.move_selectors.len(), 1);
    assert!(config.validate().is_ok());
}

#[test]
fn test_unknown_selector_type() {
    let toml = r#"
        [[move_selectors]]
        type = "pillar_swap"
    "#;

    assert!(matches!(
        ChainedSolverConfig::from_toml_str(toml),
        Err(ConfigError::Toml(_))
    ));
}

#[test]
fn test_invalid_sub_chain_bounds() {
    let toml = r#"
        [[move_selectors]]
        type = "sub_chain_ruin"
        minimum_size = 3
        maximum_size = 2
    "#;

    let err = ChainedSolverConfig::from_toml_str(toml).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
    assert!(err.to_string().contains("maximum_size (2)"));
}

#[test]
fn test_invalid_k() {
    let yaml = r#"
        move_selectors:
          - type: k_opt
            k: 1
    "#;

    assert!(matches!(
        ChainedSolverConfig::from_yaml_str(yaml),
        Err(ConfigError::Invalid(_))
    ));
}

#[test]
fn test_converts_into_solver_error() {
    let err: SolverForgeError = ConfigError::Invalid("bad".to_string()).into();
    assert!(matches!(err, SolverForgeError::Config(msg) if msg.contains("bad")));
}

#[test]
fn test_load_missing_file() {
    let result = ChainedSolverConfig::load("/nonexistent/chainforge.toml");
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn test_load_by_extension() {
    let dir = std::env::temp_dir();
    let path = dir.join(format!("chainforge-config-{}.yaml", std::process::id()));
    std::fs::write(&path, "random_seed: 5\nmove_selectors:\n  - type: chained_change\n").unwrap();

    let config = ChainedSolverConfig::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(config.random_seed, Some(5));
    assert_eq!(config.move_selectors.len(), 1);
}
