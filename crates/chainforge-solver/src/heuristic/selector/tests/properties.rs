//! Chain invariants over random move sequences.

use chainforge_core::{ChainValue, PlanningSolution};
use chainforge_test::assert_chain_invariants;
use proptest::prelude::*;
use rand::Rng;

use super::*;
use crate::heuristic::r#move::{AnchorId, InverseId, Move};

fn neighborhoods() -> Vec<AnyChainedMoveSelector<ChainedSolution>> {
    let random = SelectionOrder::Random;
    vec![
        ChainedChangeMoveSelector::new(entities(), values(), random).unwrap().into(),
        SubChainChangeMoveSelector::new(sub_chains(1, 3), values(), random, true)
            .unwrap()
            .into(),
        SubChainSwapMoveSelector::new(sub_chains(1, 3), random, true).unwrap().into(),
        TailChainSwapMoveSelector::new(entities(), values(), random).unwrap().into(),
        KOptMoveSelector::new(entities(), values(), 3, random).unwrap().into(),
        KOptMoveSelector::new(entities(), values(), 4, random).unwrap().into(),
    ]
}

/// Both supplies must agree with a fresh walk over the solution.
fn assert_supplies_exact(
    director: &ChainedDirector,
    inverse: InverseId<ChainedSolution>,
    anchor: AnchorId<ChainedSolution>,
) {
    let solution = director.working_solution();
    let (inverse, anchor) = (director.supply(inverse), director.supply(anchor));
    for (idx, entity) in solution.entities.iter().enumerate() {
        if let Some(value) = entity.previous {
            assert_eq!(inverse.get_inverse_singleton(value), Some(idx));
        }

        let mut current = entity.previous;
        let expected = loop {
            match current {
                Some(ChainValue::Anchor(a)) => break Some(a),
                Some(ChainValue::Entity(e)) => current = solution.entities[e].previous,
                None => break None,
            }
        };
        assert_eq!(anchor.get_anchor(idx), expected, "anchor of {}", entity.name);
    }
}

fn session(
    chains: usize,
    length: usize,
) -> (ChainedDirector, InverseId<ChainedSolution>, AnchorId<ChainedSolution>) {
    let mut director = chained_director(ChainedSolution::lines(chains, length));
    let inverse = director.demand(&SingletonInverseVariableDemand::new(var()).unwrap());
    let anchor = director.demand(&AnchorVariableDemand::new(var()).unwrap());
    (director, inverse, anchor)
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

    #[test]
    fn random_moves_keep_chains_valid_and_undo_restores(
        chains in 1usize..4,
        length in 1usize..7,
        seed in any::<u64>(),
        steps in 1usize..40,
    ) {
        let (mut director, inverse, anchor) = session(chains, length);
        let mut selectors = neighborhoods();
        for selector in &mut selectors {
            selector.solving_started(&mut director);
        }
        let mut rng = StdRng::seed_from_u64(seed);

        for step in 0..steps {
            let selector = &mut selectors[step % 6];
            selector.step_started(&director);
            let candidate = selector
                .iter_moves(&director, &mut rng)
                .take(20)
                .find(|m| m.is_doable(&director));
            let Some(m) = candidate else {
                continue;
            };

            let before = director.working_solution().snapshot();
            let undo = m.create_undo_move(&director).unwrap();
            m.do_move(&mut director);
            assert_chain_invariants(director.working_solution());
            assert_supplies_exact(&director, inverse, anchor);
            prop_assert_eq!(
                director.working_solution().entities.iter().filter(|e| e.previous.is_some()).count(),
                chains * length,
                "{} unassigned an entity", m
            );

            if rng.random_bool(0.5) {
                prop_assert!(undo.is_doable(&director), "undo of {} is not doable", m);
                undo.do_move(&mut director);
                assert_chain_invariants(director.working_solution());
                assert_supplies_exact(&director, inverse, anchor);
                prop_assert_eq!(director.working_solution().snapshot(), before, "undo of {} did not restore", m);
            }
        }

        for selector in &mut selectors {
            selector.solving_ended(&mut director);
        }
        prop_assert_eq!(director.supply_manager().len(), 2);
    }

    #[test]
    fn ruin_unassigns_exactly_its_sub_chain(
        chains in 1usize..4,
        length in 1usize..7,
        seed in any::<u64>(),
    ) {
        let (mut director, inverse, anchor) = session(chains, length);
        let mut selector = SubChainRuinMoveSelector::new(sub_chains(1, 4), SelectionOrder::Random).unwrap();
        selector.solving_started(&mut director);
        let mut rng = StdRng::seed_from_u64(seed);

        let m = selector.iter_moves(&director, &mut rng).next().unwrap();
        let ChainedMove::SubChainRuin(ruin) = &m else {
            panic!("expected a ruin move, got {m}");
        };
        let ruined = ruin.sub_chain().entity_list(director.supply(inverse));
        prop_assert!(m.is_doable(&director));
        m.do_move(&mut director);

        assert_chain_invariants(director.working_solution());
        assert_supplies_exact(&director, inverse, anchor);
        let solution = director.working_solution();
        prop_assert!(!solution.is_initialized());
        for (idx, entity) in solution.entities.iter().enumerate() {
            prop_assert_eq!(entity.previous.is_none(), ruined.contains(&idx));
        }
        selector.solving_ended(&mut director);
    }
}
