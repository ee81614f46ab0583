use std::collections::HashSet;

use super::*;

fn started(
    solution: ChainedSolution,
    minimum_size: usize,
    maximum_size: usize,
) -> (ChainedDirector, DefaultSubChainSelector<ChainedSolution>) {
    let mut director = chained_director(solution);
    let mut selector = sub_chains(minimum_size, maximum_size);
    selector.solving_started(&mut director);
    (director, selector)
}

#[test]
fn size_matches_iteration_on_one_chain() {
    let (_director, selector) = started(ChainedSolution::lines(1, 5), 1, 2);

    assert_eq!(selector.size(), 9);
    let rendered: Vec<String> = selector.iter().map(|s| s.to_string()).collect();
    assert_eq!(
        rendered,
        [
            "[E0..E0]", "[E0..E1]", "[E1..E1]", "[E1..E2]", "[E2..E2]", "[E2..E3]", "[E3..E3]",
            "[E3..E4]", "[E4..E4]",
        ]
    );
}

#[test]
fn unbounded_maximum_counts_every_run() {
    let (_director, selector) = started(ChainedSolution::lines(2, 3), 1, usize::MAX);

    assert_eq!(selector.size(), 12);
    assert_eq!(selector.iter().count(), 12);
    assert!(selector.iter().all(|s| (1..=3).contains(&s.size())));
}

#[test]
fn chains_shorter_than_minimum_are_skipped() {
    let solution = ChainedSolution::with_chains(&[&["a0", "a1"], &["b0", "b1", "b2", "b3"]]);
    let (_director, selector) = started(solution, 2, 3);

    assert_eq!(selector.size(), 3);
    let rendered: Vec<String> = selector.iter().map(|s| s.to_string()).collect();
    assert_eq!(rendered, ["[E1..E2]", "[E1..E3]", "[E2..E3]"]);
}

#[test]
fn no_chain_long_enough() {
    let (_director, selector) = started(ChainedSolution::lines(2, 2), 3, 4);

    assert_eq!(selector.size(), 0);
    assert_eq!(selector.iter().count(), 0);
    assert!(selector.sample(&mut rng()).is_none());
}

#[test]
fn random_samples_stay_within_bounds() {
    let (mut director, selector) = started(ChainedSolution::lines(3, 4), 2, 3);
    let inverse = director.demand(&SingletonInverseVariableDemand::new(var()).unwrap());
    let all: HashSet<_> = selector.iter().collect();
    let mut rng = rng();

    let mut seen = HashSet::new();
    for _ in 0..500 {
        let sub_chain = selector.sample(&mut rng).unwrap();
        assert!((2..=3).contains(&sub_chain.size()));
        let entities = sub_chain.entity_list(director.supply(inverse));
        assert_eq!(entities.len(), sub_chain.size());
        assert_eq!(entities.last(), Some(&sub_chain.last_entity()));
        assert!(all.contains(&sub_chain));
        seen.insert(sub_chain);
    }
    // 5 per chain; 500 draws hit every one of them.
    assert_eq!(seen.len(), 15);
}

#[test]
fn step_started_refreshes_the_cache() {
    let (mut director, mut selector) = started(ChainedSolution::lines(1, 3), 1, usize::MAX);
    assert_eq!(selector.size(), 6);

    let a3 = director.working_solution().entity("a3");
    director.change_variable_facade(&var(), a3, None);
    assert_eq!(selector.size(), 6);

    selector.step_started(&director);
    assert_eq!(selector.size(), 3);
}

#[test]
fn solving_ended_cancels_the_inverse_demand() {
    let (mut director, mut selector) = started(ChainedSolution::lines(1, 2), 1, 2);
    assert_eq!(inverse_count(&director), 1);

    selector.solving_ended(&mut director);
    assert_eq!(inverse_count(&director), 0);
}

#[test]
#[should_panic(expected = "before solving started")]
fn use_before_solving_started_panics() {
    let selector = sub_chains(1, 2);
    selector.size();
}
