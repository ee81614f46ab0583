//! Chained solution fixtures.
//!
//! Anchors and entities carry names (`a0`, `a1`, ...) so tests read like the
//! chains they describe, and an `x` coordinate so a distance score exists.

use chainforge_core::{ChainValue, PlanningSolution, SimpleScore, VariableDescriptor};
use chainforge_scoring::SimpleScoreDirector;

/// A fixed chain root, e.g. a vehicle.
#[derive(Clone, Debug, PartialEq)]
pub struct ChainedAnchor {
    pub id: u64,
    pub name: String,
    pub x: i64,
}

/// A chained planning entity, e.g. a customer visit.
#[derive(Clone, Debug, PartialEq)]
pub struct ChainedEntity {
    pub id: u64,
    pub name: String,
    pub x: i64,
    pub previous: Option<ChainValue>,
}

/// A solution with one chained variable, `ChainedEntity.previous`.
#[derive(Clone, Debug, Default)]
pub struct ChainedSolution {
    pub anchors: Vec<ChainedAnchor>,
    pub entities: Vec<ChainedEntity>,
    pub score: Option<SimpleScore>,
}

impl PlanningSolution for ChainedSolution {
    type Score = SimpleScore;

    fn score(&self) -> Option<Self::Score> {
        self.score
    }

    fn set_score(&mut self, score: Option<Self::Score>) {
        self.score = score;
    }

    fn is_initialized(&self) -> bool {
        self.entities.iter().all(|e| e.previous.is_some())
    }
}

impl ChainedSolution {
    /// Builds a solution from named chains.
    ///
    /// The first name of each chain is its anchor, the rest are entities in
    /// chain order. Ids and `x` coordinates follow declaration order.
    pub fn with_chains(chains: &[&[&str]]) -> Self {
        let mut solution = Self::default();
        let mut next_id = 0u64;
        for chain in chains {
            let Some((anchor, entities)) = chain.split_first() else {
                continue;
            };
            let anchor_idx = solution.anchors.len();
            solution.anchors.push(ChainedAnchor {
                id: next_id,
                name: anchor.to_string(),
                x: next_id as i64,
            });
            next_id += 1;

            let mut previous = ChainValue::Anchor(anchor_idx);
            for name in entities {
                let entity_idx = solution.entities.len();
                solution.entities.push(ChainedEntity {
                    id: next_id,
                    name: name.to_string(),
                    x: next_id as i64,
                    previous: Some(previous),
                });
                next_id += 1;
                previous = ChainValue::Entity(entity_idx);
            }
        }
        solution
    }

    /// Adds unassigned entities.
    pub fn with_unassigned(mut self, names: &[&str]) -> Self {
        let mut next_id = self.anchors.len() as u64 + self.entities.len() as u64;
        for name in names {
            self.entities.push(ChainedEntity {
                id: next_id,
                name: name.to_string(),
                x: next_id as i64,
                previous: None,
            });
            next_id += 1;
        }
        self
    }

    /// Builds the standard line of `chain_count` chains of `chain_length` entities.
    ///
    /// Chains are named `a`, `b`, `c`, ... and entities `a1..aN`.
    pub fn lines(chain_count: usize, chain_length: usize) -> Self {
        let names: Vec<Vec<String>> = (0..chain_count)
            .map(|c| {
                let letter = (b'a' + c as u8) as char;
                (0..=chain_length).map(|i| format!("{letter}{i}")).collect()
            })
            .collect();
        let refs: Vec<Vec<&str>> = names
            .iter()
            .map(|chain| chain.iter().map(String::as_str).collect())
            .collect();
        let slices: Vec<&[&str]> = refs.iter().map(Vec::as_slice).collect();
        Self::with_chains(&slices)
    }

    /// Returns the index of the entity named `name`.
    ///
    /// # Panics
    /// Panics if no entity has that name.
    pub fn entity(&self, name: &str) -> usize {
        self.entities
            .iter()
            .position(|e| e.name == name)
            .unwrap_or_else(|| panic!("no entity named {name}"))
    }

    /// Returns the index of the anchor named `name`.
    ///
    /// # Panics
    /// Panics if no anchor has that name.
    pub fn anchor(&self, name: &str) -> usize {
        self.anchors
            .iter()
            .position(|a| a.name == name)
            .unwrap_or_else(|| panic!("no anchor named {name}"))
    }

    /// Returns the chained value named `name`, anchor or entity.
    pub fn value(&self, name: &str) -> ChainValue {
        match self.anchors.iter().position(|a| a.name == name) {
            Some(idx) => ChainValue::Anchor(idx),
            None => ChainValue::Entity(self.entity(name)),
        }
    }

    /// Returns the display name of a value.
    pub fn name_of(&self, value: ChainValue) -> &str {
        match value {
            ChainValue::Anchor(idx) => &self.anchors[idx].name,
            ChainValue::Entity(idx) => &self.entities[idx].name,
        }
    }

    /// Returns the names of the chain rooted at `anchor`, anchor first.
    ///
    /// Walks forward by scanning, independent of any supply.
    pub fn chain_names(&self, anchor: &str) -> Vec<String> {
        let mut names = vec![anchor.to_string()];
        let mut value = ChainValue::Anchor(self.anchor(anchor));
        for _ in 0..self.entities.len() {
            let Some(next) = self.entities.iter().position(|e| e.previous == Some(value)) else {
                break;
            };
            names.push(self.entities[next].name.clone());
            value = ChainValue::Entity(next);
        }
        names
    }

    /// Returns the `previous` value of every entity, in index order.
    pub fn snapshot(&self) -> Vec<Option<ChainValue>> {
        self.entities.iter().map(|e| e.previous).collect()
    }
}

/// Descriptor of `ChainedEntity.previous`, with planning ids.
pub fn previous_var() -> VariableDescriptor<ChainedSolution> {
    VariableDescriptor::<ChainedSolution>::chained(
        "previous",
        "ChainedEntity",
        0,
        |s| s.entities.len(),
        |s| s.anchors.len(),
        |s, i| s.entities[i].previous,
        |s, i, v| s.entities[i].previous = v,
    )
    .with_planning_ids(|s, i| s.entities[i].id, |s, i| s.anchors[i].id)
}

/// Descriptor over the same field, declared as a genuine variable.
pub fn genuine_var() -> VariableDescriptor<ChainedSolution> {
    VariableDescriptor::<ChainedSolution>::genuine(
        "previous",
        "ChainedEntity",
        0,
        |s| s.entities.len(),
        |s| s.anchors.len(),
        |s, i| s.entities[i].previous,
        |s, i, v| s.entities[i].previous = v,
    )
}

/// Negative total travel distance: each entity pays `|x - x(previous)|`.
pub fn distance_score(solution: &ChainedSolution) -> SimpleScore {
    let total: i64 = solution
        .entities
        .iter()
        .filter_map(|e| {
            let from = match e.previous? {
                ChainValue::Anchor(idx) => solution.anchors[idx].x,
                ChainValue::Entity(idx) => solution.entities[idx].x,
            };
            Some((e.x - from).abs())
        })
        .sum();
    SimpleScore::of(-total)
}

/// Score director type used throughout the chainforge tests.
pub type ChainedDirector = SimpleScoreDirector<ChainedSolution, fn(&ChainedSolution) -> SimpleScore>;

/// Creates a score director over `solution` scored by [`distance_score`].
pub fn chained_director(solution: ChainedSolution) -> ChainedDirector {
    SimpleScoreDirector::new(solution, distance_score as fn(&ChainedSolution) -> SimpleScore)
}

/// Asserts that the chain rooted at `names[0]` is exactly `names`.
///
/// Checks every predecessor pointer and that nothing trails the last entity.
///
/// # Panics
/// Panics with the actual chain when it differs.
pub fn assert_chain(solution: &ChainedSolution, names: &[&str]) {
    let actual = solution.chain_names(names[0]);
    assert_eq!(actual, names, "chain rooted at {} differs", names[0]);
    for pair in names.windows(2) {
        let entity = solution.entity(pair[1]);
        assert_eq!(
            solution.entities[entity].previous,
            Some(solution.value(pair[0])),
            "{} must point at {}",
            pair[1],
            pair[0]
        );
    }
}

/// Asserts acyclicity and the singleton inverse over the whole solution.
///
/// # Panics
/// Panics naming the first violating entity.
pub fn assert_chain_invariants(solution: &ChainedSolution) {
    let n = solution.entities.len();
    let mut seen = std::collections::HashMap::new();
    for (idx, entity) in solution.entities.iter().enumerate() {
        if let Some(value) = entity.previous {
            if let Some(other) = seen.insert(value, idx) {
                panic!(
                    "{} and {} both point at {}",
                    solution.entities[other].name,
                    entity.name,
                    solution.name_of(value)
                );
            }
        }

        let mut current = entity.previous;
        let mut steps = 0;
        while let Some(ChainValue::Entity(previous)) = current {
            steps += 1;
            assert!(steps <= n, "{} is part of a cycle", entity.name);
            current = solution.entities[previous].previous;
        }
    }
}
