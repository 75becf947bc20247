use serde::{Deserialize, Serialize};

use crate::classroom::DeskType;

/// Mutation probability used when the request does not set `MutationChance`.
pub const DEFAULT_MUTATION_CHANCE: f64 = 0.2;

/// A student as submitted by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct StudentRecord {
    #[serde(rename = "ID")]
    pub id: i64,
    pub name: String,
    pub preferred_rows: Vec<usize>,
    pub preferred_columns: Vec<usize>,
    pub medical_preferred_rows: Vec<usize>,
    pub medical_preferred_columns: Vec<usize>,
}

/// Classroom dimensions and desk layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ClassConfig {
    pub rows: usize,
    pub columns: usize,
    #[serde(alias = "deskType")]
    pub desk_type: DeskType,
}

/// Relative importance of each scoring term, typically in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PriorityWeights {
    pub medical: f64,
    pub preferences: f64,
    pub friends: f64,
    pub enemies: f64,
    pub fill: f64,
}

/// An unordered pair of student ids (`[a, b]` on the wire).
pub type IdPair = (i64, i64);

/// Everything needed for one optimization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SeatingRequest {
    pub students: Vec<StudentRecord>,
    /// Friend pairs; friends score higher when seated close together.
    pub preferences: Vec<IdPair>,
    /// Enemy pairs; enemies are penalized within a two-seat radius.
    pub forbidden: Vec<IdPair>,
    pub class_config: ClassConfig,
    pub pop_size: usize,
    pub generations: usize,
    /// Reserved. Accepted for compatibility with existing clients but never read;
    /// every offspring is produced by crossover.
    pub cross_over_chance: f64,
    /// Probability of applying a swap mutation to each offspring.
    pub mutation_chance: f64,
    pub priority_weights: PriorityWeights,
    /// Seed for the run's random streams. A fresh seed is drawn when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for SeatingRequest {
    fn default() -> Self {
        Self {
            students: vec![],
            preferences: vec![],
            forbidden: vec![],
            class_config: ClassConfig::default(),
            pop_size: 0,
            generations: 0,
            cross_over_chance: 0.0,
            mutation_chance: DEFAULT_MUTATION_CHANCE,
            priority_weights: PriorityWeights::default(),
            seed: None,
        }
    }
}
