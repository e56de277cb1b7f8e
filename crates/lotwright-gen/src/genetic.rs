//! Shared plumbing for the three genetic searches: configuration,
//! ranking, and tournament selection.

use std::error::Error;
use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Knobs shared by tree, door, and weight evolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaConfig {
    #[serde(default = "default_population_size")]
    pub population_size: usize,
    /// Top candidates copied unchanged into the next generation.
    #[serde(default = "default_elite_count")]
    pub elite_count: usize,
    #[serde(default = "default_tournament_size")]
    pub tournament_size: usize,
    #[serde(default = "default_crossover_rate")]
    pub crossover_rate: f64,
    #[serde(default = "default_mutation_rate")]
    pub mutation_rate: f64,
}

fn default_population_size() -> usize {
    40
}

fn default_elite_count() -> usize {
    4
}

fn default_tournament_size() -> usize {
    3
}

fn default_crossover_rate() -> f64 {
    0.8
}

fn default_mutation_rate() -> f64 {
    0.35
}

impl Default for GaConfig {
    fn default() -> GaConfig {
        GaConfig {
            population_size: default_population_size(),
            elite_count: default_elite_count(),
            tournament_size: default_tournament_size(),
            crossover_rate: default_crossover_rate(),
            mutation_rate: default_mutation_rate(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GaConfigError {
    PopulationTooSmall(usize),
    EliteExceedsPopulation { elite: usize, population: usize },
    ZeroTournament,
    RateOutOfRange { name: &'static str, value: f64 },
}

impl fmt::Display for GaConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GaConfigError::PopulationTooSmall(n) => {
                write!(f, "population of {n} cannot breed, need at least 2")
            }
            GaConfigError::EliteExceedsPopulation { elite, population } => {
                write!(f, "elite count {elite} leaves no room to breed in a population of {population}")
            }
            GaConfigError::ZeroTournament => write!(f, "tournament size must be at least 1"),
            GaConfigError::RateOutOfRange { name, value } => {
                write!(f, "{name} rate {value} outside [0, 1]")
            }
        }
    }
}

impl Error for GaConfigError {}

impl GaConfig {
    /// Sanity checks every search constructor runs before seeding a
    /// population.
    pub fn validate(&self) -> Vec<GaConfigError> {
        let mut errors = Vec::new();
        if self.population_size < 2 {
            errors.push(GaConfigError::PopulationTooSmall(self.population_size));
        }
        if self.elite_count >= self.population_size.max(1) {
            errors.push(GaConfigError::EliteExceedsPopulation {
                elite: self.elite_count,
                population: self.population_size,
            });
        }
        if self.tournament_size == 0 {
            errors.push(GaConfigError::ZeroTournament);
        }
        for (name, value) in [
            ("crossover", self.crossover_rate),
            ("mutation", self.mutation_rate),
        ] {
            if !(0.0..=1.0).contains(&value) {
                errors.push(GaConfigError::RateOutOfRange { name, value });
            }
        }
        errors
    }
}

/// A candidate with the fitness from its last scoring pass. Freshly bred
/// candidates hold 0 until the next pass scores them.
#[derive(Debug, Clone)]
pub struct Scored<T> {
    pub candidate: T,
    pub fitness: f32,
}

/// Sorts descending by fitness, best first; ties keep insertion order.
pub fn rank<T>(population: &mut [Scored<T>]) {
    population.sort_by(|a, b| {
        b.fitness
            .partial_cmp(&a.fitness)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Tournament selection: the best of `size` uniform draws. The
/// population must be non-empty.
pub fn tournament<'a, T>(
    population: &'a [Scored<T>],
    size: usize,
    rng: &mut impl Rng,
) -> &'a Scored<T> {
    let mut best = &population[rng.gen_range(0..population.len())];
    for _ in 1..size.max(1) {
        let pick = &population[rng.gen_range(0..population.len())];
        if pick.fitness > best.fitness {
            best = pick;
        }
    }
    best
}
