//! Learns evaluator weights from plan preference pairs.
//!
//! Training data is a list of (better, worse) feature pairs taken from
//! plans a human has ranked. Fitness of a weight set is the fraction of
//! pairs it orders correctly, so the frobber climbs toward weights that
//! agree with the rankings it was shown.

use rand::Rng;

use crate::evaluator::{FloorplanEvaluator, PlanFeatures, TreeWeights};
use crate::genetic::{rank, tournament, GaConfig, GaConfigError, Scored};

/// One training example: the left plan should outscore the right.
pub type PreferencePair = (PlanFeatures, PlanFeatures);

pub struct GeneticWeightFrobber {
    config: GaConfig,
    pairs: Vec<PreferencePair>,
    pub population: Vec<Scored<TreeWeights>>,
}

impl GeneticWeightFrobber {
    /// Seeds the population with `seed` itself plus jittered copies of
    /// it, so the search starts near whatever was tuned last. Reports
    /// every config problem at once rather than the first one hit.
    pub fn new(
        seed: TreeWeights,
        pairs: Vec<PreferencePair>,
        config: GaConfig,
        rng: &mut impl Rng,
    ) -> Result<GeneticWeightFrobber, Vec<GaConfigError>> {
        let errors = config.validate();
        if !errors.is_empty() {
            return Err(errors);
        }
        let size = config.population_size;
        let mut population = Vec::with_capacity(size);
        population.push(Scored {
            candidate: seed,
            fitness: 0.0,
        });
        while population.len() < size {
            let mut jittered = seed;
            for i in 0..TreeWeights::COEFFICIENTS.len() {
                let stretched = jittered.get(i) * rng.gen_range(0.25..1.75);
                jittered.set(i, stretched + rng.gen_range(-0.5..0.5));
            }
            population.push(Scored {
                candidate: jittered,
                fitness: 0.0,
            });
        }
        Ok(GeneticWeightFrobber {
            config,
            pairs,
            population,
        })
    }

    /// Fraction of preference pairs the weights rank correctly.
    pub fn ranking_accuracy(weights: &TreeWeights, pairs: &[PreferencePair]) -> f32 {
        if pairs.is_empty() {
            return 0.0;
        }
        let correct = pairs
            .iter()
            .filter(|(better, worse)| {
                FloorplanEvaluator::score_features(better, weights)
                    > FloorplanEvaluator::score_features(worse, weights)
            })
            .count();
        correct as f32 / pairs.len() as f32
    }

    pub fn run_generation(&mut self, rng: &mut impl Rng) {
        for entry in &mut self.population {
            entry.fitness = Self::ranking_accuracy(&entry.candidate, &self.pairs);
        }
        rank(&mut self.population);

        let elite = self.config.elite_count.min(self.population.len());
        let mut next = self.population[..elite].to_vec();
        while next.len() < self.population.len() {
            let parent = tournament(&self.population, self.config.tournament_size, rng);
            let mut child = if rng.gen_bool(self.config.crossover_rate) {
                let donor = tournament(&self.population, self.config.tournament_size, rng);
                crossover_weights(&parent.candidate, &donor.candidate, rng)
            } else {
                parent.candidate
            };
            if rng.gen_bool(self.config.mutation_rate) {
                mutate_weights(&mut child, rng);
            }
            next.push(Scored {
                candidate: child,
                fitness: 0.0,
            });
        }
        self.population = next;
    }

    /// Best weight set of the last ranked generation.
    pub fn best(&self) -> Option<&Scored<TreeWeights>> {
        self.population.first()
    }
}

/// Uniform coefficient-wise crossover.
fn crossover_weights(a: &TreeWeights, b: &TreeWeights, rng: &mut impl Rng) -> TreeWeights {
    let mut child = *a;
    for i in 0..TreeWeights::COEFFICIENTS.len() {
        if rng.gen_bool(0.5) {
            child.set(i, b.get(i));
        }
    }
    child
}

/// Jitters one coefficient, additive plus proportional so large and tiny
/// weights both keep moving.
fn mutate_weights(weights: &mut TreeWeights, rng: &mut impl Rng) {
    let i = rng.gen_range(0..TreeWeights::COEFFICIENTS.len());
    let jitter = rng.gen_range(-0.3..0.3) * (1.0 + weights.get(i).abs());
    weights.set(i, weights.get(i) + jitter);
}
