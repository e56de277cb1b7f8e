//! Genetic search over door placements for a finished plan.
//!
//! The plan is frozen for the whole search; candidates are door lists
//! aligned position-for-position with the plan's eligible edges, so
//! uniform crossover mixes placements without any bookkeeping.

use rand::Rng;

use lotwright_core::door::Door;
use lotwright_core::plan::FloorPlan;

use crate::doors::{DoorJudge, PlacedDoor, RandomDoorGenerator, DOOR_WIDTH_MAX, DOOR_WIDTH_MIN};
use crate::genetic::{rank, tournament, GaConfig, GaConfigError, Scored};

pub struct GeneticDoorShaker {
    plan: FloorPlan,
    judge: DoorJudge,
    config: GaConfig,
    pub population: Vec<Scored<Vec<PlacedDoor>>>,
}

impl GeneticDoorShaker {
    /// Seeds random candidates over the plan's eligible edges, after
    /// rejecting any config the breeding loop could not run with.
    pub fn new(
        plan: FloorPlan,
        judge: DoorJudge,
        config: GaConfig,
        rng: &mut impl Rng,
    ) -> Result<GeneticDoorShaker, Vec<GaConfigError>> {
        let errors = config.validate();
        if !errors.is_empty() {
            return Err(errors);
        }
        let generator = RandomDoorGenerator::new(&plan);
        let population = (0..config.population_size)
            .map(|_| Scored {
                candidate: generator.generate(&plan, rng),
                fitness: 0.0,
            })
            .collect();
        Ok(GeneticDoorShaker {
            plan,
            judge,
            config,
            population,
        })
    }

    pub fn plan(&self) -> &FloorPlan {
        &self.plan
    }

    pub fn run_generation(&mut self, rng: &mut impl Rng) {
        for entry in &mut self.population {
            entry.fitness = self.judge.score(&self.plan, &entry.candidate);
        }
        rank(&mut self.population);

        let elite = self.config.elite_count.min(self.population.len());
        let mut next = self.population[..elite].to_vec();
        while next.len() < self.population.len() {
            let parent = tournament(&self.population, self.config.tournament_size, rng);
            let mut child = if rng.gen_bool(self.config.crossover_rate) {
                let donor = tournament(&self.population, self.config.tournament_size, rng);
                crossover_doors(&parent.candidate, &donor.candidate, rng)
            } else {
                parent.candidate.clone()
            };
            if rng.gen_bool(self.config.mutation_rate) {
                mutate_doors(&self.plan, &mut child, rng);
            }
            next.push(Scored {
                candidate: child,
                fitness: 0.0,
            });
        }
        self.population = next;
    }

    /// Best candidate of the last ranked generation.
    pub fn best(&self) -> Option<&Scored<Vec<PlacedDoor>>> {
        self.population.first()
    }
}

/// Uniform positional crossover. Both parents cover the same eligible
/// edge list, so position `i` always refers to the same wall.
fn crossover_doors(a: &[PlacedDoor], b: &[PlacedDoor], rng: &mut impl Rng) -> Vec<PlacedDoor> {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| if rng.gen_bool(0.5) { *x } else { *y })
        .collect()
}

/// Point mutation on one door: nudge its position, resize it, or flip
/// the swing. Position and width stay inside the wall's feasible band.
fn mutate_doors(plan: &FloorPlan, doors: &mut [PlacedDoor], rng: &mut impl Rng) {
    if doors.is_empty() {
        return;
    }
    let placed = &mut doors[rng.gen_range(0..doors.len())];
    let length = plan.edge(placed.edge).length();
    match rng.gen_range(0..3) {
        0 => {
            if let Some((lo, hi)) = Door::feasible_range(placed.door.width, length) {
                placed.door.t = (placed.door.t + rng.gen_range(-0.1..0.1)).clamp(lo, hi);
            }
        }
        1 => {
            let width = (placed.door.width + rng.gen_range(-0.5..0.5))
                .clamp(DOOR_WIDTH_MIN, DOOR_WIDTH_MAX);
            if let Some((lo, hi)) = Door::feasible_range(width, length) {
                placed.door.width = width;
                placed.door.t = placed.door.t.clamp(lo, hi);
            }
        }
        _ => placed.door.swing = placed.door.swing.flip(),
    }
}
