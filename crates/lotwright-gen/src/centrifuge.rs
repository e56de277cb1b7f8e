//! End-to-end evolution: spin trees until a good plan settles out, then
//! evolve its doors.

use std::error::Error;
use std::fmt;

use log::info;
use rand::Rng;

use lotwright_core::edge::GeometryError;
use lotwright_core::plan::FloorPlan;
use lotwright_core::room::RoomProgram;

use crate::builder::{BuildError, ConfigError, FloorplanBuilder};
use crate::door_shaker::GeneticDoorShaker;
use crate::doors::{apply_doors, DoorJudge};
use crate::evaluator::{FloorplanEvaluator, TreeWeights};
use crate::genetic::{GaConfig, GaConfigError};
use crate::tree::Node;
use crate::tree_shaker::GeneticTreeShaker;

#[derive(Debug, Clone, PartialEq)]
pub struct CentrifugeConfig {
    pub tree_generations: usize,
    pub door_generations: usize,
    pub ga: GaConfig,
}

impl Default for CentrifugeConfig {
    fn default() -> CentrifugeConfig {
        CentrifugeConfig {
            tree_generations: 40,
            door_generations: 25,
            ga: GaConfig::default(),
        }
    }
}

#[derive(Debug)]
pub enum CentrifugeError {
    Config(Vec<ConfigError>),
    Search(Vec<GaConfigError>),
    Build(BuildError),
    Geometry(GeometryError),
    EmptyPopulation,
}

impl fmt::Display for CentrifugeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CentrifugeError::Config(errors) => {
                write!(f, "configuration rejected with {} errors", errors.len())?;
                if let Some(first) = errors.first() {
                    write!(f, " ({first})")?;
                }
                Ok(())
            }
            CentrifugeError::Search(errors) => {
                write!(f, "search configuration rejected with {} errors", errors.len())?;
                if let Some(first) = errors.first() {
                    write!(f, " ({first})")?;
                }
                Ok(())
            }
            CentrifugeError::Build(e) => write!(f, "{e}"),
            CentrifugeError::Geometry(e) => write!(f, "{e}"),
            CentrifugeError::EmptyPopulation => write!(f, "search population is empty"),
        }
    }
}

impl Error for CentrifugeError {}

impl From<Vec<ConfigError>> for CentrifugeError {
    fn from(errors: Vec<ConfigError>) -> CentrifugeError {
        CentrifugeError::Config(errors)
    }
}

impl From<Vec<GaConfigError>> for CentrifugeError {
    fn from(errors: Vec<GaConfigError>) -> CentrifugeError {
        CentrifugeError::Search(errors)
    }
}

impl From<BuildError> for CentrifugeError {
    fn from(e: BuildError) -> CentrifugeError {
        CentrifugeError::Build(e)
    }
}

impl From<GeometryError> for CentrifugeError {
    fn from(e: GeometryError) -> CentrifugeError {
        CentrifugeError::Geometry(e)
    }
}

/// A finished search product: the plan with doors attached, the tree it
/// grew from, and its evaluator score.
#[derive(Debug, Clone)]
pub struct EvolvedPlan {
    pub plan: FloorPlan,
    pub tree: Node,
    pub score: f32,
}

/// The demo program list: a seven-room house totalling 6000 area units,
/// sized for a 100 x 60 lot.
pub fn standard_house_programs() -> Vec<RoomProgram> {
    vec![
        RoomProgram::new("living", "f2e8cf", 1500.0),
        RoomProgram::new("kitchen", "e9c46a", 900.0),
        RoomProgram::new("dining", "f4a261", 700.0),
        RoomProgram::new("bedroom", "a8dadc", 1100.0),
        RoomProgram::new("guest bedroom", "bde0fe", 800.0),
        RoomProgram::new("bathroom", "cdb4db", 400.0),
        RoomProgram::new("office", "b7e4c7", 600.0),
    ]
}

pub struct PopulationCentrifuge {
    pub lot_width: f32,
    pub lot_height: f32,
    pub programs: Vec<RoomProgram>,
    pub weights: TreeWeights,
    pub config: CentrifugeConfig,
}

impl Default for PopulationCentrifuge {
    fn default() -> PopulationCentrifuge {
        PopulationCentrifuge {
            lot_width: 100.0,
            lot_height: 60.0,
            programs: standard_house_programs(),
            weights: TreeWeights::default(),
            config: CentrifugeConfig::default(),
        }
    }
}

impl PopulationCentrifuge {
    /// Evolves trees, materializes the winner, then evolves a door set
    /// for it and attaches the best one.
    pub fn create_perfect_floorplan(
        &self,
        rng: &mut impl Rng,
    ) -> Result<EvolvedPlan, CentrifugeError> {
        let builder = FloorplanBuilder::new(
            self.lot_width,
            self.lot_height,
            self.programs.clone(),
            self.weights,
        )?;
        let mut shaker = GeneticTreeShaker::new(builder, self.config.ga.clone(), rng)?;
        for generation in 0..self.config.tree_generations {
            shaker.run_generation(rng)?;
            if (generation + 1) % 10 == 0 {
                if let Some(best) = shaker.best() {
                    info!(
                        "tree generation {}: best score {:.3}",
                        generation + 1,
                        best.fitness
                    );
                }
            }
        }

        let mut tree = shaker
            .best()
            .map(|entry| entry.candidate.clone())
            .ok_or(CentrifugeError::EmptyPopulation)?;
        let mut plan = shaker.builder().build(&mut tree)?;
        let score = FloorplanEvaluator::new(self.weights).score_floorplan(&plan, &self.programs);
        info!(
            "settled on a tree scoring {:.3} across {} rooms",
            score,
            plan.room_count()
        );

        let mut door_shaker = GeneticDoorShaker::new(
            plan.clone(),
            DoorJudge::default(),
            self.config.ga.clone(),
            rng,
        )?;
        for _ in 0..self.config.door_generations {
            door_shaker.run_generation(rng);
        }
        if let Some(best) = door_shaker.best() {
            info!("door search settled at {:.3}", best.fitness);
            apply_doors(&mut plan, &best.candidate)?;
        }

        Ok(EvolvedPlan { plan, tree, score })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn quick_centrifuge() -> PopulationCentrifuge {
        PopulationCentrifuge {
            programs: standard_house_programs()[..4].to_vec(),
            config: CentrifugeConfig {
                tree_generations: 4,
                door_generations: 3,
                ga: GaConfig {
                    population_size: 8,
                    elite_count: 1,
                    ..GaConfig::default()
                },
            },
            ..PopulationCentrifuge::default()
        }
    }

    #[test]
    fn the_full_pipeline_produces_a_doored_plan() {
        let centrifuge = quick_centrifuge();
        let mut rng = StdRng::seed_from_u64(1);
        let evolved = centrifuge.create_perfect_floorplan(&mut rng).unwrap();

        assert!(evolved.score.is_finite());
        assert!(
            evolved.plan.room_count() >= 1,
            "something must have been carved"
        );
        let door_count: usize = evolved
            .plan
            .edges()
            .map(|(_, e)| e.doors.len())
            .sum();
        assert!(door_count >= 1, "the winning door set must be attached");
        assert_eq!(evolved.tree.leaf_count(), 4);
    }

    #[test]
    fn bad_configuration_is_rejected_up_front() {
        let mut centrifuge = quick_centrifuge();
        centrifuge.lot_width = -5.0;
        let mut rng = StdRng::seed_from_u64(2);
        match centrifuge.create_perfect_floorplan(&mut rng) {
            Err(CentrifugeError::Config(errors)) => assert!(!errors.is_empty()),
            other => panic!("expected a config rejection, got {other:?}"),
        }
    }

    #[test]
    fn bad_search_rates_are_rejected_up_front() {
        let mut centrifuge = quick_centrifuge();
        centrifuge.config.ga.crossover_rate = 1.5;
        let mut rng = StdRng::seed_from_u64(3);
        match centrifuge.create_perfect_floorplan(&mut rng) {
            Err(CentrifugeError::Search(errors)) => assert!(!errors.is_empty()),
            other => panic!("expected a search config rejection, got {other:?}"),
        }
    }
}
