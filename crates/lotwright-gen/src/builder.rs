//! Instantiates a partition tree into a floorplan.
//!
//! The builder owns the lot dimensions, the program list, and a weight
//! set. [`FloorplanBuilder::build`] walks a tree top-down: internal nodes
//! carve the current room in two (padding a hallway when the room is wide
//! enough), leaves take on their program role. Splits that cannot respect
//! the minimum room extent are contained where they happen: the room is
//! marked infeasible, the subtree underneath is abandoned, and the walk
//! carries on elsewhere.

use std::error::Error;
use std::fmt;

use log::debug;

use lotwright_core::constants::MIN_HALLWAY_SPAN;
use lotwright_core::edge::GeometryError;
use lotwright_core::plan::{FloorPlan, SplitError};
use lotwright_core::room::{RoomId, RoomProgram, RoomRole};

use crate::evaluator::{room_score, TreeWeights};
use crate::tree::{Node, TreeViolation};

/// A configuration problem reported before any carving happens.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NonPositiveLot { width: f32, height: f32 },
    EmptyProgramList,
    NonPositiveArea { index: usize, area: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositiveLot { width, height } => {
                write!(f, "lot must have positive extent, got {width} x {height}")
            }
            ConfigError::EmptyProgramList => write!(f, "program list is empty"),
            ConfigError::NonPositiveArea { index, area } => {
                write!(f, "program {index} has non-positive target area {area}")
            }
        }
    }
}

impl Error for ConfigError {}

/// Why instantiation failed outright. Infeasible splits never surface
/// here; they are contained during the walk.
#[derive(Debug)]
pub enum BuildError {
    InvalidTree(Vec<TreeViolation>),
    Geometry(GeometryError),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::InvalidTree(violations) => {
                write!(f, "tree failed validation with {} violations", violations.len())?;
                if let Some(first) = violations.first() {
                    write!(f, " ({}: {})", first.category, first.message)?;
                }
                Ok(())
            }
            BuildError::Geometry(e) => write!(f, "geometry fault during build: {e}"),
        }
    }
}

impl Error for BuildError {}

impl From<GeometryError> for BuildError {
    fn from(e: GeometryError) -> BuildError {
        BuildError::Geometry(e)
    }
}

/// Fraction of the parent extent allotted to the first child.
///
/// At `t = 0.5` this is the pure area proportion `a1 / (a1 + a2)`;
/// pushing `t` toward 1 shifts extent to the second child, toward 0 to
/// the first.
pub fn split_ratio(a1: f32, a2: f32, t: f32) -> f32 {
    (a1 * (1.0 - t)) / (a1 * (1.0 - t) + a2 * t)
}

/// Summed target area of the given program indexes.
pub fn program_area_sum(programs: &[RoomProgram], indexes: &[usize]) -> f32 {
    indexes
        .iter()
        .filter_map(|&i| programs.get(i))
        .map(|p| p.target_area)
        .sum()
}

pub struct FloorplanBuilder {
    lot_width: f32,
    lot_height: f32,
    programs: Vec<RoomProgram>,
    weights: TreeWeights,
}

impl FloorplanBuilder {
    /// Validates the whole configuration up front and reports every
    /// problem at once rather than the first one hit.
    pub fn new(
        lot_width: f32,
        lot_height: f32,
        programs: Vec<RoomProgram>,
        weights: TreeWeights,
    ) -> Result<FloorplanBuilder, Vec<ConfigError>> {
        let mut errors = Vec::new();
        if !(lot_width > 0.0 && lot_height > 0.0) {
            errors.push(ConfigError::NonPositiveLot {
                width: lot_width,
                height: lot_height,
            });
        }
        if programs.is_empty() {
            errors.push(ConfigError::EmptyProgramList);
        }
        for (index, program) in programs.iter().enumerate() {
            if !(program.target_area > 0.0) {
                errors.push(ConfigError::NonPositiveArea {
                    index,
                    area: program.target_area,
                });
            }
        }
        if errors.is_empty() {
            Ok(FloorplanBuilder {
                lot_width,
                lot_height,
                programs,
                weights,
            })
        } else {
            Err(errors)
        }
    }

    pub fn lot_width(&self) -> f32 {
        self.lot_width
    }

    pub fn lot_height(&self) -> f32 {
        self.lot_height
    }

    pub fn programs(&self) -> &[RoomProgram] {
        &self.programs
    }

    pub fn weights(&self) -> &TreeWeights {
        &self.weights
    }

    /// Carves the lot by walking `root`. The tree is read-only input
    /// except for `score`, which is written at leaves and at contained
    /// infeasible regions.
    pub fn build(&self, root: &mut Node) -> Result<FloorPlan, BuildError> {
        let violations = root.validate(self.programs.len());
        if !violations.is_empty() {
            return Err(BuildError::InvalidTree(violations));
        }
        let mut plan = FloorPlan::rectangle(self.lot_width, self.lot_height);
        // rectangle() seeds exactly one room, id 0: the whole lot
        self.subdivide_room(&mut plan, RoomId(0), root)?;
        Ok(plan)
    }

    fn subdivide_room(
        &self,
        plan: &mut FloorPlan,
        room: RoomId,
        node: &mut Node,
    ) -> Result<(), BuildError> {
        if node.is_leaf() {
            let index = node.room_indexes[0];
            let role = RoomRole::Program(index);
            plan.assign_role(room, role);
            let bounds = plan.room_bounds(room);
            node.score = Some(room_score(&role, &bounds, &self.programs, &self.weights));
            return Ok(());
        }

        let (i_first, i_second) = node.order.indexes();
        let a1 = program_area_sum(&self.programs, &node.children[i_first].room_indexes);
        let a2 = program_area_sum(&self.programs, &node.children[i_second].room_indexes);
        let s = split_ratio(a1, a2, node.t);

        let bounds = plan.room_bounds(room);
        let hallway = node.padding && bounds.min_extent() >= MIN_HALLWAY_SPAN;

        match plan.proportional_subdivide(s, node.orientation, room, hallway) {
            Ok(split) => {
                if let Some(hall) = split.hallway {
                    plan.assign_role(hall, RoomRole::Hallway);
                }
                self.subdivide_room(plan, split.first, &mut node.children[i_first])?;
                self.subdivide_room(plan, split.second, &mut node.children[i_second])?;
                Ok(())
            }
            Err(SplitError::Geometry(e)) => Err(BuildError::Geometry(e)),
            Err(contained) => {
                debug!("containing infeasible split of room {}: {contained}", room.0);
                plan.assign_role(room, RoomRole::Infeasible);
                node.score = Some(0.0);
                Ok(())
            }
        }
    }
}
