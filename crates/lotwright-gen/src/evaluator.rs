//! Scoring terms and the composable floorplan evaluator.
//!
//! Every term is a plain function in (0, 1] so they can be reweighted,
//! logged, or trained on individually. [`FloorplanEvaluator`] blends them
//! under one [`TreeWeights`] set; [`plan_features`] exposes the raw
//! unweighted totals so the weight frobber can rescore cached plans
//! without touching geometry again.

use serde::{Deserialize, Serialize};

use lotwright_core::plan::FloorPlan;
use lotwright_core::room::{Bounds, RoomProgram, RoomRole};

/// Named coefficient set for plan scoring, tuned by the weight frobber.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreeWeights {
    #[serde(default = "default_area_fit")]
    pub area_fit: f32,
    #[serde(default = "default_squareness")]
    pub squareness: f32,
    #[serde(default = "default_hallway_access")]
    pub hallway_access: f32,
    #[serde(default = "default_infeasible")]
    pub infeasible: f32,
}

fn default_area_fit() -> f32 {
    1.0
}

fn default_squareness() -> f32 {
    0.6
}

fn default_hallway_access() -> f32 {
    0.8
}

fn default_infeasible() -> f32 {
    2.0
}

impl Default for TreeWeights {
    fn default() -> TreeWeights {
        TreeWeights {
            area_fit: default_area_fit(),
            squareness: default_squareness(),
            hallway_access: default_hallway_access(),
            infeasible: default_infeasible(),
        }
    }
}

impl TreeWeights {
    /// Coefficient names, in `get`/`set` index order.
    pub const COEFFICIENTS: [&'static str; 4] =
        ["area_fit", "squareness", "hallway_access", "infeasible"];

    pub fn get(&self, index: usize) -> f32 {
        match index {
            0 => self.area_fit,
            1 => self.squareness,
            2 => self.hallway_access,
            3 => self.infeasible,
            _ => 0.0,
        }
    }

    pub fn set(&mut self, index: usize, value: f32) {
        match index {
            0 => self.area_fit = value,
            1 => self.squareness = value,
            2 => self.hallway_access = value,
            3 => self.infeasible = value,
            _ => {}
        }
    }
}

/// How close a room's area lands to its program target, in (0, 1].
/// Exactly on target scores 1; half or double the target scores 1/2.
pub fn area_fit(area: f32, target_area: f32) -> f32 {
    if !(target_area > 0.0) {
        return 0.0;
    }
    1.0 / (1.0 + (area - target_area).abs() / target_area)
}

/// Aspect regularity: 1 for a square, falling toward 0 as the room
/// narrows.
pub fn squareness(width: f32, height: f32) -> f32 {
    let long = width.max(height);
    if !(long > 0.0) {
        return 0.0;
    }
    width.min(height) / long
}

/// Score of a single carved room. Hallways and infeasible regions earn
/// nothing here; corridors pay for themselves through the plan-level
/// access term instead.
pub fn room_score(
    role: &RoomRole,
    bounds: &Bounds,
    programs: &[RoomProgram],
    weights: &TreeWeights,
) -> f32 {
    match role {
        RoomRole::Program(i) => {
            let target = programs.get(*i).map(|p| p.target_area).unwrap_or(0.0);
            weights.area_fit * area_fit(bounds.area(), target)
                + weights.squareness * squareness(bounds.width(), bounds.height())
        }
        RoomRole::Hallway | RoomRole::Infeasible => 0.0,
    }
}

/// Raw, unweighted term totals for a finished plan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanFeatures {
    pub area_fit_sum: f32,
    pub squareness_sum: f32,
    /// Fraction of program rooms adjacent to a hallway or the exterior.
    pub access_fraction: f32,
    pub infeasible_count: usize,
}

pub fn plan_features(plan: &FloorPlan, programs: &[RoomProgram]) -> PlanFeatures {
    let mut area_fit_sum = 0.0;
    let mut squareness_sum = 0.0;
    let mut program_rooms = 0usize;
    let mut reached = 0usize;
    let mut infeasible_count = 0usize;

    for (id, room) in plan.rooms() {
        match room.role {
            Some(RoomRole::Program(i)) => {
                let bounds = plan.room_bounds(id);
                let target = programs.get(i).map(|p| p.target_area).unwrap_or(0.0);
                area_fit_sum += area_fit(bounds.area(), target);
                squareness_sum += squareness(bounds.width(), bounds.height());
                program_rooms += 1;

                let reachable = plan.touches_exterior(id)
                    || plan.neighbors(id).iter().any(|&n| {
                        plan.room(n)
                            .role
                            .map_or(false, |role| role.is_hallway())
                    });
                if reachable {
                    reached += 1;
                }
            }
            Some(RoomRole::Infeasible) => infeasible_count += 1,
            _ => {}
        }
    }

    let access_fraction = if program_rooms == 0 {
        0.0
    } else {
        reached as f32 / program_rooms as f32
    };
    PlanFeatures {
        area_fit_sum,
        squareness_sum,
        access_fraction,
        infeasible_count,
    }
}

/// Weighted aggregate over a finished plan.
#[derive(Debug, Clone)]
pub struct FloorplanEvaluator {
    pub weights: TreeWeights,
}

impl FloorplanEvaluator {
    pub fn new(weights: TreeWeights) -> FloorplanEvaluator {
        FloorplanEvaluator { weights }
    }

    pub fn score_floorplan(&self, plan: &FloorPlan, programs: &[RoomProgram]) -> f32 {
        Self::score_features(&plan_features(plan, programs), &self.weights)
    }

    /// Score from precomputed features. The weight frobber calls this in
    /// its inner loop, thousands of times per generation.
    pub fn score_features(features: &PlanFeatures, weights: &TreeWeights) -> f32 {
        weights.area_fit * features.area_fit_sum
            + weights.squareness * features.squareness_sum
            + weights.hallway_access * features.access_fraction
            - weights.infeasible * features.infeasible_count as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lotwright_core::edge::Orientation;
    use lotwright_core::plan::FloorPlan;
    use lotwright_core::room::RoomId;

    fn two_room_plan() -> (FloorPlan, Vec<RoomProgram>) {
        let mut plan = FloorPlan::rectangle(100.0, 60.0);
        let split = plan
            .proportional_subdivide(0.5, Orientation::Vertical, RoomId(0), false)
            .unwrap();
        plan.assign_role(split.first, RoomRole::Program(0));
        plan.assign_role(split.second, RoomRole::Program(1));
        let programs = vec![
            RoomProgram::new("left", "aaaaaa", 3000.0),
            RoomProgram::new("right", "bbbbbb", 3000.0),
        ];
        (plan, programs)
    }

    #[test]
    fn area_fit_peaks_on_target() {
        assert!((area_fit(900.0, 900.0) - 1.0).abs() < 1e-6);
        assert!((area_fit(450.0, 900.0) - 2.0 / 3.0).abs() < 1e-6);
        assert!(area_fit(300.0, 900.0) < area_fit(600.0, 900.0));
        assert_eq!(area_fit(100.0, 0.0), 0.0, "degenerate target earns nothing");
    }

    #[test]
    fn squareness_rewards_square_rooms() {
        assert!((squareness(30.0, 30.0) - 1.0).abs() < 1e-6);
        assert!((squareness(10.0, 20.0) - 0.5).abs() < 1e-6);
        assert!((squareness(20.0, 10.0) - 0.5).abs() < 1e-6);
        assert_eq!(squareness(0.0, 0.0), 0.0);
    }

    #[test]
    fn weights_expose_a_stable_index_order() {
        let mut w = TreeWeights::default();
        for (i, _) in TreeWeights::COEFFICIENTS.iter().enumerate() {
            w.set(i, i as f32 + 1.0);
        }
        assert_eq!(w.area_fit, 1.0);
        assert_eq!(w.squareness, 2.0);
        assert_eq!(w.hallway_access, 3.0);
        assert_eq!(w.infeasible, 4.0);
        for i in 0..TreeWeights::COEFFICIENTS.len() {
            assert_eq!(w.get(i), i as f32 + 1.0);
        }
    }

    #[test]
    fn missing_weight_fields_fall_back_to_defaults() {
        let w: TreeWeights = serde_json::from_str("{}").unwrap();
        assert_eq!(w, TreeWeights::default());
        let w: TreeWeights = serde_json::from_str(r#"{"area_fit": 3.5}"#).unwrap();
        assert_eq!(w.area_fit, 3.5);
        assert_eq!(w.squareness, TreeWeights::default().squareness);
    }

    #[test]
    fn features_total_the_per_room_terms() {
        let (plan, programs) = two_room_plan();
        let features = plan_features(&plan, &programs);
        assert!((features.area_fit_sum - 2.0).abs() < 1e-3, "both rooms on target");
        assert!(
            (features.squareness_sum - 2.0 * 50.0 / 60.0).abs() < 1e-3,
            "two 50 x 60 rooms"
        );
        assert!((features.access_fraction - 1.0).abs() < 1e-6, "both touch the exterior");
        assert_eq!(features.infeasible_count, 0);
    }

    #[test]
    fn infeasible_rooms_drag_the_score_down() {
        let (plan, programs) = two_room_plan();
        let evaluator = FloorplanEvaluator::new(TreeWeights::default());
        let healthy = evaluator.score_floorplan(&plan, &programs);

        let mut damaged = plan.clone();
        let second = damaged
            .rooms()
            .map(|(id, _)| id)
            .nth(1)
            .unwrap();
        damaged.assign_role(second, RoomRole::Infeasible);
        let hurt = evaluator.score_floorplan(&damaged, &programs);

        assert!(
            hurt < healthy - 1.0,
            "an infeasible room must cost more than a whole access term"
        );
    }
}
