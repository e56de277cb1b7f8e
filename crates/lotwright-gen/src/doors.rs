//! Random door seeding and the door-placement judge.
//!
//! Door search never mutates the plan it works against: candidates are
//! detached `(edge, door)` lists aligned to a fixed eligible-edge list,
//! and only the winning set is attached at the end via [`apply_doors`].

use std::collections::{HashMap, HashSet, VecDeque};

use rand::Rng;

use lotwright_core::constants::INTERIOR_DOOR_WIDTH;
use lotwright_core::door::{Door, Swing};
use lotwright_core::edge::{EdgeId, GeometryError};
use lotwright_core::plan::FloorPlan;
use lotwright_core::room::RoomId;

/// Door widths the mutation operator may wander between.
pub const DOOR_WIDTH_MIN: f32 = 2.0;
pub const DOOR_WIDTH_MAX: f32 = 4.0;

/// A candidate door bound to the edge it would hang on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedDoor {
    pub edge: EdgeId,
    pub door: Door,
}

/// Interior edges that can host a door: two live rooms on its sides, not
/// a corridor-to-corridor joint, and long enough for the standard width.
pub fn eligible_edges(plan: &FloorPlan) -> Vec<EdgeId> {
    let mut out = Vec::new();
    for (id, edge) in plan.edges() {
        let (Some(negative), Some(positive)) = (edge.negative, edge.positive) else {
            continue;
        };
        if is_hallway(plan, negative) && is_hallway(plan, positive) {
            continue;
        }
        if Door::feasible_range(INTERIOR_DOOR_WIDTH, edge.length()).is_some() {
            out.push(id);
        }
    }
    out
}

fn is_hallway(plan: &FloorPlan, room: RoomId) -> bool {
    plan.room(room).role.map_or(false, |role| role.is_hallway())
}

/// Attaches a door set to the plan. Used once, on the search winner.
pub fn apply_doors(plan: &mut FloorPlan, doors: &[PlacedDoor]) -> Result<(), GeometryError> {
    for placed in doors {
        plan.attach_door(placed.edge, placed.door)?;
    }
    Ok(())
}

/// Seeds one random door per eligible edge.
pub struct RandomDoorGenerator {
    edges: Vec<EdgeId>,
}

impl RandomDoorGenerator {
    pub fn new(plan: &FloorPlan) -> RandomDoorGenerator {
        RandomDoorGenerator {
            edges: eligible_edges(plan),
        }
    }

    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    /// One candidate per eligible edge, uniform inside the feasible band.
    pub fn generate(&self, plan: &FloorPlan, rng: &mut impl Rng) -> Vec<PlacedDoor> {
        let mut doors = Vec::with_capacity(self.edges.len());
        for &id in &self.edges {
            let length = plan.edge(id).length();
            let t = match Door::feasible_range(INTERIOR_DOOR_WIDTH, length) {
                Some((lo, hi)) if hi > lo => rng.gen_range(lo..hi),
                Some((lo, _)) => lo,
                None => 0.5,
            };
            let swing = if rng.gen_bool(0.5) {
                Swing::Left
            } else {
                Swing::Right
            };
            doors.push(PlacedDoor {
                edge: id,
                door: Door::interior(t, swing),
            });
        }
        doors
    }
}

/// Scores a full door placement against a fixed plan.
///
/// Per-door quality blends how centered the span sits on its wall with
/// whether the hinge falls on the corner side. Plan-wide, doors too close
/// together on a shared room are penalized, and connecting the program
/// rooms to the corridor network is rewarded.
#[derive(Debug, Clone, Copy)]
pub struct DoorJudge {
    pub clearance_weight: f32,
    pub swing_weight: f32,
    pub crowding_penalty: f32,
    pub coverage_weight: f32,
}

impl Default for DoorJudge {
    fn default() -> DoorJudge {
        DoorJudge {
            clearance_weight: 1.0,
            swing_weight: 0.5,
            crowding_penalty: 0.5,
            coverage_weight: 2.0,
        }
    }
}

impl DoorJudge {
    pub fn score(&self, plan: &FloorPlan, doors: &[PlacedDoor]) -> f32 {
        if doors.is_empty() {
            return 0.0;
        }
        let mut quality = 0.0;
        for placed in doors {
            quality += self.clearance_weight * clearance_term(plan, placed)
                + self.swing_weight * swing_term(plan, placed);
        }
        let quality = quality / doors.len() as f32;
        let crowding = crowded_pairs(plan, doors) as f32;
        let coverage = hallway_coverage(plan, doors);
        quality + self.coverage_weight * coverage - self.crowding_penalty * crowding
    }
}

/// How centered the door span sits on its wall: 1 at the middle, falling
/// to 0 as it presses against a feasibility limit.
pub fn clearance_term(plan: &FloorPlan, placed: &PlacedDoor) -> f32 {
    let edge = plan.edge(placed.edge);
    let length = edge.length();
    let (lo, hi) = placed.door.span(length);
    let clear = lo.min(length - hi);
    let widest = (length - placed.door.width) * 0.5;
    if !(widest > 0.0) {
        return 0.0;
    }
    (clear / widest).clamp(0.0, 1.0)
}

/// Swing-side sensibility: the open slab should rest toward the nearer
/// end of the wall, so the hinge belongs on the corner side. 1 when the
/// hinge hugs its corner, 0.5 for a centered door, toward 0 when the
/// hinge faces the long way.
pub fn swing_term(plan: &FloorPlan, placed: &PlacedDoor) -> f32 {
    let edge = plan.edge(placed.edge);
    let length = edge.length();
    let (lo, hi) = placed.door.span(length);
    let (hinge_gap, latch_gap) = match placed.door.swing {
        Swing::Left => (lo, length - hi),
        Swing::Right => (length - hi, lo),
    };
    let total = hinge_gap + latch_gap;
    if !(total > 0.0) {
        return 0.0;
    }
    latch_gap / total
}

/// Door pairs serving the same room with centers closer than their
/// combined widths.
pub fn crowded_pairs(plan: &FloorPlan, doors: &[PlacedDoor]) -> usize {
    let mut count = 0;
    for i in 0..doors.len() {
        for j in i + 1..doors.len() {
            let (a, b) = (&doors[i], &doors[j]);
            if !share_room(plan, a.edge, b.edge) {
                continue;
            }
            let pa = plan.edge(a.edge).point_at(a.door.t);
            let pb = plan.edge(b.edge).point_at(b.door.t);
            let distance = ((pa.0 - pb.0).powi(2) + (pa.1 - pb.1).powi(2)).sqrt();
            if distance < a.door.width + b.door.width {
                count += 1;
            }
        }
    }
    count
}

fn share_room(plan: &FloorPlan, a: EdgeId, b: EdgeId) -> bool {
    let ea = plan.edge(a);
    let eb = plan.edge(b);
    for side_a in [ea.negative, ea.positive].into_iter().flatten() {
        for side_b in [eb.negative, eb.positive].into_iter().flatten() {
            if side_a == side_b {
                return true;
            }
        }
    }
    false
}

/// Fraction of program rooms reachable through the doored edges, walking
/// out from every hallway. Plans without a corridor fall back to a walk
/// from the first program room, so an undoored layout still reads as
/// disconnected rather than trivially covered.
pub fn hallway_coverage(plan: &FloorPlan, doors: &[PlacedDoor]) -> f32 {
    let mut adjacent: HashMap<RoomId, Vec<RoomId>> = HashMap::new();
    for placed in doors {
        let edge = plan.edge(placed.edge);
        if let (Some(a), Some(b)) = (edge.negative, edge.positive) {
            adjacent.entry(a).or_default().push(b);
            adjacent.entry(b).or_default().push(a);
        }
    }

    let mut queue: VecDeque<RoomId> = VecDeque::new();
    let mut seen: HashSet<RoomId> = HashSet::new();
    let mut program_rooms = 0usize;
    for (id, room) in plan.rooms() {
        match room.role {
            Some(role) if role.is_hallway() => {
                if seen.insert(id) {
                    queue.push_back(id);
                }
            }
            Some(role) if role.is_program() => program_rooms += 1,
            _ => {}
        }
    }
    if program_rooms == 0 {
        return 0.0;
    }
    if queue.is_empty() {
        let first_program = plan.rooms().find(|(_, room)| {
            room.role.map_or(false, |role| role.is_program())
        });
        if let Some((id, _)) = first_program {
            seen.insert(id);
            queue.push_back(id);
        }
    }

    let mut reached = 0usize;
    while let Some(id) = queue.pop_front() {
        if plan.room(id).role.map_or(false, |role| role.is_program()) {
            reached += 1;
        }
        if let Some(nexts) = adjacent.get(&id) {
            for &next in nexts {
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
    }
    reached as f32 / program_rooms as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use lotwright_core::edge::Orientation;
    use lotwright_core::room::RoomRole;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// 100 x 60 lot split vertically around a corridor: program rooms on
    /// the flanks, hallway between.
    fn corridor_plan() -> (FloorPlan, EdgeId, EdgeId) {
        let mut plan = FloorPlan::rectangle(100.0, 60.0);
        let split = plan
            .proportional_subdivide(0.5, Orientation::Vertical, RoomId(0), true)
            .unwrap();
        plan.assign_role(split.first, RoomRole::Program(0));
        plan.assign_role(split.second, RoomRole::Program(1));
        let hall = split.hallway.unwrap();
        plan.assign_role(hall, RoomRole::Hallway);

        let mut walls: Vec<EdgeId> = plan
            .edges()
            .filter(|(_, e)| e.negative.is_some() && e.positive.is_some())
            .map(|(id, _)| id)
            .collect();
        walls.sort();
        assert_eq!(walls.len(), 2);
        (plan, walls[0], walls[1])
    }

    #[test]
    fn eligible_edges_are_the_interior_walls() {
        let (plan, w0, w1) = corridor_plan();
        let mut eligible = eligible_edges(&plan);
        eligible.sort();
        assert_eq!(eligible, vec![w0, w1]);
    }

    #[test]
    fn generated_candidates_stay_feasible() {
        let (plan, _, _) = corridor_plan();
        let generator = RandomDoorGenerator::new(&plan);
        let mut rng = StdRng::seed_from_u64(6);
        for _ in 0..10 {
            let doors = generator.generate(&plan, &mut rng);
            assert_eq!(doors.len(), generator.edges().len());
            for placed in &doors {
                let length = plan.edge(placed.edge).length();
                let (lo, hi) = Door::feasible_range(placed.door.width, length).unwrap();
                assert!(placed.door.t >= lo && placed.door.t < hi);
            }
        }
    }

    #[test]
    fn clearance_peaks_at_the_wall_center() {
        let (plan, w0, _) = corridor_plan();
        let centered = PlacedDoor {
            edge: w0,
            door: Door::interior(0.5, Swing::Left),
        };
        assert!((clearance_term(&plan, &centered) - 1.0).abs() < 1e-6);

        let length = plan.edge(w0).length();
        let (lo, _) = Door::feasible_range(INTERIOR_DOOR_WIDTH, length).unwrap();
        let squeezed = PlacedDoor {
            edge: w0,
            door: Door::interior(lo, Swing::Left),
        };
        assert!(clearance_term(&plan, &squeezed) < 0.1);
    }

    #[test]
    fn swing_prefers_the_hinge_on_the_corner_side() {
        let (plan, w0, _) = corridor_plan();
        let hinge_low = PlacedDoor {
            edge: w0,
            door: Door::interior(0.25, Swing::Left),
        };
        let hinge_high = PlacedDoor {
            edge: w0,
            door: Door::interior(0.25, Swing::Right),
        };
        let low = swing_term(&plan, &hinge_low);
        let high = swing_term(&plan, &hinge_high);
        assert!(
            low > 0.5 && high < 0.5,
            "a door below center should hinge low: {low} vs {high}"
        );
        let centered = PlacedDoor {
            edge: w0,
            door: Door::interior(0.5, Swing::Left),
        };
        assert!((swing_term(&plan, &centered) - 0.5).abs() < 1e-3);
    }

    #[test]
    fn coverage_counts_rooms_reached_from_the_corridor() {
        let (plan, w0, w1) = corridor_plan();
        let both = vec![
            PlacedDoor { edge: w0, door: Door::interior(0.5, Swing::Left) },
            PlacedDoor { edge: w1, door: Door::interior(0.5, Swing::Left) },
        ];
        assert!((hallway_coverage(&plan, &both) - 1.0).abs() < 1e-6);

        let one = vec![both[0]];
        assert!((hallway_coverage(&plan, &one) - 0.5).abs() < 1e-6);

        assert_eq!(hallway_coverage(&plan, &[]), 0.0);
    }

    #[test]
    fn adjacent_doors_on_a_shared_room_count_as_crowded() {
        let (plan, w0, w1) = corridor_plan();
        let tight = vec![
            PlacedDoor { edge: w0, door: Door::interior(0.5, Swing::Left) },
            PlacedDoor { edge: w1, door: Door::interior(0.5, Swing::Left) },
        ];
        // both centers sit 5 apart across the corridor, under 3 + 3
        assert_eq!(crowded_pairs(&plan, &tight), 1);

        let spread = vec![
            PlacedDoor { edge: w0, door: Door::interior(0.2, Swing::Left) },
            PlacedDoor { edge: w1, door: Door::interior(0.8, Swing::Left) },
        ];
        assert_eq!(crowded_pairs(&plan, &spread), 0);
    }

    #[test]
    fn judge_rewards_the_better_placement() {
        let (plan, w0, w1) = corridor_plan();
        let judge = DoorJudge::default();
        let good = vec![
            PlacedDoor { edge: w0, door: Door::interior(0.3, Swing::Left) },
            PlacedDoor { edge: w1, door: Door::interior(0.7, Swing::Right) },
        ];
        let bad = vec![PlacedDoor {
            edge: w0,
            door: Door::interior(0.5, Swing::Left),
        }];
        assert!(
            judge.score(&plan, &good) > judge.score(&plan, &bad),
            "full coverage must beat a half-connected plan"
        );
    }

    #[test]
    fn winning_doors_attach_to_the_plan() {
        let (mut plan, w0, w1) = corridor_plan();
        let doors = vec![
            PlacedDoor { edge: w0, door: Door::interior(0.4, Swing::Left) },
            PlacedDoor { edge: w1, door: Door::interior(0.6, Swing::Right) },
        ];
        apply_doors(&mut plan, &doors).unwrap();
        assert_eq!(plan.edge(w0).doors.len(), 1);
        assert_eq!(plan.edge(w1).doors.len(), 1);
    }
}
