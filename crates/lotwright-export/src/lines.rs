//! Flat line-segment export.
//!
//! Downstream consumers (plotters, CAD importers) want the plan as bare
//! segments: `[x0, y0, x1, y1, stroke]` in output pixels, tagged with
//! what each segment is. Walls between two corridors are dropped so a
//! hallway network reads as one continuous space.

use lotwright_core::door::{Door, Swing};
use lotwright_core::edge::Edge;
use lotwright_core::plan::FloorPlan;
use lotwright_core::room::RoomId;

use crate::params::RenderParams;

/// What an exported segment depicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Wall,
    Door,
}

/// Door geometry in scaled drawing space.
#[derive(Debug, Clone, PartialEq)]
pub struct DoorPoints {
    pub hinge: (f32, f32),
    pub latch: (f32, f32),
    /// Tip of the fully open slab, one radius off the wall.
    pub endpoint: (f32, f32),
    /// Quarter-circle sweep from the endpoint back to the latch.
    pub arc: Vec<(f32, f32)>,
}

pub struct PlanExporter {
    params: RenderParams,
    arc_points: usize,
}

impl PlanExporter {
    pub fn new(params: RenderParams) -> PlanExporter {
        PlanExporter {
            params,
            arc_points: 5,
        }
    }

    /// Every visible wall and door of the plan as flat segments, with a
    /// parallel list tagging each one.
    pub fn export_lines(&self, plan: &FloorPlan) -> (Vec<[f32; 5]>, Vec<LineKind>) {
        let mut lines = Vec::new();
        let mut kinds = Vec::new();
        let scale = self.params.scaling;
        for (_, edge) in plan.edges() {
            if joins_hallways(plan, edge) {
                continue;
            }
            let (p0, p1) = edge.cartesian_points();
            lines.push([
                p0.0 * scale,
                p0.1 * scale,
                p1.0 * scale,
                p1.1 * scale,
                self.params.wall_stroke,
            ]);
            kinds.push(LineKind::Wall);
            for door in &edge.doors {
                for line in self.export_door_lines(edge, door) {
                    lines.push(line);
                    kinds.push(LineKind::Door);
                }
            }
        }
        (lines, kinds)
    }

    /// The four anchor points of a door drawing, in scaled space.
    ///
    /// The hinge sits at the low-coordinate jamb for a left swing, high
    /// for a right; the endpoint is the open slab tip one door-width off
    /// the wall; the arc sweeps the slab from open back to the latch.
    pub fn export_door_points(&self, edge: &Edge, door: &Door) -> DoorPoints {
        let (a, b) = edge.radial_points(door.t, door.width * 0.5);
        let (ux, uy) = edge.unit_vector();
        let off_wall = (-uy, ux);
        let (hinge_raw, latch_raw) = match door.swing {
            Swing::Left => (a, b),
            Swing::Right => (b, a),
        };
        let toward_latch = match door.swing {
            Swing::Left => (ux, uy),
            Swing::Right => (-ux, -uy),
        };

        let scale = self.params.scaling;
        let hinge = (hinge_raw.0 * scale, hinge_raw.1 * scale);
        let latch = (latch_raw.0 * scale, latch_raw.1 * scale);
        let radius = door.width * scale;
        let endpoint = (hinge.0 + radius * off_wall.0, hinge.1 + radius * off_wall.1);

        let steps = self.arc_points.max(2);
        let mut arc = Vec::with_capacity(steps);
        for k in 0..steps {
            let angle = std::f32::consts::FRAC_PI_2 * k as f32 / (steps - 1) as f32;
            let (cos, sin) = (angle.cos(), angle.sin());
            arc.push((
                hinge.0 + radius * (off_wall.0 * cos + toward_latch.0 * sin),
                hinge.1 + radius * (off_wall.1 * cos + toward_latch.1 * sin),
            ));
        }
        DoorPoints {
            hinge,
            latch,
            endpoint,
            arc,
        }
    }

    /// A door as segments: the doorway gap, the open slab, and the swing
    /// arc as a short polyline.
    pub fn export_door_lines(&self, edge: &Edge, door: &Door) -> Vec<[f32; 5]> {
        let points = self.export_door_points(edge, door);
        let mut lines = Vec::with_capacity(points.arc.len() + 1);
        lines.push([
            points.hinge.0,
            points.hinge.1,
            points.latch.0,
            points.latch.1,
            self.params.door_stroke_hinge_latch,
        ]);
        lines.push([
            points.hinge.0,
            points.hinge.1,
            points.endpoint.0,
            points.endpoint.1,
            self.params.door_stroke_hinge_endpoint,
        ]);
        for pair in points.arc.windows(2) {
            lines.push([
                pair[0].0,
                pair[0].1,
                pair[1].0,
                pair[1].1,
                self.params.door_stroke_arc,
            ]);
        }
        lines
    }
}

/// True when both sides of the edge are corridors.
pub fn joins_hallways(plan: &FloorPlan, edge: &Edge) -> bool {
    let hallway = |side: Option<RoomId>| {
        side.map_or(false, |id| {
            plan.room(id).role.map_or(false, |role| role.is_hallway())
        })
    };
    hallway(edge.negative) && hallway(edge.positive)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lotwright_core::edge::Orientation;
    use lotwright_core::room::RoomRole;

    fn exporter() -> PlanExporter {
        PlanExporter::new(RenderParams::new(100.0, 60.0))
    }

    fn approx(a: (f32, f32), b: (f32, f32)) -> bool {
        (a.0 - b.0).abs() < 1e-3 && (a.1 - b.1).abs() < 1e-3
    }

    #[test]
    fn door_points_anchor_to_the_jambs() {
        // horizontal wall y = 10, span 0..30, door centered, width 4
        let edge = Edge::new(0.0, 30.0, 10.0, Orientation::Horizontal, None, None);
        let door = Door {
            t: 0.5,
            width: 4.0,
            swing: Swing::Left,
        };
        let points = exporter().export_door_points(&edge, &door);

        // scaling 16: jambs at x = 13 and 17, hinge low for a left swing
        assert!(approx(points.hinge, (13.0 * 16.0, 160.0)));
        assert!(approx(points.latch, (17.0 * 16.0, 160.0)));
        assert!(approx(points.endpoint, (13.0 * 16.0, 160.0 + 64.0)));
    }

    #[test]
    fn the_arc_sweeps_from_open_slab_to_latch() {
        let edge = Edge::new(0.0, 30.0, 10.0, Orientation::Horizontal, None, None);
        for swing in [Swing::Left, Swing::Right] {
            let door = Door {
                t: 0.4,
                width: 3.0,
                swing,
            };
            let points = exporter().export_door_points(&edge, &door);
            let first = points.arc.first().copied().unwrap();
            let last = points.arc.last().copied().unwrap();
            assert!(
                approx(first, points.endpoint),
                "{swing:?}: arc must start at the open slab tip"
            );
            assert!(
                approx(last, points.latch),
                "{swing:?}: arc must close on the latch"
            );
        }
    }

    #[test]
    fn a_door_exports_as_gap_slab_and_arc() {
        let edge = Edge::new(0.0, 60.0, 47.5, Orientation::Vertical, None, None);
        let door = Door {
            t: 0.5,
            width: 3.0,
            swing: Swing::Right,
        };
        let exporter = exporter();
        let lines = exporter.export_door_lines(&edge, &door);
        assert_eq!(lines.len(), 6, "gap + slab + four arc segments");
        assert_eq!(lines[0][4], 12.0);
        assert_eq!(lines[1][4], 4.0);
        assert!(lines[2..].iter().all(|l| l[4] == 2.0));
    }

    #[test]
    fn corridor_joints_are_dropped_from_the_export() {
        let mut plan = FloorPlan::rectangle(100.0, 60.0);
        let split = plan
            .proportional_subdivide(0.5, Orientation::Vertical, lotwright_core::room::RoomId(0), true)
            .unwrap();
        plan.assign_role(split.first, RoomRole::Program(0));
        plan.assign_role(split.second, RoomRole::Program(1));
        let hall = split.hallway.unwrap();
        plan.assign_role(hall, RoomRole::Hallway);

        let live = plan.edges().count();
        let (lines, kinds) = exporter().export_lines(&plan);
        assert_eq!(lines.len(), live, "no doors attached, one segment per wall");
        assert!(kinds.iter().all(|k| *k == LineKind::Wall));

        // a second corridor beside the first shares a wall that must
        // disappear from the drawing
        let second = plan
            .proportional_subdivide(0.5, Orientation::Vertical, split.second, false)
            .unwrap();
        plan.assign_role(second.first, RoomRole::Hallway);
        plan.assign_role(second.second, RoomRole::Program(1));
        let live = plan.edges().count();
        let (lines, _) = exporter().export_lines(&plan);
        assert_eq!(
            lines.len(),
            live - 1,
            "exactly the hallway-to-hallway joint is dropped"
        );
    }

    #[test]
    fn exported_walls_are_scaled_to_pixels() {
        let plan = FloorPlan::rectangle(10.0, 6.0);
        let (lines, _) = exporter().export_lines(&plan);
        assert_eq!(lines.len(), 4);
        for line in &lines {
            for coord in &line[..4] {
                assert!(
                    *coord == 0.0 || *coord == 160.0 || *coord == 96.0,
                    "perimeter coordinates scale by 16, got {coord}"
                );
            }
        }
    }
}
