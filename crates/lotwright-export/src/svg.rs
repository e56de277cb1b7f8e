//! Standalone SVG documents: room fills, walls, door hardware, labels.

use std::path::Path;

use lotwright_core::constants::colors;
use lotwright_core::door::Swing;
use lotwright_core::plan::FloorPlan;
use lotwright_core::room::RoomProgram;

use crate::lines::{joins_hallways, PlanExporter};
use crate::params::RenderParams;

const MARGIN: f32 = 32.0;

pub struct SvgRenderer {
    params: RenderParams,
    exporter: PlanExporter,
}

impl SvgRenderer {
    pub fn new(params: RenderParams) -> SvgRenderer {
        SvgRenderer {
            params,
            exporter: PlanExporter::new(params),
        }
    }

    /// Renders the plan as a complete SVG document. Paint order is fills,
    /// walls, doors, labels, so text always lands on top.
    pub fn render(&self, plan: &FloorPlan, programs: &[RoomProgram]) -> String {
        let scale = self.params.scaling;
        let canvas_w = self.params.width * scale + 2.0 * MARGIN;
        let canvas_h = self.params.height * scale + 2.0 * MARGIN;

        let mut out = String::new();
        out.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{canvas_w}\" height=\"{canvas_h}\">\n"
        ));
        out.push_str(&format!(
            "<g transform=\"translate({MARGIN},{MARGIN})\">\n"
        ));

        for (id, room) in plan.rooms() {
            let bounds = plan.room_bounds(id);
            let fill = room
                .role
                .map(|role| role.fill_color(programs))
                .unwrap_or(colors::UNASSIGNED_FILL);
            out.push_str(&format!(
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"#{fill}\" />\n",
                bounds.x_min * scale,
                bounds.y_min * scale,
                bounds.width() * scale,
                bounds.height() * scale,
            ));
        }

        for (_, edge) in plan.edges() {
            if joins_hallways(plan, edge) {
                continue;
            }
            let (p0, p1) = edge.cartesian_points();
            out.push_str(&format!(
                "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"#{}\" stroke-width=\"{}\" stroke-linecap=\"round\" />\n",
                p0.0 * scale,
                p0.1 * scale,
                p1.0 * scale,
                p1.1 * scale,
                colors::WALL,
                self.params.wall_stroke,
            ));
        }

        for (_, edge) in plan.edges() {
            if joins_hallways(plan, edge) {
                continue;
            }
            for door in &edge.doors {
                self.render_door(&mut out, edge, door);
            }
        }

        for (id, room) in plan.rooms() {
            let Some(role) = room.role else { continue };
            let (cx, cy) = plan.room_bounds(id).center();
            out.push_str(&format!(
                "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\" font-size=\"30pt\" font-family=\"Source Code Pro\">{}</text>\n",
                cx * scale,
                cy * scale,
                title_case(role.label(programs)),
            ));
        }

        out.push_str("</g>\n</svg>\n");
        out
    }

    /// Doorway gap painted in white over the wall, the open slab, and the
    /// swing arc. The arc's sweep flag follows the hinge side.
    fn render_door(
        &self,
        out: &mut String,
        edge: &lotwright_core::edge::Edge,
        door: &lotwright_core::door::Door,
    ) {
        let points = self.exporter.export_door_points(edge, door);
        out.push_str(&format!(
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"#ffffff\" stroke-width=\"{}\" />\n",
            points.hinge.0,
            points.hinge.1,
            points.latch.0,
            points.latch.1,
            self.params.door_stroke_hinge_latch,
        ));
        out.push_str(&format!(
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"#{}\" stroke-width=\"{}\" />\n",
            points.hinge.0,
            points.hinge.1,
            points.endpoint.0,
            points.endpoint.1,
            colors::DOOR,
            self.params.door_stroke_hinge_endpoint,
        ));
        let radius = door.width * self.params.scaling;
        let sweep = match door.swing {
            Swing::Left => 0,
            Swing::Right => 1,
        };
        out.push_str(&format!(
            "<path d=\"M {} {} A {radius} {radius} 0 0 {sweep} {} {}\" stroke=\"#{}\" stroke-width=\"{}\" fill=\"none\" />\n",
            points.latch.0,
            points.latch.1,
            points.endpoint.0,
            points.endpoint.1,
            colors::DOOR,
            self.params.door_stroke_arc,
        ));
    }

    pub fn render_to_file(
        &self,
        plan: &FloorPlan,
        programs: &[RoomProgram],
        path: &Path,
    ) -> std::io::Result<()> {
        std::fs::write(path, self.render(plan, programs))
    }
}

/// Uppercases the first letter of each word: "guest bedroom" becomes
/// "Guest Bedroom".
fn title_case(label: &str) -> String {
    label
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use lotwright_core::door::Door;
    use lotwright_core::edge::Orientation;
    use lotwright_core::room::{RoomId, RoomRole};

    fn doored_plan() -> (FloorPlan, Vec<RoomProgram>) {
        let mut plan = FloorPlan::rectangle(100.0, 60.0);
        let split = plan
            .proportional_subdivide(0.5, Orientation::Vertical, RoomId(0), true)
            .unwrap();
        plan.assign_role(split.first, RoomRole::Program(0));
        plan.assign_role(split.second, RoomRole::Program(1));
        let hall = split.hallway.unwrap();
        plan.assign_role(hall, RoomRole::Hallway);

        let walls: Vec<_> = plan
            .edges()
            .filter(|(_, e)| e.negative.is_some() && e.positive.is_some())
            .map(|(id, _)| id)
            .collect();
        for id in walls {
            plan.attach_door(id, Door::interior(0.5, Swing::Left)).unwrap();
        }
        let programs = vec![
            RoomProgram::new("guest bedroom", "bde0fe", 2850.0),
            RoomProgram::new("living", "f2e8cf", 2850.0),
        ];
        (plan, programs)
    }

    #[test]
    fn the_document_is_a_complete_svg() {
        let (plan, programs) = doored_plan();
        let svg = SvgRenderer::new(RenderParams::new(100.0, 60.0)).render(&plan, &programs);
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<rect").count(), 3, "one fill per room");
        assert_eq!(svg.matches("<path").count(), 2, "one arc per door");
    }

    #[test]
    fn fills_use_program_and_role_colors() {
        let (plan, programs) = doored_plan();
        let svg = SvgRenderer::new(RenderParams::new(100.0, 60.0)).render(&plan, &programs);
        assert!(svg.contains("fill=\"#bde0fe\""));
        assert!(svg.contains("fill=\"#f2e8cf\""));
        assert!(svg.contains(&format!("fill=\"#{}\"", colors::HALLWAY_FILL)));
    }

    #[test]
    fn door_hardware_is_black_walls_stay_gray() {
        let (plan, programs) = doored_plan();
        let svg = SvgRenderer::new(RenderParams::new(100.0, 60.0)).render(&plan, &programs);
        assert_eq!(
            svg.matches("stroke=\"#000000\"").count(),
            4,
            "slab line and swing arc for each of the two doors"
        );
        assert_eq!(
            svg.matches("stroke=\"#ffffff\"").count(),
            2,
            "one doorway gap per door"
        );
        assert!(
            svg.contains(&format!("stroke=\"#{}\"", colors::WALL)),
            "walls keep their gray stroke"
        );
    }

    #[test]
    fn labels_are_title_cased() {
        let (plan, programs) = doored_plan();
        let svg = SvgRenderer::new(RenderParams::new(100.0, 60.0)).render(&plan, &programs);
        assert!(svg.contains(">Guest Bedroom</text>"));
        assert!(svg.contains(">Living</text>"));
        assert!(svg.contains(">Hall</text>"));
    }

    #[test]
    fn title_case_handles_odd_labels() {
        assert_eq!(title_case("office"), "Office");
        assert_eq!(title_case("guest  bedroom"), "Guest Bedroom");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn the_canvas_leaves_a_margin_around_the_lot() {
        let (plan, programs) = doored_plan();
        let svg = SvgRenderer::new(RenderParams::new(100.0, 60.0)).render(&plan, &programs);
        assert!(svg.contains("width=\"1664\""), "100 * 16 + 64");
        assert!(svg.contains("height=\"1024\""), "60 * 16 + 64");
        assert!(svg.contains("translate(32,32)"));
    }
}
