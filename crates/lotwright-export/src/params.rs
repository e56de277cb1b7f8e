//! Output scaling and stroke configuration.

/// Drawing parameters shared by the line exporter and the SVG renderer.
/// Lot units are multiplied by `scaling` into output pixels; strokes are
/// already in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderParams {
    pub width: f32,
    pub height: f32,
    pub scaling: f32,
    pub wall_stroke: f32,
    /// The doorway gap painted over the wall, background-colored.
    pub door_stroke_hinge_latch: f32,
    /// The open door slab.
    pub door_stroke_hinge_endpoint: f32,
    pub door_stroke_arc: f32,
}

impl RenderParams {
    pub fn new(width: f32, height: f32) -> RenderParams {
        RenderParams {
            width,
            height,
            ..RenderParams::default()
        }
    }
}

impl Default for RenderParams {
    fn default() -> RenderParams {
        RenderParams {
            width: 100.0,
            height: 60.0,
            scaling: 16.0,
            wall_stroke: 12.0,
            door_stroke_hinge_latch: 12.0,
            door_stroke_hinge_endpoint: 4.0,
            door_stroke_arc: 2.0,
        }
    }
}
