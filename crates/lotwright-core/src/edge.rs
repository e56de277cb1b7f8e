//! Axis-aligned wall edges.
//!
//! An edge runs along a single axis: `v0` and `v1` are its endpoints on
//! that axis, `z` is its constant coordinate on the other. A horizontal
//! edge spans x at height `z`; a vertical edge spans y at offset `z`.
//! Each edge records the room on either side of `z` and carries the doors
//! hung on it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::GEOM_EPS;
use crate::door::Door;
use crate::room::RoomId;

/// Axis of an edge or a dividing wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// The perpendicular axis.
    pub fn negate(self) -> Orientation {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}

/// Stable handle into a floorplan's edge arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub u32);

/// Fatal geometry misuse. These indicate a caller bug and are always
/// propagated, unlike recoverable split infeasibility.
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Endpoints share neither coordinate, so no axis-aligned edge exists.
    DiagonalEdge { x0: f32, y0: f32, x1: f32, y1: f32 },
    /// Endpoints coincide, leaving no span to run a wall along.
    DegenerateEdge { x: f32, y: f32 },
    /// Subdivision point does not lie strictly inside the edge span.
    CutOutsideSpan { cut: f32, v0: f32, v1: f32 },
    /// Handle to an edge already replaced by its subdivision halves.
    RetiredEdge(EdgeId),
    /// Handle to a room already replaced by a subdivision.
    RetiredRoom(RoomId),
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::DiagonalEdge { x0, y0, x1, y1 } => write!(
                f,
                "edge endpoints ({x0}, {y0}) and ({x1}, {y1}) are not axis-aligned"
            ),
            GeometryError::DegenerateEdge { x, y } => {
                write!(f, "edge endpoints coincide at ({x}, {y})")
            }
            GeometryError::CutOutsideSpan { cut, v0, v1 } => write!(
                f,
                "cut {cut} does not fall strictly inside edge span [{v0}, {v1}]"
            ),
            GeometryError::RetiredEdge(id) => {
                write!(f, "edge #{} was retired by an earlier subdivision", id.0)
            }
            GeometryError::RetiredRoom(id) => {
                write!(f, "room #{} was retired by an earlier subdivision", id.0)
            }
        }
    }
}

impl std::error::Error for GeometryError {}

/// A wall segment of the plan.
#[derive(Debug, Clone)]
pub struct Edge {
    pub v0: f32,
    pub v1: f32,
    pub z: f32,
    pub orientation: Orientation,
    /// Room on the side where the cross coordinate is below `z`.
    pub negative: Option<RoomId>,
    /// Room on the side where the cross coordinate is above `z`.
    pub positive: Option<RoomId>,
    pub doors: Vec<Door>,
    pub(crate) retired: bool,
}

impl Edge {
    pub fn new(
        v0: f32,
        v1: f32,
        z: f32,
        orientation: Orientation,
        negative: Option<RoomId>,
        positive: Option<RoomId>,
    ) -> Edge {
        Edge {
            v0,
            v1,
            z,
            orientation,
            negative,
            positive,
            doors: Vec::new(),
            retired: false,
        }
    }

    /// Builds an edge from two cartesian endpoints, inferring orientation
    /// from the shared coordinate. Diagonal or coincident input is an
    /// error.
    pub fn between(
        p0: (f32, f32),
        p1: (f32, f32),
        negative: Option<RoomId>,
        positive: Option<RoomId>,
    ) -> Result<Edge, GeometryError> {
        let (x0, y0) = p0;
        let (x1, y1) = p1;
        if (x0 - x1).abs() <= GEOM_EPS && (y0 - y1).abs() <= GEOM_EPS {
            Err(GeometryError::DegenerateEdge { x: x0, y: y0 })
        } else if (x0 - x1).abs() <= GEOM_EPS {
            Ok(Edge::new(y0, y1, x0, Orientation::Vertical, negative, positive))
        } else if (y0 - y1).abs() <= GEOM_EPS {
            Ok(Edge::new(x0, x1, y0, Orientation::Horizontal, negative, positive))
        } else {
            Err(GeometryError::DiagonalEdge { x0, y0, x1, y1 })
        }
    }

    pub fn is_retired(&self) -> bool {
        self.retired
    }

    pub fn span_min(&self) -> f32 {
        self.v0.min(self.v1)
    }

    pub fn span_max(&self) -> f32 {
        self.v0.max(self.v1)
    }

    pub fn length(&self) -> f32 {
        (self.v1 - self.v0).abs()
    }

    /// Inclusive span membership along the edge's axis.
    pub fn contains(&self, v: f32) -> bool {
        self.span_min() <= v && v <= self.span_max()
    }

    /// True when `v` lies strictly inside the span, clear of both ends.
    pub fn strictly_within(&self, v: f32) -> bool {
        self.span_min() + GEOM_EPS < v && v < self.span_max() - GEOM_EPS
    }

    /// Whether the cartesian point sits on this edge: inside the span and
    /// on the constant axis within tolerance.
    pub fn strict_contains(&self, x: f32, y: f32) -> bool {
        let (v, z) = match self.orientation {
            Orientation::Horizontal => (x, y),
            Orientation::Vertical => (y, x),
        };
        self.contains(v) && (z - self.z).abs() <= GEOM_EPS
    }

    /// Cartesian endpoints, in `(v0, v1)` order.
    pub fn cartesian_points(&self) -> ((f32, f32), (f32, f32)) {
        match self.orientation {
            Orientation::Horizontal => ((self.v0, self.z), (self.v1, self.z)),
            Orientation::Vertical => ((self.z, self.v0), (self.z, self.v1)),
        }
    }

    /// Cartesian point at fraction `t` of the way from `v0` to `v1`.
    pub fn point_at(&self, t: f32) -> (f32, f32) {
        let v = self.v0 + (self.v1 - self.v0) * t;
        match self.orientation {
            Orientation::Horizontal => (v, self.z),
            Orientation::Vertical => (self.z, v),
        }
    }

    pub fn center(&self) -> (f32, f32) {
        self.point_at(0.5)
    }

    /// Unit direction from the first cartesian endpoint to the second.
    pub fn unit_vector(&self) -> (f32, f32) {
        let ((x0, y0), (x1, y1)) = self.cartesian_points();
        let (dx, dy) = (x1 - x0, y1 - y0);
        let len = (dx * dx + dy * dy).sqrt();
        if len <= GEOM_EPS {
            (0.0, 0.0)
        } else {
            (dx / len, dy / len)
        }
    }

    /// Two points on the edge straddling `point_at(t)` at distance `r`,
    /// in edge direction order. Used for door hinge and latch placement.
    pub fn radial_points(&self, t: f32, r: f32) -> ((f32, f32), (f32, f32)) {
        let (cx, cy) = self.point_at(t);
        let (ux, uy) = self.unit_vector();
        ((cx - ux * r, cy - uy * r), (cx + ux * r, cy + uy * r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negate_flips_axis() {
        assert_eq!(Orientation::Horizontal.negate(), Orientation::Vertical);
        assert_eq!(Orientation::Vertical.negate(), Orientation::Horizontal);
    }

    #[test]
    fn between_infers_orientation_from_shared_coordinate() {
        let h = Edge::between((0.0, 5.0), (10.0, 5.0), None, None).unwrap();
        assert_eq!(h.orientation, Orientation::Horizontal);
        assert_eq!(h.z, 5.0);
        assert_eq!((h.v0, h.v1), (0.0, 10.0));

        let v = Edge::between((4.0, 0.0), (4.0, 8.0), None, None).unwrap();
        assert_eq!(v.orientation, Orientation::Vertical);
        assert_eq!(v.z, 4.0);
        assert_eq!((v.v0, v.v1), (0.0, 8.0));
    }

    #[test]
    fn between_rejects_diagonal_endpoints() {
        let err = Edge::between((0.0, 0.0), (3.0, 4.0), None, None).unwrap_err();
        assert!(matches!(err, GeometryError::DiagonalEdge { .. }));
    }

    #[test]
    fn between_rejects_coincident_endpoints() {
        let err = Edge::between((4.0, 4.0), (4.0, 4.0), None, None).unwrap_err();
        assert!(matches!(err, GeometryError::DegenerateEdge { .. }));

        let near = Edge::between((4.0, 4.0), (4.0, 4.00005), None, None);
        assert!(near.is_err(), "a span inside tolerance is no edge");
    }

    #[test]
    fn contains_is_inclusive_strictly_within_is_not() {
        let e = Edge::new(2.0, 8.0, 0.0, Orientation::Horizontal, None, None);
        assert!(e.contains(2.0));
        assert!(e.contains(8.0));
        assert!(e.contains(5.0));
        assert!(!e.contains(1.9));
        assert!(e.strictly_within(5.0));
        assert!(!e.strictly_within(2.0));
        assert!(!e.strictly_within(8.0));
    }

    #[test]
    fn strict_contains_maps_point_per_orientation() {
        let h = Edge::new(0.0, 10.0, 3.0, Orientation::Horizontal, None, None);
        assert!(h.strict_contains(4.0, 3.0));
        assert!(!h.strict_contains(4.0, 3.5));

        let v = Edge::new(0.0, 10.0, 3.0, Orientation::Vertical, None, None);
        assert!(v.strict_contains(3.0, 4.0));
        assert!(!v.strict_contains(2.5, 4.0));
    }

    #[test]
    fn point_at_and_radial_points_follow_edge_direction() {
        let e = Edge::new(0.0, 10.0, 2.0, Orientation::Vertical, None, None);
        assert_eq!(e.point_at(0.0), (2.0, 0.0));
        assert_eq!(e.point_at(1.0), (2.0, 10.0));
        assert_eq!(e.center(), (2.0, 5.0));

        let (a, b) = e.radial_points(0.5, 1.5);
        assert_eq!(a, (2.0, 3.5));
        assert_eq!(b, (2.0, 6.5));
        assert_eq!(e.unit_vector(), (0.0, 1.0));
    }
}
