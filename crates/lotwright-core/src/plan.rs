//! The floorplan arena and proportional subdivision.
//!
//! Rooms and edges live in index arenas. Handles stay valid for the life
//! of the plan: subdividing retires the parent entries and pushes children,
//! so old handles still resolve for reading while iteration only visits
//! live entries. Replacing an edge with its halves updates both adjacent
//! rooms in one step, which keeps adjacency bidirectional at all times.

use std::fmt;

use crate::constants::{GEOM_EPS, HALLWAY_WIDTH, MIN_ROOM_EXTENT};
use crate::door::Door;
use crate::edge::{Edge, EdgeId, GeometryError, Orientation};
use crate::room::{Bounds, Room, RoomId, RoomRole};

/// Result of a successful proportional subdivision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Split {
    /// Child on the lower-coordinate side of the cut axis.
    pub first: RoomId,
    /// Child on the higher-coordinate side.
    pub second: RoomId,
    /// Corridor between them, when one was carved.
    pub hallway: Option<RoomId>,
}

/// Why a proportional subdivision failed.
#[derive(Debug, Clone, PartialEq)]
pub enum SplitError {
    /// The requested ratio leaves a side thinner than `MIN_ROOM_EXTENT`.
    Infeasible { extent: f32 },
    /// The rooms flanking the corridor would be thinner than
    /// `MIN_ROOM_EXTENT`.
    HallwayTooTight { extent: f32 },
    /// Underlying geometry misuse. Propagated, never contained.
    Geometry(GeometryError),
}

impl SplitError {
    /// True for layout infeasibility the caller may recover from by
    /// assigning the region an infeasible role and carrying on.
    pub fn is_infeasible(&self) -> bool {
        !matches!(self, SplitError::Geometry(_))
    }
}

impl fmt::Display for SplitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitError::Infeasible { extent } => {
                write!(f, "split leaves a room {extent} units across, below the minimum {MIN_ROOM_EXTENT}")
            }
            SplitError::HallwayTooTight { extent } => {
                write!(f, "hallway leaves a flank {extent} units across, below the minimum {MIN_ROOM_EXTENT}")
            }
            SplitError::Geometry(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SplitError {}

impl From<GeometryError> for SplitError {
    fn from(e: GeometryError) -> SplitError {
        SplitError::Geometry(e)
    }
}

/// A rectilinear floorplan being carved out of a lot.
#[derive(Debug, Clone)]
pub struct FloorPlan {
    rooms: Vec<Room>,
    edges: Vec<Edge>,
}

impl FloorPlan {
    /// Seeds a plan with a single lot-sized room and its four exterior
    /// walls.
    pub fn rectangle(width: f32, height: f32) -> FloorPlan {
        let mut plan = FloorPlan {
            rooms: Vec::new(),
            edges: Vec::new(),
        };
        let room = plan.push_room(Vec::new());
        let bottom = plan.push_edge(Edge::new(
            0.0,
            width,
            0.0,
            Orientation::Horizontal,
            None,
            Some(room),
        ));
        let right = plan.push_edge(Edge::new(
            0.0,
            height,
            width,
            Orientation::Vertical,
            Some(room),
            None,
        ));
        let top = plan.push_edge(Edge::new(
            0.0,
            width,
            height,
            Orientation::Horizontal,
            Some(room),
            None,
        ));
        let left = plan.push_edge(Edge::new(
            0.0,
            height,
            0.0,
            Orientation::Vertical,
            None,
            Some(room),
        ));
        plan.rooms[room.0 as usize].edges = vec![bottom, right, top, left];
        plan
    }

    pub fn room(&self, id: RoomId) -> &Room {
        &self.rooms[id.0 as usize]
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.0 as usize]
    }

    /// Live rooms, in creation order.
    pub fn rooms(&self) -> impl Iterator<Item = (RoomId, &Room)> {
        self.rooms
            .iter()
            .enumerate()
            .filter(|(_, r)| !r.retired)
            .map(|(i, r)| (RoomId(i as u32), r))
    }

    /// Live edges, in creation order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, e)| !e.retired)
            .map(|(i, e)| (EdgeId(i as u32), e))
    }

    pub fn room_count(&self) -> usize {
        self.rooms().count()
    }

    /// Summed area of the live rooms.
    pub fn total_area(&self) -> f32 {
        self.rooms()
            .map(|(id, _)| self.room_bounds(id).area())
            .sum()
    }

    /// Extent of a room, derived from its boundary edges.
    pub fn room_bounds(&self, id: RoomId) -> Bounds {
        let room = self.room(id);
        let (mut x_min, mut y_min) = (f32::INFINITY, f32::INFINITY);
        let (mut x_max, mut y_max) = (f32::NEG_INFINITY, f32::NEG_INFINITY);
        for &eid in &room.edges {
            let (p0, p1) = self.edge(eid).cartesian_points();
            for (x, y) in [p0, p1] {
                x_min = x_min.min(x);
                y_min = y_min.min(y);
                x_max = x_max.max(x);
                y_max = y_max.max(y);
            }
        }
        if x_min > x_max {
            return Bounds {
                x_min: 0.0,
                y_min: 0.0,
                x_max: 0.0,
                y_max: 0.0,
            };
        }
        Bounds {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    pub fn assign_role(&mut self, id: RoomId, role: RoomRole) {
        self.rooms[id.0 as usize].role = Some(role);
    }

    /// Hangs a door on a live edge. Placement quality is the door search's
    /// concern.
    pub fn attach_door(&mut self, id: EdgeId, door: Door) -> Result<(), GeometryError> {
        let e = &mut self.edges[id.0 as usize];
        if e.retired {
            return Err(GeometryError::RetiredEdge(id));
        }
        e.doors.push(door);
        Ok(())
    }

    /// Rooms sharing a boundary edge with `id`.
    pub fn neighbors(&self, id: RoomId) -> Vec<RoomId> {
        let mut out = Vec::new();
        for &eid in &self.room(id).edges {
            let e = self.edge(eid);
            for side in [e.negative, e.positive].into_iter().flatten() {
                if side != id && !out.contains(&side) {
                    out.push(side);
                }
            }
        }
        out
    }

    /// True when any boundary edge faces the plan exterior.
    pub fn touches_exterior(&self, id: RoomId) -> bool {
        self.room(id).edges.iter().any(|&eid| {
            let e = self.edge(eid);
            e.negative.is_none() || e.positive.is_none()
        })
    }

    /// Splits an edge at `v` along its axis. The two children replace the
    /// parent in both adjacent rooms in one step; doors move to whichever
    /// child contains them with `t` recomputed. The cut must fall strictly
    /// inside the span.
    pub fn subdivide_edge(&mut self, id: EdgeId, v: f32) -> Result<(EdgeId, EdgeId), GeometryError> {
        let parent = self.edge(id).clone();
        if parent.retired {
            return Err(GeometryError::RetiredEdge(id));
        }
        if !parent.strictly_within(v) {
            return Err(GeometryError::CutOutsideSpan {
                cut: v,
                v0: parent.v0,
                v1: parent.v1,
            });
        }

        let mut near = Edge::new(
            parent.v0,
            v,
            parent.z,
            parent.orientation,
            parent.negative,
            parent.positive,
        );
        let mut far = Edge::new(
            v,
            parent.v1,
            parent.z,
            parent.orientation,
            parent.negative,
            parent.positive,
        );
        for door in &parent.doors {
            let dv = parent.v0 + (parent.v1 - parent.v0) * door.t;
            let target = if near.contains(dv) { &mut near } else { &mut far };
            let mut moved = *door;
            moved.t = (dv - target.v0) / (target.v1 - target.v0);
            target.doors.push(moved);
        }

        let near_id = self.push_edge(near);
        let far_id = self.push_edge(far);
        if let Some(rid) = parent.negative {
            self.rooms[rid.0 as usize].replace_edge(id, far_id, near_id);
        }
        if let Some(rid) = parent.positive {
            self.rooms[rid.0 as usize].replace_edge(id, near_id, far_id);
        }
        self.edges[id.0 as usize].retired = true;
        Ok((near_id, far_id))
    }

    /// Carves a room in two at fraction `s` of its extent along the cut
    /// axis. `orientation` is the dividing wall's own axis: a vertical wall
    /// splits the width, a horizontal wall the height. With `hallway`, a
    /// corridor of `HALLWAY_WIDTH` is carved centered on the cut and
    /// returned as the middle room.
    ///
    /// All feasibility checks run before any mutation, so the plan is left
    /// untouched on error.
    pub fn proportional_subdivide(
        &mut self,
        s: f32,
        orientation: Orientation,
        room_id: RoomId,
        hallway: bool,
    ) -> Result<Split, SplitError> {
        if self.room(room_id).retired {
            return Err(SplitError::Geometry(GeometryError::RetiredRoom(room_id)));
        }
        let bounds = self.room_bounds(room_id);
        let (lo, hi) = match orientation {
            Orientation::Vertical => (bounds.x_min, bounds.x_max),
            Orientation::Horizontal => (bounds.y_min, bounds.y_max),
        };
        let extent = hi - lo;
        let cut = lo + s * extent;
        let first_extent = cut - lo;
        let second_extent = hi - cut;
        if !(s > 0.0 && s < 1.0) {
            return Err(SplitError::Infeasible {
                extent: first_extent.min(second_extent),
            });
        }

        let cuts: Vec<f32> = if hallway {
            let half = HALLWAY_WIDTH * 0.5;
            let flank_first = first_extent - half;
            let flank_second = second_extent - half;
            if flank_first < MIN_ROOM_EXTENT || flank_second < MIN_ROOM_EXTENT {
                return Err(SplitError::HallwayTooTight {
                    extent: flank_first.min(flank_second),
                });
            }
            vec![cut - half, cut + half]
        } else {
            if first_extent < MIN_ROOM_EXTENT || second_extent < MIN_ROOM_EXTENT {
                return Err(SplitError::Infeasible {
                    extent: first_extent.min(second_extent),
                });
            }
            vec![cut]
        };

        // Split every perpendicular boundary edge at each cut coordinate.
        // Cuts landing on an existing vertex need no subdivision.
        for &c in &cuts {
            let boundary: Vec<EdgeId> = self.room(room_id).edges.clone();
            for eid in boundary {
                let edge = self.edge(eid);
                if edge.orientation == orientation {
                    continue;
                }
                if edge.strictly_within(c) {
                    self.subdivide_edge(eid, c)?;
                }
            }
        }

        // Partition the boundary between the child rooms. An edge's extent
        // on the cut axis is a point for wall-parallel edges and its span
        // for perpendicular ones.
        let cut_lo = cuts[0];
        let cut_hi = cuts[cuts.len() - 1];
        let mut first_edges = Vec::new();
        let mut second_edges = Vec::new();
        let mut hall_edges = Vec::new();
        for eid in self.room(room_id).edges.clone() {
            let e = self.edge(eid);
            let (ilo, ihi) = if e.orientation == orientation {
                (e.z, e.z)
            } else {
                (e.span_min(), e.span_max())
            };
            if ihi <= cut_lo + GEOM_EPS {
                first_edges.push(eid);
            } else if ilo >= cut_hi - GEOM_EPS {
                second_edges.push(eid);
            } else {
                hall_edges.push(eid);
            }
        }

        let first_id = self.push_room(first_edges.clone());
        let second_id = self.push_room(second_edges.clone());
        let hall_id = if hallway {
            Some(self.push_room(hall_edges.clone()))
        } else {
            None
        };
        self.repoint_edges(&first_edges, room_id, first_id);
        self.repoint_edges(&second_edges, room_id, second_id);
        if let Some(h) = hall_id {
            self.repoint_edges(&hall_edges, room_id, h);
        }

        let (span0, span1) = match orientation {
            Orientation::Vertical => (bounds.y_min, bounds.y_max),
            Orientation::Horizontal => (bounds.x_min, bounds.x_max),
        };
        match hall_id {
            None => {
                let wall = self.push_edge(Edge::new(
                    span0,
                    span1,
                    cut_lo,
                    orientation,
                    Some(first_id),
                    Some(second_id),
                ));
                self.rooms[first_id.0 as usize].edges.push(wall);
                self.rooms[second_id.0 as usize].edges.push(wall);
            }
            Some(h) => {
                let w0 = self.push_edge(Edge::new(
                    span0,
                    span1,
                    cut_lo,
                    orientation,
                    Some(first_id),
                    Some(h),
                ));
                let w1 = self.push_edge(Edge::new(
                    span0,
                    span1,
                    cut_hi,
                    orientation,
                    Some(h),
                    Some(second_id),
                ));
                self.rooms[first_id.0 as usize].edges.push(w0);
                self.rooms[h.0 as usize].edges.push(w0);
                self.rooms[h.0 as usize].edges.push(w1);
                self.rooms[second_id.0 as usize].edges.push(w1);
            }
        }

        self.rooms[room_id.0 as usize].retired = true;
        Ok(Split {
            first: first_id,
            second: second_id,
            hallway: hall_id,
        })
    }

    fn push_room(&mut self, edges: Vec<EdgeId>) -> RoomId {
        let id = RoomId(self.rooms.len() as u32);
        self.rooms.push(Room::new(edges));
        id
    }

    fn push_edge(&mut self, edge: Edge) -> EdgeId {
        let id = EdgeId(self.edges.len() as u32);
        self.edges.push(edge);
        id
    }

    fn repoint_edges(&mut self, ids: &[EdgeId], from: RoomId, to: RoomId) {
        for &eid in ids {
            let e = &mut self.edges[eid.0 as usize];
            if e.negative == Some(from) {
                e.negative = Some(to);
            }
            if e.positive == Some(from) {
                e.positive = Some(to);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::door::Swing;

    const AREA_EPS: f32 = 1e-2;

    fn seed_room(plan: &FloorPlan) -> RoomId {
        plan.rooms().next().map(|(id, _)| id).unwrap()
    }

    /// Every room lists live edges that point back at it, and every live
    /// edge's side rooms list the edge.
    fn assert_adjacency(plan: &FloorPlan) {
        for (rid, room) in plan.rooms() {
            for &eid in &room.edges {
                let e = plan.edge(eid);
                assert!(!e.is_retired(), "room #{} lists retired edge #{}", rid.0, eid.0);
                assert!(
                    e.negative == Some(rid) || e.positive == Some(rid),
                    "edge #{} does not point back at room #{}",
                    eid.0,
                    rid.0
                );
            }
        }
        for (eid, e) in plan.edges() {
            for side in [e.negative, e.positive].into_iter().flatten() {
                let room = plan.room(side);
                assert!(!room.is_retired(), "edge #{} points at retired room #{}", eid.0, side.0);
                assert!(
                    room.edges.contains(&eid),
                    "room #{} does not list edge #{}",
                    side.0,
                    eid.0
                );
            }
        }
    }

    #[test]
    fn rectangle_seeds_one_room_with_four_exterior_walls() {
        let plan = FloorPlan::rectangle(100.0, 60.0);
        assert_eq!(plan.room_count(), 1);
        let room = seed_room(&plan);
        assert_eq!(plan.room(room).edges.len(), 4);
        let b = plan.room_bounds(room);
        assert_eq!((b.width(), b.height()), (100.0, 60.0));
        assert!(plan.touches_exterior(room));
        for &eid in &plan.room(room).edges {
            let e = plan.edge(eid);
            assert!(e.negative.is_none() || e.positive.is_none());
        }
        assert_adjacency(&plan);
    }

    #[test]
    fn vertical_split_divides_width_by_ratio() {
        let mut plan = FloorPlan::rectangle(100.0, 60.0);
        let room = seed_room(&plan);
        let split = plan
            .proportional_subdivide(0.4, Orientation::Vertical, room, false)
            .unwrap();
        assert!(split.hallway.is_none());

        let a = plan.room_bounds(split.first);
        let b = plan.room_bounds(split.second);
        assert!((a.width() - 40.0).abs() < AREA_EPS);
        assert!((b.width() - 60.0).abs() < AREA_EPS);
        assert_eq!(a.height(), 60.0);
        assert_eq!(b.height(), 60.0);
        assert!((plan.total_area() - 6000.0).abs() < AREA_EPS, "area must be conserved");
        assert!(plan.room(room).is_retired());
        assert_adjacency(&plan);
        assert_eq!(plan.neighbors(split.first), vec![split.second]);
    }

    #[test]
    fn horizontal_split_divides_height_by_ratio() {
        let mut plan = FloorPlan::rectangle(100.0, 60.0);
        let room = seed_room(&plan);
        let split = plan
            .proportional_subdivide(0.3, Orientation::Horizontal, room, false)
            .unwrap();
        let a = plan.room_bounds(split.first);
        let b = plan.room_bounds(split.second);
        assert!((a.height() - 18.0).abs() < AREA_EPS);
        assert!((b.height() - 42.0).abs() < AREA_EPS);
        assert!(a.y_max <= b.y_min + GEOM_EPS, "first child takes the low side");
        assert!((plan.total_area() - 6000.0).abs() < AREA_EPS);
        assert_adjacency(&plan);
    }

    #[test]
    fn hallway_split_carves_centered_corridor() {
        let mut plan = FloorPlan::rectangle(100.0, 60.0);
        let room = seed_room(&plan);
        let split = plan
            .proportional_subdivide(0.5, Orientation::Vertical, room, true)
            .unwrap();
        let hall = split.hallway.expect("corridor expected");

        let a = plan.room_bounds(split.first);
        let h = plan.room_bounds(hall);
        let b = plan.room_bounds(split.second);
        assert!((a.width() - 47.5).abs() < AREA_EPS);
        assert!((h.width() - HALLWAY_WIDTH).abs() < AREA_EPS);
        assert!((b.width() - 47.5).abs() < AREA_EPS);
        assert!((plan.total_area() - 6000.0).abs() < AREA_EPS, "corridor area counts too");

        let mut hall_neighbors = plan.neighbors(hall);
        hall_neighbors.sort();
        assert_eq!(hall_neighbors, vec![split.first, split.second]);
        assert_adjacency(&plan);
    }

    #[test]
    fn thin_split_is_infeasible_and_leaves_plan_untouched() {
        let mut plan = FloorPlan::rectangle(100.0, 60.0);
        let room = seed_room(&plan);
        let err = plan
            .proportional_subdivide(0.05, Orientation::Vertical, room, false)
            .unwrap_err();
        assert!(matches!(err, SplitError::Infeasible { .. }));
        assert!(err.is_infeasible());
        assert_eq!(plan.room_count(), 1);
        assert!(!plan.room(room).is_retired());
        assert_eq!(plan.room(room).edges.len(), 4);
    }

    #[test]
    fn tight_hallway_flanks_are_infeasible() {
        let mut plan = FloorPlan::rectangle(100.0, 60.0);
        let room = seed_room(&plan);
        let err = plan
            .proportional_subdivide(0.08, Orientation::Vertical, room, true)
            .unwrap_err();
        assert!(matches!(err, SplitError::HallwayTooTight { .. }));
        assert!(err.is_infeasible());
        assert_eq!(plan.room_count(), 1);
    }

    #[test]
    fn degenerate_ratios_are_infeasible() {
        let mut plan = FloorPlan::rectangle(100.0, 60.0);
        let room = seed_room(&plan);
        for s in [0.0, 1.0, -0.2, 1.3] {
            let err = plan
                .proportional_subdivide(s, Orientation::Vertical, room, false)
                .unwrap_err();
            assert!(err.is_infeasible(), "s = {s} must be contained, got {err}");
        }
    }

    #[test]
    fn geometry_errors_are_not_infeasible() {
        let err = SplitError::Geometry(GeometryError::RetiredRoom(RoomId(3)));
        assert!(!err.is_infeasible());
    }

    #[test]
    fn splitting_a_retired_room_is_a_geometry_error() {
        let mut plan = FloorPlan::rectangle(100.0, 60.0);
        let room = seed_room(&plan);
        plan.proportional_subdivide(0.5, Orientation::Vertical, room, false)
            .unwrap();
        let err = plan
            .proportional_subdivide(0.5, Orientation::Vertical, room, false)
            .unwrap_err();
        assert!(matches!(err, SplitError::Geometry(GeometryError::RetiredRoom(_))));
    }

    #[test]
    fn subdivide_edge_replaces_in_both_rooms_atomically() {
        let mut plan = FloorPlan::rectangle(100.0, 60.0);
        let room = seed_room(&plan);
        let split = plan
            .proportional_subdivide(0.5, Orientation::Vertical, room, false)
            .unwrap();
        let wall = *plan
            .room(split.first)
            .edges
            .iter()
            .find(|&&eid| {
                let e = plan.edge(eid);
                e.negative == Some(split.first) && e.positive == Some(split.second)
            })
            .expect("shared wall");

        let (near, far) = plan.subdivide_edge(wall, 30.0).unwrap();
        assert!(plan.edge(wall).is_retired());
        for rid in [split.first, split.second] {
            let edges = &plan.room(rid).edges;
            assert!(!edges.contains(&wall));
            assert!(edges.contains(&near) && edges.contains(&far));
        }
        assert_eq!(plan.edge(near).span_max(), 30.0);
        assert_eq!(plan.edge(far).span_min(), 30.0);
        assert_adjacency(&plan);
    }

    #[test]
    fn subdivide_edge_moves_doors_into_containing_child() {
        let mut plan = FloorPlan::rectangle(100.0, 60.0);
        let room = seed_room(&plan);
        let split = plan
            .proportional_subdivide(0.5, Orientation::Vertical, room, false)
            .unwrap();
        let wall = *plan
            .room(split.first)
            .edges
            .iter()
            .find(|&&eid| plan.edge(eid).positive == Some(split.second))
            .expect("shared wall");

        // Wall spans y 0..60; a door at t = 0.25 sits at y = 15.
        plan.attach_door(wall, Door::interior(0.25, Swing::Left)).unwrap();
        let (near, far) = plan.subdivide_edge(wall, 30.0).unwrap();
        assert_eq!(plan.edge(near).doors.len(), 1);
        assert!(plan.edge(far).doors.is_empty());
        let moved = plan.edge(near).doors[0];
        assert!((moved.t - 0.5).abs() < 1e-5, "t is relative to the child span");
    }

    #[test]
    fn subdivide_edge_rejects_cuts_outside_the_open_span() {
        let mut plan = FloorPlan::rectangle(100.0, 60.0);
        let room = seed_room(&plan);
        let bottom = plan.room(room).edges[0];
        for v in [0.0, 100.0, -5.0, 130.0] {
            let err = plan.subdivide_edge(bottom, v).unwrap_err();
            assert!(matches!(err, GeometryError::CutOutsideSpan { .. }), "cut {v}");
        }
    }

    #[test]
    fn retired_edges_reject_further_work() {
        let mut plan = FloorPlan::rectangle(100.0, 60.0);
        let room = seed_room(&plan);
        let bottom = plan.room(room).edges[0];
        plan.subdivide_edge(bottom, 50.0).unwrap();
        assert!(matches!(
            plan.subdivide_edge(bottom, 25.0),
            Err(GeometryError::RetiredEdge(_))
        ));
        assert!(matches!(
            plan.attach_door(bottom, Door::interior(0.5, Swing::Left)),
            Err(GeometryError::RetiredEdge(_))
        ));
    }

    #[test]
    fn nested_splits_update_neighbor_boundaries() {
        let mut plan = FloorPlan::rectangle(100.0, 60.0);
        let room = seed_room(&plan);
        let outer = plan
            .proportional_subdivide(0.5, Orientation::Vertical, room, false)
            .unwrap();
        let inner = plan
            .proportional_subdivide(0.5, Orientation::Horizontal, outer.first, false)
            .unwrap();

        assert_eq!(plan.room_count(), 3);
        assert!((plan.total_area() - 6000.0).abs() < AREA_EPS);
        // The shared wall was split at y = 30, so the untouched neighbor
        // now borders both halves.
        assert_eq!(plan.room(outer.second).edges.len(), 5);
        let mut neighbors = plan.neighbors(outer.second);
        neighbors.sort();
        let mut expected = vec![inner.first, inner.second];
        expected.sort();
        assert_eq!(neighbors, expected);
        assert_adjacency(&plan);
    }

    #[test]
    fn repeated_splits_conserve_area() {
        let mut plan = FloorPlan::rectangle(100.0, 60.0);
        let room = seed_room(&plan);
        let s1 = plan
            .proportional_subdivide(0.4, Orientation::Vertical, room, false)
            .unwrap();
        let s2 = plan
            .proportional_subdivide(0.5, Orientation::Horizontal, s1.second, true)
            .unwrap();
        let s3 = plan
            .proportional_subdivide(0.5, Orientation::Horizontal, s1.first, false)
            .unwrap();
        assert!(s2.hallway.is_some());
        assert!(s3.hallway.is_none());
        assert_eq!(plan.room_count(), 5);
        assert!((plan.total_area() - 6000.0).abs() < 0.1);
        assert_adjacency(&plan);
    }
}
