//! Rooms, room programs, and the roles assigned to carved regions.

use serde::{Deserialize, Serialize};

use crate::constants::{colors, labels};
use crate::edge::EdgeId;

/// Stable handle into a floorplan's room arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(pub u32);

/// An ordinary room program: the label, fill color, and floor area the
/// client asked for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomProgram {
    pub label: String,
    /// Hex fill color, no leading `#`.
    pub fill_color: String,
    pub target_area: f32,
}

impl RoomProgram {
    pub fn new(label: &str, fill_color: &str, target_area: f32) -> RoomProgram {
        RoomProgram {
            label: label.to_string(),
            fill_color: fill_color.to_string(),
            target_area,
        }
    }
}

/// Role a region takes once the partition walk reaches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomRole {
    /// Ordinary room, an index into the program list.
    Program(usize),
    /// Corridor carved by a padded split. Assigned immediately, never
    /// recursed into.
    Hallway,
    /// The requested split could not be satisfied here.
    Infeasible,
}

impl RoomRole {
    pub fn label<'a>(&self, programs: &'a [RoomProgram]) -> &'a str {
        match self {
            RoomRole::Program(i) => programs.get(*i).map(|p| p.label.as_str()).unwrap_or("?"),
            RoomRole::Hallway => labels::HALLWAY,
            RoomRole::Infeasible => labels::INFEASIBLE,
        }
    }

    pub fn fill_color<'a>(&self, programs: &'a [RoomProgram]) -> &'a str {
        match self {
            RoomRole::Program(i) => programs
                .get(*i)
                .map(|p| p.fill_color.as_str())
                .unwrap_or(colors::UNASSIGNED_FILL),
            RoomRole::Hallway => colors::HALLWAY_FILL,
            RoomRole::Infeasible => colors::INFEASIBLE_FILL,
        }
    }

    pub fn is_program(&self) -> bool {
        matches!(self, RoomRole::Program(_))
    }

    pub fn is_hallway(&self) -> bool {
        matches!(self, RoomRole::Hallway)
    }

    pub fn is_infeasible(&self) -> bool {
        matches!(self, RoomRole::Infeasible)
    }
}

/// A rectangular region bounded by wall edges.
///
/// The boundary list preserves order when an edge is replaced by its
/// subdivision halves, so neighbors stay spliced in place.
#[derive(Debug, Clone)]
pub struct Room {
    pub edges: Vec<EdgeId>,
    /// None until the partition walk assigns a role.
    pub role: Option<RoomRole>,
    pub(crate) retired: bool,
}

impl Room {
    pub(crate) fn new(edges: Vec<EdgeId>) -> Room {
        Room {
            edges,
            role: None,
            retired: false,
        }
    }

    pub fn is_retired(&self) -> bool {
        self.retired
    }

    /// Splices `first` and `second` into the boundary list in place of
    /// `old`. The caller picks the near/far order for this side.
    pub(crate) fn replace_edge(&mut self, old: EdgeId, first: EdgeId, second: EdgeId) {
        if let Some(pos) = self.edges.iter().position(|&e| e == old) {
            self.edges.splice(pos..=pos, [first, second]);
        }
    }
}

/// Axis-aligned extent of a room, derived from its boundary edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
}

impl Bounds {
    pub fn width(&self) -> f32 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f32 {
        self.y_max - self.y_min
    }

    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    pub fn center(&self) -> (f32, f32) {
        (
            (self.x_min + self.x_max) * 0.5,
            (self.y_min + self.y_max) * 0.5,
        )
    }

    pub fn min_extent(&self) -> f32 {
        self.width().min(self.height())
    }

    pub fn contains(&self, x: f32, y: f32, eps: f32) -> bool {
        x >= self.x_min - eps && x <= self.x_max + eps && y >= self.y_min - eps && y <= self.y_max + eps
    }
}
