//! Doors hung on wall edges.

use serde::{Deserialize, Serialize};

use crate::constants::{DOOR_END_CLEARANCE, INTERIOR_DOOR_WIDTH};

/// Which end of the opening carries the hinge, looking along the edge
/// direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Swing {
    Left,
    Right,
}

impl Swing {
    pub fn flip(self) -> Swing {
        match self {
            Swing::Left => Swing::Right,
            Swing::Right => Swing::Left,
        }
    }
}

/// A door on a single wall edge, positioned by the fraction `t` of the
/// edge length. Doors are read-only once attached; the door search shapes
/// detached candidates and applies the winning set once.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Door {
    pub t: f32,
    pub width: f32,
    pub swing: Swing,
}

impl Door {
    /// Standard interior door at fraction `t`.
    pub fn interior(t: f32, swing: Swing) -> Door {
        Door {
            t,
            width: INTERIOR_DOOR_WIDTH,
            swing,
        }
    }

    /// The `t` interval keeping a door of `width` plus end clearance inside
    /// a wall of `edge_length`. None when the wall is too short.
    pub fn feasible_range(width: f32, edge_length: f32) -> Option<(f32, f32)> {
        if edge_length <= 0.0 {
            return None;
        }
        let margin = (DOOR_END_CLEARANCE + width * 0.5) / edge_length;
        if margin >= 0.5 {
            return None;
        }
        Some((margin, 1.0 - margin))
    }

    /// Door span `(lo, hi)` in absolute units along the edge.
    pub fn span(&self, edge_length: f32) -> (f32, f32) {
        let center = self.t * edge_length;
        (center - self.width * 0.5, center + self.width * 0.5)
    }
}
