//! Geometry tolerances, minimum extents, and plan styling constants.
//!
//! All linear values are in lot units. The demo lot is 100x60 units, so a
//! unit reads roughly as a third of a meter.

/// Tolerance for coordinate comparisons.
pub const GEOM_EPS: f32 = 1e-4;

/// Narrowest extent a split may leave either resulting room.
pub const MIN_ROOM_EXTENT: f32 = 8.0;

/// Width of the corridor carved by a padded split.
pub const HALLWAY_WIDTH: f32 = 5.0;

/// Smallest room dimension that can host a hallway split: two minimal
/// flanking rooms plus the corridor between them.
pub const MIN_HALLWAY_SPAN: f32 = 2.0 * MIN_ROOM_EXTENT + HALLWAY_WIDTH;

/// Default width of an interior door.
pub const INTERIOR_DOOR_WIDTH: f32 = 3.0;

/// Clearance kept between a door span and the ends of its wall.
pub const DOOR_END_CLEARANCE: f32 = 1.0;

/// Fill and stroke colors, hex without the leading `#`.
pub mod colors {
    /// Wall stroke.
    pub const WALL: &str = "595959";
    /// Door slab and swing arc stroke.
    pub const DOOR: &str = "000000";
    /// Hallway room fill.
    pub const HALLWAY_FILL: &str = "d9d9d9";
    /// Fill for regions whose split could not be satisfied.
    pub const INFEASIBLE_FILL: &str = "f2a0a0";
    /// Fill for rooms that never received a role.
    pub const UNASSIGNED_FILL: &str = "ffffff";
}

/// Display labels for the non-program roles.
pub mod labels {
    pub const HALLWAY: &str = "hall";
    pub const INFEASIBLE: &str = "no fit";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hallway_span_matches_component_extents() {
        assert_eq!(MIN_HALLWAY_SPAN, 2.0 * MIN_ROOM_EXTENT + HALLWAY_WIDTH);
        assert!(MIN_HALLWAY_SPAN > HALLWAY_WIDTH);
    }
}
