//! Pure planar geometry for lotwright.
//!
//! This crate contains the rectilinear floorplan model that everything else
//! builds on: axis-aligned wall edges, rectangular rooms, and the
//! proportional subdivision that carves a lot into rooms and hallways.
//! Functions take plain data and return results, making them unit-testable
//! and independent of any search or rendering concern.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`constants`] | Geometry tolerances, minimum extents, fill colors |
//! | [`door`] | Doors hung on wall edges, swing sides, feasible placement |
//! | [`edge`] | Axis-aligned edges: span, constant axis, side rooms |
//! | [`plan`] | Floorplan arena and proportional subdivision |
//! | [`room`] | Rooms, room programs, assigned roles, derived bounds |

pub mod constants;
pub mod door;
pub mod edge;
pub mod plan;
pub mod room;
