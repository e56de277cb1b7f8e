//! Turning finished floorplans into drawings.
//!
//! | Module | Purpose |
//! |---|---|
//! | `params` | Scaling and stroke configuration shared by every output |
//! | `lines` | Flat line-segment export, wall and door geometry |
//! | `svg` | Standalone SVG documents with fills, labels, and door arcs |

pub mod lines;
pub mod params;
pub mod svg;
