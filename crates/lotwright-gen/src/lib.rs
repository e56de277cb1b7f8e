//! Floorplan generation and search for lotwright.
//!
//! The pipeline runs in two stages over a fixed lot and program list:
//! partition trees are evolved until a good carving settles out, then a
//! door set is evolved for the winning plan. Everything downstream of the
//! geometry lives here.
//!
//! | Module | Purpose |
//! |---|---|
//! | `tree` | Binary partition trees, random generation, validation |
//! | `builder` | Tree to floorplan instantiation with infeasibility containment |
//! | `evaluator` | Scoring terms, weight sets, plan features |
//! | `genetic` | Shared GA plumbing: config, ranking, tournaments |
//! | `tree_shaker` | Genetic search over partition trees |
//! | `doors` | Door seeding, the placement judge |
//! | `door_shaker` | Genetic search over door placements |
//! | `weight_frobber` | Learning evaluator weights from ranked pairs |
//! | `centrifuge` | End-to-end tree-then-door evolution |
//! | `dna` | Plan records on disk, preference-pair files |

pub mod builder;
pub mod centrifuge;
pub mod dna;
pub mod door_shaker;
pub mod doors;
pub mod evaluator;
pub mod genetic;
pub mod tree;
pub mod tree_shaker;
pub mod weight_frobber;
