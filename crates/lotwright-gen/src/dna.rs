//! Plan DNA records and preference-pair training files.
//!
//! A DNA record captures everything needed to regrow a floorplan: the
//! lot, the program list, and the partition tree. Records are JSON so
//! training files can reference them as plain text paths and a human can
//! still read what a plan was grown from.

use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use lotwright_core::plan::FloorPlan;
use lotwright_core::room::RoomProgram;

use crate::builder::{BuildError, ConfigError, FloorplanBuilder};
use crate::evaluator::TreeWeights;
use crate::tree::Node;

/// Bump when the record layout changes incompatibly.
pub const DNA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanDna {
    pub version: u32,
    pub lot_width: f32,
    pub lot_height: f32,
    pub programs: Vec<RoomProgram>,
    pub tree: Node,
}

impl PlanDna {
    pub fn new(
        lot_width: f32,
        lot_height: f32,
        programs: Vec<RoomProgram>,
        tree: Node,
    ) -> PlanDna {
        PlanDna {
            version: DNA_VERSION,
            lot_width,
            lot_height,
            programs,
            tree,
        }
    }

    /// Regrows the floorplan this record describes.
    pub fn materialize(&self, weights: TreeWeights) -> Result<FloorPlan, DnaError> {
        let builder =
            FloorplanBuilder::new(self.lot_width, self.lot_height, self.programs.clone(), weights)?;
        let mut tree = self.tree.clone();
        Ok(builder.build(&mut tree)?)
    }
}

#[derive(Debug)]
pub enum DnaError {
    Io(std::io::Error),
    Json(serde_json::Error),
    VersionMismatch { found: u32, expected: u32 },
    Config(Vec<ConfigError>),
    Build(BuildError),
    MalformedPairLine { line: usize },
}

impl fmt::Display for DnaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DnaError::Io(e) => write!(f, "dna file io: {e}"),
            DnaError::Json(e) => write!(f, "dna record parse: {e}"),
            DnaError::VersionMismatch { found, expected } => {
                write!(f, "dna record version {found}, this build reads {expected}")
            }
            DnaError::Config(errors) => {
                write!(f, "dna record rejected with {} config errors", errors.len())
            }
            DnaError::Build(e) => write!(f, "dna tree failed to materialize: {e}"),
            DnaError::MalformedPairLine { line } => {
                write!(f, "pair file line {line}: expected two whitespace-separated paths")
            }
        }
    }
}

impl Error for DnaError {}

impl From<std::io::Error> for DnaError {
    fn from(e: std::io::Error) -> DnaError {
        DnaError::Io(e)
    }
}

impl From<serde_json::Error> for DnaError {
    fn from(e: serde_json::Error) -> DnaError {
        DnaError::Json(e)
    }
}

impl From<Vec<ConfigError>> for DnaError {
    fn from(errors: Vec<ConfigError>) -> DnaError {
        DnaError::Config(errors)
    }
}

impl From<BuildError> for DnaError {
    fn from(e: BuildError) -> DnaError {
        DnaError::Build(e)
    }
}

pub fn save_dna(path: &Path, dna: &PlanDna) -> Result<(), DnaError> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), dna)?;
    Ok(())
}

pub fn load_dna(path: &Path) -> Result<PlanDna, DnaError> {
    let file = File::open(path)?;
    let dna: PlanDna = serde_json::from_reader(BufReader::new(file))?;
    if dna.version != DNA_VERSION {
        return Err(DnaError::VersionMismatch {
            found: dna.version,
            expected: DNA_VERSION,
        });
    }
    Ok(dna)
}

/// Parses a training file: one `greater lesser` pair of DNA paths per
/// line, meaning the left plan was preferred over the right. Blank lines
/// and `#` comments are skipped.
pub fn read_preference_pairs(path: &Path) -> Result<Vec<(PathBuf, PathBuf)>, DnaError> {
    let file = File::open(path)?;
    let mut pairs = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut parts = line.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(greater), Some(lesser), None) => {
                pairs.push((PathBuf::from(greater), PathBuf::from(lesser)));
            }
            _ => return Err(DnaError::MalformedPairLine { line: index + 1 }),
        }
    }
    Ok(pairs)
}
