use crate::error::{GreenwaveError, GwResult};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// Approach roads of the intersection. Declaration order is the fixed
/// total order used for vector indexing and deterministic tie-breaking.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, EnumString, Display,
)]
#[strum(serialize_all = "snake_case")]
pub enum Direction {
    North,
    South,
    East,
    West,
}

pub const DIRECTION_COUNT: usize = 4;

impl Direction {
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Vehicle counts per approach, as delivered by the upstream counting
/// stage. Always well-formed: raw rows go through [`DemandVector::from_slice`],
/// which rejects wrong arity and negative counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemandVector {
    pub north: u32,
    pub south: u32,
    pub east: u32,
    pub west: u32,
}

impl DemandVector {
    pub fn new(north: u32, south: u32, east: u32, west: u32) -> Self {
        Self {
            north,
            south,
            east,
            west,
        }
    }

    /// Builds a demand vector from a raw row of counts (CLI flags, CSV
    /// fields), in Direction declaration order.
    pub fn from_slice(counts: &[i64]) -> GwResult<Self> {
        if counts.len() != DIRECTION_COUNT {
            return Err(GreenwaveError::InvalidDemand(format!(
                "expected {} counts, got {}",
                DIRECTION_COUNT,
                counts.len()
            )));
        }

        for (dir, &c) in Direction::iter().zip(counts.iter()) {
            if c < 0 {
                return Err(GreenwaveError::InvalidDemand(format!(
                    "count for {} is negative ({})",
                    dir, c
                )));
            }
            if c > u32::MAX as i64 {
                return Err(GreenwaveError::InvalidDemand(format!(
                    "count for {} is out of range ({})",
                    dir, c
                )));
            }
        }

        Ok(Self::new(
            counts[0] as u32,
            counts[1] as u32,
            counts[2] as u32,
            counts[3] as u32,
        ))
    }

    pub fn get(&self, dir: Direction) -> u32 {
        match dir {
            Direction::North => self.north,
            Direction::South => self.south,
            Direction::East => self.east,
            Direction::West => self.west,
        }
    }

    pub fn counts(&self) -> [u32; DIRECTION_COUNT] {
        [self.north, self.south, self.east, self.west]
    }

    pub fn total(&self) -> u64 {
        self.counts().iter().map(|&c| c as u64).sum()
    }
}

/// Reads demand rows from CSV: four integer columns per row, in
/// north,south,east,west order. A non-numeric first row is treated as a
/// header and skipped; non-numeric data anywhere else is an error.
pub fn load_demand_rows<R: Read>(reader: R) -> GwResult<Vec<DemandVector>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();

    for (row_idx, result) in rdr.records().enumerate() {
        let rec = result?;
        if rec.iter().all(|f| f.is_empty()) {
            continue;
        }

        let mut counts = Vec::with_capacity(DIRECTION_COUNT);
        let mut numeric = true;
        for field in rec.iter() {
            match field.parse::<i64>() {
                Ok(v) => counts.push(v),
                Err(_) => {
                    numeric = false;
                    break;
                }
            }
        }

        if !numeric {
            if row_idx == 0 {
                continue;
            }
            return Err(GreenwaveError::InvalidDemand(format!(
                "row {}: non-numeric count",
                row_idx + 1
            )));
        }

        match DemandVector::from_slice(&counts) {
            Ok(demand) => rows.push(demand),
            Err(GreenwaveError::InvalidDemand(msg)) => {
                return Err(GreenwaveError::InvalidDemand(format!(
                    "row {}: {}",
                    row_idx + 1,
                    msg
                )));
            }
            Err(e) => return Err(e),
        }
    }

    if rows.is_empty() {
        return Err(GreenwaveError::InvalidDemand(
            "no demand rows found".to_string(),
        ));
    }

    Ok(rows)
}

pub fn load_demand_file(path: &str) -> GwResult<Vec<DemandVector>> {
    let file = File::open(path)?;
    load_demand_rows(file)
}
