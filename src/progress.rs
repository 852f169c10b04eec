use crate::error::{Error, Result};
use crate::snapshot::Snapshot;
use crate::tag::LocationId;
use serde::Serialize;
use std::collections::BTreeSet;

/// Severity band for a completion percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    Red,
    Yellow,
    Lime,
}

impl Band {
    /// Thirds of the range: 1..=33 red, 34..=66 yellow, 67..=100 lime.
    pub fn for_percentage(percentage: u8) -> Self {
        match u32::from(percentage) * 100 / 3333 {
            0 => Band::Red,
            1 => Band::Yellow,
            _ => Band::Lime,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Band::Red => "red",
            Band::Yellow => "yellow",
            Band::Lime => "lime",
        }
    }
}

/// How much of the known location set a scan covered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Progress {
    /// Floor percentage, clamped to 1..=100 so a bar is always visible.
    pub percentage: u8,
    pub band: Band,
    pub present: usize,
    pub total: usize,
    /// Known locations absent from the scan, sorted.
    pub missed: Vec<LocationId>,
}

pub fn progress(current: &Snapshot, known_locations: &BTreeSet<LocationId>) -> Result<Progress> {
    if known_locations.is_empty() {
        return Err(Error::DivisionInput);
    }

    let (present, missed): (Vec<&LocationId>, Vec<&LocationId>) = known_locations
        .iter()
        .partition(|loc| current.contains_location(loc));

    let total = known_locations.len();
    let raw = present.len() * 100 / total;
    let percentage = raw.clamp(1, 100) as u8;

    Ok(Progress {
        percentage,
        band: Band::for_percentage(percentage),
        present: present.len(),
        total,
        missed: missed.into_iter().cloned().collect(),
    })
}
