use crate::error::{Error, Result};
use crate::snapshot::Snapshot;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::warn;

/// In-memory collection of snapshots, one per scan date.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    snapshots: BTreeMap<NaiveDate, Snapshot>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a snapshot, replacing any existing one for the same date.
    ///
    /// The replaced snapshot is returned so callers can apply a stricter
    /// policy for duplicate dates.
    pub fn add(&mut self, date: NaiveDate, snapshot: Snapshot) -> Option<Snapshot> {
        let replaced = self.snapshots.insert(date, snapshot);
        if replaced.is_some() {
            warn!("Scan for {} ingested twice; keeping the later one", date);
        }
        replaced
    }

    pub fn get(&self, date: NaiveDate) -> Option<&Snapshot> {
        self.snapshots.get(&date)
    }

    /// All snapshots in ascending date order.
    pub fn all(&self) -> impl Iterator<Item = (NaiveDate, &Snapshot)> {
        self.snapshots.iter().map(|(date, snap)| (*date, snap))
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.snapshots.keys().copied().collect()
    }

    pub fn latest(&self) -> Result<(NaiveDate, &Snapshot)> {
        self.snapshots
            .iter()
            .next_back()
            .map(|(date, snap)| (*date, snap))
            .ok_or(Error::EmptyStore)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
