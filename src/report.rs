use crate::catalog::AssetCatalog;
use crate::diff::{diff, Diff};
use crate::error::Result;
use crate::progress::{progress, Band, Progress};
use crate::snapshot::Snapshot;
use crate::store::SnapshotStore;
use crate::tag::{AssetId, LocationId};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Caption format for scan dates, e.g. `05 Jan '16`.
pub const DATE_LABEL_FORMAT: &str = "%d %b '%y";

/// Structured report for a renderer.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub latest_date: NaiveDate,
    /// Assets by location for the latest scan.
    pub inventory: Vec<LocationInventory>,
    /// One section per scan after the first, in date order.
    pub changes: Vec<ScanChanges>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LocationInventory {
    pub location: LocationId,
    pub location_name: String,
    pub groups: Vec<AssetGroup>,
}

/// Assets at one location sharing a type name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetGroup {
    pub type_name: String,
    pub count: usize,
    pub assets: Vec<AssetId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScanChanges {
    pub date: NaiveDate,
    pub label: String,
    pub progress: ProgressSummary,
    pub changes: Vec<ChangeEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProgressSummary {
    pub percentage: u8,
    pub band: Band,
    pub present: usize,
    pub total: usize,
    pub missed_locations: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    New,
    Missing,
    Moved,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeEntry {
    pub kind: ChangeKind,
    pub asset: AssetId,
    pub asset_name: String,
    /// Display name of the location the asset was last seen at.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// Display name of the location the asset is now at.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
}

/// Walk the store in date order, diffing each scan against the one before it.
///
/// The first scan is only a baseline. Fails with `EmptyStore` when nothing
/// has been ingested.
pub fn assemble<C>(
    store: &SnapshotStore,
    known_locations: &BTreeSet<LocationId>,
    catalog: &C,
) -> Result<Report>
where
    C: AssetCatalog + ?Sized,
{
    let (latest_date, latest) = store.latest()?;

    let mut changes = Vec::new();
    let mut previous: Option<&Snapshot> = None;
    for (date, snapshot) in store.all() {
        if let Some(prev) = previous {
            let progress = progress(snapshot, known_locations)?;
            let diff = diff(prev, snapshot, |asset| catalog.is_defunct(asset));
            debug!(
                "{}: {}% scanned, {} new, {} missing, {} moved",
                date,
                progress.percentage,
                diff.new_assets.len(),
                diff.missing_assets.len(),
                diff.moved_assets.len(),
            );
            changes.push(ScanChanges {
                date,
                label: date.format(DATE_LABEL_FORMAT).to_string(),
                progress: summarize_progress(&progress, catalog),
                changes: change_entries(&diff, catalog),
            });
        }
        previous = Some(snapshot);
    }

    Ok(Report {
        latest_date,
        inventory: inventory(latest, catalog),
        changes,
    })
}

fn summarize_progress<C>(progress: &Progress, catalog: &C) -> ProgressSummary
where
    C: AssetCatalog + ?Sized,
{
    ProgressSummary {
        percentage: progress.percentage,
        band: progress.band,
        present: progress.present,
        total: progress.total,
        missed_locations: progress
            .missed
            .iter()
            .map(|loc| catalog.location_name(loc))
            .collect(),
    }
}

fn change_entries<C>(diff: &Diff, catalog: &C) -> Vec<ChangeEntry>
where
    C: AssetCatalog + ?Sized,
{
    let new = diff.new_assets.iter().map(|p| ChangeEntry {
        kind: ChangeKind::New,
        asset: p.asset.clone(),
        asset_name: catalog.asset_name(&p.asset),
        from: None,
        to: Some(catalog.location_name(&p.location)),
    });
    let missing = diff.missing_assets.iter().map(|p| ChangeEntry {
        kind: ChangeKind::Missing,
        asset: p.asset.clone(),
        asset_name: catalog.asset_name(&p.asset),
        from: Some(catalog.location_name(&p.location)),
        to: None,
    });
    let moved = diff.moved_assets.iter().map(|m| ChangeEntry {
        kind: ChangeKind::Moved,
        asset: m.asset.clone(),
        asset_name: catalog.asset_name(&m.asset),
        from: Some(catalog.location_name(&m.from)),
        to: Some(catalog.location_name(&m.to)),
    });
    new.chain(missing).chain(moved).collect()
}

/// Group each location's assets by resolved type name.
pub fn inventory<C>(snapshot: &Snapshot, catalog: &C) -> Vec<LocationInventory>
where
    C: AssetCatalog + ?Sized,
{
    snapshot
        .by_location()
        .into_iter()
        .map(|(location, assets)| {
            let mut by_type: BTreeMap<String, Vec<AssetId>> = BTreeMap::new();
            for asset in assets {
                by_type
                    .entry(catalog.asset_name(asset))
                    .or_default()
                    .push(asset.to_string());
            }
            LocationInventory {
                location: location.to_string(),
                location_name: catalog.location_name(location),
                groups: by_type
                    .into_iter()
                    .map(|(type_name, assets)| AssetGroup {
                        type_name,
                        count: assets.len(),
                        assets,
                    })
                    .collect(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::YamlCatalog;
    use crate::parser::parse_raw;

    const DB: &str = r#"
assets:
  A1: { type: { name: Laptop } }
  A2: { type: { name: Laptop } }
  A3: { type: { name: Desk } }
locations:
  LOCAT1: { facility: HQ, name: Lab }
  LOCAT2: { facility: HQ, name: Hall }
"#;

    #[test]
    fn test_inventory_groups_by_type_name() {
        let catalog = YamlCatalog::from_str(DB).unwrap();
        let snap = parse_raw(["LOCAT1", "A2", "A3", "A1", "X9", "LOCAT2"]).unwrap();
        let inv = inventory(&snap, &catalog);

        assert_eq!(inv.len(), 2);
        assert_eq!(inv[0].location_name, "HQ:Lab");
        assert_eq!(
            inv[0].groups,
            vec![
                AssetGroup {
                    type_name: "Desk".to_string(),
                    count: 1,
                    assets: vec!["A3".to_string()],
                },
                AssetGroup {
                    type_name: "Laptop".to_string(),
                    count: 2,
                    assets: vec!["A2".to_string(), "A1".to_string()],
                },
                AssetGroup {
                    type_name: "Unknown".to_string(),
                    count: 1,
                    assets: vec!["X9".to_string()],
                },
            ]
        );
        assert!(inv[1].groups.is_empty());
    }

    #[test]
    fn test_change_entries_order_and_names() {
        let catalog = YamlCatalog::from_str(DB).unwrap();
        let prev = parse_raw(["LOCAT1", "A1", "A3"]).unwrap();
        let curr = parse_raw(["LOCAT2", "A1", "A2"]).unwrap();
        let entries = change_entries(&diff(&prev, &curr, |_| false), &catalog);

        let kinds: Vec<ChangeKind> = entries.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![ChangeKind::New, ChangeKind::Missing, ChangeKind::Moved]
        );
        assert_eq!(entries[0].to.as_deref(), Some("HQ:Hall"));
        assert_eq!(entries[1].asset_name, "Desk");
        assert_eq!(entries[1].from.as_deref(), Some("HQ:Lab"));
        assert_eq!(entries[2].from.as_deref(), Some("HQ:Lab"));
        assert_eq!(entries[2].to.as_deref(), Some("HQ:Hall"));
    }
}
