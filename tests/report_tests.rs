use std::collections::BTreeSet;

use asset_reporter::report::{ChangeKind, DATE_LABEL_FORMAT};
use asset_reporter::{
    assemble, diff, parse_raw, progress, AssetCatalog, Band, Error, MovedAsset, SnapshotStore,
    YamlCatalog,
};
use chrono::NaiveDate;

const ASSETS_DB: &str = r#"
assets:
  A1: { type: { name: Laptop }, status: Active }
  A2: { type: { name: Monitor }, status: Active }
  A3: { type: { name: Printer }, status: Active }
  A4: { type: { name: Laptop }, status: Active }
locations:
  LOCAT1: { facility: HQ, name: Lab }
  LOCAT2: { facility: HQ, name: Hall }
  LOCAT3: { facility: Annex, name: Store }
  LOCAT4: { facility: Annex, name: Office }
"#;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn known(ids: &[&str]) -> BTreeSet<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_scenario_progress_and_diff() {
    let scan1 = parse_raw(["LOCAT1", "A1", "A2", "LOCAT2", "A3"]).unwrap();
    let scan2 = parse_raw(["LOCAT1", "A1", "LOCAT3", "A2", "A4"]).unwrap();
    let known_locations = known(&["LOCAT1", "LOCAT2", "LOCAT3", "LOCAT4"]);

    let p = progress(&scan1, &known_locations).unwrap();
    assert_eq!(p.percentage, 50);
    assert_eq!((p.present, p.total), (2, 4));
    assert_eq!(p.missed, vec!["LOCAT3".to_string(), "LOCAT4".to_string()]);

    let d = diff(&scan1, &scan2, |_| false);
    let new: Vec<&str> = d.new_assets.iter().map(|p| p.asset.as_str()).collect();
    let missing: Vec<&str> = d.missing_assets.iter().map(|p| p.asset.as_str()).collect();
    assert_eq!(new, vec!["A4"]);
    assert_eq!(missing, vec!["A3"]);
    assert_eq!(
        d.moved_assets,
        vec![MovedAsset {
            asset: "A2".to_string(),
            from: "LOCAT1".to_string(),
            to: "LOCAT3".to_string(),
        }]
    );

    let d = diff(&scan1, &scan2, |asset| asset == "A3");
    assert!(d.missing_assets.is_empty());
}

#[test]
fn test_assemble_report_sections() {
    let catalog = YamlCatalog::from_str(ASSETS_DB).unwrap();
    let mut store = SnapshotStore::new();
    store.add(date("2016-01-05"), parse_raw(["LOCAT1", "A1", "A2", "LOCAT2", "A3"]).unwrap());
    store.add(date("2016-01-12"), parse_raw(["LOCAT1", "A1", "LOCAT3", "A2", "A4"]).unwrap());
    store.add(
        date("2016-01-19"),
        parse_raw(["LOCAT1", "A1", "LOCAT3", "A2", "A4", "LOCAT2", "LOCAT4"]).unwrap(),
    );

    let known_locations = known(&["LOCAT1", "LOCAT2", "LOCAT3", "LOCAT4"]);
    let report = assemble(&store, &known_locations, &catalog).unwrap();

    assert_eq!(report.latest_date, date("2016-01-19"));
    assert_eq!(report.changes.len(), 2);

    let first = &report.changes[0];
    assert_eq!(first.date, date("2016-01-12"));
    assert_eq!(first.label, date("2016-01-12").format(DATE_LABEL_FORMAT).to_string());
    assert_eq!(first.label, "12 Jan '16");
    assert_eq!(first.progress.percentage, 50);
    assert_eq!(first.progress.band, Band::Yellow);
    assert_eq!(
        first.progress.missed_locations,
        vec!["HQ:Hall".to_string(), "Annex:Office".to_string()]
    );

    let kinds: Vec<(ChangeKind, &str)> = first
        .changes
        .iter()
        .map(|c| (c.kind, c.asset.as_str()))
        .collect();
    assert_eq!(
        kinds,
        vec![
            (ChangeKind::New, "A4"),
            (ChangeKind::Missing, "A3"),
            (ChangeKind::Moved, "A2"),
        ]
    );
    assert_eq!(first.changes[1].asset_name, "Printer");
    assert_eq!(first.changes[2].from.as_deref(), Some("HQ:Lab"));
    assert_eq!(first.changes[2].to.as_deref(), Some("Annex:Store"));

    let second = &report.changes[1];
    assert_eq!(second.progress.percentage, 100);
    assert_eq!(second.progress.band, Band::Lime);
    assert!(second.progress.missed_locations.is_empty());
    assert!(second.changes.is_empty());

    // Inventory follows the latest scan.
    let locations: Vec<&str> = report
        .inventory
        .iter()
        .map(|l| l.location_name.as_str())
        .collect();
    assert_eq!(locations, vec!["HQ:Lab", "Annex:Store", "HQ:Hall", "Annex:Office"]);
    let store_groups: Vec<(&str, usize)> = report.inventory[1]
        .groups
        .iter()
        .map(|g| (g.type_name.as_str(), g.count))
        .collect();
    assert_eq!(store_groups, vec![("Laptop", 1), ("Monitor", 1)]);
}

#[test]
fn test_assemble_skips_defunct_missing_assets() {
    let catalog = YamlCatalog::from_str(
        r#"
assets:
  A3: { type: { name: Printer }, status: Defunct }
locations:
  LOCAT1: { facility: HQ, name: Lab }
"#,
    )
    .unwrap();
    let mut store = SnapshotStore::new();
    store.add(date("2016-01-05"), parse_raw(["LOCAT1", "A1", "A3"]).unwrap());
    store.add(date("2016-01-12"), parse_raw(["LOCAT1", "A1"]).unwrap());

    let report = assemble(&store, &catalog.known_locations(), &catalog).unwrap();
    assert!(report.changes[0].changes.is_empty());
}

#[test]
fn test_assemble_single_scan_has_no_change_sections() {
    let catalog = YamlCatalog::from_str(ASSETS_DB).unwrap();
    let mut store = SnapshotStore::new();
    store.add(date("2016-01-05"), parse_raw(["LOCAT1", "A1"]).unwrap());

    // No progress is computed for a baseline, so empty known locations are fine.
    let report = assemble(&store, &BTreeSet::new(), &catalog).unwrap();
    assert!(report.changes.is_empty());
    assert_eq!(report.inventory.len(), 1);
    assert_eq!(report.inventory[0].groups[0].type_name, "Laptop");
}

#[test]
fn test_assemble_empty_store() {
    let catalog = YamlCatalog::from_str(ASSETS_DB).unwrap();
    let store = SnapshotStore::new();
    let result = assemble(&store, &known(&["LOCAT1"]), &catalog);
    assert!(matches!(result, Err(Error::EmptyStore)));
}

#[test]
fn test_assemble_without_known_locations_fails() {
    let catalog = YamlCatalog::from_str(ASSETS_DB).unwrap();
    let mut store = SnapshotStore::new();
    store.add(date("2016-01-05"), parse_raw(["LOCAT1", "A1"]).unwrap());
    store.add(date("2016-01-12"), parse_raw(["LOCAT1", "A1"]).unwrap());

    let result = assemble(&store, &BTreeSet::new(), &catalog);
    assert!(matches!(result, Err(Error::DivisionInput)));
}

#[test]
fn test_report_serializes_to_json() {
    let catalog = YamlCatalog::from_str(ASSETS_DB).unwrap();
    let mut store = SnapshotStore::new();
    store.add(date("2016-01-05"), parse_raw(["LOCAT1", "A1"]).unwrap());
    store.add(date("2016-01-12"), parse_raw(["LOCAT2", "A1"]).unwrap());

    let report = assemble(&store, &known(&["LOCAT1", "LOCAT2"]), &catalog).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["latest_date"], "2016-01-12");
    let change = &json["changes"][0]["changes"][0];
    assert_eq!(change["kind"], "moved");
    assert_eq!(change["from"], "HQ:Lab");
    assert_eq!(change["to"], "HQ:Hall");
    assert_eq!(json["changes"][0]["progress"]["band"], "yellow");
}
