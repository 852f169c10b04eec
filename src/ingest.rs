use crate::error::{Error, Result};
use crate::parser::parse_raw;
use crate::store::SnapshotStore;
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use glob::Pattern;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

pub const SCAN_DATE_FORMAT: &str = "%Y-%m-%d";

/// Read the tag IDs of one scan file, one per row, taken from the first column.
///
/// Rows are single lines since quoting is off, so a record number is also the
/// line number. The CSV reader drops blank lines, so they are rejected here
/// before parsing.
pub fn read_scan_tags(path: &Path) -> Result<Vec<String>> {
    let scan = file_name(path);
    let text = fs::read_to_string(path)?;
    if let Some(line) = first_blank_line(&text) {
        return Err(Error::MalformedRecord { scan, record: line });
    }

    let mut reader = ReaderBuilder::new()
        .delimiter(b',')
        .quoting(false)
        .escape(Some(b'\\'))
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let records = reader.records().collect::<std::result::Result<Vec<_>, _>>()?;
    tags_from_records(&scan, records)
}

/// 1-based number of the first empty line, if any.
fn first_blank_line(text: &str) -> Option<usize> {
    text.lines()
        .position(|line| line.is_empty())
        .map(|index| index + 1)
}

/// First field of every record. A record without fields is malformed and is
/// reported by its 1-based record number.
pub fn tags_from_records<I>(scan: &str, records: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = StringRecord>,
{
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| match record.get(0) {
            Some(tag) => Ok(tag.to_string()),
            None => Err(Error::MalformedRecord {
                scan: scan.to_string(),
                record: index + 1,
            }),
        })
        .collect()
}

/// `2016-01-05.csv` -> 2016-01-05.
pub fn scan_date_from_file_name(name: &str) -> Result<NaiveDate> {
    let stem = Path::new(name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(name);
    NaiveDate::parse_from_str(stem, SCAN_DATE_FORMAT)
        .map_err(|_| Error::InvalidScanName(name.to_string()))
}

/// List the scan files in `dir` by date, skipping names matching any ignore glob.
pub fn discover_scans(dir: &Path, ignore_globs: &[String]) -> Result<Vec<(NaiveDate, PathBuf)>> {
    let ignore_patterns: Vec<Pattern> = ignore_globs
        .iter()
        .filter_map(|glob| match Pattern::new(glob) {
            Ok(p) => Some(p),
            Err(e) => {
                error!("Invalid glob pattern '{}': {}", glob, e);
                None
            }
        })
        .collect();

    let mut scans = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let name = file_name(&path);
        if ignore_patterns.iter().any(|pattern| pattern.matches(&name)) {
            debug!("Skipping {}", name);
            continue;
        }
        scans.push((scan_date_from_file_name(&name)?, path));
    }
    scans.sort();

    Ok(scans)
}

/// Read and parse every scan in `dir`. The first bad scan aborts the load.
pub fn load_store(dir: &Path, ignore_globs: &[String]) -> Result<SnapshotStore> {
    let mut store = SnapshotStore::new();

    for (date, path) in discover_scans(dir, ignore_globs)? {
        let name = file_name(&path);
        let tags = read_scan_tags(&path).map_err(|e| e.in_scan(&name))?;
        let snapshot = parse_raw(&tags).map_err(|e| e.in_scan(&name))?;
        info!(
            "Read {}: {} locations, {} assets",
            name,
            snapshot.locations().len(),
            snapshot.asset_count(),
        );
        store.add(date, snapshot);
    }

    Ok(store)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default()
}
