use crate::snapshot::Snapshot;
use crate::tag::{AssetId, LocationId};
use ahash::AHashMap;
use serde::Serialize;

/// Inverted index of a snapshot: asset -> location.
///
/// An asset scanned at several locations in one scan resolves to the last
/// location it was read at.
#[derive(Debug, Default)]
pub struct AssetLocationIndex<'a> {
    index: AHashMap<&'a str, &'a str>,
}

impl<'a> AssetLocationIndex<'a> {
    pub fn from_snapshot(snapshot: &'a Snapshot) -> Self {
        let mut index = AHashMap::with_capacity(snapshot.asset_count());
        for visit in snapshot.visits() {
            for asset in &visit.assets {
                index.insert(asset.as_str(), visit.location.as_str());
            }
        }
        Self { index }
    }

    pub fn location_of(&self, asset: &str) -> Option<&'a str> {
        self.index.get(asset).copied()
    }

    pub fn contains(&self, asset: &str) -> bool {
        self.index.contains_key(asset)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    fn iter(&self) -> impl Iterator<Item = (&'a str, &'a str)> + '_ {
        self.index.iter().map(|(a, l)| (*a, *l))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacedAsset {
    pub asset: AssetId,
    pub location: LocationId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovedAsset {
    pub asset: AssetId,
    pub from: LocationId,
    pub to: LocationId,
}

/// Changes between two consecutive snapshots. Each list is sorted by asset ID.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diff {
    /// Assets in the current scan only, with their current location.
    pub new_assets: Vec<PlacedAsset>,
    /// Non-defunct assets in the previous scan only, with their last location.
    pub missing_assets: Vec<PlacedAsset>,
    pub moved_assets: Vec<MovedAsset>,
}

impl Diff {
    pub fn is_empty(&self) -> bool {
        self.new_assets.is_empty() && self.missing_assets.is_empty() && self.moved_assets.is_empty()
    }
}

pub fn diff<F>(previous: &Snapshot, current: &Snapshot, is_defunct: F) -> Diff
where
    F: Fn(&str) -> bool,
{
    let prev_index = AssetLocationIndex::from_snapshot(previous);
    let curr_index = AssetLocationIndex::from_snapshot(current);

    let mut new_assets = Vec::new();
    let mut moved_assets = Vec::new();
    for (asset, curr_loc) in curr_index.iter() {
        match prev_index.location_of(asset) {
            None => new_assets.push(PlacedAsset {
                asset: asset.to_string(),
                location: curr_loc.to_string(),
            }),
            Some(prev_loc) if prev_loc != curr_loc => moved_assets.push(MovedAsset {
                asset: asset.to_string(),
                from: prev_loc.to_string(),
                to: curr_loc.to_string(),
            }),
            Some(_) => {}
        }
    }

    let mut missing_assets: Vec<PlacedAsset> = prev_index
        .iter()
        .filter(|(asset, _)| !curr_index.contains(asset) && !is_defunct(*asset))
        .map(|(asset, location)| PlacedAsset {
            asset: asset.to_string(),
            location: location.to_string(),
        })
        .collect();

    new_assets.sort_by(|a, b| a.asset.cmp(&b.asset));
    missing_assets.sort_by(|a, b| a.asset.cmp(&b.asset));
    moved_assets.sort_by(|a, b| a.asset.cmp(&b.asset));

    Diff {
        new_assets,
        missing_assets,
        moved_assets,
    }
}
