use crate::tag::{AssetId, LocationId, TagId};
use serde::Serialize;

/// One stop of a walkthrough: a location marker and the assets read after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationVisit {
    pub location: LocationId,
    pub assets: Vec<AssetId>,
}

/// One scan's tags organised by location.
///
/// Visits are kept in scan order so a location revisited mid-walkthrough
/// still flattens back to the exact tag sequence that was read. Lookups by
/// location merge all visits to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    visits: Vec<LocationVisit>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn open_visit(&mut self, location: LocationId) {
        self.visits.push(LocationVisit {
            location,
            assets: Vec::new(),
        });
    }

    /// Returns false when no visit is open yet.
    pub(crate) fn push_asset(&mut self, asset: AssetId) -> bool {
        match self.visits.last_mut() {
            Some(visit) => {
                visit.assets.push(asset);
                true
            }
            None => false,
        }
    }

    pub fn visits(&self) -> &[LocationVisit] {
        &self.visits
    }

    /// Distinct locations in first-seen order.
    pub fn locations(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for visit in &self.visits {
            if !seen.contains(&visit.location.as_str()) {
                seen.push(&visit.location);
            }
        }
        seen
    }

    pub fn contains_location(&self, location: &str) -> bool {
        self.visits.iter().any(|v| v.location == location)
    }

    pub fn assets_at(&self, location: &str) -> Vec<&str> {
        self.visits
            .iter()
            .filter(|v| v.location == location)
            .flat_map(|v| v.assets.iter().map(String::as_str))
            .collect()
    }

    /// Location -> assets mapping, including locations with no assets.
    pub fn by_location(&self) -> Vec<(&str, Vec<&str>)> {
        self.locations()
            .into_iter()
            .map(|loc| (loc, self.assets_at(loc)))
            .collect()
    }

    /// The tag sequence this snapshot was parsed from.
    pub fn flatten(&self) -> Vec<TagId> {
        let mut tags = Vec::with_capacity(self.visits.len() + self.asset_count());
        for visit in &self.visits {
            tags.push(TagId::Location(visit.location.clone()));
            tags.extend(visit.assets.iter().cloned().map(TagId::Asset));
        }
        tags
    }

    pub fn asset_count(&self) -> usize {
        self.visits.iter().map(|v| v.assets.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }
}
