use crate::error::Result;
use crate::tag::LocationId;
use serde_yaml::{Mapping, Value};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tracing::debug;

pub const UNKNOWN: &str = "Unknown";
const DEFUNCT_STATUS: &str = "Defunct";

/// Read-only asset and location metadata.
///
/// Lookups never fail: missing entries resolve to [`UNKNOWN`] and
/// `is_defunct` defaults to false.
pub trait AssetCatalog {
    fn asset_name(&self, asset: &str) -> String;
    fn is_defunct(&self, asset: &str) -> bool;
    fn location_name(&self, location: &str) -> String;
    fn known_locations(&self) -> BTreeSet<LocationId>;
}

/// Catalog backed by an `assets.yml` document:
///
/// ```yaml
/// assets:
///   E2000001:
///     type: { name: Laptop }
///     status: Active
/// locations:
///   LOCAT0001: { facility: HQ, name: Lab }
/// ```
///
/// Entries are kept as raw YAML so one malformed entry only degrades its own
/// lookups.
#[derive(Debug, Default)]
pub struct YamlCatalog {
    assets: Mapping,
    locations: Mapping,
}

impl YamlCatalog {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading asset database from {}", path.display());
        let text = fs::read_to_string(path)?;
        Self::from_str(&text)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &str) -> Result<Self> {
        let root: Value = serde_yaml::from_str(text)?;
        let section = |name: &str| -> Mapping {
            match root.get(name) {
                Some(Value::Mapping(m)) => m.clone(),
                _ => Mapping::new(),
            }
        };
        Ok(Self {
            assets: section("assets"),
            locations: section("locations"),
        })
    }

    fn asset(&self, id: &str) -> Option<&Value> {
        lookup(&self.assets, id)
    }

    fn location(&self, id: &str) -> Option<&Value> {
        lookup(&self.locations, id)
    }
}

/// Tag IDs made only of digits come back from YAML as numeric keys.
fn lookup<'a>(map: &'a Mapping, id: &str) -> Option<&'a Value> {
    map.get(id).or_else(|| {
        id.parse::<u64>()
            .ok()
            .and_then(|n| map.get(Value::Number(n.into())))
    })
}

fn key_to_string(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn scalar<'a>(value: Option<&'a Value>) -> Option<&'a str> {
    value.and_then(Value::as_str)
}

impl AssetCatalog for YamlCatalog {
    fn asset_name(&self, asset: &str) -> String {
        scalar(
            self.asset(asset)
                .and_then(|a| a.get("type"))
                .and_then(|t| t.get("name")),
        )
        .unwrap_or(UNKNOWN)
        .to_string()
    }

    fn is_defunct(&self, asset: &str) -> bool {
        scalar(self.asset(asset).and_then(|a| a.get("status"))) == Some(DEFUNCT_STATUS)
    }

    fn location_name(&self, location: &str) -> String {
        let entry = self.location(location);
        let facility = scalar(entry.and_then(|l| l.get("facility")));
        let name = scalar(entry.and_then(|l| l.get("name")));
        match (facility, name) {
            (Some(facility), Some(name)) => format!("{}:{}", facility, name),
            _ => UNKNOWN.to_string(),
        }
    }

    fn known_locations(&self) -> BTreeSet<LocationId> {
        self.locations.keys().filter_map(key_to_string).collect()
    }
}
