use std::fmt;

/// Tag IDs starting with this prefix mark a location rather than an asset.
pub const LOCATION_PREFIX: &str = "LOCAT";

pub type LocationId = String;
pub type AssetId = String;

/// A scanned tag, classified once at the ingestion boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TagId {
    Location(LocationId),
    Asset(AssetId),
}

impl TagId {
    pub fn classify(raw: &str) -> Self {
        let id = raw.trim();
        if id.starts_with(LOCATION_PREFIX) {
            TagId::Location(id.to_string())
        } else {
            TagId::Asset(id.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TagId::Location(id) | TagId::Asset(id) => id,
        }
    }

    pub fn is_location(&self) -> bool {
        matches!(self, TagId::Location(_))
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
