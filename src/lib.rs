pub mod catalog;
pub mod config;
pub mod diff;
pub mod engine;
pub mod error;
pub mod ingest;
pub mod parser;
pub mod progress;
pub mod report;
pub mod snapshot;
pub mod store;
pub mod tag;

pub use catalog::{AssetCatalog, YamlCatalog};
pub use config::AppConfig;
pub use diff::{diff, AssetLocationIndex, Diff, MovedAsset, PlacedAsset};
pub use engine::{ReportEngine, ReportRun};
pub use error::Error;
pub use parser::{parse, parse_raw};
pub use progress::{progress, Band, Progress};
pub use report::{assemble, Report};
pub use snapshot::Snapshot;
pub use store::SnapshotStore;
pub use tag::TagId;
