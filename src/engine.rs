use crate::catalog::{AssetCatalog, YamlCatalog};
use crate::config::AppConfig;
use crate::error::Result;
use crate::ingest;
use crate::report::{self, Report};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub struct ReportEngine {
    config: AppConfig,
}

#[derive(Debug)]
pub struct ReportRun {
    pub report: Report,
    pub scans_read: usize,
    pub load_duration: Duration,
    pub assemble_duration: Duration,
}

impl ReportEngine {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Run the report pipeline:
    /// 1. Load the asset database
    /// 2. Read and parse every scan file into the snapshot store
    /// 3. Diff consecutive scans and build the inventory of the latest one
    pub fn run(&self) -> Result<ReportRun> {
        info!("Loading asset database {}...", self.config.assets_file);
        let catalog = YamlCatalog::from_path(&self.config.assets_file)?;
        let known_locations = catalog.known_locations();
        debug!("{} known locations", known_locations.len());

        info!("Reading scans from {}...", self.config.scans_dir);
        let load_start = Instant::now();
        let store = ingest::load_store(
            Path::new(&self.config.scans_dir),
            &self.config.ignore_patterns,
        )?;
        let load_duration = load_start.elapsed();
        debug!(
            "Loaded {} scans in {:.2}s",
            store.len(),
            load_duration.as_secs_f64()
        );

        info!("Assembling report...");
        let assemble_start = Instant::now();
        let report = report::assemble(&store, &known_locations, &catalog)?;
        let assemble_duration = assemble_start.elapsed();
        debug!(
            "Report assembled in {:.2}s ({} change sections)",
            assemble_duration.as_secs_f64(),
            report.changes.len()
        );

        Ok(ReportRun {
            report,
            scans_read: store.len(),
            load_duration,
            assemble_duration,
        })
    }
}
