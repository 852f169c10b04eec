mod cli;
mod logging;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use asset_reporter::report::{ChangeEntry, ChangeKind, Report};
use asset_reporter::{AppConfig, Band, ReportEngine};
use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use colored::*;
use dotenv::dotenv;
use tracing::info;

fn main() -> Result<()> {
    dotenv().ok();

    let _guard = logging::init_logger();

    let config = asset_reporter::config::load_configuration()
        .context("Error loading configuration")?;

    let args = Cli::parse();

    match args.command {
        Some(Commands::Report { output, pretty }) => {
            let report = run_report(&config)?;
            match output {
                Some(path) => write_report_file(&report, &path, pretty)?,
                None => write_report(&report, io::stdout().lock(), pretty)?,
            }
        }
        Some(Commands::Summary) => {
            let report = run_report(&config)?;
            print_summary(&report);
        }
        Some(Commands::PrintConfig) => {
            println!("Configuration: {:?}", config);
        }
        None => {
            Cli::command().print_long_help()?;
        }
    }

    Ok(())
}

fn run_report(config: &AppConfig) -> Result<Report> {
    let engine = ReportEngine::new(config.clone());
    let run = engine.run().context("Error generating asset report")?;

    info!(
        "{} scans, Load: {}, Assemble: {}",
        format!("{}", run.scans_read).cyan(),
        format!("{:.2}s", run.load_duration.as_secs_f64()).green(),
        format!("{:.2}s", run.assemble_duration.as_secs_f64()).green(),
    );

    Ok(run.report)
}

fn write_report_file(report: &Report, path: &Path, pretty: bool) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Error creating {}", path.display()))?;
    write_report(report, BufWriter::new(file), pretty)?;
    info!("Report written to {}", path.display());
    Ok(())
}

fn write_report<W: Write>(report: &Report, mut writer: W, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut writer, report)?;
    } else {
        serde_json::to_writer(&mut writer, report)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

fn print_summary(report: &Report) {
    println!("{}", "Assets by Location".bold());
    for location in &report.inventory {
        let count: usize = location.groups.iter().map(|g| g.count).sum();
        println!("  {} ({} assets)", location.location_name, count);
        for group in &location.groups {
            println!("    {:<30} {}", group.type_name, group.count);
        }
    }

    println!();
    println!("{}", "Asset Changes".bold());
    if report.changes.is_empty() {
        println!("  Only one scan so far; nothing to compare.");
    }
    for scan in &report.changes {
        let progress = &scan.progress;
        let pct = format!("{}%", progress.percentage);
        let pct = match progress.band {
            Band::Red => pct.red(),
            Band::Yellow => pct.yellow(),
            Band::Lime => pct.green(),
        };
        println!(
            "  {} {} ({} / {} Locations)",
            scan.label.bold(),
            pct,
            progress.present,
            progress.total
        );
        if !progress.missed_locations.is_empty() {
            println!("    Missed Locations: {}", progress.missed_locations.join(", "));
        }
        for change in &scan.changes {
            println!("    {}", describe_change(change));
        }
    }
}

fn describe_change(change: &ChangeEntry) -> String {
    let unknown = || "Unknown".to_string();
    let asset = format!("{} [{}]", change.asset_name, change.asset);
    match change.kind {
        ChangeKind::New => format!(
            "{} {} at {}",
            "New Asset".green(),
            asset,
            change.to.clone().unwrap_or_else(unknown)
        ),
        ChangeKind::Missing => format!(
            "{} {} from {}",
            "Missing Asset".red(),
            asset,
            change.from.clone().unwrap_or_else(unknown)
        ),
        ChangeKind::Moved => format!(
            "{} {} {} to {}",
            "Moved Asset".yellow(),
            asset,
            change.from.clone().unwrap_or_else(unknown),
            change.to.clone().unwrap_or_else(unknown)
        ),
    }
}
