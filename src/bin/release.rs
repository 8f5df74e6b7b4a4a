// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 BatteryDaddy Team

//! BatteryDaddy release CLI

use anyhow::Result;
use batterydaddy::cli::{ConsoleProgress, Reporter};
use batterydaddy::release::{ReleaseAssembler, ReleaseConfig};
use batterydaddy::OpenScad;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "batterydaddy-release")]
#[command(about = "Generate STLs for every compatible battery adapter and assemble a release", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./release.toml when present)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory holding the .scad templates and README
    #[arg(long, value_name = "DIR")]
    source_dir: Option<PathBuf>,

    /// Directory releases are created in
    #[arg(long, value_name = "DIR")]
    releases_dir: Option<PathBuf>,

    /// OpenSCAD executable
    #[arg(long, value_name = "PATH")]
    openscad: Option<String>,

    /// Also write a zip archive of the release
    #[arg(long)]
    archive: bool,

    /// Print the compatibility matrix and exit
    #[arg(long)]
    list: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Exit status for a run stopped by an I/O or configuration error
const EXIT_ABORTED: i32 = 2;

fn main() {
    let cli = Cli::parse();

    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            Reporter::report_error(&format!("{:#}", e));
            EXIT_ABORTED
        }
    };

    std::process::exit(code);
}

/// Run the release and return the exit status (0 all built, 1 some failed)
fn run(cli: Cli) -> Result<i32> {
    if cli.list {
        Reporter::report_matrix();
        return Ok(0);
    }

    let mut config = match &cli.config {
        Some(path) => {
            let mut config = ReleaseConfig::from_file(path)?;
            config.apply_env(|key| std::env::var(key).ok());
            config
        }
        None => ReleaseConfig::load()?,
    };
    if let Some(dir) = cli.source_dir {
        config.source_dir = dir;
    }
    if let Some(dir) = cli.releases_dir {
        config.releases_dir = dir;
    }
    if let Some(openscad) = cli.openscad {
        config.openscad_path = openscad;
    }
    config.archive |= cli.archive;
    config.verbose |= cli.verbose;

    init_tracing(config.verbose)?;

    let openscad = OpenScad::with_executable(config.openscad_path.clone());
    if !openscad.is_available() {
        Reporter::report_warning(&format!(
            "{} not found. Every generation will fail.",
            openscad.executable()
        ));
    }

    let progress = ConsoleProgress::new(config.verbose);
    let report = ReleaseAssembler::new(config, &openscad)
        .with_observer(&progress)
        .run()?;

    Reporter::report_files(&report);
    Reporter::report_summary(&report);

    Ok(report.exit_code())
}

fn init_tracing(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "warn" };

    let filter = tracing_subscriber::EnvFilter::try_from_env("BATTERYDADDY_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
