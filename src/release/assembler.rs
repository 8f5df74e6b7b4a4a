// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 BatteryDaddy Team

//! Release assembler - builds one timestamped release directory

use super::archive::write_archive;
use super::config::ReleaseConfig;
use super::manifest::Manifest;
use super::report::{CopiedFile, ReleaseReport, REPORT_FILE};
use crate::compat::BatteryClass;
use crate::generation::{generate_family, AdapterFamily, GenerationObserver, Silent};
use crate::openscad::ModelGenerator;
use crate::utils::file_sha256;
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

pub const STL_DIR: &str = "stls";

/// `Release-YYYY-MM-DD_HHMMSS`
pub fn release_name(now: &DateTime<Local>) -> String {
    now.format("Release-%Y-%m-%d_%H%M%S").to_string()
}

/// First directory under `releases_dir` named `name`, `name-2`, `name-3`, ... that does not exist yet
pub fn unique_release_dir(releases_dir: &Path, name: &str) -> PathBuf {
    let mut candidate = releases_dir.join(name);
    let mut n = 2;
    while candidate.exists() {
        candidate = releases_dir.join(format!("{}-{}", name, n));
        n += 1;
    }
    candidate
}

/// Builds a release: STLs, copied sources, manifest and report
pub struct ReleaseAssembler<'a> {
    config: ReleaseConfig,
    generator: &'a dyn ModelGenerator,
    observer: &'a dyn GenerationObserver,
}

impl<'a> ReleaseAssembler<'a> {
    pub fn new(config: ReleaseConfig, generator: &'a dyn ModelGenerator) -> Self {
        Self {
            config,
            generator,
            observer: &Silent,
        }
    }

    pub fn with_observer(mut self, observer: &'a dyn GenerationObserver) -> Self {
        self.observer = observer;
        self
    }

    pub fn run(&self) -> Result<ReleaseReport> {
        self.run_at(Local::now())
    }

    /// Assemble a release as if started at `now`
    ///
    /// Generation failures are recorded in the report. Filesystem errors
    /// abort the run and leave whatever was written so far in place.
    pub fn run_at(&self, now: DateTime<Local>) -> Result<ReleaseReport> {
        let name = release_name(&now);
        let release_dir = unique_release_dir(&self.config.releases_dir, &name);
        let stl_dir = release_dir.join(STL_DIR);

        fs::create_dir_all(&stl_dir)
            .with_context(|| format!("Failed to create release directory: {:?}", stl_dir))?;
        let release_dir = fs::canonicalize(&release_dir)
            .with_context(|| format!("Failed to resolve release directory: {:?}", release_dir))?;
        let stl_dir = release_dir.join(STL_DIR);
        info!(release = %release_dir.display(), "creating release");

        let resolved_name = release_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or(name);
        self.observer.release_started(&resolved_name, &release_dir);
        let mut report = ReleaseReport::new(
            resolved_name,
            now.format("%Y-%m-%d %H:%M:%S").to_string(),
            release_dir.clone(),
        );

        for class in BatteryClass::ALL {
            let family = AdapterFamily::for_class(class, &self.config.source_dir);
            let outcome = generate_family(self.generator, &family, &stl_dir, self.observer);
            info!(
                class = class.as_str(),
                succeeded = outcome.succeeded,
                failed = outcome.failed,
                "family generated"
            );
            report.families.push(outcome);
        }

        report.sources = self.copy_sources(&release_dir)?;

        Manifest::new(
            report.timestamp.clone(),
            report.total_succeeded(),
            report.total_failed(),
        )
        .write(&release_dir)?;

        if self.config.archive {
            report.archive = Some(release_dir.with_extension("zip"));
        }
        report.write_json(&release_dir.join(REPORT_FILE))?;

        if self.config.archive {
            let archive = write_archive(&release_dir)?;
            info!(archive = %archive.display(), "wrote archive");
        }

        Ok(report)
    }

    /// Copy source templates and the optional readme into the release root
    fn copy_sources(&self, release_dir: &Path) -> Result<Vec<CopiedFile>> {
        let mut copied = Vec::new();

        for entry in WalkDir::new(&self.config.source_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.with_context(|| {
                format!("Failed to list source directory: {:?}", self.config.source_dir)
            })?;
            if entry.file_type().is_file() && self.config.is_source_file(entry.path()) {
                copied.push(copy_into(entry.path(), release_dir)?);
            }
        }

        let readme = self.config.readme_path();
        if readme.is_file() {
            copied.push(copy_into(&readme, release_dir)?);
        } else {
            debug!(readme = %readme.display(), "no readme, skipping");
        }

        Ok(copied)
    }
}

fn copy_into(source: &Path, dir: &Path) -> Result<CopiedFile> {
    let name = source
        .file_name()
        .with_context(|| format!("Source has no file name: {:?}", source))?
        .to_string_lossy()
        .into_owned();
    let dest = dir.join(&name);
    fs::copy(source, &dest).with_context(|| format!("Failed to copy {:?} to {:?}", source, dest))?;

    Ok(CopiedFile {
        sha256: file_sha256(&dest)?,
        name,
    })
}
