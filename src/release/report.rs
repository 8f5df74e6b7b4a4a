// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 BatteryDaddy Team

//! Machine-readable release report (release.json)

use crate::generation::FamilyOutcome;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const REPORT_FILE: &str = "release.json";

/// A file copied into the release root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopiedFile {
    pub name: String,
    pub sha256: String,
}

/// Complete record of one release run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseReport {
    pub release: String,
    pub timestamp: String,
    pub path: PathBuf,
    pub families: Vec<FamilyOutcome>,
    pub sources: Vec<CopiedFile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive: Option<PathBuf>,
}

impl ReleaseReport {
    pub fn new(release: impl Into<String>, timestamp: impl Into<String>, path: PathBuf) -> Self {
        Self {
            release: release.into(),
            timestamp: timestamp.into(),
            path,
            families: Vec::new(),
            sources: Vec::new(),
            archive: None,
        }
    }

    pub fn total_succeeded(&self) -> usize {
        self.families.iter().map(|f| f.succeeded).sum()
    }

    pub fn total_failed(&self) -> usize {
        self.families.iter().map(|f| f.failed).sum()
    }

    pub fn has_failures(&self) -> bool {
        self.total_failed() > 0
    }

    /// Process exit status: 0 if every generation succeeded, 1 otherwise
    pub fn exit_code(&self) -> i32 {
        if self.has_failures() {
            1
        } else {
            0
        }
    }

    /// Write JSON report
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize report")?;
        fs::write(path, json).with_context(|| format!("Failed to write report: {:?}", path))?;
        Ok(())
    }

    pub fn read_json(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read report: {:?}", path))?;
        serde_json::from_str(&content).with_context(|| format!("Failed to parse report: {:?}", path))
    }
}
