// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 BatteryDaddy Team

//! Release configuration system

use crate::error::ReleaseError;
use crate::openscad::DEFAULT_OPENSCAD;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "release.toml";

/// Release configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseConfig {
    /// Directory holding the .scad templates and README
    pub source_dir: PathBuf,
    /// Parent directory of all releases
    pub releases_dir: PathBuf,
    /// OpenSCAD executable path
    pub openscad_path: String,
    /// Extension of source files copied into the release
    pub source_extension: String,
    /// Optional readme copied into the release
    pub readme: String,
    /// Whether to also write `<release>.zip`
    pub archive: bool,
    /// Verbose output
    pub verbose: bool,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("."),
            releases_dir: PathBuf::from("releases"),
            openscad_path: DEFAULT_OPENSCAD.to_string(),
            source_extension: "scad".to_string(),
            readme: "README.md".to_string(),
            archive: false,
            verbose: false,
        }
    }
}

impl ReleaseConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config = toml::from_str(&content).map_err(|source| ReleaseError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config)
    }

    /// Load `release.toml` if present, then apply environment variable overrides
    pub fn load() -> Result<Self> {
        let mut config = if Path::new(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE)?
        } else {
            Self::default()
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply `OPENSCAD_PATH`, `RELEASE_OUTPUT_DIR` and `RELEASE_VERBOSE`
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(openscad) = lookup("OPENSCAD_PATH") {
            self.openscad_path = openscad;
        }

        if let Some(output_dir) = lookup("RELEASE_OUTPUT_DIR") {
            self.releases_dir = PathBuf::from(output_dir);
        }

        if let Some(verbose) = lookup("RELEASE_VERBOSE") {
            self.verbose = verbose.parse().unwrap_or(false);
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Check if a file path has the source extension
    pub fn is_source_file(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| ext == self.source_extension.as_str())
            .unwrap_or(false)
    }

    pub fn readme_path(&self) -> PathBuf {
        self.source_dir.join(&self.readme)
    }
}
