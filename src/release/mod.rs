// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 BatteryDaddy Team

//! Release assembly: directory layout, manifest, report and archive

pub mod archive;
pub mod assembler;
pub mod config;
pub mod manifest;
pub mod report;

pub use archive::write_archive;
pub use assembler::{release_name, unique_release_dir, ReleaseAssembler, STL_DIR};
pub use config::{ReleaseConfig, CONFIG_FILE};
pub use manifest::{Manifest, MANIFEST_FILE};
pub use report::{CopiedFile, ReleaseReport, REPORT_FILE};
