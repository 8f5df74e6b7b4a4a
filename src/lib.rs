// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 BatteryDaddy Team

//! BatteryDaddy release generator
//!
//! Builds every compatible battery adapter STL with OpenSCAD and assembles
//! them, with their `.scad` sources and a manifest, into a timestamped
//! release directory.

pub mod cli;
pub mod compat;
pub mod error;
pub mod generation;
pub mod openscad;
pub mod release;
pub mod utils;

pub use compat::{AdapterPair, BatteryClass, CompatibilityTable, BUTTON_CELL_COMPAT, CYLINDER_COMPAT};
pub use error::ReleaseError;
pub use generation::{generate_family, AdapterFamily, FamilyOutcome};
pub use openscad::{GenerationResult, ModelGenerator, OpenScad, Parameters};
pub use release::{ReleaseAssembler, ReleaseConfig, ReleaseReport};

use anyhow::Result;

/// Build a release with OpenSCAD using `config`
pub fn build_release(config: ReleaseConfig) -> Result<ReleaseReport> {
    let openscad = OpenScad::with_executable(config.openscad_path.clone());
    ReleaseAssembler::new(config, &openscad).run()
}
