// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 BatteryDaddy Team

//! Error types

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReleaseError {
    /// Parameter name is not a valid OpenSCAD identifier
    #[error("Invalid OpenSCAD parameter name: {0:?}")]
    InvalidParameterName(String),

    /// Configuration file could not be parsed
    #[error("Invalid configuration in {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
