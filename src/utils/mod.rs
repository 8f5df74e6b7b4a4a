// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 BatteryDaddy Team

//! Shared file helpers

pub mod digest;

pub use digest::{file_sha256, inspect_stl, StlSummary};
