// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 BatteryDaddy Team

//! Console output for the release binary

pub mod reporter;

pub use reporter::{ConsoleProgress, Reporter};
