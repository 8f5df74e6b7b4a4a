// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 BatteryDaddy Team

//! STL generation for the compatibility matrix

pub mod driver;
pub mod family;

pub use driver::{generate_family, FamilyOutcome, GenerationObserver, PairOutcome, Silent};
pub use family::{AdapterFamily, ParamBuilder, BUTTON_CELL_TEMPLATE, CYLINDER_TEMPLATE};
