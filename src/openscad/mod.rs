// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 BatteryDaddy Team

//! OpenSCAD invocation

pub mod params;
pub mod runner;

pub use params::{Definition, Parameters, ScadValue};
pub use runner::{GenerationResult, ModelGenerator, OpenScad, DEFAULT_OPENSCAD};
