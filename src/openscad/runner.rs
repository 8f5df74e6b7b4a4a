// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 BatteryDaddy Team

//! Subprocess execution runner for OpenSCAD

use super::params::Parameters;
use std::path::Path;
use std::process::Command;
use std::time::{Duration, Instant};
use tracing::debug;

pub const DEFAULT_OPENSCAD: &str = "openscad";

/// Outcome of a single model generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    pub success: bool,
    pub error: Option<String>,
    pub duration: Duration,
}

impl GenerationResult {
    pub fn succeeded(duration: Duration) -> Self {
        Self {
            success: true,
            error: None,
            duration,
        }
    }

    pub fn failed(error: impl Into<String>, duration: Duration) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            duration,
        }
    }
}

/// Anything that can turn a template plus parameters into a model file
pub trait ModelGenerator {
    fn generate(&self, template: &Path, output: &Path, params: &Parameters) -> GenerationResult;
}

/// Runner for the OpenSCAD command line compiler
#[derive(Debug, Clone)]
pub struct OpenScad {
    executable: String,
}

impl OpenScad {
    pub fn new() -> Self {
        Self {
            executable: DEFAULT_OPENSCAD.to_string(),
        }
    }

    pub fn with_executable(executable: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    /// Build `openscad -o <output> -D k=v ... <template>`
    pub fn command(&self, template: &Path, output: &Path, params: &Parameters) -> Command {
        let mut cmd = Command::new(&self.executable);
        cmd.arg("-o").arg(output).args(params.to_args()).arg(template);
        cmd
    }

    /// Check if OpenSCAD is available
    pub fn is_available(&self) -> bool {
        Command::new(&self.executable)
            .arg("--version")
            .output()
            .is_ok()
    }
}

impl Default for OpenScad {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelGenerator for OpenScad {
    fn generate(&self, template: &Path, output: &Path, params: &Parameters) -> GenerationResult {
        let mut cmd = self.command(template, output, params);
        debug!(command = ?cmd, "running openscad");

        let start = Instant::now();
        let result = cmd.output();
        let duration = start.elapsed();

        match result {
            Ok(out) if out.status.success() => GenerationResult::succeeded(duration),
            Ok(out) => {
                let stderr = String::from_utf8_lossy(&out.stderr).trim().to_string();
                let error = if stderr.is_empty() {
                    format!("{} exited with status: {}", self.executable, out.status)
                } else {
                    stderr
                };
                GenerationResult::failed(error, duration)
            }
            Err(e) => GenerationResult::failed(
                format!("Failed to execute {}: {}", self.executable, e),
                duration,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    #[test]
    fn test_command_layout() {
        let mut params = Parameters::new();
        params.set("battery_label", "CR2032").unwrap();
        params.set("host_battery_type", "D").unwrap();

        let runner = OpenScad::new();
        let cmd = runner.command(
            Path::new("button_cell_adapter.scad"),
            Path::new("out/CR2032-D.stl"),
            &params,
        );

        assert_eq!(cmd.get_program(), OsStr::new("openscad"));
        let args: Vec<&OsStr> = cmd.get_args().collect();
        assert_eq!(
            args,
            [
                "-o",
                "out/CR2032-D.stl",
                "-D",
                "battery_label=\"CR2032\"",
                "-D",
                "host_battery_type=\"D\"",
                "button_cell_adapter.scad",
            ]
            .map(OsStr::new)
        );
    }

    #[test]
    fn test_missing_executable_is_a_failure() {
        let runner = OpenScad::with_executable("batterydaddy-no-such-openscad");
        let result = runner.generate(
            Path::new("missing.scad"),
            Path::new("missing.stl"),
            &Parameters::new(),
        );

        assert!(!result.success);
        let error = result.error.unwrap();
        assert!(error.contains("batterydaddy-no-such-openscad"));
        assert!(!runner.is_available());
    }
}
