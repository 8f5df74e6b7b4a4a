// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 BatteryDaddy Team

//! Exit status of the release binary

#![allow(deprecated)] // Command::cargo_bin

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Project {
    dir: TempDir,
}

impl Project {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("button_cell_adapter.scad"), "// button cell\n").unwrap();
        fs::write(dir.path().join("cylinder_battery_adapter.scad"), "// cylinder\n").unwrap();
        Self { dir }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn releases(&self) -> PathBuf {
        self.path().join("releases")
    }

    /// The binary run from inside the project, isolated from the caller's environment
    fn release_cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("batterydaddy-release").unwrap();
        cmd.current_dir(self.path())
            .env_remove("OPENSCAD_PATH")
            .env_remove("RELEASE_OUTPUT_DIR")
            .env_remove("RELEASE_VERBOSE")
            .env_remove("BATTERYDADDY_LOG")
            .env_remove("CLICOLOR_FORCE")
            .env("NO_COLOR", "1");
        cmd
    }
}

#[cfg(unix)]
#[test]
fn test_clean_run_exits_zero() {
    let project = Project::new();

    // `true` accepts any arguments and exits 0
    project
        .release_cmd()
        .args(["--openscad", "true"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Creating release: Release-"));

    assert_eq!(fs::read_dir(project.releases()).unwrap().count(), 1);
}

#[test]
fn test_generation_failure_exits_one() {
    let project = Project::new();

    project
        .release_cmd()
        .args(["--openscad", "batterydaddy-no-such-openscad"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Failed: 13 STLs"));
}

#[test]
fn test_unwritable_releases_dir_exits_two() {
    let project = Project::new();
    fs::write(project.releases(), "not a directory").unwrap();

    project
        .release_cmd()
        .args(["--openscad", "batterydaddy-no-such-openscad"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to create release directory"));
}

#[test]
fn test_invalid_config_exits_two() {
    let project = Project::new();
    fs::write(project.path().join("release.toml"), "archive = \"maybe\"\n").unwrap();

    project
        .release_cmd()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid configuration"))
        .stderr(predicate::str::contains("stack backtrace").not());

    assert!(!project.releases().exists());
}

#[test]
fn test_missing_config_file_exits_two() {
    let project = Project::new();

    project
        .release_cmd()
        .args(["--config", "missing.toml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to read config file"));
}

#[test]
fn test_list_exits_zero_without_release() {
    let project = Project::new();

    project
        .release_cmd()
        .arg("--list")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("CR2450-D.stl"));

    assert!(!project.releases().exists());
}
