// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 BatteryDaddy Team

//! Sequential generation loop over one adapter family

use super::family::AdapterFamily;
use crate::compat::{AdapterPair, BatteryClass};
use crate::openscad::{GenerationResult, ModelGenerator};
use crate::utils::inspect_stl;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

/// Receives progress events from the release assembler and generation loop
pub trait GenerationObserver {
    /// The release directory exists and is about to be filled
    fn release_started(&self, _release: &str, _path: &Path) {}
    fn family_started(&self, _family: &AdapterFamily) {}
    fn pair_started(&self, _pair: &AdapterPair) {}
    fn pair_finished(&self, _pair: &AdapterPair, _result: &GenerationResult) {}
}

/// Observer that ignores every event
pub struct Silent;

impl GenerationObserver for Silent {}

/// Result for one (battery, host) pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairOutcome {
    pub battery: String,
    pub host: String,
    pub file: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub time_ms: u128,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facets: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
}

/// Tally for one battery class
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FamilyOutcome {
    pub class: BatteryClass,
    pub succeeded: usize,
    pub failed: usize,
    pub pairs: Vec<PairOutcome>,
}

impl FamilyOutcome {
    pub fn new(class: BatteryClass) -> Self {
        Self {
            class,
            succeeded: 0,
            failed: 0,
            pairs: Vec::new(),
        }
    }

    pub fn attempted(&self) -> usize {
        self.succeeded + self.failed
    }

    fn record(&mut self, outcome: PairOutcome) {
        if outcome.success {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
        self.pairs.push(outcome);
    }
}

/// Generate every pair in the family's table into `out_dir`
///
/// Pairs run one at a time in table order. A failed pair is counted and
/// the loop moves on to the next one.
pub fn generate_family(
    generator: &dyn ModelGenerator,
    family: &AdapterFamily,
    out_dir: &Path,
    observer: &dyn GenerationObserver,
) -> FamilyOutcome {
    let mut outcome = FamilyOutcome::new(family.class);
    observer.family_started(family);

    for pair in family.table.pairs() {
        let file = pair.file_name();
        let output = out_dir.join(&file);
        observer.pair_started(&pair);

        let result = match family.build_params(&pair) {
            Ok(params) => generator.generate(&family.template, &output, &params),
            Err(e) => GenerationResult::failed(e.to_string(), Duration::ZERO),
        };
        observer.pair_finished(&pair, &result);

        let (facets, sha256) = if result.success {
            match inspect_stl(&output) {
                Ok(summary) => {
                    debug!(
                        file = %file,
                        facets = summary.facets,
                        vertices = summary.vertices,
                        "generated stl"
                    );
                    (Some(summary.facets), Some(summary.sha256))
                }
                Err(e) => {
                    warn!(file = %file, error = %format!("{:#}", e), "generated stl could not be inspected");
                    (None, None)
                }
            }
        } else {
            (None, None)
        };

        outcome.record(PairOutcome {
            battery: pair.battery.to_string(),
            host: pair.host.to_string(),
            file,
            success: result.success,
            error: result.error,
            time_ms: result.duration.as_millis(),
            facets,
            sha256,
        });
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openscad::Parameters;
    use std::cell::RefCell;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Records invocations and fails the named output files
    struct Recorder {
        calls: RefCell<Vec<(PathBuf, PathBuf, Vec<String>)>>,
        fail: Vec<&'static str>,
    }

    impl ModelGenerator for Recorder {
        fn generate(&self, template: &Path, output: &Path, params: &Parameters) -> GenerationResult {
            self.calls
                .borrow_mut()
                .push((template.to_path_buf(), output.to_path_buf(), params.to_args()));
            let name = output.file_name().unwrap().to_str().unwrap();
            if self.fail.iter().any(|f| *f == name) {
                GenerationResult::failed("ERROR: boom", Duration::ZERO)
            } else {
                GenerationResult::succeeded(Duration::ZERO)
            }
        }
    }

    #[test]
    fn test_one_call_per_pair_in_order() {
        let dir = TempDir::new().unwrap();
        let family = AdapterFamily::for_class(BatteryClass::Cylinder, Path::new("."));
        let gen = Recorder { calls: RefCell::new(Vec::new()), fail: vec![] };

        let outcome = generate_family(&gen, &family, dir.path(), &Silent);

        let calls = gen.calls.borrow();
        assert_eq!(calls.len(), family.table.file_count());
        let outputs: Vec<PathBuf> = calls.iter().map(|c| c.1.clone()).collect();
        assert_eq!(
            outputs,
            ["A27-D.stl", "A27-C.stl", "AAAA-D.stl", "AAAA-C.stl"].map(|f| dir.path().join(f))
        );
        assert!(calls.iter().all(|c| c.0 == Path::new("./cylinder_battery_adapter.scad")));
        assert_eq!(outcome.succeeded, 4);
        assert_eq!(outcome.failed, 0);
    }

    #[test]
    fn test_failure_is_counted_and_loop_continues() {
        let dir = TempDir::new().unwrap();
        let family = AdapterFamily::for_class(BatteryClass::ButtonCell, Path::new("."));
        let gen = Recorder { calls: RefCell::new(Vec::new()), fail: vec!["CR2032-C.stl"] };

        let outcome = generate_family(&gen, &family, dir.path(), &Silent);

        assert_eq!(outcome.attempted(), 9);
        assert_eq!(outcome.succeeded, 8);
        assert_eq!(outcome.failed, 1);
        let failed: Vec<&PairOutcome> = outcome.pairs.iter().filter(|p| !p.success).collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].file, "CR2032-C.stl");
        assert_eq!(failed[0].error.as_deref(), Some("ERROR: boom"));
    }

    #[test]
    fn test_unreadable_output_keeps_success() {
        // The recorder writes nothing, so inspection fails
        let dir = TempDir::new().unwrap();
        let family = AdapterFamily::for_class(BatteryClass::Cylinder, Path::new("."));
        let gen = Recorder { calls: RefCell::new(Vec::new()), fail: vec![] };

        let outcome = generate_family(&gen, &family, dir.path(), &Silent);

        assert!(outcome.pairs.iter().all(|p| p.success && p.facets.is_none()));
    }
}
