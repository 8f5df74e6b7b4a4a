// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 BatteryDaddy Team

//! MANIFEST.txt generation

use crate::compat::{self, BatteryClass};
use anyhow::{Context, Result};
use std::fmt;
use std::path::{Path, PathBuf};

pub const MANIFEST_FILE: &str = "MANIFEST.txt";

/// Curated heading for batteries that share a footprint
struct ManifestGroup {
    class: BatteryClass,
    heading: &'static str,
    batteries: &'static [&'static str],
}

const GROUPS: &[ManifestGroup] = &[
    ManifestGroup {
        class: BatteryClass::ButtonCell,
        heading: "CR2450 (24.5mm) - Largest coin cell",
        batteries: &["CR2450"],
    },
    ManifestGroup {
        class: BatteryClass::ButtonCell,
        heading: "CR2032 / CR2016 (20mm) - Standard coin cells",
        batteries: &["CR2032", "CR2016"],
    },
    ManifestGroup {
        class: BatteryClass::ButtonCell,
        heading: "CR1632 / CR1616 (16mm) - Smaller coin cells",
        batteries: &["CR1632", "CR1616"],
    },
    ManifestGroup {
        class: BatteryClass::Cylinder,
        heading: "A27 (7.75mm diameter, 28mm length)",
        batteries: &["A27"],
    },
    ManifestGroup {
        class: BatteryClass::Cylinder,
        heading: "AAAA (8.3mm diameter, 42.5mm length)",
        batteries: &["AAAA"],
    },
];

/// Human-readable release summary
///
/// The totals come from the compatibility tables, not from what this run
/// produced. Observed counts are reported on their own line.
#[derive(Debug, Clone)]
pub struct Manifest {
    pub generated: String,
    pub succeeded: usize,
    pub failed: usize,
}

impl Manifest {
    pub fn new(generated: impl Into<String>, succeeded: usize, failed: usize) -> Self {
        Self {
            generated: generated.into(),
            succeeded,
            failed,
        }
    }

    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Write MANIFEST.txt into `dir` and return its path
    pub fn write(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(MANIFEST_FILE);
        std::fs::write(&path, self.render())
            .with_context(|| format!("Failed to write manifest: {:?}", path))?;
        Ok(path)
    }
}

impl fmt::Display for Manifest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# BatteryDaddy Release Manifest")?;
        writeln!(f, "Generated: {}", self.generated)?;

        for class in BatteryClass::ALL {
            writeln!(f, "\n## {}", class.title())?;
            let table = class.table();

            for group in GROUPS.iter().filter(|g| g.class == class) {
                writeln!(f, "\n### {}", group.heading)?;
                for battery in group.batteries {
                    let Some(hosts) = table.hosts_for(battery) else {
                        continue;
                    };
                    let files: Vec<String> = hosts
                        .iter()
                        .map(|host| format!("{}-{}.stl", battery, host))
                        .collect();
                    match hosts {
                        [only] => writeln!(f, "- {} ({} holder only)", files[0], only)?,
                        _ => writeln!(f, "- {}", files.join(", "))?,
                    }
                }
            }
        }

        writeln!(f, "\n---")?;
        writeln!(
            f,
            "Total combinations: {} battery types",
            compat::total_battery_count()
        )?;
        writeln!(f, "Total files: {} STLs", compat::total_file_count())?;
        writeln!(
            f,
            "This run: {} generated, {} failed",
            self.succeeded, self.failed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_table_battery_is_listed() {
        for class in BatteryClass::ALL {
            for entry in class.table().entries() {
                assert!(
                    GROUPS
                        .iter()
                        .any(|g| g.class == class && g.batteries.contains(&entry.battery)),
                    "{} missing from manifest groups",
                    entry.battery
                );
            }
        }
    }

    #[test]
    fn test_totals_ignore_run_outcome() {
        let all_failed = Manifest::new("2025-01-01 00:00:00", 0, 13).render();
        assert!(all_failed.contains("Total combinations: 7 battery types"));
        assert!(all_failed.contains("Total files: 13 STLs"));
        assert!(all_failed.contains("This run: 0 generated, 13 failed"));
    }

    #[test]
    fn test_file_listing() {
        let text = Manifest::new("2025-01-01 00:00:00", 13, 0).render();
        assert!(text.starts_with("# BatteryDaddy Release Manifest\nGenerated: 2025-01-01 00:00:00\n"));
        assert!(text.contains("- CR2450-D.stl (D holder only)\n"));
        assert!(text.contains("- CR2032-D.stl, CR2032-C.stl\n"));
        assert!(text.contains("## Cylindrical Battery Adapters"));
        assert!(text.contains("- AAAA-D.stl, AAAA-C.stl\n"));
        assert!(!text.contains("-AA.stl"));
    }
}
