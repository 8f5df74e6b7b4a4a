// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 BatteryDaddy Team

//! CLI output reporter with colored formatting

use crate::compat::{AdapterPair, BatteryClass};
use crate::generation::{AdapterFamily, GenerationObserver};
use crate::openscad::GenerationResult;
use crate::release::{ReleaseReport, MANIFEST_FILE};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::cell::RefCell;
use std::path::Path;
use std::time::Duration;

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    /// Announce a new release
    pub fn report_start(release: &str) {
        println!("{} {}\n", "📦 Creating release:".bold(), release.cyan());
    }

    /// List copied sources and the manifest location
    pub fn report_files(report: &ReleaseReport) {
        println!("\n{}", "📄 Copying source files...".bold());
        for source in &report.sources {
            println!("  {}", source.name);
        }
        println!(
            "\n{} {}",
            "📝 Manifest:".bold(),
            report.path.join(MANIFEST_FILE).display()
        );
        if let Some(ref archive) = report.archive {
            println!("{} {}", "🗜  Archive:".bold(), archive.display());
        }
    }

    /// Final run summary
    pub fn report_summary(report: &ReleaseReport) {
        let succeeded = report.total_succeeded();
        let failed = report.total_failed();

        println!("\n{}", "=".repeat(50).bright_black());
        println!(
            "{} {} STLs",
            "✓ Successfully generated:".green(),
            succeeded.to_string().green().bold()
        );
        if failed > 0 {
            println!("{} {} STLs", "✗ Failed:".red(), failed.to_string().red().bold());
        }
        println!("{} {}", "📁 Release location:".bold(), report.path.display().to_string().cyan());
        println!("{}", "=".repeat(50).bright_black());
    }

    /// Print the compatibility matrix
    pub fn report_matrix() {
        for class in BatteryClass::ALL {
            println!("{}", class.title().bold());
            for entry in class.table().entries() {
                let files: Vec<String> = entry
                    .hosts
                    .iter()
                    .map(|host| format!("{}-{}.stl", entry.battery, host))
                    .collect();
                println!(
                    "  {:8} {} {}",
                    entry.battery.cyan(),
                    "→".bright_black(),
                    files.join(", ")
                );
            }
            println!();
        }
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("\n{} {}", "❌ Error:".red().bold(), message);
    }

    /// Report warning
    pub fn report_warning(message: &str) {
        println!("\n{} {}", "⚠️  Warning:".yellow().bold(), message);
    }

    /// Format duration for display
    fn format_duration(duration: Duration) -> String {
        let micros = duration.as_micros();

        if micros < 1_000 {
            format!("{}µs", micros)
        } else if micros < 1_000_000 {
            format!("{:.2}ms", micros as f64 / 1_000.0)
        } else {
            format!("{:.2}s", micros as f64 / 1_000_000.0)
        }
    }

    fn pair_label(pair: &AdapterPair) -> String {
        format!("{:8} → {:2}", pair.battery, pair.host)
    }
}

/// Prints one line per pair, with a spinner while OpenSCAD runs
pub struct ConsoleProgress {
    verbose: bool,
    spinner: RefCell<Option<ProgressBar>>,
}

impl ConsoleProgress {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            spinner: RefCell::new(None),
        }
    }
}

impl GenerationObserver for ConsoleProgress {
    fn release_started(&self, release: &str, _path: &Path) {
        Reporter::report_start(release);
    }

    fn family_started(&self, family: &AdapterFamily) {
        let icon = match family.class {
            BatteryClass::ButtonCell => "🔋",
            BatteryClass::Cylinder => "⚡",
        };
        println!(
            "{} {}",
            icon,
            format!("Generating {}...", family.class.title().to_lowercase()).bold()
        );
    }

    fn pair_started(&self, pair: &AdapterPair) {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("  {msg} {spinner:.green}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(Reporter::pair_label(pair));
        spinner.enable_steady_tick(Duration::from_millis(100));
        *self.spinner.borrow_mut() = Some(spinner);
    }

    fn pair_finished(&self, pair: &AdapterPair, result: &GenerationResult) {
        if let Some(spinner) = self.spinner.borrow_mut().take() {
            spinner.finish_and_clear();
        }

        let timing = if self.verbose {
            format!(" ({})", Reporter::format_duration(result.duration))
                .bright_black()
                .to_string()
        } else {
            String::new()
        };

        if result.success {
            println!("  {} ... {}{}", Reporter::pair_label(pair), "✓".green(), timing);
        } else {
            println!("  {} ... {}{}", Reporter::pair_label(pair), "✗".red(), timing);
            if let Some(ref error) = result.error {
                println!("    {} {}", "Error:".red(), error);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(
            Reporter::format_duration(Duration::from_micros(500)),
            "500µs"
        );
        assert_eq!(
            Reporter::format_duration(Duration::from_millis(5)),
            "5.00ms"
        );
        assert_eq!(Reporter::format_duration(Duration::from_secs(2)), "2.00s");
    }

    #[test]
    fn test_pair_label_alignment() {
        let pair = AdapterPair { battery: "A27", host: "D" };
        assert_eq!(Reporter::pair_label(&pair), "A27      → D ");
    }
}
