// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 BatteryDaddy Team

//! Battery compatibility matrix
//!
//! Each table maps a battery identifier to the ordered list of host
//! holders an adapter for it is built for. The tables are fixed at
//! compile time and enumerated in declaration order.

use serde::{Deserialize, Serialize};

/// Battery form factor; selects the OpenSCAD template and its parameter names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatteryClass {
    ButtonCell,
    Cylinder,
}

impl BatteryClass {
    pub const ALL: [BatteryClass; 2] = [BatteryClass::ButtonCell, BatteryClass::Cylinder];

    pub fn as_str(&self) -> &'static str {
        match self {
            BatteryClass::ButtonCell => "button_cell",
            BatteryClass::Cylinder => "cylinder",
        }
    }

    /// Human-readable name used in console output and the manifest
    pub fn title(&self) -> &'static str {
        match self {
            BatteryClass::ButtonCell => "Button Cell Adapters (Coin Cells)",
            BatteryClass::Cylinder => "Cylindrical Battery Adapters",
        }
    }

    pub fn table(&self) -> &'static CompatibilityTable {
        match self {
            BatteryClass::ButtonCell => &BUTTON_CELL_COMPAT,
            BatteryClass::Cylinder => &CYLINDER_COMPAT,
        }
    }
}

/// One battery and the hosts it fits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompatibilityEntry {
    pub battery: &'static str,
    pub hosts: &'static [&'static str],
}

/// A (battery, host) combination to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AdapterPair {
    pub battery: &'static str,
    pub host: &'static str,
}

impl AdapterPair {
    /// Output file name, `{battery}-{host}.stl`
    pub fn file_name(&self) -> String {
        format!("{}-{}.stl", self.battery, self.host)
    }
}

/// Ordered compatibility matrix for one battery class
#[derive(Debug, Clone, Copy)]
pub struct CompatibilityTable {
    entries: &'static [CompatibilityEntry],
}

impl CompatibilityTable {
    pub const fn new(entries: &'static [CompatibilityEntry]) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &'static [CompatibilityEntry] {
        self.entries
    }

    /// Every compatible pair, batteries in table order and hosts in list order
    pub fn pairs(&self) -> impl Iterator<Item = AdapterPair> + 'static {
        let entries = self.entries;
        entries.iter().flat_map(|entry| {
            entry.hosts.iter().map(move |host| AdapterPair {
                battery: entry.battery,
                host: *host,
            })
        })
    }

    /// Number of battery types in the table
    pub fn battery_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of STL files the table describes
    pub fn file_count(&self) -> usize {
        self.entries.iter().map(|entry| entry.hosts.len()).sum()
    }

    pub fn hosts_for(&self, battery: &str) -> Option<&'static [&'static str]> {
        self.entries
            .iter()
            .find(|entry| entry.battery == battery)
            .map(|entry| entry.hosts)
    }
}

pub static BUTTON_CELL_COMPAT: CompatibilityTable = CompatibilityTable::new(&[
    // 24.5mm, only fits D
    CompatibilityEntry { battery: "CR2450", hosts: &["D"] },
    // 20mm
    CompatibilityEntry { battery: "CR2032", hosts: &["D", "C"] },
    CompatibilityEntry { battery: "CR2016", hosts: &["D", "C"] },
    // 16mm
    CompatibilityEntry { battery: "CR1632", hosts: &["D", "C"] },
    CompatibilityEntry { battery: "CR1616", hosts: &["D", "C"] },
]);

pub static CYLINDER_COMPAT: CompatibilityTable = CompatibilityTable::new(&[
    CompatibilityEntry { battery: "A27", hosts: &["D", "C"] },
    CompatibilityEntry { battery: "AAAA", hosts: &["D", "C"] },
]);

/// Battery types across both tables
pub fn total_battery_count() -> usize {
    BatteryClass::ALL
        .iter()
        .map(|class| class.table().battery_count())
        .sum()
}

/// STL files across both tables
pub fn total_file_count() -> usize {
    BatteryClass::ALL
        .iter()
        .map(|class| class.table().file_count())
        .sum()
}
