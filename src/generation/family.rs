// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 BatteryDaddy Team

//! Adapter families: template, parameter names and compatibility table

use crate::compat::{AdapterPair, BatteryClass, CompatibilityTable};
use crate::error::ReleaseError;
use crate::openscad::Parameters;
use std::path::{Path, PathBuf};

pub const BUTTON_CELL_TEMPLATE: &str = "button_cell_adapter.scad";
pub const CYLINDER_TEMPLATE: &str = "cylinder_battery_adapter.scad";

/// Builds the OpenSCAD definitions for one pair
pub type ParamBuilder = fn(&AdapterPair) -> Result<Parameters, ReleaseError>;

/// Everything the generation loop needs to build one battery class
#[derive(Clone)]
pub struct AdapterFamily {
    pub class: BatteryClass,
    pub template: PathBuf,
    pub table: &'static CompatibilityTable,
    pub params: ParamBuilder,
}

impl AdapterFamily {
    /// Family for `class` with its template looked up in `source_dir`
    pub fn for_class(class: BatteryClass, source_dir: &Path) -> Self {
        let (template, params): (&str, ParamBuilder) = match class {
            BatteryClass::ButtonCell => (BUTTON_CELL_TEMPLATE, button_cell_params),
            BatteryClass::Cylinder => (CYLINDER_TEMPLATE, cylinder_params),
        };
        Self {
            class,
            template: source_dir.join(template),
            table: class.table(),
            params,
        }
    }

    pub fn build_params(&self, pair: &AdapterPair) -> Result<Parameters, ReleaseError> {
        (self.params)(pair)
    }
}

/// `button_cell_adapter.scad` takes the engraved label and the host type
pub fn button_cell_params(pair: &AdapterPair) -> Result<Parameters, ReleaseError> {
    let mut params = Parameters::new();
    params
        .set("battery_label", pair.battery)?
        .set("host_battery_type", pair.host)?;
    Ok(params)
}

/// `cylinder_battery_adapter.scad` takes the battery type and the host type
pub fn cylinder_params(pair: &AdapterPair) -> Result<Parameters, ReleaseError> {
    let mut params = Parameters::new();
    params
        .set("battery_type", pair.battery)?
        .set("host_battery_type", pair.host)?;
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openscad::ScadValue;

    #[test]
    fn test_button_cell_family() {
        let family = AdapterFamily::for_class(BatteryClass::ButtonCell, Path::new("src"));
        assert_eq!(family.template, Path::new("src/button_cell_adapter.scad"));

        let pair = AdapterPair { battery: "CR2032", host: "C" };
        let params = family.build_params(&pair).unwrap();
        assert_eq!(params.get("battery_label"), Some(&ScadValue::from("CR2032")));
        assert_eq!(params.get("host_battery_type"), Some(&ScadValue::from("C")));
        assert!(params.get("battery_type").is_none());
    }

    #[test]
    fn test_cylinder_family() {
        let family = AdapterFamily::for_class(BatteryClass::Cylinder, Path::new("."));
        assert_eq!(family.table.battery_count(), 2);

        let pair = AdapterPair { battery: "A27", host: "D" };
        let args = family.build_params(&pair).unwrap().to_args();
        assert_eq!(args, ["-D", "battery_type=\"A27\"", "-D", "host_battery_type=\"D\""]);
    }
}
