// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 BatteryDaddy Team

//! Typed `-D name=value` definitions for the OpenSCAD command line

use crate::error::ReleaseError;
use std::fmt;

/// A value in OpenSCAD literal syntax
#[derive(Debug, Clone, PartialEq)]
pub enum ScadValue {
    Str(String),
    Number(f64),
    Bool(bool),
}

impl fmt::Display for ScadValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScadValue::Str(s) => {
                f.write_str("\"")?;
                for c in s.chars() {
                    match c {
                        '"' => f.write_str("\\\"")?,
                        '\\' => f.write_str("\\\\")?,
                        '\n' => f.write_str("\\n")?,
                        '\t' => f.write_str("\\t")?,
                        _ => write!(f, "{}", c)?,
                    }
                }
                f.write_str("\"")
            }
            ScadValue::Number(n) => write!(f, "{}", n),
            ScadValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for ScadValue {
    fn from(s: &str) -> Self {
        ScadValue::Str(s.to_string())
    }
}

impl From<String> for ScadValue {
    fn from(s: String) -> Self {
        ScadValue::Str(s)
    }
}

impl From<f64> for ScadValue {
    fn from(n: f64) -> Self {
        ScadValue::Number(n)
    }
}

impl From<bool> for ScadValue {
    fn from(b: bool) -> Self {
        ScadValue::Bool(b)
    }
}

/// A single variable override passed with `-D`
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    name: String,
    value: ScadValue,
}

impl Definition {
    pub fn new(name: &str, value: impl Into<ScadValue>) -> Result<Self, ReleaseError> {
        if !is_identifier(name) {
            return Err(ReleaseError::InvalidParameterName(name.to_string()));
        }
        Ok(Self {
            name: name.to_string(),
            value: value.into(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &ScadValue {
        &self.value
    }

    /// The argument that follows `-D`
    pub fn to_arg(&self) -> String {
        format!("{}={}", self.name, self.value)
    }
}

/// Ordered set of definitions for one invocation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameters {
    definitions: Vec<Definition>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a definition
    pub fn set(&mut self, name: &str, value: impl Into<ScadValue>) -> Result<&mut Self, ReleaseError> {
        let definition = Definition::new(name, value)?;
        match self.definitions.iter_mut().find(|d| d.name == definition.name) {
            Some(existing) => *existing = definition,
            None => self.definitions.push(definition),
        }
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&ScadValue> {
        self.definitions
            .iter()
            .find(|d| d.name == name)
            .map(|d| &d.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Definition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Command-line arguments, `-D` flag and value as separate entries
    pub fn to_args(&self) -> Vec<String> {
        self.iter()
            .flat_map(|d| ["-D".to_string(), d.to_arg()])
            .collect()
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_values_are_quoted() {
        let def = Definition::new("battery_label", "CR2032").unwrap();
        assert_eq!(def.to_arg(), "battery_label=\"CR2032\"");
    }

    #[test]
    fn test_string_escaping() {
        let value = ScadValue::from(r#"a"b\c"#);
        assert_eq!(value.to_string(), r#""a\"b\\c""#);
    }

    #[test]
    fn test_number_and_bool() {
        assert_eq!(ScadValue::from(1.5).to_string(), "1.5");
        assert_eq!(ScadValue::from(20.0).to_string(), "20");
        assert_eq!(ScadValue::from(true).to_string(), "true");
    }

    #[test]
    fn test_invalid_names_rejected() {
        for name in ["", "1abc", "a-b", "x=1", "a b"] {
            assert!(
                matches!(Definition::new(name, "v"), Err(ReleaseError::InvalidParameterName(_))),
                "{name:?} should be rejected"
            );
        }
        assert!(Definition::new("_private2", "v").is_ok());
    }

    #[test]
    fn test_parameters_to_args() {
        let mut params = Parameters::new();
        params.set("battery_type", "AAAA").unwrap();
        params.set("host_battery_type", "C").unwrap();
        params.set("battery_type", "A27").unwrap();

        assert_eq!(params.len(), 2);
        assert_eq!(
            params.to_args(),
            vec!["-D", "battery_type=\"A27\"", "-D", "host_battery_type=\"C\""]
        );
        assert_eq!(params.get("host_battery_type"), Some(&ScadValue::from("C")));
    }
}
