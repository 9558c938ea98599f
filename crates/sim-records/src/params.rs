//! Parameter Types
//!
//! Values and named parameter sets passed to a model run.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single parameter value.
///
/// Untagged on the wire: `30` reads as `Int`, `0.05` as `Float`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
}

impl ParamValue {
    /// Numeric value as a float.
    pub fn as_f64(&self) -> f64 {
        match *self {
            ParamValue::Int(v) => v as f64,
            ParamValue::Float(v) => v,
        }
    }

    /// Integer value; floats only convert when they hold an integral value.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            ParamValue::Int(v) => Some(v),
            ParamValue::Float(v) if v.is_finite() && v.fract() == 0.0 => Some(v as i64),
            ParamValue::Float(_) => None,
        }
    }

    pub fn is_int(&self) -> bool {
        matches!(self, ParamValue::Int(_))
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(v) => write!(f, "{}", v),
            ParamValue::Float(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

/// Named parameter set for one model run, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Parameters(BTreeMap<String, ParamValue>);

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<ParamValue> {
        self.0.get(name).copied()
    }

    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.get(name).map(|v| v.as_f64())
    }

    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(|v| v.as_i64())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Compact `name=value` listing, e.g. `n=100 speed=0.05`.
    pub fn label(&self) -> String {
        self.iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl FromIterator<(String, ParamValue)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (String, ParamValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_value_untagged_json() {
        let int: ParamValue = serde_json::from_str("30").unwrap();
        let float: ParamValue = serde_json::from_str("0.05").unwrap();

        assert_eq!(int, ParamValue::Int(30));
        assert_eq!(float, ParamValue::Float(0.05));
        assert_eq!(serde_json::to_string(&int).unwrap(), "30");
    }

    #[test]
    fn test_as_i64_only_for_integral_values() {
        assert_eq!(ParamValue::Float(4.0).as_i64(), Some(4));
        assert_eq!(ParamValue::Float(4.5).as_i64(), None);
        assert_eq!(ParamValue::Int(7).as_f64(), 7.0);
    }

    #[test]
    fn test_parameters_label_is_sorted() {
        let params = Parameters::new()
            .with("speed", 0.05)
            .with("n", 100i64)
            .with("steps", 30i64);

        assert_eq!(params.label(), "n=100 speed=0.05 steps=30");
        assert_eq!(params.get_i64("n"), Some(100));
        assert_eq!(params.get_f64("speed"), Some(0.05));
        assert!(params.get("missing").is_none());
    }

    #[test]
    fn test_parameters_serialize_as_map() {
        let params = Parameters::new().with("n", 10i64).with("speed", 0.5);
        let json = serde_json::to_string(&params).unwrap();

        assert_eq!(json, r#"{"n":10,"speed":0.5}"#);

        let parsed: Parameters = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, params);
    }
}
