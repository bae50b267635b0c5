//! Scalar setting values and the flat settings map.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

use super::error::SettingsError;

/// A single setting value.
///
/// Integers and floats are kept apart so that text built from a value reads
/// the way it was written (`100` stays `100`, `100.0` stays `100.0`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    /// Human-readable kind name used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Scalar::Bool(_) => "boolean",
            Scalar::Int(_) => "integer",
            Scalar::Float(_) => "float",
            Scalar::Text(_) => "string",
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Int(i) => Some(*i as f64),
            Scalar::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Scalar::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Convert a JSON scalar. Objects, arrays and null are rejected.
    pub fn from_json(key: &str, value: Value) -> Result<Self, SettingsError> {
        match value {
            Value::Bool(b) => Ok(Scalar::Bool(b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Scalar::Int(i))
                } else if let Some(f) = n.as_f64() {
                    Ok(Scalar::Float(f))
                } else {
                    Err(SettingsError::NotScalar {
                        key: key.to_string(),
                    })
                }
            }
            Value::String(s) => Ok(Scalar::Text(s)),
            Value::Null | Value::Array(_) | Value::Object(_) => Err(SettingsError::NotScalar {
                key: key.to_string(),
            }),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(true) => write!(f, "True"),
            Scalar::Bool(false) => write!(f, "False"),
            Scalar::Int(i) => write!(f, "{}", i),
            Scalar::Float(v) => write_float(f, *v),
            Scalar::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Shortest round-trip digits. Exponent notation below 1e-4 and from 1e16
/// up, with a signed two-digit exponent (`1e-05`, `1.5e+16`).
fn write_float(f: &mut fmt::Formatter<'_>, v: f64) -> fmt::Result {
    if v.is_nan() {
        return write!(f, "nan");
    }
    if v.is_infinite() {
        return write!(f, "{}", if v > 0.0 { "inf" } else { "-inf" });
    }
    if v == 0.0 {
        return write!(f, "{:.1}", v);
    }

    let sci = format!("{:e}", v);
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);

    if !(-4..16).contains(&exp) {
        let sign = if exp < 0 { '-' } else { '+' };
        write!(f, "{}e{}{:02}", mantissa, sign, exp.abs())
    } else if v.fract() == 0.0 {
        // Whole floats keep one decimal so they stay distinguishable from integers.
        write!(f, "{:.1}", v)
    } else {
        write!(f, "{}", v)
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Bool(v)
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Scalar::Int(v.into())
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Int(v)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Float(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::Text(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::Text(v)
    }
}

/// Flat mapping from setting name to scalar value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettingsMap(BTreeMap<String, Scalar>);

impl SettingsMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Scalar>) -> Option<Scalar> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Scalar> {
        self.0.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Look up a setting that must be present.
    pub fn get(&self, key: &str) -> Result<&Scalar, SettingsError> {
        self.0
            .get(key)
            .ok_or_else(|| SettingsError::MissingKey(key.to_string()))
    }

    /// Numeric setting; integers are widened to `f64`.
    pub fn number(&self, key: &str) -> Result<f64, SettingsError> {
        let value = self.get(key)?;
        value.as_f64().ok_or_else(|| mismatch(key, "number", value))
    }

    pub fn flag(&self, key: &str) -> Result<bool, SettingsError> {
        let value = self.get(key)?;
        value.as_bool().ok_or_else(|| mismatch(key, "boolean", value))
    }

    pub fn text(&self, key: &str) -> Result<&str, SettingsError> {
        let value = self.get(key)?;
        value.as_str().ok_or_else(|| mismatch(key, "string", value))
    }

    /// Build from a flat JSON object.
    pub fn from_json(value: Value) -> Result<Self, SettingsError> {
        let Value::Object(object) = value else {
            return Err(SettingsError::Parse(
                "overrides must be a JSON object".to_string(),
            ));
        };

        let mut map = Self::new();
        for (key, value) in object {
            let scalar = Scalar::from_json(&key, value)?;
            map.0.insert(key, scalar);
        }
        Ok(map)
    }
}

fn mismatch(key: &str, expected: &'static str, found: &Scalar) -> SettingsError {
    SettingsError::TypeMismatch {
        key: key.to_string(),
        expected,
        found: found.kind_name(),
    }
}

impl<K: Into<String>, V: Into<Scalar>> FromIterator<(K, V)> for SettingsMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl IntoIterator for SettingsMap {
    type Item = (String, Scalar);
    type IntoIter = std::collections::btree_map::IntoIter<String, Scalar>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
