//! Caller override input: TOML files and `key=value` assignments.

use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

use super::effective::Layer;
use super::error::SettingsError;
use super::merge::overlay;
use super::scalar::{Scalar, SettingsMap};

/// Load a flat TOML overrides file as a user layer, recording its digest.
pub fn load_overrides_file(path: &Path) -> Result<Layer, SettingsError> {
    let bytes = fs::read(path)?;

    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    let digest = hex::encode(hasher.finalize());

    let contents = String::from_utf8(bytes)
        .map_err(|e| SettingsError::Parse(format!("Invalid UTF-8: {}", e)))?;
    let values = parse_overrides_toml(&contents)?;

    Ok(Layer::user(values).with_file(path.to_string_lossy().to_string(), digest))
}

/// Parse a flat TOML document into a settings map.
pub fn parse_overrides_toml(contents: &str) -> Result<SettingsMap, SettingsError> {
    let table: toml::Table = toml::from_str(contents)
        .map_err(|e| SettingsError::Parse(format!("TOML parse error: {}", e)))?;

    let mut map = SettingsMap::new();
    for (key, value) in table {
        let scalar = toml_to_scalar(&key, value)?;
        map.insert(key, scalar);
    }
    Ok(map)
}

fn toml_to_scalar(key: &str, value: toml::Value) -> Result<Scalar, SettingsError> {
    match value {
        toml::Value::String(s) => Ok(Scalar::Text(s)),
        toml::Value::Integer(i) => Ok(Scalar::Int(i)),
        toml::Value::Float(f) => Ok(Scalar::Float(f)),
        toml::Value::Boolean(b) => Ok(Scalar::Bool(b)),
        toml::Value::Datetime(dt) => Ok(Scalar::Text(dt.to_string())),
        toml::Value::Array(_) | toml::Value::Table(_) => Err(SettingsError::NotScalar {
            key: key.to_string(),
        }),
    }
}

/// Parse a `key=value` assignment.
pub fn parse_assignment(input: &str) -> Result<(String, Scalar), SettingsError> {
    let (key, value) = input
        .split_once('=')
        .ok_or_else(|| SettingsError::Parse(format!("expected key=value, got '{}'", input)))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(SettingsError::Parse(format!("empty key in '{}'", input)));
    }

    Ok((key.to_string(), infer_scalar(value.trim())))
}

/// Infer a scalar from text: boolean, then integer, then float, else string.
pub fn infer_scalar(text: &str) -> Scalar {
    match text {
        "true" | "True" => return Scalar::Bool(true),
        "false" | "False" => return Scalar::Bool(false),
        _ => {}
    }

    if let Ok(i) = text.parse::<i64>() {
        return Scalar::Int(i);
    }
    match text.parse::<f64>() {
        Ok(f) if f.is_finite() => Scalar::Float(f),
        _ => Scalar::Text(text.to_string()),
    }
}

/// Fold `key=value` assignments into a map; later assignments win.
pub fn parse_assignments<I, S>(inputs: I) -> Result<SettingsMap, SettingsError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut map = SettingsMap::new();
    for input in inputs {
        let (key, value) = parse_assignment(input.as_ref())?;
        map.insert(key, value);
    }
    Ok(map)
}

/// Build the caller's layer: the overrides file first, then `key=value`
/// assignments on top. The file's path and digest stay on the layer.
pub fn caller_layer<I, S>(file: Option<&Path>, assignments: I) -> Result<Layer, SettingsError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let assignments = parse_assignments(assignments)?;

    match file {
        Some(path) => {
            let mut layer = load_overrides_file(path)?;
            layer.values = overlay(layer.values, assignments);
            Ok(layer)
        }
        None => Ok(Layer::user(assignments)),
    }
}
