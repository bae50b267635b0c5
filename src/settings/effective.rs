//! Effective settings with provenance
//!
//! The effective settings capture the merged map plus where each value came
//! from and which keys the caller set explicitly.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

use super::defaults::BaseSettings;
use super::keys;
use super::merge::merge_layers;
use super::scalar::SettingsMap;

/// Origin of a settings layer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LayerOrigin {
    Defaults,
    Device,
    User,
}

/// A contributing layer with provenance
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LayerSource {
    /// Origin of this layer
    pub origin: LayerOrigin,

    /// File path the layer was loaded from, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// SHA-256 digest of the raw file bytes, if loaded from a file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

/// One override layer, ready to merge.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub source: LayerSource,
    pub values: SettingsMap,
}

impl Layer {
    fn new(origin: LayerOrigin, values: SettingsMap) -> Self {
        Self {
            source: LayerSource {
                origin,
                path: None,
                digest: None,
            },
            values,
        }
    }

    /// The base settings layer.
    pub fn defaults() -> Self {
        Self::new(LayerOrigin::Defaults, BaseSettings::default().to_layer())
    }

    pub fn device(values: SettingsMap) -> Self {
        Self::new(LayerOrigin::Device, values)
    }

    pub fn user(values: SettingsMap) -> Self {
        Self::new(LayerOrigin::User, values)
    }

    /// Record the file this layer was read from.
    pub fn with_file(mut self, path: String, digest: String) -> Self {
        self.source.path = Some(path);
        self.source.digest = Some(digest);
        self
    }
}

/// Names the caller set explicitly, independent of their resolved values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExplicitKeys(BTreeSet<String>);

impl ExplicitKeys {
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl From<&SettingsMap> for ExplicitKeys {
    fn from(map: &SettingsMap) -> Self {
        Self(map.keys().map(str::to_string).collect())
    }
}

impl<S: Into<String>> FromIterator<S> for ExplicitKeys {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Merged settings with full provenance
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EffectiveSettings {
    /// The merged settings
    pub values: SettingsMap,

    /// Keys present in any user layer
    pub explicit: ExplicitKeys,

    /// Layer that supplied the winning value for each key
    pub provenance: BTreeMap<String, LayerOrigin>,

    /// Contributing layers in precedence order
    pub sources: Vec<LayerSource>,
}

impl EffectiveSettings {
    /// Build effective settings from layers, lowest precedence first.
    ///
    /// Procedure keys are filled in by the assemblers, so any layer value
    /// under one of them is dropped.
    pub fn from_layers(layers: Vec<Layer>) -> Self {
        let base_keys: BTreeSet<String> = layers
            .iter()
            .filter(|l| l.source.origin == LayerOrigin::Defaults)
            .flat_map(|l| l.values.keys().map(str::to_string))
            .collect();

        let mut explicit = BTreeSet::new();
        let mut provenance = BTreeMap::new();
        let mut sources = Vec::with_capacity(layers.len());
        let mut maps = Vec::with_capacity(layers.len());

        for mut layer in layers {
            for reserved in keys::RESERVED {
                if layer.values.remove(reserved).is_some() {
                    warn!(
                        key = *reserved,
                        origin = ?layer.source.origin,
                        "ignoring override of assembled procedure key"
                    );
                }
            }

            for key in layer.values.keys() {
                provenance.insert(key.to_string(), layer.source.origin);

                if layer.source.origin == LayerOrigin::User {
                    explicit.insert(key.to_string());
                    if !base_keys.contains(key) {
                        debug!(key, "override key is not a base setting, passing through");
                    }
                }
            }

            sources.push(layer.source);
            maps.push(layer.values);
        }

        let values = merge_layers(maps);
        debug!(
            keys = values.len(),
            explicit = explicit.len(),
            layers = sources.len(),
            "merged settings layers"
        );

        Self {
            values,
            explicit: ExplicitKeys(explicit),
            provenance,
            sources,
        }
    }

    /// Build the standard three-layer settings: defaults, device, user.
    pub fn build(device_overrides: SettingsMap, user: Layer) -> Self {
        Self::from_layers(vec![Layer::defaults(), Layer::device(device_overrides), user])
    }

    /// Layer that supplied `key`, if it is set at all.
    pub fn origin_of(&self, key: &str) -> Option<LayerOrigin> {
        self.provenance.get(key).copied()
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Scalar;

    fn device() -> SettingsMap {
        SettingsMap::new().with("nozzle_temp", 0).with("bed_temp", 0)
    }

    #[test]
    fn test_build_with_defaults_only() {
        let settings = EffectiveSettings::build(SettingsMap::new(), Layer::user(SettingsMap::new()));

        assert_eq!(settings.values.number("nozzle_temp").unwrap(), 210.0);
        assert!(settings.explicit.is_empty());
        assert_eq!(settings.origin_of("nozzle_temp"), Some(LayerOrigin::Defaults));
    }

    #[test]
    fn test_provenance_tracks_winning_layer() {
        let user = SettingsMap::new().with("nozzle_temp", 205);
        let settings = EffectiveSettings::build(device(), Layer::user(user));

        assert_eq!(settings.values.get("nozzle_temp").unwrap(), &Scalar::Int(205));
        assert_eq!(settings.origin_of("nozzle_temp"), Some(LayerOrigin::User));
        assert_eq!(settings.origin_of("bed_temp"), Some(LayerOrigin::Device));
        assert_eq!(settings.origin_of("travel_speed"), Some(LayerOrigin::Defaults));
        assert_eq!(settings.origin_of("no_such_key"), None);
    }

    #[test]
    fn test_explicit_keys_ignore_values() {
        // bed_temp=0 equals the device value but is still explicit.
        let user = SettingsMap::new().with("bed_temp", 0);
        let settings = EffectiveSettings::build(device(), Layer::user(user));

        assert!(settings.explicit.contains("bed_temp"));
        assert!(!settings.explicit.contains("nozzle_temp"));
        assert_eq!(settings.explicit.len(), 1);
    }

    #[test]
    fn test_unknown_user_key_passes_through() {
        let user = SettingsMap::new().with("chamber_temp", 45);
        let settings = EffectiveSettings::build(device(), Layer::user(user));

        assert_eq!(settings.values.number("chamber_temp").unwrap(), 45.0);
        assert!(settings.explicit.contains("chamber_temp"));
    }

    #[test]
    fn test_procedure_keys_dropped_from_every_layer() {
        let device = device().with(keys::ENDING_PROCEDURE_STEPS, "device");
        let user = SettingsMap::new()
            .with(keys::STARTING_PROCEDURE_STEPS, "nope")
            .with("bed_temp", 60);
        let settings = EffectiveSettings::build(device, Layer::user(user));

        for key in keys::RESERVED {
            assert!(!settings.values.contains_key(key));
            assert!(!settings.explicit.contains(key));
            assert_eq!(settings.origin_of(key), None);
        }
        assert!(settings.explicit.contains("bed_temp"));
        assert_eq!(settings.explicit.len(), 1);
    }

    #[test]
    fn test_sources_tracked() {
        let user = Layer::user(SettingsMap::new())
            .with_file("overrides.toml".to_string(), "abc123".to_string());
        let settings = EffectiveSettings::build(device(), user);

        assert_eq!(settings.sources.len(), 3);
        assert_eq!(settings.sources[0].origin, LayerOrigin::Defaults);
        assert_eq!(settings.sources[1].origin, LayerOrigin::Device);
        assert_eq!(settings.sources[2].origin, LayerOrigin::User);
        assert_eq!(settings.sources[2].path.as_deref(), Some("overrides.toml"));
        assert_eq!(settings.sources[2].digest.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_extra_layers_keep_order() {
        let settings = EffectiveSettings::from_layers(vec![
            Layer::defaults(),
            Layer::device(SettingsMap::new().with("dia_feed", 2.85)),
            Layer::device(SettingsMap::new().with("dia_feed", 1.5)),
            Layer::user(SettingsMap::new()),
        ]);

        assert_eq!(settings.values.number("dia_feed").unwrap(), 1.5);
        assert_eq!(settings.sources.len(), 4);
    }

    #[test]
    fn test_to_json() {
        let settings = EffectiveSettings::build(device(), Layer::user(SettingsMap::new()));
        let json: serde_json::Value = serde_json::from_str(&settings.to_json().unwrap()).unwrap();

        assert_eq!(json["values"]["bed_temp"], 0);
        assert_eq!(json["provenance"]["bed_temp"], "device");
        assert_eq!(json["sources"][0]["origin"], "defaults");
    }
}
