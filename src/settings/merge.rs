//! Settings merge logic
//!
//! Layers are flat, so merging is a key-by-key replace: a key set in a later
//! layer replaces the whole value from any earlier layer.

use super::scalar::SettingsMap;

/// Apply `layer` on top of `base`.
pub fn overlay(mut base: SettingsMap, layer: SettingsMap) -> SettingsMap {
    for (key, value) in layer {
        base.insert(key, value);
    }
    base
}

/// Merge layers in order (first is base, last has highest precedence)
pub fn merge_layers<I>(layers: I) -> SettingsMap
where
    I: IntoIterator<Item = SettingsMap>,
{
    layers.into_iter().fold(SettingsMap::new(), overlay)
}

/// Merge the three standard layers: defaults, device overrides, user overrides.
pub fn merge(defaults: SettingsMap, device: SettingsMap, user: SettingsMap) -> SettingsMap {
    merge_layers([defaults, device, user])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Scalar;

    #[test]
    fn test_later_layer_wins() {
        let defaults = SettingsMap::new().with("a", 1).with("b", 2);
        let device = SettingsMap::new().with("b", 3);
        let user = SettingsMap::new().with("c", 4);

        let result = merge(defaults, device, user);

        let expected = SettingsMap::new().with("a", 1).with("b", 3).with("c", 4);
        assert_eq!(result, expected);
    }

    #[test]
    fn test_replace_changes_kind() {
        let base = SettingsMap::new().with("bed_temp", 40);
        let layer = SettingsMap::new().with("bed_temp", 60.5);

        let result = overlay(base, layer);
        assert_eq!(result.get("bed_temp").unwrap(), &Scalar::Float(60.5));
    }

    #[test]
    fn test_empty_layers() {
        assert!(merge_layers(Vec::<SettingsMap>::new()).is_empty());

        let only = SettingsMap::new().with("a", true);
        assert_eq!(merge_layers([SettingsMap::new(), only.clone(), SettingsMap::new()]), only);
    }

    #[test]
    fn test_four_layers() {
        let result = merge_layers([
            SettingsMap::new().with("speed", 100).with("mode", "off"),
            SettingsMap::new().with("speed", 200),
            SettingsMap::new().with("mode", "on"),
            SettingsMap::new().with("speed", 50),
        ]);

        assert_eq!(result.number("speed").unwrap(), 50.0);
        assert_eq!(result.text("mode").unwrap(), "on");
    }

    #[test]
    fn test_user_value_equal_to_default_still_applies() {
        let result = merge(
            SettingsMap::new().with("fan_percent", 100),
            SettingsMap::new().with("fan_percent", 0),
            SettingsMap::new().with("fan_percent", 100),
        );
        assert_eq!(result.get("fan_percent").unwrap(), &Scalar::Int(100));
    }
}
