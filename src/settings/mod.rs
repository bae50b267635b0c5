//! Settings layers and merging
//!
//! Effective settings are built from three layers, lowest precedence first:
//! 1. Base settings shared by all devices
//! 2. Device profile overrides
//! 3. Caller overrides (map, TOML file or `key=value` pairs)

mod defaults;
mod effective;
mod error;
pub mod keys;
mod merge;
mod overrides;
mod scalar;

pub use defaults::BaseSettings;
pub use effective::{EffectiveSettings, ExplicitKeys, Layer, LayerOrigin, LayerSource};
pub use error::SettingsError;
pub use merge::{merge, merge_layers, overlay};
pub use overrides::{
    caller_layer, infer_scalar, load_overrides_file, parse_assignment, parse_assignments,
    parse_overrides_toml,
};
pub use scalar::{Scalar, SettingsMap};
