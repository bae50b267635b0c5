//! Device profiles
//!
//! A device profile pairs a hard-coded override layer with an assembler that
//! turns effective settings into the starting and ending procedures for one
//! printer.

mod ender_5_pro_ceramic;
mod record;
mod stoneflower3d;

pub use ender_5_pro_ceramic::Ender5ProCeramic;
pub use record::{Procedures, SettingsRecord};
pub use stoneflower3d::Stoneflower3d;

use fc_steps::Step;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::settings::{EffectiveSettings, ExplicitKeys, Layer, Scalar, SettingsError, SettingsMap};

/// One printer's override layer and procedure assembler.
pub trait DeviceProfile: Send + Sync {
    /// Profile identifier, e.g. `ender_5_pro_ceramic`.
    fn name(&self) -> &'static str;

    /// Short human-readable description.
    fn description(&self) -> &'static str;

    /// Settings this device changes relative to the base settings.
    fn overrides(&self) -> SettingsMap;

    /// Build the starting and ending procedures.
    ///
    /// `explicit` holds the keys the caller set, for profiles that only emit
    /// some steps when asked to.
    fn assemble(
        &self,
        settings: &SettingsMap,
        explicit: &ExplicitKeys,
    ) -> Result<Procedures, SettingsError>;
}

/// Every known device profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Device {
    #[serde(rename = "ender_5_pro_ceramic")]
    Ender5ProCeramic,
    #[serde(rename = "stoneflower3d")]
    Stoneflower3d,
}

impl Device {
    pub fn all() -> &'static [Device] {
        &[Device::Ender5ProCeramic, Device::Stoneflower3d]
    }

    pub fn profile(&self) -> &'static dyn DeviceProfile {
        match self {
            Device::Ender5ProCeramic => &Ender5ProCeramic,
            Device::Stoneflower3d => &Stoneflower3d,
        }
    }

    pub fn name(&self) -> &'static str {
        self.profile().name()
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Device lookup errors
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    #[error("Unknown device '{0}' (known: {known})", known = known_names())]
    UnknownDevice(String),
}

fn known_names() -> String {
    Device::all()
        .iter()
        .map(Device::name)
        .collect::<Vec<_>>()
        .join(", ")
}

impl FromStr for Device {
    type Err = DeviceError;

    /// Case-insensitive; `-` and `_` are interchangeable.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Device::all()
            .iter()
            .copied()
            .find(|d| d.name() == normalized)
            .ok_or_else(|| DeviceError::UnknownDevice(s.to_string()))
    }
}

/// Merge the layers for `profile` with the caller's layer.
pub fn effective_settings(profile: &dyn DeviceProfile, user: Layer) -> EffectiveSettings {
    EffectiveSettings::build(profile.overrides(), user)
}

/// Merge settings and assemble procedures for `profile`.
pub fn set_up_with(
    profile: &dyn DeviceProfile,
    user: Layer,
) -> Result<SettingsRecord, SettingsError> {
    let effective = effective_settings(profile, user);
    let procedures = profile.assemble(&effective.values, &effective.explicit)?;

    debug!(
        device = profile.name(),
        starting = procedures.starting.len(),
        ending = procedures.ending.len(),
        "assembled procedures"
    );

    Ok(SettingsRecord::new(effective.values, procedures))
}

/// Settings record for `device` with the caller's overrides applied.
pub fn set_up(device: Device, user_overrides: SettingsMap) -> Result<SettingsRecord, SettingsError> {
    set_up_with(device.profile(), Layer::user(user_overrides))
}

fn speed_factor_step(percent: &Scalar) -> Step {
    Step::raw(format!(
        "M220 S{} ; set speed factor override percentage",
        percent
    ))
}

fn flow_factor_step(percent: &Scalar) -> Step {
    Step::raw(format!(
        "M221 S{} ; set extrude factor override percentage",
        percent
    ))
}
