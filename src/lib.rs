//! Printer device profiles
//!
//! Builds the settings record for a printer: base settings merged with the
//! device's own overrides and the caller's overrides, plus the starting and
//! ending procedures that bring the machine into a known state before the
//! print path and back to rest afterwards.

pub mod device;
pub mod settings;

pub use device::{set_up, set_up_with, Device, DeviceError, DeviceProfile, Procedures, SettingsRecord};
pub use fc_steps::{ExtrusionUnits, Heater, Point, PrinterCommand, Step, StepKind};
pub use settings::{
    merge, merge_layers, EffectiveSettings, ExplicitKeys, Layer, LayerOrigin, Scalar,
    SettingsError, SettingsMap,
};
