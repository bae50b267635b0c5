//! Base settings shared by every single-tool device (lowest layer)

use serde::{Deserialize, Serialize};

use super::keys;
use super::scalar::SettingsMap;

/// Default settings every device profile starts from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseSettings {
    /// Print speed in mm/min (default: 1000)
    pub print_speed: i64,

    /// Travel speed in mm/min (default: 8000)
    pub travel_speed: i64,

    /// Extrusion cross-section model (default: "rectangle")
    pub area_model: String,

    /// Extrusion width in mm (default: 0.4)
    pub extrusion_width: f64,

    /// Extrusion height in mm (default: 0.2)
    pub extrusion_height: f64,

    /// Nozzle temperature in °C (default: 210)
    pub nozzle_temp: i64,

    /// Bed temperature in °C (default: 40)
    pub bed_temp: i64,

    /// Part-cooling fan speed in percent (default: 100)
    pub fan_percent: i64,

    /// Speed factor override percentage (default: 100)
    pub print_speed_percent: i64,

    /// Flow factor override percentage (default: 100)
    pub material_flow_percent: i64,

    /// Extruder units (default: "mm3")
    pub e_units: String,

    /// Relative extrusion (default: true)
    pub relative_e: bool,

    /// Filament diameter in mm (default: 1.75)
    pub dia_feed: f64,

    /// Travel move format (default: "G0")
    pub travel_format: String,

    /// Priming strategy (default: "front_lines_then_y")
    pub primer: String,
}

impl Default for BaseSettings {
    fn default() -> Self {
        Self {
            print_speed: 1000,
            travel_speed: 8000,
            area_model: "rectangle".to_string(),
            extrusion_width: 0.4,
            extrusion_height: 0.2,
            nozzle_temp: 210,
            bed_temp: 40,
            fan_percent: 100,
            print_speed_percent: 100,
            material_flow_percent: 100,
            e_units: "mm3".to_string(),
            relative_e: true,
            dia_feed: 1.75,
            travel_format: "G0".to_string(),
            primer: "front_lines_then_y".to_string(),
        }
    }
}

impl BaseSettings {
    /// Convert to a settings layer for merging
    pub fn to_layer(&self) -> SettingsMap {
        SettingsMap::new()
            .with(keys::PRINT_SPEED, self.print_speed)
            .with(keys::TRAVEL_SPEED, self.travel_speed)
            .with(keys::AREA_MODEL, self.area_model.as_str())
            .with(keys::EXTRUSION_WIDTH, self.extrusion_width)
            .with(keys::EXTRUSION_HEIGHT, self.extrusion_height)
            .with(keys::NOZZLE_TEMP, self.nozzle_temp)
            .with(keys::BED_TEMP, self.bed_temp)
            .with(keys::FAN_PERCENT, self.fan_percent)
            .with(keys::PRINT_SPEED_PERCENT, self.print_speed_percent)
            .with(keys::MATERIAL_FLOW_PERCENT, self.material_flow_percent)
            .with(keys::E_UNITS, self.e_units.as_str())
            .with(keys::RELATIVE_E, self.relative_e)
            .with(keys::DIA_FEED, self.dia_feed)
            .with(keys::TRAVEL_FORMAT, self.travel_format.as_str())
            .with(keys::PRIMER, self.primer.as_str())
    }
}
