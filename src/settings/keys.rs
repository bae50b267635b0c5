//! Setting names read by the base layer and the device profiles.

pub const PRINT_SPEED: &str = "print_speed";
pub const TRAVEL_SPEED: &str = "travel_speed";
pub const AREA_MODEL: &str = "area_model";
pub const EXTRUSION_WIDTH: &str = "extrusion_width";
pub const EXTRUSION_HEIGHT: &str = "extrusion_height";
pub const NOZZLE_TEMP: &str = "nozzle_temp";
pub const BED_TEMP: &str = "bed_temp";
pub const FAN_PERCENT: &str = "fan_percent";
pub const PRINT_SPEED_PERCENT: &str = "print_speed_percent";
pub const MATERIAL_FLOW_PERCENT: &str = "material_flow_percent";
pub const E_UNITS: &str = "e_units";
pub const RELATIVE_E: &str = "relative_e";
pub const DIA_FEED: &str = "dia_feed";
pub const TRAVEL_FORMAT: &str = "travel_format";
pub const PRIMER: &str = "primer";

/// Key under which the assembled starting procedure is stored.
pub const STARTING_PROCEDURE_STEPS: &str = "starting_procedure_steps";

/// Key under which the assembled ending procedure is stored.
pub const ENDING_PROCEDURE_STEPS: &str = "ending_procedure_steps";

/// Keys no override layer may set.
pub const RESERVED: &[&str] = &[STARTING_PROCEDURE_STEPS, ENDING_PROCEDURE_STEPS];
