//! The step enum and its parameter types.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::point::Point;

/// Which heater a temperature step targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Heater {
    /// Heated build plate.
    Bed,
    /// Hotend / nozzle.
    Nozzle,
}

impl fmt::Display for Heater {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Heater::Bed => write!(f, "bed"),
            Heater::Nozzle => write!(f, "nozzle"),
        }
    }
}

/// Named printer commands whose text is defined by the printer's command list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrinterCommand {
    Home,
    Retract,
    AbsoluteCoords,
    UnitsMm,
}

impl PrinterCommand {
    /// Identifier used in printer command lists.
    pub fn id(&self) -> &'static str {
        match self {
            PrinterCommand::Home => "home",
            PrinterCommand::Retract => "retract",
            PrinterCommand::AbsoluteCoords => "absolute_coords",
            PrinterCommand::UnitsMm => "units_mm",
        }
    }
}

/// Units the extruder axis is accounted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtrusionUnits {
    /// Length of filament fed.
    Mm,
    /// Volume of material deposited.
    Mm3,
}

/// One primitive printer operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Step {
    /// Set a heater target, optionally blocking until it is reached.
    Temperature { heater: Heater, temp: f64, wait: bool },

    /// Part-cooling fan speed in percent.
    Fan { speed_percent: f64 },

    /// Move the print head to a point.
    Move(Point),

    /// Raw text copied verbatim into the output.
    Raw { text: String },

    /// Named command looked up in the printer's command list.
    Named { command: PrinterCommand },

    /// Extrusion accounting mode (relative/absolute E, optional units).
    ExtrusionMode {
        relative: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        units: Option<ExtrusionUnits>,
    },

    /// Turn extrusion on or off for subsequent moves.
    Extrusion { on: bool },

    /// Extrude in place without moving.
    StationaryExtrusion { volume: f64, speed: f64 },

    /// Change the travel speed used for non-printing moves.
    TravelSpeed { speed: f64 },
}

/// Fieldless discriminant of [`Step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Temperature,
    Fan,
    Move,
    Raw,
    Named,
    ExtrusionMode,
    Extrusion,
    StationaryExtrusion,
    TravelSpeed,
}

impl Step {
    pub fn bed(temp: f64, wait: bool) -> Self {
        Step::Temperature {
            heater: Heater::Bed,
            temp,
            wait,
        }
    }

    pub fn nozzle(temp: f64, wait: bool) -> Self {
        Step::Temperature {
            heater: Heater::Nozzle,
            temp,
            wait,
        }
    }

    pub fn fan(speed_percent: f64) -> Self {
        Step::Fan { speed_percent }
    }

    pub fn move_to(point: Point) -> Self {
        Step::Move(point)
    }

    pub fn raw(text: impl Into<String>) -> Self {
        Step::Raw { text: text.into() }
    }

    pub fn named(command: PrinterCommand) -> Self {
        Step::Named { command }
    }

    pub fn extrusion_mode(relative: bool, units: Option<ExtrusionUnits>) -> Self {
        Step::ExtrusionMode { relative, units }
    }

    pub fn extrusion(on: bool) -> Self {
        Step::Extrusion { on }
    }

    pub fn stationary_extrusion(volume: f64, speed: f64) -> Self {
        Step::StationaryExtrusion { volume, speed }
    }

    pub fn travel_speed(speed: f64) -> Self {
        Step::TravelSpeed { speed }
    }

    pub fn kind(&self) -> StepKind {
        match self {
            Step::Temperature { .. } => StepKind::Temperature,
            Step::Fan { .. } => StepKind::Fan,
            Step::Move(_) => StepKind::Move,
            Step::Raw { .. } => StepKind::Raw,
            Step::Named { .. } => StepKind::Named,
            Step::ExtrusionMode { .. } => StepKind::ExtrusionMode,
            Step::Extrusion { .. } => StepKind::Extrusion,
            Step::StationaryExtrusion { .. } => StepKind::StationaryExtrusion,
            Step::TravelSpeed { .. } => StepKind::TravelSpeed,
        }
    }

    /// True if this is the named command `command`.
    pub fn is_named(&self, command: PrinterCommand) -> bool {
        matches!(self, Step::Named { command: c } if *c == command)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Temperature { heater, temp, wait } => {
                write!(f, "{} temperature {}", heater, temp)?;
                if *wait {
                    write!(f, " (wait)")?;
                }
                Ok(())
            }
            Step::Fan { speed_percent } => write!(f, "fan {}%", speed_percent),
            Step::Move(point) => write!(f, "move {}", point),
            Step::Raw { text } => {
                // Keep the listing to one line per step.
                let flat: Vec<&str> = text
                    .lines()
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .collect();
                write!(f, "raw {:?}", flat.join(" | "))
            }
            Step::Named { command } => write!(f, "command {}", command.id()),
            Step::ExtrusionMode { relative, units } => {
                let mode = if *relative { "relative" } else { "absolute" };
                match units {
                    Some(ExtrusionUnits::Mm) => write!(f, "extrusion mode {} (mm)", mode),
                    Some(ExtrusionUnits::Mm3) => write!(f, "extrusion mode {} (mm3)", mode),
                    None => write!(f, "extrusion mode {}", mode),
                }
            }
            Step::Extrusion { on } => {
                write!(f, "extrusion {}", if *on { "on" } else { "off" })
            }
            Step::StationaryExtrusion { volume, speed } => {
                write!(f, "stationary extrusion volume={} speed={}", volume, speed)
            }
            Step::TravelSpeed { speed } => write!(f, "travel speed {}", speed),
        }
    }
}
