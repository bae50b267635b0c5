//! Primitive printer steps.
//!
//! A step is one state change or motion the printer performs before or after
//! the main print path: heating, fan control, moves, extrusion toggles, named
//! printer commands and raw text passthrough. Steps are plain data. Turning
//! them into machine code is the job of whatever consumes them.

mod point;
mod step;

pub use point::Point;
pub use step::{ExtrusionUnits, Heater, PrinterCommand, Step, StepKind};
