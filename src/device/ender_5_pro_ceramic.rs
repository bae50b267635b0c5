//! Creality Ender 5 Pro fitted with a ceramic paste extruder.
//!
//! Every step is always emitted; settings only change step parameters.

use fc_steps::{Point, PrinterCommand, Step};

use super::{flow_factor_step, speed_factor_step, DeviceProfile, Procedures};
use crate::settings::{keys, ExplicitKeys, SettingsError, SettingsMap};

const HEADER: &str = "\n;FLAVOR:Marlin\n;TIME:0\n;Filament used: 0m\n;Layer height: 0\n;MINX:0\n;MINY:0\n;MINZ:0";
const BOUNDS: &str = ";MAXX:220\n;MAXY:220\n;MAXZ:300\n";
const BANNER: &str = "; Time to print!!!!!\n; GCode created with FullControl - tell us what you're printing!\n; info@fullcontrol.xyz or tag FullControlXYZ on Twitter/Instagram/LinkedIn/Reddit/TikTok \n";
const REPORT_TEMPERATURES: &str = "M105";
const END_OF_STARTING: &str = ";-----\n; END OF STARTING PROCEDURE\n;-----\n";
const START_OF_ENDING: &str = "\n;-----\n; START OF ENDING PROCEDURE\n;-----";

/// Priming: extrude in place at (5, 5, 10), lift, then drop to the first layer.
const PRIME_POINT: (f64, f64, f64) = (5.0, 5.0, 10.0);
const PRIME_VOLUME: f64 = 50.0;
const PRIME_SPEED: f64 = 250.0;
const PRIME_LIFT_Z: f64 = 50.0;
const FIRST_LAYER_POINT: (f64, f64, f64) = (10.0, 10.0, 0.3);

pub struct Ender5ProCeramic;

impl DeviceProfile for Ender5ProCeramic {
    fn name(&self) -> &'static str {
        "ender_5_pro_ceramic"
    }

    fn description(&self) -> &'static str {
        "Ender 5 Pro with ceramic paste extruder (fixed start/end procedure)"
    }

    fn overrides(&self) -> SettingsMap {
        SettingsMap::new()
            .with(keys::NOZZLE_TEMP, 0)
            .with(keys::BED_TEMP, 0)
            .with(keys::FAN_PERCENT, 0)
            .with(keys::DIA_FEED, 1.5)
    }

    fn assemble(
        &self,
        settings: &SettingsMap,
        _explicit: &ExplicitKeys,
    ) -> Result<Procedures, SettingsError> {
        let bed_temp = settings.number(keys::BED_TEMP)?;
        let nozzle_temp = settings.number(keys::NOZZLE_TEMP)?;
        let relative_e = settings.flag(keys::RELATIVE_E)?;
        let fan_percent = settings.number(keys::FAN_PERCENT)?;
        let speed_percent = settings.get(keys::PRINT_SPEED_PERCENT)?;
        let flow_percent = settings.get(keys::MATERIAL_FLOW_PERCENT)?;
        let travel_speed = settings.number(keys::TRAVEL_SPEED)?;

        let (px, py, pz) = PRIME_POINT;
        let (fx, fy, fz) = FIRST_LAYER_POINT;

        let starting = vec![
            Step::raw(HEADER),
            Step::raw(BOUNDS),
            Step::raw(BANNER),
            Step::named(PrinterCommand::Home),
            Step::bed(bed_temp, false),
            Step::raw(REPORT_TEMPERATURES),
            Step::nozzle(nozzle_temp, false),
            Step::bed(bed_temp, true),
            Step::raw(REPORT_TEMPERATURES),
            Step::nozzle(nozzle_temp, true),
            Step::named(PrinterCommand::AbsoluteCoords),
            Step::named(PrinterCommand::UnitsMm),
            Step::extrusion_mode(relative_e, None),
            Step::fan(fan_percent),
            speed_factor_step(speed_percent),
            flow_factor_step(flow_percent),
            Step::extrusion(false),
            Step::move_to(Point::xyz(px, py, pz)),
            Step::stationary_extrusion(PRIME_VOLUME, PRIME_SPEED),
            Step::travel_speed(PRIME_SPEED),
            Step::move_to(Point::z(PRIME_LIFT_Z)),
            Step::travel_speed(travel_speed),
            Step::move_to(Point::xyz(fx, fy, fz)),
            Step::extrusion(true),
            Step::raw(END_OF_STARTING),
        ];

        let ending = vec![
            Step::raw(START_OF_ENDING),
            Step::named(PrinterCommand::Retract),
            Step::raw("G91 ; relative coordinates"),
            Step::raw("G0 Z20 F8000 ; drop bed"),
            Step::raw("G90 ; absolute coordinates"),
            Step::fan(0.0),
            Step::bed(0.0, false),
            Step::nozzle(0.0, false),
            Step::raw("M84 X Y E ; disable all steppers but Z"),
        ];

        Ok(Procedures { starting, ending })
    }
}
