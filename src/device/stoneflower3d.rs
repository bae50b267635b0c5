//! StoneFlower 3D paste printer.
//!
//! The preamble leaves heaters and fan off. Temperature, fan and factor
//! override steps are only added for keys the caller set explicitly, so the
//! printer keeps whatever state the operator configured on the machine.

use fc_steps::{ExtrusionUnits, PrinterCommand, Step};

use super::{flow_factor_step, speed_factor_step, DeviceProfile, Procedures};
use crate::settings::{keys, ExplicitKeys, SettingsError, SettingsMap};

const HEADER: &str = "; Time to print!!!!!\n; GCode created with FullControl\n ;PRE-PRINT";
const ZERO_EXTRUDER: &str = "; Set Extruder value to zero\n G92 E0";

pub struct Stoneflower3d;

impl DeviceProfile for Stoneflower3d {
    fn name(&self) -> &'static str {
        "stoneflower3d"
    }

    fn description(&self) -> &'static str {
        "StoneFlower 3D paste printer (heaters/fan only set when overridden)"
    }

    fn overrides(&self) -> SettingsMap {
        SettingsMap::new()
            .with(keys::PRIMER, "travel")
            .with(keys::NOZZLE_TEMP, 0)
            .with(keys::BED_TEMP, 0)
            .with(keys::FAN_PERCENT, 0)
            .with(keys::RELATIVE_E, false)
    }

    fn assemble(
        &self,
        settings: &SettingsMap,
        explicit: &ExplicitKeys,
    ) -> Result<Procedures, SettingsError> {
        let mut starting = vec![
            Step::raw(HEADER),
            Step::named(PrinterCommand::Home),
            Step::bed(0.0, false),
            Step::nozzle(0.0, false),
            Step::named(PrinterCommand::AbsoluteCoords),
            Step::named(PrinterCommand::UnitsMm),
            Step::extrusion_mode(false, Some(ExtrusionUnits::Mm)),
            Step::fan(0.0),
            Step::raw("; Allow cold extrusion\n M302 P1"),
            Step::raw(ZERO_EXTRUDER),
            Step::raw("M117 Nozzle primimg..."),
            Step::raw("; Move extruder 100mm to prime\n G1 F3000 E100"),
            Step::raw(ZERO_EXTRUDER),
        ];

        let set_bed = explicit.contains(keys::BED_TEMP);
        let set_nozzle = explicit.contains(keys::NOZZLE_TEMP);

        // Both heaters start before either is waited on.
        if set_bed {
            starting.push(Step::bed(settings.number(keys::BED_TEMP)?, false));
        }
        if set_nozzle {
            starting.push(Step::nozzle(settings.number(keys::NOZZLE_TEMP)?, false));
        }
        if set_bed {
            starting.push(Step::bed(settings.number(keys::BED_TEMP)?, true));
        }
        if set_nozzle {
            starting.push(Step::nozzle(settings.number(keys::NOZZLE_TEMP)?, true));
        }
        if explicit.contains(keys::FAN_PERCENT) {
            starting.push(Step::fan(settings.number(keys::FAN_PERCENT)?));
        }
        if explicit.contains(keys::PRINT_SPEED_PERCENT) {
            starting.push(speed_factor_step(settings.get(keys::PRINT_SPEED_PERCENT)?));
        }
        if explicit.contains(keys::MATERIAL_FLOW_PERCENT) {
            starting.push(flow_factor_step(settings.get(keys::MATERIAL_FLOW_PERCENT)?));
        }

        let ending = vec![
            Step::raw("; Move the head away from print\n G1 F300 Z20\n G1 F300 X0"),
            Step::named(PrinterCommand::Home),
            Step::raw("; End program\n M2"),
        ];

        Ok(Procedures { starting, ending })
    }
}
