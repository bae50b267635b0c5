//! Device setup integration tests
//!
//! Exercises `set_up` end to end for every device profile: merge precedence,
//! explicit-key gating and the shape of the returned record.

use fc_devices::{
    merge, set_up, Device, Heater, PrinterCommand, Scalar, SettingsMap, Step, StepKind,
};
use serde_json::json;

fn overrides(value: serde_json::Value) -> SettingsMap {
    SettingsMap::from_json(value).unwrap()
}

fn temperatures(steps: &[Step], heater: Heater) -> Vec<f64> {
    steps
        .iter()
        .filter_map(|s| match s {
            Step::Temperature { heater: h, temp, .. } if *h == heater => Some(*temp),
            _ => None,
        })
        .collect()
}

fn count_kind(steps: &[Step], kind: StepKind) -> usize {
    steps.iter().filter(|s| s.kind() == kind).count()
}

// === Merge ===

#[test]
fn test_merge_precedence() {
    let result = merge(
        overrides(json!({"a": 1, "b": 2})),
        overrides(json!({"b": 3})),
        overrides(json!({"c": 4})),
    );
    assert_eq!(result, overrides(json!({"a": 1, "b": 3, "c": 4})));
}

#[test]
fn test_device_overrides_applied_to_record() {
    let record = set_up(Device::Ender5ProCeramic, SettingsMap::new()).unwrap();

    assert_eq!(record.get("dia_feed").unwrap(), &Scalar::Float(1.5));
    assert_eq!(record.get("nozzle_temp").unwrap(), &Scalar::Int(0));
    // Base settings fall through untouched.
    assert_eq!(record.get("travel_speed").unwrap(), &Scalar::Int(8000));

    let record = set_up(Device::Stoneflower3d, SettingsMap::new()).unwrap();
    assert_eq!(record.get("primer").unwrap(), &Scalar::Text("travel".to_string()));
    assert_eq!(record.get("relative_e").unwrap(), &Scalar::Bool(false));
}

#[test]
fn test_unknown_user_keys_are_kept() {
    let record = set_up(
        Device::Stoneflower3d,
        overrides(json!({"chamber_temp": 45, "note": "test print"})),
    )
    .unwrap();

    assert_eq!(record.get("chamber_temp").unwrap(), &Scalar::Int(45));
    assert_eq!(record.get("note").unwrap(), &Scalar::Text("test print".to_string()));
    // Unknown keys gate nothing.
    assert_eq!(record.starting_procedure_steps.len(), 13);
}

// === Determinism ===

#[test]
fn test_repeated_calls_are_identical() {
    for device in Device::all() {
        let user = overrides(json!({"nozzle_temp": 205, "bed_temp": 60, "fan_percent": 30}));
        let first = set_up(*device, user.clone()).unwrap();
        let second = set_up(*device, user).unwrap();

        assert_eq!(first, second, "{} is not deterministic", device);
        assert_eq!(
            first.starting_procedure_steps.len(),
            second.starting_procedure_steps.len()
        );
    }
}

// === Unconditional profile ===

#[test]
fn test_ender_homes_and_enables_extrusion_once() {
    let record = set_up(Device::Ender5ProCeramic, SettingsMap::new()).unwrap();
    let steps = &record.starting_procedure_steps;

    assert!(steps.iter().any(|s| s.is_named(PrinterCommand::Home)));

    let toggles: Vec<bool> = steps
        .iter()
        .filter_map(|s| match s {
            Step::Extrusion { on } => Some(*on),
            _ => None,
        })
        .collect();
    assert_eq!(toggles, vec![false, true]);

    let off = steps.iter().position(|s| *s == Step::extrusion(false)).unwrap();
    let on = steps.iter().position(|s| *s == Step::extrusion(true)).unwrap();
    assert!(off < on);
}

#[test]
fn test_ender_steps_do_not_depend_on_explicit_keys() {
    // Same resolved values, one via device defaults and one explicit.
    let implicit = set_up(Device::Ender5ProCeramic, SettingsMap::new()).unwrap();
    let explicit = set_up(
        Device::Ender5ProCeramic,
        overrides(json!({"nozzle_temp": 0, "bed_temp": 0, "fan_percent": 0})),
    )
    .unwrap();

    assert_eq!(
        implicit.starting_procedure_steps,
        explicit.starting_procedure_steps
    );
    assert_eq!(implicit.ending_procedure_steps, explicit.ending_procedure_steps);
}

#[test]
fn test_ender_user_temperature_wins() {
    let record = set_up(Device::Ender5ProCeramic, overrides(json!({"nozzle_temp": 205}))).unwrap();

    let nozzle = temperatures(&record.starting_procedure_steps, Heater::Nozzle);
    assert_eq!(nozzle, vec![205.0, 205.0]);

    // Beds keep the device value.
    let bed = temperatures(&record.starting_procedure_steps, Heater::Bed);
    assert_eq!(bed, vec![0.0, 0.0]);
}

// === Conditional profile ===

#[test]
fn test_stoneflower_empty_overrides_fixed_preamble_only() {
    let record = set_up(Device::Stoneflower3d, SettingsMap::new()).unwrap();
    let steps = &record.starting_procedure_steps;

    assert_eq!(steps.len(), 13);
    assert_eq!(count_kind(steps, StepKind::Fan), 1);
    assert_eq!(steps.iter().filter(|s| s.to_string().contains("M220")).count(), 0);
    assert_eq!(steps.iter().filter(|s| s.to_string().contains("M221")).count(), 0);
    // Only the two heater-off steps of the preamble.
    assert_eq!(temperatures(steps, Heater::Bed), vec![0.0]);
    assert_eq!(temperatures(steps, Heater::Nozzle), vec![0.0]);
}

#[test]
fn test_stoneflower_bed_only() {
    let record = set_up(Device::Stoneflower3d, overrides(json!({"bed_temp": 60}))).unwrap();
    let steps = &record.starting_procedure_steps;

    assert_eq!(steps.len(), 15);
    assert_eq!(&steps[13..], &[Step::bed(60.0, false), Step::bed(60.0, true)]);
    assert_eq!(temperatures(steps, Heater::Nozzle), vec![0.0]);
    assert_eq!(count_kind(steps, StepKind::Fan), 1);
}

#[test]
fn test_stoneflower_presence_not_value_gates() {
    // fan_percent=0 matches the device value but was set explicitly.
    let record = set_up(Device::Stoneflower3d, overrides(json!({"fan_percent": 0}))).unwrap();
    let steps = &record.starting_procedure_steps;

    assert_eq!(steps.len(), 14);
    assert_eq!(steps.last(), Some(&Step::fan(0.0)));
}

#[test]
fn test_stoneflower_user_temperature_wins() {
    let record = set_up(Device::Stoneflower3d, overrides(json!({"nozzle_temp": 205}))).unwrap();
    let steps = &record.starting_procedure_steps;

    // Preamble turns the nozzle off, then both requested steps carry 205.
    assert_eq!(temperatures(steps, Heater::Nozzle), vec![0.0, 205.0, 205.0]);
    assert_eq!(&steps[13..], &[Step::nozzle(205.0, false), Step::nozzle(205.0, true)]);
}

// === Both profiles ===

#[test]
fn test_record_always_carries_both_procedures() {
    let cases = [
        json!({}),
        json!({"bed_temp": 60}),
        json!({"nozzle_temp": 205, "print_speed_percent": 90, "material_flow_percent": 95}),
    ];

    for device in Device::all() {
        for case in &cases {
            let record = set_up(*device, overrides(case.clone())).unwrap();
            assert!(!record.starting_procedure_steps.is_empty());
            assert!(!record.ending_procedure_steps.is_empty());

            let json: serde_json::Value =
                serde_json::from_str(&record.to_json().unwrap()).unwrap();
            assert!(json["starting_procedure_steps"].is_array());
            assert!(json["ending_procedure_steps"].is_array());
            assert!(json.get("nozzle_temp").is_some());
        }
    }
}

#[test]
fn test_assembled_procedures_win_over_caller_keys() {
    let record = set_up(
        Device::Stoneflower3d,
        overrides(json!({"starting_procedure_steps": "x", "bed_temp": 60})),
    )
    .unwrap();

    assert_eq!(record.starting_procedure_steps.len(), 15);
    assert_eq!(record.starting_procedure_steps[13], Step::bed(60.0, false));
    assert_eq!(record.starting_procedure_steps[14], Step::bed(60.0, true));

    let json: serde_json::Value = serde_json::from_str(&record.to_json().unwrap()).unwrap();
    assert_eq!(json["starting_procedure_steps"].as_array().map(Vec::len), Some(15));

    let record = set_up(
        Device::Ender5ProCeramic,
        overrides(json!({"ending_procedure_steps": "none"})),
    )
    .unwrap();
    assert_eq!(record.ending_procedure_steps.len(), 9);
    assert!(record.get("ending_procedure_steps").is_err());
}

#[test]
fn test_bad_value_type_aborts_setup() {
    let err = set_up(Device::Stoneflower3d, overrides(json!({"bed_temp": "hot"}))).unwrap_err();
    assert!(err.to_string().contains("bed_temp"));
}
