use approx::assert_abs_diff_eq;
use corrosion_rate_toolbox::{
    adjustments::Presence,
    environments::acid_sour_water::{base_rate, compute_acid_sour_water, AcidSourWaterInput},
    error::CorrosionError,
    rate::{Axis, RateWarning},
    tables::ReferenceTable,
    units::{RateUnit, UnitSystem},
};
use serde_json::json;

fn assert_close(actual: f64, expected: f64) {
    assert_abs_diff_eq!(actual, expected, epsilon = 1e-6);
}

fn rate_table() -> ReferenceTable {
    ReferenceTable::new(
        "Table 2.B.10.2",
        json!({
            "temperature_in_f": {
                "100": { "4.75": 1.0, "5.5": 2.0 },
                "200": { "4.75": 3.0, "5.5": 4.0 }
            },
            "temperature_in_c": {
                "38": { "4.75": 0.03, "5.5": 0.05 },
                "93": { "4.75": 0.08, "5.5": 0.1 }
            }
        }),
    )
}

fn oxygen_table() -> ReferenceTable {
    ReferenceTable::new("Table 2.B.10.3", json!({ "adjustment_factor": [1.0, 2.0] }))
}

fn input(ph: f64, temperature: f64) -> AcidSourWaterInput {
    AcidSourWaterInput {
        free_water: Presence::Yes,
        chlorides: Presence::No,
        carbon_steel: true,
        ph,
        temperature,
        oxygen_ppb: 0.0,
        velocity: 0.0,
    }
}

#[test]
fn base_rate_between_all_corners() {
    let r = base_rate(&rate_table(), UnitSystem::Fahrenheit, 5.0, 150.0).unwrap();
    assert_close(r.value, 7.0 / 3.0);
    assert!(r.value > 1.0 && r.value < 4.0);
    assert!(r.warnings.is_empty());
}

#[test]
fn carbon_steel_rate_applies_oxygen_and_velocity() {
    let plain = compute_acid_sour_water(
        &input(5.0, 150.0),
        &rate_table(),
        &oxygen_table(),
        UnitSystem::Fahrenheit,
    )
    .unwrap();
    assert_close(plain.value, 7.0 / 3.0);
    assert_eq!(plain.unit, RateUnit::MilsPerYear);

    let adjusted = compute_acid_sour_water(
        &AcidSourWaterInput {
            oxygen_ppb: 60.0,
            velocity: 10.0,
            ..input(5.0, 150.0)
        },
        &rate_table(),
        &oxygen_table(),
        UnitSystem::Fahrenheit,
    )
    .unwrap();
    assert_close(adjusted.value, 7.0 / 3.0 * 2.0 * 2.0);
}

#[test]
fn celsius_uses_metric_subtree() {
    let r = compute_acid_sour_water(
        &input(5.5, 93.0),
        &rate_table(),
        &oxygen_table(),
        UnitSystem::Celsius,
    )
    .unwrap();
    assert_close(r.value, 0.1);
    assert_eq!(r.unit, RateUnit::MillimetersPerYear);
}

#[test]
fn hot_input_is_held_at_highest_temperature() {
    let r = compute_acid_sour_water(
        &input(5.5, 400.0),
        &rate_table(),
        &oxygen_table(),
        UnitSystem::Fahrenheit,
    )
    .unwrap();
    assert_close(r.value, 4.0);
    assert!(r.has_warning("extrapolated-high"));
    assert_eq!(r.warnings, vec![RateWarning::ExtrapolatedHigh(Axis::Temperature)]);
}

#[test]
fn no_free_water_means_no_corrosion() {
    let r = compute_acid_sour_water(
        &AcidSourWaterInput {
            free_water: Presence::No,
            ..input(9.0, 150.0)
        },
        &rate_table(),
        &oxygen_table(),
        UnitSystem::Fahrenheit,
    )
    .unwrap();
    assert_close(r.value, 0.0);
}

#[test]
fn other_materials_get_fixed_rate() {
    let other = AcidSourWaterInput {
        carbon_steel: false,
        ..input(5.0, 150.0)
    };
    let f = compute_acid_sour_water(&other, &rate_table(), &oxygen_table(), UnitSystem::Fahrenheit)
        .unwrap();
    assert_close(f.value, 2.0);
    let c = compute_acid_sour_water(&other, &rate_table(), &oxygen_table(), UnitSystem::Celsius)
        .unwrap();
    assert_close(c.value, 0.05);
}

#[test]
fn ph_outside_table_domain_is_rejected() {
    for ph in [7.0, 8.2, 4.4] {
        let err = compute_acid_sour_water(
            &input(ph, 150.0),
            &rate_table(),
            &oxygen_table(),
            UnitSystem::Fahrenheit,
        )
        .unwrap_err();
        assert!(matches!(err, CorrosionError::OutOfDomain(_)), "ph={ph}: {err}");
    }
}

#[test]
fn chlorides_are_out_of_domain() {
    let err = compute_acid_sour_water(
        &AcidSourWaterInput {
            chlorides: Presence::Yes,
            ..input(5.0, 150.0)
        },
        &rate_table(),
        &oxygen_table(),
        UnitSystem::Fahrenheit,
    )
    .unwrap_err();
    assert!(matches!(err, CorrosionError::OutOfDomain(_)));
}
