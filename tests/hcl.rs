use approx::assert_abs_diff_eq;
use corrosion_rate_toolbox::{
    adjustments::Presence,
    environments::hcl::{
        alloy_table, chloride_from_ph, chloride_wt_percent, compute_hcl_alloy,
        compute_hcl_carbon_steel, needs_chloride_table, ChlorideSource, HclAlloyInput,
    },
    error::CorrosionError,
    rate::{Axis, RateWarning},
    tables::{ReferenceTable, TableId},
    units::{RateUnit, UnitSystem},
};
use serde_json::json;

fn assert_close(actual: f64, expected: f64) {
    assert_abs_diff_eq!(actual, expected, epsilon = 1e-6);
}

fn carbon_steel_table() -> ReferenceTable {
    ReferenceTable::new(
        "Table 2.B.2.3",
        json!({
            "0.5": { "100": 10.0, "200": 20.0 },
            "1": { "100": 30.0, "200": 40.0 }
        }),
    )
}

fn chloride_table() -> ReferenceTable {
    ReferenceTable::new(
        "Table 2.B.2.2",
        json!({
            "ph": [0.5, 1.0, 2.0],
            "ci_concentration": [[5001, 10000], [1001, 2000], [101, 1000]]
        }),
    )
}

fn alloy_records() -> ReferenceTable {
    ReferenceTable::new(
        "Table 2.B.2.5",
        json!({
            "temperature_in_f": [
                { "alloy": "Alloy 825", "cl_concentration": 0.5,
                  "temperature": { "100": 1.0, "125": 2.0, "175": 3.0, "200": 4.0 } },
                { "alloy": "Alloy 825", "cl_concentration": 0.75,
                  "temperature": { "100": 2.0, "125": 3.0, "175": 4.0, "200": 5.0 } },
                { "alloy": "Alloy 825", "cl_concentration": 1.0,
                  "temperature": { "100": 5.0, "125": 6.0, "175": 7.0, "200": 8.0 } }
            ]
        }),
    )
}

fn oxygen_records() -> ReferenceTable {
    ReferenceTable::new(
        "Table 2.B.2.6",
        json!({
            "temperature_in_f": [
                { "alloy": "Alloy 400",
                  "temperature": { "100": { "oxygen": 8.0, "no_oxygen": 2.0 } } }
            ]
        }),
    )
}

fn alloy_input(alloy: &str, chloride: ChlorideSource, temperature: f64) -> HclAlloyInput {
    HclAlloyInput {
        alloy: alloy.to_string(),
        chloride,
        temperature,
        oxygen: None,
    }
}

#[test]
fn carbon_steel_bilinear_inside_grid() {
    let r = compute_hcl_carbon_steel(0.75, 150.0, &carbon_steel_table(), UnitSystem::Fahrenheit)
        .unwrap();
    assert_close(r.value, 25.0);
    assert_eq!(r.unit, RateUnit::MilsPerYear);
    assert!(r.warnings.is_empty());
}

#[test]
fn carbon_steel_fahrenheit_grid_serves_celsius() {
    let celsius = (150.0 - 32.0) * 5.0 / 9.0;
    let r = compute_hcl_carbon_steel(0.75, celsius, &carbon_steel_table(), UnitSystem::Celsius)
        .unwrap();
    assert_close(r.value, 25.0 * 0.0254);
    assert_eq!(r.unit, RateUnit::MillimetersPerYear);
}

#[test]
fn carbon_steel_fahrenheit_subtree_serves_celsius() {
    let table = ReferenceTable::new(
        "Table 2.B.2.3",
        json!({
            "temperature_in_f": {
                "1": { "100": 10.0, "200": 20.0 },
                "2": { "100": 30.0, "200": 40.0 }
            }
        }),
    );
    let celsius = (150.0 - 32.0) * 5.0 / 9.0;
    let r = compute_hcl_carbon_steel(1.5, celsius, &table, UnitSystem::Celsius).unwrap();
    assert_close(r.value, 25.0 * 0.0254);
    assert_eq!(r.unit, RateUnit::MillimetersPerYear);
    assert!(r.warnings.is_empty());

    let r = compute_hcl_carbon_steel(1.5, 150.0, &table, UnitSystem::Fahrenheit).unwrap();
    assert_close(r.value, 25.0);
}

#[test]
fn carbon_steel_prefers_requested_unit_subtree() {
    let table = ReferenceTable::new(
        "Table 2.B.2.3",
        json!({
            "temperature_in_f": { "1": { "100": 999.0, "200": 999.0 } },
            "temperature_in_c": {
                "1": { "40": 1.0, "90": 2.0 },
                "2": { "40": 3.0, "90": 4.0 }
            }
        }),
    );
    let r = compute_hcl_carbon_steel(1.5, 65.0, &table, UnitSystem::Celsius).unwrap();
    assert_close(r.value, 2.5);
}

#[test]
fn carbon_steel_flags_grid_extrapolation() {
    let r = compute_hcl_carbon_steel(0.25, 150.0, &carbon_steel_table(), UnitSystem::Fahrenheit)
        .unwrap();
    assert_close(r.value, 5.0);
    assert_eq!(r.warnings, vec![RateWarning::ExtrapolatedLow(Axis::Ph)]);
}

#[test]
fn chloride_from_ph_uses_band_midpoint() {
    let r = chloride_from_ph(&chloride_table(), 1.0).unwrap();
    assert_close(r.value, 1500.5);
    assert!(matches!(
        chloride_from_ph(&chloride_table(), 5.5),
        Err(CorrosionError::OutOfDomain(_))
    ));
}

#[test]
fn chloride_wt_percent_is_clamped_to_records() {
    assert_close(chloride_wt_percent(6250.0).unwrap().value, 0.625);
    let low = chloride_wt_percent(100.0).unwrap();
    assert_close(low.value, 0.5);
    assert_eq!(low.warnings, vec![RateWarning::ClampedLow(Axis::Concentration)]);
    assert!(matches!(
        chloride_wt_percent(-1.0),
        Err(CorrosionError::OutOfDomain(_))
    ));
}

#[test]
fn alloy_interpolates_between_concentration_records() {
    let r = compute_hcl_alloy(
        &alloy_input("alloy  825", ChlorideSource::Wppm(6250.0), 110.0),
        None,
        &alloy_records(),
        UnitSystem::Fahrenheit,
    )
    .unwrap();
    assert_close(r.value, 1.5);
    assert!(r.warnings.is_empty());
}

#[test]
fn alloy_high_chloride_holds_top_record() {
    let r = compute_hcl_alloy(
        &alloy_input("Alloy 825", ChlorideSource::Wppm(20_000.0), 190.0),
        None,
        &alloy_records(),
        UnitSystem::Fahrenheit,
    )
    .unwrap();
    assert_close(r.value, 8.0);
    assert!(r.has_warning("clamped-high"));
}

#[test]
fn alloy_chloride_from_ph_carries_warnings() {
    let r = compute_hcl_alloy(
        &alloy_input("Alloy 825", ChlorideSource::Ph(1.0), 100.0),
        Some(&chloride_table()),
        &alloy_records(),
        UnitSystem::Fahrenheit,
    )
    .unwrap();
    assert_close(r.value, 1.0);
    assert!(r
        .warnings
        .contains(&RateWarning::ClampedLow(Axis::Concentration)));
}

#[test]
fn alloy_with_oxygen_reads_presence_field() {
    assert_eq!(alloy_table(Some(Presence::No)), TableId::Table2B26);
    assert_eq!(alloy_table(None), TableId::Table2B25);

    // 2.B.2.6은 농도 축이 없으므로 범위 밖 염화물도 경고를 남기지 않는다.
    let mut input = alloy_input("Alloy 400", ChlorideSource::Wppm(20_000.0), 100.0);
    input.oxygen = Some(Presence::Yes);
    assert!(!needs_chloride_table(&input));
    let with = compute_hcl_alloy(&input, None, &oxygen_records(), UnitSystem::Fahrenheit).unwrap();
    assert_close(with.value, 8.0);
    assert!(with.warnings.is_empty());

    input.oxygen = Some(Presence::No);
    input.chloride = ChlorideSource::Ph(1.0);
    assert!(!needs_chloride_table(&input));
    let without =
        compute_hcl_alloy(&input, None, &oxygen_records(), UnitSystem::Fahrenheit).unwrap();
    assert_close(without.value, 2.0);
    assert!(without.warnings.is_empty());
}

#[test]
fn alloy_ph_source_needs_chloride_table() {
    let input = alloy_input("Alloy 825", ChlorideSource::Ph(1.0), 100.0);
    assert!(needs_chloride_table(&input));
    assert!(!needs_chloride_table(&alloy_input(
        "Alloy 825",
        ChlorideSource::Wppm(5000.0),
        100.0
    )));
    let err = compute_hcl_alloy(&input, None, &alloy_records(), UnitSystem::Fahrenheit)
        .unwrap_err();
    assert!(matches!(err, CorrosionError::MissingTableKey(_)));
}

#[test]
fn unknown_alloy_is_missing_key() {
    let err = compute_hcl_alloy(
        &alloy_input("Alloy 999", ChlorideSource::Wppm(5000.0), 100.0),
        None,
        &alloy_records(),
        UnitSystem::Fahrenheit,
    )
    .unwrap_err();
    assert!(matches!(err, CorrosionError::MissingTableKey(_)));
}
