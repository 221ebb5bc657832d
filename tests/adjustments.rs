use approx::assert_abs_diff_eq;
use corrosion_rate_toolbox::{
    adjustments::{
        high_velocity_multiplier, high_velocity_threshold, oxygen_factor, velocity_factor, Presence,
    },
    error::CorrosionError,
    rate::RateWarning,
    tables::ReferenceTable,
    units::UnitSystem,
};
use serde_json::json;

fn assert_close(actual: f64, expected: f64) {
    assert_abs_diff_eq!(actual, expected, epsilon = 1e-9);
}

#[test]
fn velocity_factor_fahrenheit_curve() {
    let f = UnitSystem::Fahrenheit;
    assert_close(velocity_factor(0.0, f).unwrap(), 1.0);
    assert_close(velocity_factor(3.0, f).unwrap(), 1.0);
    assert_close(velocity_factor(6.0, f).unwrap(), 1.0);
    assert_close(velocity_factor(10.0, f).unwrap(), 2.0);
    assert_close(velocity_factor(20.0, f).unwrap(), 4.5);
    assert_close(velocity_factor(25.0, f).unwrap(), 5.0);
}

#[test]
fn velocity_factor_celsius_curve_is_separate() {
    let c = UnitSystem::Celsius;
    assert_close(velocity_factor(1.0, c).unwrap(), 1.0);
    assert_close(velocity_factor(3.0, c).unwrap(), 0.82 * 3.0 - 0.5);
    assert_close(velocity_factor(7.0, c).unwrap(), 5.0);
}

#[test]
fn velocity_factor_rejects_negative_and_nan() {
    assert!(matches!(
        velocity_factor(-1.0, UnitSystem::Fahrenheit),
        Err(CorrosionError::OutOfDomain(_))
    ));
    assert!(matches!(
        velocity_factor(f64::NAN, UnitSystem::Fahrenheit),
        Err(CorrosionError::InvalidNumericInput { .. })
    ));
}

#[test]
fn oxygen_factor_switches_at_threshold() {
    let table = ReferenceTable::new("2.B.10.3", json!({ "adjustment_factor": [1.0, 2.0] }));
    assert_close(oxygen_factor(0.0, &table).unwrap(), 1.0);
    assert_close(oxygen_factor(49.9, &table).unwrap(), 1.0);
    assert_close(oxygen_factor(50.0, &table).unwrap(), 2.0);
    assert_close(oxygen_factor(400.0, &table).unwrap(), 2.0);
}

#[test]
fn oxygen_factor_requires_table_entry() {
    let table = ReferenceTable::new("2.B.10.3", json!({}));
    assert!(matches!(
        oxygen_factor(10.0, &table),
        Err(CorrosionError::MissingTableKey(_))
    ));
    let short = ReferenceTable::new("2.B.10.3", json!({ "adjustment_factor": [1.0] }));
    assert!(matches!(
        oxygen_factor(80.0, &short),
        Err(CorrosionError::MissingTableKey(_))
    ));
}

#[test]
fn high_velocity_multiplier_by_unit() {
    assert_close(high_velocity_threshold(UnitSystem::Fahrenheit), 100.0);
    assert_close(high_velocity_threshold(UnitSystem::Celsius), 30.48);

    let (factor, warning) = high_velocity_multiplier(99.0, UnitSystem::Fahrenheit).unwrap();
    assert_close(factor, 1.0);
    assert_eq!(warning, None);

    let (factor, warning) = high_velocity_multiplier(30.48, UnitSystem::Celsius).unwrap();
    assert_close(factor, 5.0);
    assert_eq!(warning, Some(RateWarning::HighVelocity));
}

#[test]
fn high_velocity_multiplier_rejects_negative_velocity() {
    assert!(matches!(
        high_velocity_multiplier(-1.0, UnitSystem::Fahrenheit),
        Err(CorrosionError::OutOfDomain(_))
    ));
    assert!(velocity_factor(-1.0, UnitSystem::Fahrenheit).is_err());
}

#[test]
fn presence_parses_common_spellings() {
    assert_eq!("Yes".parse::<Presence>().unwrap(), Presence::Yes);
    assert_eq!(" n ".parse::<Presence>().unwrap(), Presence::No);
    assert_eq!("true".parse::<Presence>().unwrap(), Presence::Yes);
    assert_eq!(Presence::No.table_key(), "No");
    assert!(matches!(
        "maybe".parse::<Presence>(),
        Err(CorrosionError::InvalidAdjustmentInput(_))
    ));
}
