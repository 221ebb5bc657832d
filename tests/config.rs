use std::fs;
use std::path::PathBuf;

use corrosion_rate_toolbox::{
    config::{load_or_default_at, Config},
    units::UnitSystem,
};

#[test]
fn missing_file_creates_default() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");

    let cfg = load_or_default_at(&path).expect("load default");
    assert_eq!(cfg, Config::default());
    assert!(path.exists());
}

#[test]
fn settings_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    let cfg = Config {
        measurement_unit: UnitSystem::Celsius,
        operating_temperature: Some(93.0),
        table_dir: PathBuf::from("/srv/api581"),
    };
    cfg.save_to(&path).expect("save");

    let loaded = load_or_default_at(&path).expect("reload");
    assert_eq!(loaded, cfg);
    assert_eq!(loaded.temperature_or(None), Some(93.0));
    assert_eq!(loaded.temperature_or(Some(40.0)), Some(40.0));
}

#[test]
fn legacy_unit_spelling_is_accepted() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        "measurement_unit = \"farenheit\"\ntable_dir = \"data/json\"\n",
    )
    .expect("write");

    let cfg = load_or_default_at(&path).expect("load");
    assert_eq!(cfg.measurement_unit, UnitSystem::Fahrenheit);
    assert_eq!(cfg.operating_temperature, None);
}

#[test]
fn broken_file_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    fs::write(&path, "measurement_unit = [").expect("write");
    assert!(load_or_default_at(&path).is_err());
}
