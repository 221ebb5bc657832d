use std::fs;

use clap::Parser;
use corrosion_rate_toolbox::{
    adjustments::Presence,
    app::{self, AppError},
    config::Config,
    error::CorrosionError,
    tables::TableId,
    ui_cli::{Cli, Command, HclCommand},
    units::UnitSystem,
};

#[test]
fn parses_acid_sour_water_arguments() {
    let cli = Cli::try_parse_from([
        "corrosion_rate_toolbox",
        "--unit",
        "c",
        "acid-sour-water",
        "--ph",
        "5.2",
        "--chlorides",
        "no",
        "--velocity",
        "2",
    ])
    .expect("parse");
    assert_eq!(cli.unit, Some(UnitSystem::Celsius));
    match cli.command {
        Command::AcidSourWater(args) => {
            assert_eq!(args.free_water, Presence::Yes);
            assert_eq!(args.ph, 5.2);
            assert_eq!(args.temperature, None);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn hcl_alloy_needs_chloride_source() {
    assert!(Cli::try_parse_from(["x", "hcl", "alloy", "--alloy", "Alloy 825"]).is_err());
    let cli = Cli::try_parse_from(["x", "hcl", "alloy", "--alloy", "Alloy 825", "--ph", "1"])
        .expect("parse");
    assert!(matches!(
        cli.command,
        Command::Hcl(HclCommand::Alloy { ph: Some(_), wppm: None, .. })
    ));
}

#[test]
fn rejects_bad_presence_value() {
    let parsed = Cli::try_parse_from([
        "x",
        "sulfuric-acid",
        "--material",
        "304 ss",
        "--oxygen",
        "maybe",
        "--concentration",
        "98",
        "--velocity",
        "2",
    ]);
    assert!(parsed.is_err());
}

#[test]
fn oxidation_runs_against_table_dir() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir
        .path()
        .join(format!("{}.json", TableId::Table2B92.file_stem()));
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    fs::write(&path, r#"{"temperature_in_f": {"CS": {"1000": 2.0}}}"#).expect("write");

    let mut cfg = Config {
        table_dir: dir.path().to_path_buf(),
        operating_temperature: Some(1010.0),
        ..Config::default()
    };
    let cli = Cli::try_parse_from(["x", "--json", "oxidation", "--material", "carbon steel"])
        .expect("parse");
    app::run(cli, &mut cfg).expect("run");
}

#[test]
fn missing_temperature_is_reported() {
    let mut cfg = Config::default();
    let cli = Cli::try_parse_from(["x", "oxidation", "--material", "carbon steel"]).expect("parse");
    assert!(matches!(
        app::run(cli, &mut cfg),
        Err(AppError::MissingInput("temperature"))
    ));
}

#[test]
fn settings_are_saved_to_config_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    let mut cfg = Config::default();
    let cli = Cli::try_parse_from([
        "x",
        "--config",
        path.to_str().expect("utf-8 path"),
        "settings",
        "--measurement-unit",
        "celsius",
        "--operating-temperature",
        "120",
    ])
    .expect("parse");
    app::run(cli, &mut cfg).expect("run");
    assert_eq!(cfg.measurement_unit, UnitSystem::Celsius);
    let saved = fs::read_to_string(&path).expect("saved");
    assert!(saved.contains("celsius"));
}

#[test]
fn celsius_input_is_converted_for_fahrenheit_tables() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir
        .path()
        .join(format!("{}.json", TableId::Table2B92.file_stem()));
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    fs::write(&path, r#"{"temperature_in_f": {"CS": {"1000": 2.0}}}"#).expect("write");

    let mut cfg = Config {
        table_dir: dir.path().to_path_buf(),
        ..Config::default()
    };
    let cli = Cli::try_parse_from([
        "x",
        "--temperature-unit",
        "c",
        "oxidation",
        "--material",
        "carbon steel",
        "--temperature",
        "540",
    ])
    .expect("parse");
    app::run(cli, &mut cfg).expect("run");
}

#[test]
fn hcl_alloy_with_wppm_reads_only_record_table() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir
        .path()
        .join(format!("{}.json", TableId::Table2B25.file_stem()));
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    fs::write(
        &path,
        r#"{"temperature_in_f": [
            {"alloy": "Alloy 825", "cl_concentration": 0.5, "temperature": {"100": 1.0}},
            {"alloy": "Alloy 825", "cl_concentration": 1.0, "temperature": {"100": 3.0}}
        ]}"#,
    )
    .expect("write");

    let mut cfg = Config {
        table_dir: dir.path().to_path_buf(),
        ..Config::default()
    };
    let run = |args: &[&str], cfg: &mut Config| {
        let cli = Cli::try_parse_from(args).expect("parse");
        app::run(cli, cfg)
    };
    let alloy = ["x", "hcl", "alloy", "--alloy", "Alloy 825", "--temperature", "100"];

    let mut wppm = alloy.to_vec();
    wppm.extend(["--wppm", "5000"]);
    run(&wppm, &mut cfg).expect("run without 2.B.2.2");

    let mut ph = alloy.to_vec();
    ph.extend(["--ph", "1"]);
    assert!(matches!(
        run(&ph, &mut cfg),
        Err(AppError::Corrosion(CorrosionError::TableIo { .. }))
    ));
}

#[test]
fn lists_materials_without_tables() {
    let mut cfg = Config::default();
    let cli = Cli::try_parse_from(["x", "materials", "h2s-h2"]).expect("parse");
    app::run(cli, &mut cfg).expect("run");
    assert!(Cli::try_parse_from(["x", "materials", "steam"]).is_err());
}
