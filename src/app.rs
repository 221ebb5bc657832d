use tracing::{debug, info};

use crate::config::Config;
use crate::environments::acid_sour_water::{compute_acid_sour_water, AcidSourWaterInput};
use crate::environments::hcl::{
    alloy_table, compute_hcl_alloy, compute_hcl_carbon_steel, needs_chloride_table, ChlorideSource,
    HclAlloyInput,
};
use crate::environments::hf::{compute_hf, HfInput};
use crate::environments::ht_h2s_h2::{self, compute_ht_h2s_h2, H2sH2Input};
use crate::environments::ht_oxidation::{self, compute_ht_oxidation};
use crate::environments::ht_sulfidation::{self, compute_ht_sulfidation, SulfidationInput};
use crate::environments::measured::{compute_measured_rate, ThicknessReading};
use crate::environments::sulfuric_acid::{self, compute_sulfuric_acid, SulfuricAcidInput};
use crate::error::CorrosionError;
use crate::rate::CorrosionRate;
use crate::tables::{TableId, TableStore};
use crate::ui_cli::{self, Cli, Command, HclCommand, MaterialList, SettingsArgs};
use crate::units::{
    convert_temperature, convert_velocity, TemperatureUnit, UnitSystem, VelocityUnit,
};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum AppError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// 설정 저장/로드 오류
    Config(crate::config::ConfigError),
    /// 부식 속도 계산 오류
    Corrosion(CorrosionError),
    /// 결과 JSON 직렬화 오류
    Json(serde_json::Error),
    /// 명령 인자에도 설정에도 없는 입력
    MissingInput(&'static str),
    /// 알 수 없는 표 번호
    UnknownTable(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(e) => write!(f, "입출력 오류: {e}"),
            AppError::Config(e) => write!(f, "설정 오류: {e}"),
            AppError::Corrosion(e) => write!(f, "부식 속도 계산 오류: {e}"),
            AppError::Json(e) => write!(f, "결과 출력 오류: {e}"),
            AppError::MissingInput(name) => {
                write!(f, "입력이 필요합니다: {name} (인자 또는 설정의 운전 온도)")
            }
            AppError::UnknownTable(label) => write!(f, "알 수 없는 표 번호: {label}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Io(e) => Some(e),
            AppError::Config(e) => Some(e),
            AppError::Corrosion(e) => Some(e),
            AppError::Json(e) => Some(e),
            AppError::MissingInput(_) | AppError::UnknownTable(_) => None,
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        AppError::Io(value)
    }
}

impl From<crate::config::ConfigError> for AppError {
    fn from(value: crate::config::ConfigError) -> Self {
        AppError::Config(value)
    }
}

impl From<CorrosionError> for AppError {
    fn from(value: CorrosionError) -> Self {
        AppError::Corrosion(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        AppError::Json(value)
    }
}

/// 명령 인자로 받은 값을 단위계 기준으로 맞춘다.
struct Inputs<'a> {
    config: &'a Config,
    unit: UnitSystem,
    temperature_unit: Option<TemperatureUnit>,
    velocity_unit: Option<VelocityUnit>,
}

impl Inputs<'_> {
    /// 인자로 받은 온도는 단위계로 환산하고, 없으면 설정의 운전 온도를 그대로 쓴다.
    fn temperature(&self, explicit: Option<f64>) -> Result<f64, AppError> {
        let to = self.unit.temperature_unit();
        match (explicit, self.temperature_unit) {
            (Some(t), Some(from)) if from != to => {
                let converted = convert_temperature(t, from, to);
                debug!(input = t, ?from, converted, "입력 온도 환산");
                Ok(converted)
            }
            _ => self
                .config
                .temperature_or(explicit)
                .ok_or(AppError::MissingInput("temperature")),
        }
    }

    fn velocity(&self, v: f64) -> f64 {
        let to = self.unit.velocity_unit();
        match self.velocity_unit {
            Some(from) if from != to => {
                let converted = convert_velocity(v, from, to);
                debug!(input = v, from = from.label(), converted, "입력 유속 환산");
                converted
            }
            _ => v,
        }
    }
}

/// 명령 하나를 실행한다. 표는 필요한 것만 설정의 디렉터리에서 읽는다.
pub fn run(cli: Cli, config: &mut Config) -> Result<(), AppError> {
    let unit = cli.unit.unwrap_or(config.measurement_unit);
    let json = cli.json;
    let mut store = TableStore::new(config.table_dir.clone());

    let inputs = Inputs {
        config,
        unit,
        temperature_unit: cli.temperature_unit,
        velocity_unit: cli.velocity_unit,
    };

    let rate = match cli.command {
        Command::Settings(args) => return apply_settings(args, config, &cli.config, json),
        Command::AcidSourWater(args) => {
            let input = AcidSourWaterInput {
                free_water: args.free_water,
                chlorides: args.chlorides,
                carbon_steel: args.carbon_steel.is_yes(),
                ph: args.ph,
                temperature: inputs.temperature(args.temperature)?,
                oxygen_ppb: args.oxygen,
                velocity: inputs.velocity(args.velocity),
            };
            let rate_table = store.load(TableId::Table2B102)?;
            let oxygen_table = store.load(TableId::Table2B103)?;
            compute_acid_sour_water(&input, &rate_table, &oxygen_table, unit)?
        }
        Command::Hcl(HclCommand::CarbonSteel { ph, temperature: t }) => {
            let table = store.load(TableId::Table2B23)?;
            compute_hcl_carbon_steel(ph, inputs.temperature(t)?, &table, unit)?
        }
        Command::Hcl(HclCommand::Alloy {
            alloy,
            wppm,
            ph,
            temperature: t,
            oxygen,
        }) => {
            let chloride = match (wppm, ph) {
                (Some(v), _) => ChlorideSource::Wppm(v),
                (None, Some(ph)) => ChlorideSource::Ph(ph),
                (None, None) => return Err(AppError::MissingInput("wppm 또는 ph")),
            };
            let input = HclAlloyInput {
                alloy,
                chloride,
                temperature: inputs.temperature(t)?,
                oxygen,
            };
            let chloride_table = if needs_chloride_table(&input) {
                Some(store.load(TableId::Table2B22)?)
            } else {
                None
            };
            let record_table = store.load(alloy_table(oxygen))?;
            compute_hcl_alloy(&input, chloride_table.as_deref(), &record_table, unit)?
        }
        Command::Hf(args) => {
            let input = HfInput {
                temperature_key: args.temperature_key,
                hf_concentration: args.hf,
                velocity: args.velocity,
                aerated: args.aerated,
            };
            let table = store.load(args.material.table())?;
            compute_hf(args.material, &input, &table, unit)?
        }
        Command::SulfuricAcid(args) => {
            let input = SulfuricAcidInput {
                temperature: inputs.temperature(args.temperature)?,
                material: args.material,
                oxygen: args.oxygen,
                acid_concentration: args.concentration,
                velocity: inputs.velocity(args.velocity),
                specialist_rate: args.specialist_rate,
            };
            let table = store.load(sulfuric_acid::table_for_material(&input.material, unit)?)?;
            compute_sulfuric_acid(&input, &table, unit)?
        }
        Command::Sulfidation(args) => {
            let input = SulfidationInput {
                temperature: inputs.temperature(args.temperature)?,
                sulfur: args.sulfur,
                tan: args.tan,
                velocity: inputs.velocity(args.velocity),
            };
            let table = store.load(ht_sulfidation::table_for_material(&args.material)?)?;
            compute_ht_sulfidation(&input, &table, unit)?
        }
        Command::H2sH2(args) => {
            let input = H2sH2Input {
                temperature: inputs.temperature(args.temperature)?,
                h2s_mole_percent: args.h2s,
                hydrocarbon: args.hydrocarbon,
            };
            let table = store.load(ht_h2s_h2::table_for_material(&args.material)?)?;
            compute_ht_h2s_h2(&input, &table, unit)?
        }
        Command::Oxidation(args) => {
            let t = inputs.temperature(args.temperature)?;
            let table = store.load(TableId::Table2B92)?;
            compute_ht_oxidation(&args.material, t, &table, unit)?
        }
        Command::Measured(args) => compute_measured_rate(
            ThicknessReading {
                date: args.previous_date,
                thickness: args.previous_thickness,
            },
            ThicknessReading {
                date: args.current_date,
                thickness: args.current_thickness,
            },
            unit,
        )?,
        Command::Materials { environment } => {
            let names = match environment {
                MaterialList::SulfuricAcid => sulfuric_acid::materials(),
                MaterialList::Sulfidation => ht_sulfidation::materials(),
                MaterialList::H2sH2 => ht_h2s_h2::materials(),
                MaterialList::Oxidation => ht_oxidation::materials(),
            };
            return ui_cli::print_keys(&names, json);
        }
        Command::Keys(args) => {
            let id = TableId::ALL
                .into_iter()
                .find(|id| id.label() == args.table.trim())
                .ok_or_else(|| AppError::UnknownTable(args.table.clone()))?;
            let table = store.load(id)?;
            let path: Vec<&str> = args.path.iter().map(String::as_str).collect();
            return ui_cli::print_keys(&table.available_keys(&path)?, json);
        }
    };

    report(&rate, unit, json)
}

fn report(rate: &CorrosionRate, unit: UnitSystem, json: bool) -> Result<(), AppError> {
    info!(value = rate.value, ?unit, warnings = rate.warnings.len(), "계산 완료");
    ui_cli::print_rate(rate, json)
}

fn apply_settings(
    args: SettingsArgs,
    config: &mut Config,
    path: &std::path::Path,
    json: bool,
) -> Result<(), AppError> {
    let changed = args.measurement_unit.is_some()
        || args.operating_temperature.is_some()
        || args.table_dir.is_some();
    if let Some(unit) = args.measurement_unit {
        config.measurement_unit = unit;
    }
    if let Some(t) = args.operating_temperature {
        config.operating_temperature = Some(t);
    }
    if let Some(dir) = args.table_dir {
        config.table_dir = dir;
    }
    if changed {
        config.save_to(path)?;
        info!(path = %path.display(), "설정 저장");
    }

    if json {
        println!("{}", serde_json::to_string_pretty(config)?);
    } else {
        println!("단위계: {:?}", config.measurement_unit);
        match config.operating_temperature {
            Some(t) => println!("운전 온도: {t}"),
            None => println!("운전 온도: (없음)"),
        }
        println!("표 디렉터리: {}", config.table_dir.display());
    }
    Ok(())
}
