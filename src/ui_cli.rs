use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::adjustments::Presence;
use crate::app::AppError;
use crate::environments::hf::HfMaterial;
use crate::environments::ht_h2s_h2::Hydrocarbon;
use crate::rate::CorrosionRate;
use crate::units::{TemperatureUnit, UnitSystem, VelocityUnit};

/// 명령행 인자.
#[derive(Parser, Debug)]
#[command(name = "corrosion_rate_toolbox")]
#[command(about = "API 581 참조표 기반 부식 속도 계산기", long_about = None)]
pub struct Cli {
    /// 설정 파일 경로
    #[arg(long, default_value = crate::config::CONFIG_PATH)]
    pub config: PathBuf,

    /// 이번 실행에만 쓸 단위계(f | c)
    #[arg(long, value_parser = parse_unit)]
    pub unit: Option<UnitSystem>,

    /// 입력 온도의 단위(k | c | f). 생략하면 단위계의 온도 단위로 본다.
    #[arg(long, value_parser = parse_temperature_unit)]
    pub temperature_unit: Option<TemperatureUnit>,

    /// 입력 유속의 단위(m/s | ft/s). 생략하면 단위계의 유속 단위로 본다.
    #[arg(long, value_parser = parse_velocity_unit)]
    pub velocity_unit: Option<VelocityUnit>,

    /// 결과를 JSON으로 출력
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// 산성 사워 워터(2.B.10.2/2.B.10.3)
    AcidSourWater(AcidSourWaterArgs),
    /// 염산(2.B.2.x)
    #[command(subcommand)]
    Hcl(HclCommand),
    /// 불산(2.B.6.2/2.B.6.3)
    Hf(HfArgs),
    /// 황산(2.B.5.x)
    SulfuricAcid(SulfuricAcidArgs),
    /// 고온 황화 + 나프텐산(2.B.3.x)
    Sulfidation(SulfidationArgs),
    /// 고온 H2S/H2(2.B.4.x)
    #[command(name = "h2s-h2")]
    H2sH2(H2sH2Args),
    /// 고온 산화(2.B.9.2)
    Oxidation(OxidationArgs),
    /// 두께 측정값으로 구한 부식 속도
    Measured(MeasuredArgs),
    /// 환경별 재질 목록
    Materials {
        #[arg(value_enum)]
        environment: MaterialList,
    },
    /// 표의 키 목록(선택지)
    Keys(KeysArgs),
    /// 표 4.1 설정 보기/변경
    Settings(SettingsArgs),
}

#[derive(Args, Debug)]
pub struct AcidSourWaterArgs {
    #[arg(long, default_value = "yes")]
    pub free_water: Presence,
    #[arg(long, default_value = "no")]
    pub chlorides: Presence,
    /// 재질이 탄소강인지
    #[arg(long, default_value = "yes")]
    pub carbon_steel: Presence,
    #[arg(long)]
    pub ph: f64,
    #[arg(long)]
    pub temperature: Option<f64>,
    /// 용존 산소(ppb)
    #[arg(long, default_value_t = 0.0)]
    pub oxygen: f64,
    #[arg(long, default_value_t = 0.0)]
    pub velocity: f64,
}

#[derive(Subcommand, Debug)]
pub enum HclCommand {
    /// 탄소강/300 계열, pH를 아는 경우(2.B.2.3)
    CarbonSteel {
        #[arg(long)]
        ph: f64,
        #[arg(long)]
        temperature: Option<f64>,
    },
    /// 그 밖의 합금(2.B.2.5, 산소 지정 시 2.B.2.6)
    Alloy {
        #[arg(long)]
        alloy: String,
        /// 측정한 염화물 농도(wppm)
        #[arg(long, conflicts_with = "ph", required_unless_present = "ph")]
        wppm: Option<f64>,
        /// 산성수 pH(2.B.2.2로 염화물 추정)
        #[arg(long)]
        ph: Option<f64>,
        #[arg(long)]
        temperature: Option<f64>,
        #[arg(long)]
        oxygen: Option<Presence>,
    },
}

#[derive(Args, Debug)]
pub struct HfArgs {
    /// carbon_steel | alloy_400
    #[arg(long)]
    pub material: HfMaterial,
    /// 표의 온도 키(예: "<=80")
    #[arg(long)]
    pub temperature_key: String,
    /// 탄소강: 농도 범위 키, Alloy 400: 농도(%)
    #[arg(long)]
    pub hf: String,
    #[arg(long)]
    pub velocity: Option<String>,
    #[arg(long)]
    pub aerated: Option<Presence>,
}

#[derive(Args, Debug)]
pub struct SulfuricAcidArgs {
    #[arg(long)]
    pub material: String,
    #[arg(long, default_value = "no")]
    pub oxygen: Presence,
    /// 산 농도(wt%)
    #[arg(long)]
    pub concentration: f64,
    #[arg(long)]
    pub temperature: Option<f64>,
    #[arg(long)]
    pub velocity: f64,
    /// Alloy B-2 + 산소일 때 전문가가 정한 부식 속도
    #[arg(long)]
    pub specialist_rate: Option<f64>,
}

#[derive(Args, Debug)]
pub struct SulfidationArgs {
    #[arg(long)]
    pub material: String,
    #[arg(long)]
    pub temperature: Option<f64>,
    /// 황 함량(wt%)
    #[arg(long)]
    pub sulfur: f64,
    /// 전산가(mg KOH/g)
    #[arg(long)]
    pub tan: f64,
    #[arg(long, default_value_t = 0.0)]
    pub velocity: f64,
}

#[derive(Args, Debug)]
pub struct H2sH2Args {
    #[arg(long)]
    pub material: String,
    #[arg(long)]
    pub temperature: Option<f64>,
    /// H2S 농도(mol%)
    #[arg(long)]
    pub h2s: f64,
    /// naphtha | gas oil
    #[arg(long)]
    pub hydrocarbon: Option<Hydrocarbon>,
}

#[derive(Args, Debug)]
pub struct OxidationArgs {
    #[arg(long)]
    pub material: String,
    #[arg(long)]
    pub temperature: Option<f64>,
}

#[derive(Args, Debug)]
pub struct MeasuredArgs {
    #[arg(long)]
    pub previous_date: NaiveDate,
    #[arg(long)]
    pub previous_thickness: f64,
    #[arg(long)]
    pub current_date: NaiveDate,
    #[arg(long)]
    pub current_thickness: f64,
}

/// 재질 목록을 가진 환경
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaterialList {
    SulfuricAcid,
    Sulfidation,
    #[value(name = "h2s-h2")]
    H2sH2,
    Oxidation,
}

#[derive(Args, Debug)]
pub struct KeysArgs {
    /// 표 번호(예: 2.B.6.2)
    pub table: String,
    /// 내려갈 키 경로
    pub path: Vec<String>,
}

#[derive(Args, Debug)]
pub struct SettingsArgs {
    /// 단위계(f | c)
    #[arg(long, value_parser = parse_unit)]
    pub measurement_unit: Option<UnitSystem>,
    #[arg(long)]
    pub operating_temperature: Option<f64>,
    #[arg(long)]
    pub table_dir: Option<PathBuf>,
}

fn parse_unit(s: &str) -> Result<UnitSystem, String> {
    UnitSystem::parse(s).ok_or_else(|| format!("알 수 없는 단위계: {s}"))
}

fn parse_temperature_unit(s: &str) -> Result<TemperatureUnit, String> {
    TemperatureUnit::parse(s).ok_or_else(|| format!("알 수 없는 온도 단위: {s}"))
}

fn parse_velocity_unit(s: &str) -> Result<VelocityUnit, String> {
    VelocityUnit::parse(s).ok_or_else(|| format!("알 수 없는 유속 단위: {s}"))
}

/// 계산 결과를 출력한다.
pub fn print_rate(rate: &CorrosionRate, json: bool) -> Result<(), AppError> {
    if json {
        println!("{}", serde_json::to_string_pretty(rate)?);
        return Ok(());
    }
    println!("부식 속도: {rate}");
    for w in &rate.warnings {
        println!("주의: {w}");
    }
    Ok(())
}

/// 키 목록을 출력한다.
pub fn print_keys<S>(keys: &[S], json: bool) -> Result<(), AppError>
where
    S: AsRef<str> + serde::Serialize,
{
    if json {
        println!("{}", serde_json::to_string_pretty(keys)?);
    } else {
        for k in keys {
            println!("{}", k.as_ref());
        }
    }
    Ok(())
}
