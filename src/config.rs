use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::units::UnitSystem;

/// 기본 설정 파일 경로
pub const CONFIG_PATH: &str = "config.toml";

/// 표 4.1 설정. 계산 코어에는 단위계와 온도만 값으로 넘긴다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// 단위계. 예전 파일의 `"farenheit"` 표기도 읽는다.
    pub measurement_unit: UnitSystem,
    /// 운전 온도(단위계 기준). 명령에서 온도를 생략하면 이 값을 쓴다.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operating_temperature: Option<f64>,
    /// 참조표(JSON) 디렉터리
    pub table_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            measurement_unit: UnitSystem::Fahrenheit,
            operating_temperature: None,
            table_dir: PathBuf::from("data/json"),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum ConfigError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// TOML 역직렬화 오류
    Serde(toml::de::Error),
    /// TOML 직렬화 오류
    Serialize(toml::ser::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "파일 입출력 오류: {e}"),
            ConfigError::Serde(e) => write!(f, "설정 파싱 오류: {e}"),
            ConfigError::Serialize(e) => write!(f, "설정 직렬화 오류: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Serde(e) => Some(e),
            ConfigError::Serialize(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        ConfigError::Io(value)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        ConfigError::Serde(value)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(value: toml::ser::Error) -> Self {
        ConfigError::Serialize(value)
    }
}

/// 설정 파일을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default_at(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        Ok(cfg)
    } else {
        let cfg = Config::default();
        cfg.save_to(path)?;
        Ok(cfg)
    }
}

impl Config {
    /// 설정을 지정한 경로에 저장한다.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// 명령 인자로 받은 온도가 없으면 설정의 운전 온도를 쓴다.
    pub fn temperature_or(&self, explicit: Option<f64>) -> Option<f64> {
        explicit.or(self.operating_temperature)
    }
}
