use serde::{Deserialize, Serialize};

use super::{LengthUnit, TemperatureUnit, VelocityUnit};

/// 표 4.1에서 정해지는 단위계. 모든 참조표는 단위계별 하위 트리를 따로 가진다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    /// 영국식(°F, ft/s, in, mpy)
    #[serde(alias = "farenheit")]
    Fahrenheit,
    /// 미터식(°C, m/s, mm, mm/y)
    Celsius,
}

impl UnitSystem {
    /// 이 단위계에서 쓰는 온도 단위
    pub fn temperature_unit(self) -> TemperatureUnit {
        match self {
            UnitSystem::Fahrenheit => TemperatureUnit::Fahrenheit,
            UnitSystem::Celsius => TemperatureUnit::Celsius,
        }
    }

    /// 이 단위계에서 쓰는 유속 단위
    pub fn velocity_unit(self) -> VelocityUnit {
        match self {
            UnitSystem::Fahrenheit => VelocityUnit::FootPerSecond,
            UnitSystem::Celsius => VelocityUnit::MeterPerSecond,
        }
    }

    /// 두께 측정값 단위
    pub fn thickness_unit(self) -> LengthUnit {
        match self {
            UnitSystem::Fahrenheit => LengthUnit::Inch,
            UnitSystem::Celsius => LengthUnit::Millimeter,
        }
    }

    /// 결과 부식 속도 단위
    pub fn rate_unit(self) -> RateUnit {
        match self {
            UnitSystem::Fahrenheit => RateUnit::MilsPerYear,
            UnitSystem::Celsius => RateUnit::MillimetersPerYear,
        }
    }

    /// 문자열(`"farenheit"`, `"F"`, `"celsius"` 등)을 해석한다.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "f" | "fahrenheit" | "farenheit" | "imperial" => Some(UnitSystem::Fahrenheit),
            "c" | "celsius" | "metric" | "si" => Some(UnitSystem::Celsius),
            _ => None,
        }
    }
}

/// 부식 속도 단위.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RateUnit {
    /// mils per year (1 mil = 0.001 in)
    #[serde(rename = "mpy")]
    MilsPerYear,
    #[serde(rename = "mm/y")]
    MillimetersPerYear,
}

impl RateUnit {
    /// 화면 표시용 라벨
    pub fn label(self) -> &'static str {
        match self {
            RateUnit::MilsPerYear => "mpy",
            RateUnit::MillimetersPerYear => "mm/y",
        }
    }
}

impl std::fmt::Display for RateUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
