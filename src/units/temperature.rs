use serde::{Deserialize, Serialize};

/// 온도 단위. 참조표는 °F/°C 두 가지만 쓰지만 입력은 K도 허용한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemperatureUnit {
    Kelvin,
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    /// 단위 기호 문자열을 해석한다.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "k" | "kelvin" => Some(TemperatureUnit::Kelvin),
            "c" | "°c" | "celsius" => Some(TemperatureUnit::Celsius),
            "f" | "°f" | "fahrenheit" => Some(TemperatureUnit::Fahrenheit),
            _ => None,
        }
    }
}

fn to_kelvin(value: f64, unit: TemperatureUnit) -> f64 {
    match unit {
        TemperatureUnit::Kelvin => value,
        TemperatureUnit::Celsius => value + 273.15,
        TemperatureUnit::Fahrenheit => (value + 459.67) * 5.0 / 9.0,
    }
}

fn from_kelvin(value_k: f64, unit: TemperatureUnit) -> f64 {
    match unit {
        TemperatureUnit::Kelvin => value_k,
        TemperatureUnit::Celsius => value_k - 273.15,
        TemperatureUnit::Fahrenheit => value_k * 9.0 / 5.0 - 459.67,
    }
}

/// 온도를 서로 다른 단위로 변환한다.
pub fn convert_temperature(value: f64, from: TemperatureUnit, to: TemperatureUnit) -> f64 {
    if from == to {
        return value;
    }
    from_kelvin(to_kelvin(value, from), to)
}
