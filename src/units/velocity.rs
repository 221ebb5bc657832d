use serde::{Deserialize, Serialize};

/// 유속 단위. 내부 기준은 m/s이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VelocityUnit {
    MeterPerSecond,
    FootPerSecond,
}

impl VelocityUnit {
    pub fn label(self) -> &'static str {
        match self {
            VelocityUnit::MeterPerSecond => "m/s",
            VelocityUnit::FootPerSecond => "ft/s",
        }
    }

    /// `"m/s"`, `"ft/s"` 등을 해석한다.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "m/s" | "mps" => Some(VelocityUnit::MeterPerSecond),
            "ft/s" | "fps" => Some(VelocityUnit::FootPerSecond),
            _ => None,
        }
    }
}

fn to_mps(value: f64, unit: VelocityUnit) -> f64 {
    match unit {
        VelocityUnit::MeterPerSecond => value,
        VelocityUnit::FootPerSecond => value * 0.3048,
    }
}

fn from_mps(value: f64, unit: VelocityUnit) -> f64 {
    match unit {
        VelocityUnit::MeterPerSecond => value,
        VelocityUnit::FootPerSecond => value / 0.3048,
    }
}

/// 유속을 변환한다.
pub fn convert_velocity(value: f64, from: VelocityUnit, to: VelocityUnit) -> f64 {
    from_mps(to_mps(value, from), to)
}
