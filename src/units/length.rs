use serde::{Deserialize, Serialize};

/// 두께 측정에 쓰는 길이 단위. 내부 기준은 밀리미터이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LengthUnit {
    Millimeter,
    Inch,
    /// 0.001 in
    Mil,
}

fn to_mm(value: f64, unit: LengthUnit) -> f64 {
    match unit {
        LengthUnit::Millimeter => value,
        LengthUnit::Inch => value * 25.4,
        LengthUnit::Mil => value * 0.0254,
    }
}

fn from_mm(value_mm: f64, unit: LengthUnit) -> f64 {
    match unit {
        LengthUnit::Millimeter => value_mm,
        LengthUnit::Inch => value_mm / 25.4,
        LengthUnit::Mil => value_mm / 0.0254,
    }
}

/// 길이를 다른 단위로 변환한다.
pub fn convert_length(value: f64, from: LengthUnit, to: LengthUnit) -> f64 {
    if from == to {
        return value;
    }
    from_mm(to_mm(value, from), to)
}
