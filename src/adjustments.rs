//! 기본 부식 속도에 곱하는 보정 계수 규칙.

use std::str::FromStr;

use tracing::debug;

use crate::error::{ensure_finite, CorrosionError, Result};
use crate::rate::RateWarning;
use crate::tables::keys::{as_rate, child};
use crate::tables::ReferenceTable;
use crate::units::UnitSystem;

/// 산소 보정이 커지는 용존 산소 기준(ppb)
pub const OXYGEN_THRESHOLD_PPB: f64 = 50.0;
/// 고유속 배수
pub const HIGH_VELOCITY_MULTIPLIER: f64 = 5.0;

/// 단위계별 유속 보정 곡선 상수.
#[derive(Debug, Clone, Copy, PartialEq)]
struct VelocityCurve {
    low: f64,
    high: f64,
    slope: f64,
    intercept: f64,
    ceiling: f64,
}

const VELOCITY_CURVE_F: VelocityCurve = VelocityCurve {
    low: 6.0,
    high: 20.0,
    slope: 0.25,
    intercept: -0.5,
    ceiling: 5.0,
};

// °C 곡선은 ft/s 곡선의 단위 환산이 아니라 별도 상수다.
const VELOCITY_CURVE_C: VelocityCurve = VelocityCurve {
    low: 1.83,
    high: 6.10,
    slope: 0.82,
    intercept: -0.5,
    ceiling: 5.0,
};

/// 유속 보정 계수 Fv.
///
/// 하한 미만은 1.0, 상한 이하 구간은 직선, 그 위는 5.0이다.
/// 유속은 °F 단위계에서 ft/s, °C 단위계에서 m/s이다.
pub fn velocity_factor(velocity: f64, unit: UnitSystem) -> Result<f64> {
    let v = checked_velocity(velocity)?;
    let c = match unit {
        UnitSystem::Fahrenheit => VELOCITY_CURVE_F,
        UnitSystem::Celsius => VELOCITY_CURVE_C,
    };
    let fv = if v < c.low {
        1.0
    } else if v <= c.high {
        c.slope * v + c.intercept
    } else {
        c.ceiling
    };
    debug!(velocity = v, fv, "유속 보정 계수");
    Ok(fv)
}

fn checked_velocity(velocity: f64) -> Result<f64> {
    let v = ensure_finite("velocity", velocity)?;
    if v < 0.0 {
        return Err(CorrosionError::OutOfDomain(format!(
            "유속은 음수일 수 없습니다: {v}"
        )));
    }
    Ok(v)
}

/// 산소 보정 계수 Fo. 표의 `adjustment_factor` 두 값 중 하나를 고른다.
///
/// 50 ppb 미만이면 첫 값, 이상이면 두 번째 값이다.
pub fn oxygen_factor(oxygen_ppb: f64, table: &ReferenceTable) -> Result<f64> {
    let ppb = ensure_finite("oxygen_ppb", oxygen_ppb)?;
    if ppb < 0.0 {
        return Err(CorrosionError::OutOfDomain(format!(
            "산소 농도는 음수일 수 없습니다: {ppb}"
        )));
    }
    let factors = child(table.root(), "adjustment_factor", table.name())?
        .as_array()
        .ok_or_else(|| {
            CorrosionError::MissingTableKey(format!("{} → adjustment_factor", table.name()))
        })?;
    let index = usize::from(ppb >= OXYGEN_THRESHOLD_PPB);
    let node = factors.get(index).ok_or_else(|| {
        CorrosionError::MissingTableKey(format!("{} → adjustment_factor[{index}]", table.name()))
    })?;
    let fo = as_rate(node, table.name())?;
    debug!(oxygen_ppb = ppb, fo, "산소 보정 계수");
    Ok(fo)
}

/// 고유속 기준(°F: 100 ft/s, °C: 30.48 m/s)
pub fn high_velocity_threshold(unit: UnitSystem) -> f64 {
    match unit {
        UnitSystem::Fahrenheit => 100.0,
        UnitSystem::Celsius => 30.48,
    }
}

/// 기준 이상 유속이면 ×5와 경고를 돌려준다.
pub fn high_velocity_multiplier(
    velocity: f64,
    unit: UnitSystem,
) -> Result<(f64, Option<RateWarning>)> {
    let v = checked_velocity(velocity)?;
    if v >= high_velocity_threshold(unit) {
        debug!(velocity = v, "고유속 배수 적용");
        Ok((HIGH_VELOCITY_MULTIPLIER, Some(RateWarning::HighVelocity)))
    } else {
        Ok((1.0, None))
    }
}

/// 예/아니오로 답하는 범주 입력(산소 유무, 폭기 여부, 자유수 유무 등).
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Presence {
    Yes,
    No,
}

impl Presence {
    pub fn is_yes(self) -> bool {
        self == Presence::Yes
    }

    /// 표 키 형식(`"Yes"` / `"No"`)
    pub fn table_key(self) -> &'static str {
        match self {
            Presence::Yes => "Yes",
            Presence::No => "No",
        }
    }
}

impl FromStr for Presence {
    type Err = CorrosionError;

    /// 알 수 없는 값은 기본값으로 바꾸지 않고 오류로 돌려준다.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yes" | "y" | "true" => Ok(Presence::Yes),
            "no" | "n" | "false" => Ok(Presence::No),
            other => Err(CorrosionError::InvalidAdjustmentInput(format!(
                "예/아니오 값이 아닙니다: '{other}'"
            ))),
        }
    }
}
