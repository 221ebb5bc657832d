//! 두 번의 두께 측정으로 구한 실측 부식 속도.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ensure_finite, CorrosionError, Result};
use crate::rate::CorrosionRate;
use crate::units::{convert_length, LengthUnit, UnitSystem};

/// 율리우스 년(일)
pub const DAYS_PER_YEAR: f64 = 365.25;

/// 한 번의 두께 측정.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThicknessReading {
    pub date: NaiveDate,
    /// 두께(°F 단위계: in, °C 단위계: mm)
    pub thickness: f64,
}

/// (이전 두께 - 현재 두께) / 경과 년수.
///
/// 두께가 늘었으면 0을 돌려준다. 이전 측정일이 현재보다 늦거나 같으면 오류다.
pub fn compute_measured_rate(
    previous: ThicknessReading,
    current: ThicknessReading,
    unit: UnitSystem,
) -> Result<CorrosionRate> {
    let prev_t = ensure_finite("previous_thickness", previous.thickness)?;
    let cur_t = ensure_finite("current_thickness", current.thickness)?;
    if prev_t < 0.0 || cur_t < 0.0 {
        return Err(CorrosionError::OutOfDomain(
            "두께는 음수일 수 없습니다.".into(),
        ));
    }

    let days = (current.date - previous.date).num_days();
    if days <= 0 {
        return Err(CorrosionError::OutOfDomain(format!(
            "이전 측정일({})이 현재 측정일({})보다 앞서야 합니다.",
            previous.date, current.date
        )));
    }
    let years = days as f64 / DAYS_PER_YEAR;
    let loss = (prev_t - cur_t).max(0.0);

    // in/년 → mpy, mm/년은 그대로
    let rate_length = match unit {
        UnitSystem::Fahrenheit => LengthUnit::Mil,
        UnitSystem::Celsius => LengthUnit::Millimeter,
    };
    let per_year = convert_length(loss / years, unit.thickness_unit(), rate_length);
    debug!(days, loss, rate = per_year, "실측 부식 속도");
    Ok(CorrosionRate::new(per_year, unit.rate_unit()))
}
