//! 산성 사워 워터(Table 2.B.10.2 / 2.B.10.3).

use tracing::{debug, info};

use super::rate_from;
use crate::adjustments::{oxygen_factor, velocity_factor, Presence};
use crate::error::{ensure_finite, CorrosionError, Result};
use crate::interpolation::{double_interpolate, Interpolated};
use crate::rate::CorrosionRate;
use crate::tables::{GridAdapter, ReferenceTable};
use crate::units::UnitSystem;

/// 표가 다루는 pH 범위: 4.5 이상 7 미만
pub const PH_RANGE: (f64, f64) = (4.5, 7.0);

/// 산성 사워 워터 계산 입력.
#[derive(Debug, Clone)]
pub struct AcidSourWaterInput {
    /// 자유수 존재 여부
    pub free_water: Presence,
    /// 염화물 존재 여부
    pub chlorides: Presence,
    /// 재질이 탄소강인지
    pub carbon_steel: bool,
    pub ph: f64,
    /// 운전 온도(°F 또는 °C)
    pub temperature: f64,
    /// 용존 산소(ppb)
    pub oxygen_ppb: f64,
    /// 유속(ft/s 또는 m/s)
    pub velocity: f64,
}

/// 탄소강이 아닌 재질에 쓰는 고정 부식 속도(2 mpy)
pub fn non_carbon_steel_rate(unit: UnitSystem) -> f64 {
    match unit {
        UnitSystem::Fahrenheit => 2.0,
        UnitSystem::Celsius => 0.05,
    }
}

/// 기본 부식 속도 CRph.
///
/// 온도 구간마다 pH로 보간한 뒤 그 값들을 온도로 보간한다.
pub fn base_rate(
    table: &ReferenceTable,
    unit: UnitSystem,
    ph: f64,
    temperature: f64,
) -> Result<Interpolated> {
    let slices = GridAdapter::new(table, unit)?.slices()?;
    double_interpolate(temperature, ph, &slices)
}

/// 산성 사워 워터 부식 속도를 계산한다.
///
/// 최종값 = CRph × Fo × Fv
pub fn compute_acid_sour_water(
    input: &AcidSourWaterInput,
    rate_table: &ReferenceTable,
    oxygen_table: &ReferenceTable,
    unit: UnitSystem,
) -> Result<CorrosionRate> {
    if !input.free_water.is_yes() {
        info!("자유수가 없어 부식 속도 0");
        return Ok(CorrosionRate::new(0.0, unit.rate_unit()));
    }
    let ph = ensure_finite("ph", input.ph)?;
    if ph >= PH_RANGE.1 || ph < PH_RANGE.0 {
        return Err(CorrosionError::OutOfDomain(format!(
            "pH {ph}: 산성 사워 워터 표는 {} ≤ pH < {} 만 다룹니다.",
            PH_RANGE.0, PH_RANGE.1
        )));
    }
    if input.chlorides.is_yes() {
        return Err(CorrosionError::OutOfDomain(
            "염화물이 있는 산성 사워 워터는 표가 다루지 않습니다.".into(),
        ));
    }
    if !input.carbon_steel {
        return Ok(CorrosionRate::new(
            non_carbon_steel_rate(unit),
            unit.rate_unit(),
        ));
    }

    let base = base_rate(rate_table, unit, ph, input.temperature)?;
    let fo = oxygen_factor(input.oxygen_ppb, oxygen_table)?;
    let fv = velocity_factor(input.velocity, unit)?;
    debug!(base = base.value, fo, fv, "산성 사워 워터 보정");
    Ok(rate_from(base, unit).scaled(fo * fv))
}
