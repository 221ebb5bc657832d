//! 고온 황화 + 나프텐산 부식(Table 2.B.3.2 ~ 2.B.3.10).

use tracing::debug;

use crate::adjustments::high_velocity_multiplier;
use crate::error::{ensure_finite, Result};
use crate::rate::{Axis, CorrosionRate, RateWarning};
use crate::tables::keys::{as_object, parse_number};
use crate::tables::{
    route_material, temperature_bucket_key, GridAdapter, MaterialRoute, ReferenceTable, TableId,
};
use crate::units::UnitSystem;

const TEMPERATURES_F: [f64; 7] = [450.0, 500.0, 550.0, 600.0, 650.0, 700.0, 750.0];
const TEMPERATURES_C: [f64; 7] = [232.0, 260.0, 288.0, 316.0, 343.0, 371.0, 399.0];

const MATERIAL_ROUTES: [MaterialRoute<TableId>; 14] = [
    MaterialRoute::new("carbon steel", TableId::Table2B32),
    MaterialRoute::new("1Cr-0.2 Mo", TableId::Table2B33),
    MaterialRoute::new("1Cr-0.5 Mo", TableId::Table2B33),
    MaterialRoute::new("1.25Cr-0.5Mo", TableId::Table2B33),
    MaterialRoute::new("2.25Cr-1Mo", TableId::Table2B33),
    MaterialRoute::new("3Cr-1Mo", TableId::Table2B33),
    MaterialRoute::new("5Cr-0.5Mo", TableId::Table2B34),
    MaterialRoute::new("7Cr-1Mo", TableId::Table2B35),
    MaterialRoute::new("9Cr-1Mo", TableId::Table2B36),
    MaterialRoute::new("12 % Cr Steel", TableId::Table2B37),
    MaterialRoute::new("Austenitic SS Without Mo", TableId::Table2B38),
    MaterialRoute::new("316 SS with < 2.5 % Mo", TableId::Table2B39),
    MaterialRoute::new("316 SS with >= 2.5 % Mo", TableId::Table2B310),
    MaterialRoute::new("317 SS", TableId::Table2B310),
];

/// 온도 구간값
pub fn temperature_breakpoints(unit: UnitSystem) -> &'static [f64] {
    match unit {
        UnitSystem::Fahrenheit => &TEMPERATURES_F,
        UnitSystem::Celsius => &TEMPERATURES_C,
    }
}

pub fn table_for_material(material: &str) -> Result<TableId> {
    route_material(&MATERIAL_ROUTES, material)
}

pub fn materials() -> Vec<&'static str> {
    crate::tables::catalog::material_names(&MATERIAL_ROUTES)
}

/// 고온 황화/나프텐산 입력.
#[derive(Debug, Clone)]
pub struct SulfidationInput {
    /// 최고 공정 온도(°F 또는 °C)
    pub temperature: f64,
    /// 황 함량(wt%), 표 값과 같아야 한다
    pub sulfur: f64,
    /// 전산가(TAN, mg KOH/g), 표 값과 같아야 한다
    pub tan: f64,
    /// 유속(ft/s 또는 m/s)
    pub velocity: f64,
}

/// 표에 있는 TAN 값 목록(오름차순, 중복 제거)
pub fn tan_options(table: &ReferenceTable, unit: UnitSystem) -> Result<Vec<f64>> {
    let by_sulfur = table.unit_tree(unit)?;
    let mut values = Vec::new();
    for tan_level in as_object(by_sulfur, table.name())?.values() {
        values.extend(as_object(tan_level, table.name())?.keys().filter_map(|k| parse_number(k)));
    }
    values.sort_by(f64::total_cmp);
    values.dedup();
    Ok(values)
}

/// 황 → TAN → 온도 구간 순으로 조회하고 고유속이면 ×5 한다.
pub fn compute_ht_sulfidation(
    input: &SulfidationInput,
    table: &ReferenceTable,
    unit: UnitSystem,
) -> Result<CorrosionRate> {
    let temperature = ensure_finite("temperature", input.temperature)?;
    let (key, range_warning) = temperature_bucket_key_for(unit, temperature)?;

    let base = GridAdapter::new(table, unit)?
        .descend_numeric(ensure_finite("sulfur", input.sulfur)?)?
        .descend_numeric(ensure_finite("tan", input.tan)?)?
        .descend(&key)?
        .value()?;

    let (factor, velocity_warning) = high_velocity_multiplier(input.velocity, unit)?;
    debug!(key = %key, base, factor, "고온 황화/나프텐산 조회");

    Ok(CorrosionRate::new(base, unit.rate_unit())
        .scaled(factor)
        .with_warnings(range_warning.into_iter().chain(velocity_warning)))
}

/// 온도 구간 키와, 표 범위를 벗어났을 때의 경고
fn temperature_bucket_key_for(
    unit: UnitSystem,
    temperature: f64,
) -> Result<(String, Option<RateWarning>)> {
    let temps = temperature_breakpoints(unit);
    let bucket = temperature_bucket_key(temps, temperature)?;
    let warning = if temperature < temps[0] {
        Some(RateWarning::ClampedLow(Axis::Temperature))
    } else if temperature > temps[temps.len() - 1] {
        Some(RateWarning::ClampedHigh(Axis::Temperature))
    } else {
        None
    };
    Ok((bucket.key, warning))
}
