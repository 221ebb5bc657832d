//! 고온 산화(Table 2.B.9.2).

use tracing::debug;

use crate::error::{CorrosionError, Result};
use crate::interpolation::{snap_to_breakpoint, PointSet};
use crate::rate::{Axis, CorrosionRate};
use crate::tables::{route_material, GridAdapter, MaterialRoute, ReferenceTable, TableAdapter};
use crate::units::UnitSystem;

/// 입력 재질명과 표의 재질 열 이름
const MATERIAL_KEYS: [MaterialRoute<&str>; 11] = [
    MaterialRoute::new("carbon steel", "CS"),
    MaterialRoute::new("1 1/4cr", "1 1/4Cr"),
    MaterialRoute::new("2 1/4cr", "2 1/4Cr"),
    MaterialRoute::new("5cr", "5 Cr"),
    MaterialRoute::new("7cr", "7 Cr"),
    MaterialRoute::new("9cr", "9 Cr"),
    MaterialRoute::new("12cr", "12 Cr"),
    MaterialRoute::new("304 ss", "304 SS"),
    MaterialRoute::new("309 ss", "309 SS"),
    MaterialRoute::new("310 ss/hk", "310 SS/HK"),
    MaterialRoute::new("800 h/hp", "800 H/HP"),
];

/// 표의 재질 열 이름
pub fn material_key(material: &str) -> Result<&'static str> {
    route_material(&MATERIAL_KEYS, material)
}

pub fn materials() -> Vec<&'static str> {
    crate::tables::catalog::material_names(&MATERIAL_KEYS)
}

/// 재질 열을 `온도 → 값` 점 집합으로 읽는다. `null` 칸은 빠진다.
fn material_column(table: &ReferenceTable, unit: UnitSystem, material: &str) -> Result<PointSet> {
    GridAdapter::new(table, unit)?.to_point_set(material_key(material)?)
}

/// 재질의 값이 있는 온도 구간값(오름차순).
pub fn temperature_options(
    table: &ReferenceTable,
    unit: UnitSystem,
    material: &str,
) -> Result<Vec<f64>> {
    let column = material_column(table, unit, material)?;
    Ok(column.points().iter().map(|p| p.x).collect())
}

/// 최고 금속 온도를 값이 있는 가장 가까운 구간값으로 맞춰 조회한다.
pub fn compute_ht_oxidation(
    material: &str,
    temperature: f64,
    table: &ReferenceTable,
    unit: UnitSystem,
) -> Result<CorrosionRate> {
    let column = material_column(table, unit, material)?;
    if column.is_empty() {
        return Err(CorrosionError::MissingTableKey(format!(
            "{} → {material}: 값이 있는 온도가 없음",
            table.name()
        )));
    }
    let temps: Vec<f64> = column.points().iter().map(|p| p.x).collect();
    let snapped = snap_to_breakpoint(&temps, temperature, Axis::Temperature)?;
    let rate = column
        .points()
        .iter()
        .find(|p| p.x == snapped.value)
        .map(|p| p.y)
        .ok_or_else(|| {
            CorrosionError::MissingTableKey(format!(
                "{} → {material} → {}",
                table.name(),
                snapped.value
            ))
        })?;
    debug!(material, temperature = snapped.value, rate, "고온 산화 조회");
    Ok(CorrosionRate::new(rate, unit.rate_unit()).with_warnings(snapped.warnings))
}
