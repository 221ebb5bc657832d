//! 황산(H2SO4) 부식(Table 2.B.5.2 ~ 2.B.5.7).

use tracing::debug;

use crate::adjustments::Presence;
use crate::error::{ensure_finite, CorrosionError, Result};
use crate::rate::CorrosionRate;
use crate::tables::keys::{as_rate, child, numeric_child};
use crate::tables::{route_material, GridAdapter, MaterialRoute, ReferenceTable, TableId};
use crate::units::UnitSystem;

/// 탄소강 외 재질과 표.
const ALLOY_ROUTES: [MaterialRoute<TableId>; 5] = [
    MaterialRoute::new("304 ss", TableId::Table2B53),
    MaterialRoute::new("316 ss", TableId::Table2B54),
    MaterialRoute::new("alloy 20", TableId::Table2B55),
    MaterialRoute::new("alloy c-276", TableId::Table2B56),
    MaterialRoute::new("alloy b-2", TableId::Table2B57),
];

const CARBON_STEEL: &str = "carbon steel";

fn is_carbon_steel(material: &str) -> bool {
    material.trim().eq_ignore_ascii_case(CARBON_STEEL)
}

fn is_alloy_b2(material: &str) -> bool {
    route_material(&ALLOY_ROUTES, material).is_ok_and(|id| id == TableId::Table2B57)
}

/// 선택 가능한 재질 목록
pub fn materials() -> Vec<&'static str> {
    std::iter::once(CARBON_STEEL)
        .chain(ALLOY_ROUTES.iter().map(|r| r.name))
        .collect()
}

/// 재질에 맞는 표. 탄소강은 단위계마다 표가 따로 있다.
pub fn table_for_material(material: &str, unit: UnitSystem) -> Result<TableId> {
    if is_carbon_steel(material) {
        return Ok(match unit {
            UnitSystem::Fahrenheit => TableId::Table2B52,
            UnitSystem::Celsius => TableId::Table2B52M,
        });
    }
    route_material(&ALLOY_ROUTES, material)
}

/// Alloy B-2에 산소가 있으면 표를 쓸 수 없다.
pub fn specialist_required(material: &str, oxygen: Presence) -> bool {
    oxygen.is_yes() && is_alloy_b2(material)
}

/// 황산 계산 입력. 값은 표에 있는 구간값이어야 한다.
#[derive(Debug, Clone)]
pub struct SulfuricAcidInput {
    pub material: String,
    /// 산소/산화제 존재 여부
    pub oxygen: Presence,
    /// 산 농도(wt%)
    pub acid_concentration: f64,
    /// 최고 온도(°F 또는 °C)
    pub temperature: f64,
    /// 산 유속(ft/s 또는 m/s)
    pub velocity: f64,
    /// 전문가가 정한 부식 속도(Alloy B-2 + 산소)
    pub specialist_rate: Option<f64>,
}

/// 황산 부식 속도를 조회한다.
///
/// Alloy B-2에 산소가 있으면 `specialist_rate`를 그대로 쓰고, 없으면 오류다.
/// 이 경우 `table`은 읽지 않는다.
pub fn compute_sulfuric_acid(
    input: &SulfuricAcidInput,
    table: &ReferenceTable,
    unit: UnitSystem,
) -> Result<CorrosionRate> {
    if specialist_required(&input.material, input.oxygen) {
        let rate = input.specialist_rate.ok_or(CorrosionError::SpecialistRateRequired(
            "산소가 있는 Alloy B-2는 전문가가 부식 속도를 정해야 합니다.",
        ))?;
        let rate = ensure_finite("specialist_rate", rate)?;
        if rate <= 0.0 {
            return Err(CorrosionError::OutOfDomain(format!(
                "전문가 부식 속도는 0보다 커야 합니다: {rate}"
            )));
        }
        return Ok(CorrosionRate::new(rate, unit.rate_unit()));
    }

    let concentration = ensure_finite("acid_concentration", input.acid_concentration)?;
    let temperature = ensure_finite("temperature", input.temperature)?;
    let velocity = ensure_finite("velocity", input.velocity)?;

    let rate = if is_carbon_steel(&input.material) {
        carbon_steel_rate(table, concentration, temperature, velocity)?
    } else {
        GridAdapter::new(table, unit)?
            .descend_numeric(concentration)?
            .descend_numeric(temperature)?
            .descend_numeric(velocity)?
            .value()?
    };
    debug!(material = %input.material, concentration, temperature, velocity, rate, "황산 표 조회");
    Ok(CorrosionRate::new(rate, unit.rate_unit()))
}

/// 탄소강 표: `{ "농도": [{ temperature, acid_velocity: { "유속": 값 } }] }`
fn carbon_steel_rate(
    table: &ReferenceTable,
    concentration: f64,
    temperature: f64,
    velocity: f64,
) -> Result<f64> {
    let ctx = table.name();
    let (_, rows) = numeric_child(table.root(), concentration, ctx)?;
    let row = rows
        .as_array()
        .and_then(|rows| {
            rows.iter().find(|r| {
                r.get("temperature")
                    .and_then(|t| as_rate(t, ctx).ok())
                    .is_some_and(|t| t == temperature)
            })
        })
        .ok_or_else(|| {
            CorrosionError::MissingTableKey(format!("{ctx} → {concentration} → {temperature}"))
        })?;
    let (_, cell) = numeric_child(child(row, "acid_velocity", ctx)?, velocity, ctx)?;
    as_rate(cell, ctx)
}
