//! 고온 H2S/H2 부식(Table 2.B.4.2 ~ 2.B.4.7).

use std::str::FromStr;

use serde_json::Value;
use tracing::debug;

use crate::error::{ensure_finite, CorrosionError, Result};
use crate::interpolation::snap_to_breakpoint;
use crate::rate::{Axis, CorrosionRate};
use crate::tables::keys::{as_rate, child, numeric_child};
use crate::tables::{capitalize_first, route_material, MaterialRoute, ReferenceTable, TableId};
use crate::units::UnitSystem;

const TEMPERATURES_F: [f64; 12] = [
    425.0, 475.0, 525.0, 575.0, 625.0, 675.0, 725.0, 775.0, 825.0, 875.0, 925.0, 975.0,
];
const TEMPERATURES_C: [f64; 12] = [
    218.0, 246.0, 274.0, 302.0, 329.0, 357.0, 385.0, 413.0, 441.0, 469.0, 496.0, 524.0,
];

const MATERIAL_ROUTES: [MaterialRoute<TableId>; 16] = [
    MaterialRoute::new("carbon steel", TableId::Table2B42),
    MaterialRoute::new("1cr-0.2 mo", TableId::Table2B42),
    MaterialRoute::new("1cr-0.5 mo", TableId::Table2B42),
    MaterialRoute::new("1.25cr-0.5mo", TableId::Table2B42),
    MaterialRoute::new("2.25cr-1mo", TableId::Table2B42),
    MaterialRoute::new("3cr-1mo", TableId::Table2B42),
    MaterialRoute::new("5cr-0.5mo", TableId::Table2B43),
    MaterialRoute::new("7cr steel", TableId::Table2B44),
    MaterialRoute::new("9cr-1mo", TableId::Table2B45),
    MaterialRoute::new("12cr steel", TableId::Table2B46),
    MaterialRoute::new("304 stainless steel", TableId::Table2B47),
    MaterialRoute::new("304l stainless steel", TableId::Table2B47),
    MaterialRoute::new("316 stainless steel", TableId::Table2B47),
    MaterialRoute::new("316l stainless steel", TableId::Table2B47),
    MaterialRoute::new("321 stainless steel", TableId::Table2B47),
    MaterialRoute::new("347 stainless steel", TableId::Table2B47),
];

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

/// 탄화수소 종류. 12Cr 강과 300 계열 표에는 구분이 없다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hydrocarbon {
    Naphtha,
    GasOil,
}

impl Hydrocarbon {
    /// 표 키(`"Naphtha"`, `"Gas oil"`)
    pub fn table_key(self) -> &'static str {
        match self {
            Hydrocarbon::Naphtha => "Naphtha",
            Hydrocarbon::GasOil => "Gas oil",
        }
    }
}

impl FromStr for Hydrocarbon {
    type Err = CorrosionError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = capitalize_first(&s.replace(['_', '-'], " "));
        match normalized.as_str() {
            "Naphtha" => Ok(Hydrocarbon::Naphtha),
            "Gas oil" => Ok(Hydrocarbon::GasOil),
            _ => Err(CorrosionError::InvalidAdjustmentInput(format!(
                "알 수 없는 탄화수소 종류: '{}'",
                s.trim()
            ))),
        }
    }
}

/// 고온 H2S/H2 입력.
#[derive(Debug, Clone)]
pub struct H2sH2Input {
    /// 최고 공정 온도(°F 또는 °C)
    pub temperature: f64,
    /// H2S 농도(mol%), 표 값과 같아야 한다
    pub h2s_mole_percent: f64,
    pub hydrocarbon: Option<Hydrocarbon>,
}

/// 온도를 가장 가까운 구간값으로 맞춘 뒤 `temperatures` 배열의 위치로 부식 속도 배열을 읽는다.
pub fn compute_ht_h2s_h2(
    input: &H2sH2Input,
    table: &ReferenceTable,
    unit: UnitSystem,
) -> Result<CorrosionRate> {
    let ctx = table.name();
    let tree = table.unit_tree(unit)?;
    let snapped = snap_to_breakpoint(
        temperature_breakpoints(unit),
        input.temperature,
        Axis::Temperature,
    )?;

    let index = child(tree, "temperatures", ctx)?
        .as_array()
        .and_then(|temps| {
            temps
                .iter()
                .position(|t| as_rate(t, ctx).is_ok_and(|t| t == snapped.value))
        })
        .ok_or_else(|| {
            CorrosionError::MissingTableKey(format!("{ctx} → temperatures → {}", snapped.value))
        })?;

    let h2s = ensure_finite("h2s_mole_percent", input.h2s_mole_percent)?;
    let (h2s_key, by_h2s) = numeric_child(child(tree, "data", ctx)?, h2s, ctx)?;
    let rates = rate_list(by_h2s, input.hydrocarbon, ctx)?;
    let cell = rates.get(index).ok_or_else(|| {
        CorrosionError::MissingTableKey(format!("{ctx} → data → {h2s_key}[{index}]"))
    })?;
    let rate = as_rate(cell, ctx)?;
    debug!(temperature = snapped.value, index, h2s_key, rate, "고온 H2S/H2 조회");

    Ok(CorrosionRate::new(rate, unit.rate_unit()).with_warnings(snapped.warnings))
}

/// 배열이면 그대로, 탄화수소별 객체면 해당 종류의 배열을 고른다.
fn rate_list<'a>(
    node: &'a Value,
    hydrocarbon: Option<Hydrocarbon>,
    ctx: &str,
) -> Result<&'a Vec<Value>> {
    if let Some(list) = node.as_array() {
        return Ok(list);
    }
    let hydrocarbon = hydrocarbon.ok_or_else(|| {
        CorrosionError::InvalidAdjustmentInput("이 재질은 탄화수소 종류가 필요합니다.".into())
    })?;
    child(node, hydrocarbon.table_key(), ctx)?
        .as_array()
        .ok_or_else(|| {
            CorrosionError::MissingTableKey(format!("{ctx} → {}: 배열이 아님", hydrocarbon.table_key()))
        })
}
