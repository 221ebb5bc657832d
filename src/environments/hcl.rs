//! 염산(HCl) 부식(Table 2.B.2.2, 2.B.2.3, 2.B.2.5, 2.B.2.6).
//!
//! 탄소강/300 계열은 pH × 온도 격자를 쌍선형 보간한다.
//! 그 밖의 합금은 염화물 농도(wt%)와 온도 구간으로 합금 레코드를 조회한다.

use tracing::debug;

use super::rate_from;
use crate::adjustments::Presence;
use crate::error::{ensure_finite, CorrosionError, Result};
use crate::interpolation::{
    bilinear_interpolate, clamp_to_breakpoints, correlate_midpoints, interpolate_clamped,
    snap_to_breakpoint, Grid, Interpolated, Position,
};
use crate::rate::{Axis, CorrosionRate, RateWarning};
use crate::tables::{
    GridAdapter, RangeBandAdapter, RecordListAdapter, RecordQuery, ReferenceTable, TableAdapter,
    TableId,
};
use crate::units::{
    convert_length, convert_temperature, LengthUnit, TemperatureUnit, UnitSystem,
};

/// 염화물 표의 pH 유효 범위
pub const PH_DOMAIN: (f64, f64) = (0.5, 5.0);
/// 합금 레코드가 가진 염화물 농도(wt%)
pub const CHLORIDE_WT_BREAKPOINTS: [f64; 3] = [0.50, 0.75, 1.00];

const TEMPERATURES_F: [f64; 4] = [100.0, 125.0, 175.0, 200.0];
const TEMPERATURES_C: [f64; 4] = [38.0, 52.0, 79.0, 93.0];

/// 합금 레코드 표의 온도 구간값
pub fn temperature_breakpoints(unit: UnitSystem) -> &'static [f64] {
    match unit {
        UnitSystem::Fahrenheit => &TEMPERATURES_F,
        UnitSystem::Celsius => &TEMPERATURES_C,
    }
}

/// 염화물 농도를 어떻게 얻는지.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChlorideSource {
    /// 측정한 염화물 농도(wppm)
    Wppm(f64),
    /// 산성수 pH에서 2.B.2.2로 추정
    Ph(f64),
}

/// 탄소강/300 계열이 아닌 합금의 입력.
#[derive(Debug, Clone)]
pub struct HclAlloyInput {
    /// 레코드의 `alloy` 값
    pub alloy: String,
    pub chloride: ChlorideSource,
    /// 운전 온도(°F 또는 °C)
    pub temperature: f64,
    /// 산화제(산소) 유무. 지정하면 2.B.2.6, 없으면 2.B.2.5를 쓴다.
    pub oxygen: Option<Presence>,
}

/// 합금 입력에 맞는 레코드 표
pub fn alloy_table(oxygen: Option<Presence>) -> TableId {
    match oxygen {
        Some(_) => TableId::Table2B26,
        None => TableId::Table2B25,
    }
}

/// 2.B.2.2(pH → 염화물 농도)가 필요한 입력인지. 농도 축을 쓰는 2.B.2.5에서 pH로 추정할 때만 읽는다.
pub fn needs_chloride_table(input: &HclAlloyInput) -> bool {
    input.oxygen.is_none() && matches!(input.chloride, ChlorideSource::Ph(_))
}

/// pH로 염화물 농도(wppm)를 구한다. 범위 행의 중앙값을 보간한다.
pub fn chloride_from_ph(table: &ReferenceTable, ph: f64) -> Result<Interpolated> {
    let midpoints = RangeBandAdapter::new(table, "ph", "ci_concentration")?.to_point_set(&())?;
    correlate_midpoints(ph, &midpoints, PH_DOMAIN, Axis::Ph)
}

/// wppm을 wt%로 바꾸고 레코드 농도 범위 안으로 맞춘다.
pub fn chloride_wt_percent(wppm: f64) -> Result<Interpolated> {
    let wppm = ensure_finite("chloride_wppm", wppm)?;
    if wppm < 0.0 {
        return Err(CorrosionError::OutOfDomain(format!(
            "염화물 농도는 음수일 수 없습니다: {wppm}"
        )));
    }
    clamp_to_breakpoints(wppm / 10_000.0, &CHLORIDE_WT_BREAKPOINTS, Axis::Concentration)
}

/// 2.B.2.3 격자를 고른다. 두 번째 값은 °F/mpy 격자를 빌려 왔는지 여부다.
///
/// 단위계 하위 트리, `temperature_in_f` 하위 트리, 하위 트리 없는 뿌리 격자 순으로 찾는다.
fn ph_temperature_grid(table: &ReferenceTable, unit: UnitSystem) -> Result<(Grid, bool)> {
    match table.unit_tree(unit) {
        Ok(node) => return Ok((GridAdapter::at(node, table.name()).to_grid()?, false)),
        Err(CorrosionError::MissingTableKey(_)) => {}
        Err(e) => return Err(e),
    }
    let node = match table.unit_tree(UnitSystem::Fahrenheit) {
        Ok(node) => node,
        Err(CorrosionError::MissingTableKey(_)) => table.root(),
        Err(e) => return Err(e),
    };
    debug!(table = table.name(), "°F 격자 사용");
    Ok((GridAdapter::at(node, table.name()).to_grid()?, true))
}

fn edge_warnings(axis_values: &[f64], x: f64, axis: Axis) -> Option<RateWarning> {
    let (min, max) = (*axis_values.first()?, *axis_values.last()?);
    match Position::of(x, min, max) {
        Position::Below => Some(RateWarning::ExtrapolatedLow(axis)),
        Position::Above => Some(RateWarning::ExtrapolatedHigh(axis)),
        Position::Within => None,
    }
}

/// 탄소강/300 계열: 2.B.2.3 격자에서 pH(축 1), 온도(축 2)로 쌍선형 보간한다.
///
/// 격자 범위 밖은 가장자리 구간으로 외삽하고 경고를 단다.
pub fn compute_hcl_carbon_steel(
    ph: f64,
    temperature: f64,
    table: &ReferenceTable,
    unit: UnitSystem,
) -> Result<CorrosionRate> {
    let ph = ensure_finite("ph", ph)?;
    let temperature = ensure_finite("temperature", temperature)?;
    let (grid, fahrenheit_only) = ph_temperature_grid(table, unit)?;

    // °F 전용 표를 °C 단위계에서 쓰면 입력과 결과를 환산한다.
    let convert = fahrenheit_only && unit == UnitSystem::Celsius;
    let t = if convert {
        convert_temperature(temperature, TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit)
    } else {
        temperature
    };

    let mut rate = bilinear_interpolate(ph, t, &grid)?;
    if convert {
        rate = convert_length(rate, LengthUnit::Mil, LengthUnit::Millimeter);
    }
    debug!(ph, temperature = t, rate, "HCl 쌍선형 보간");

    let warnings = [
        edge_warnings(grid.axis1(), ph, Axis::Ph),
        edge_warnings(grid.axis2(), t, Axis::Temperature),
    ];
    Ok(CorrosionRate::new(rate.max(0.0), unit.rate_unit())
        .with_warnings(warnings.into_iter().flatten()))
}

/// 합금: 염화물 농도와 온도 구간으로 2.B.2.5 또는 2.B.2.6을 조회한다.
///
/// 2.B.2.5는 합금 레코드들의 농도 사이를 선형 보간하고 범위 밖은 끝값으로 고정한다.
/// 2.B.2.6은 농도 축 없이 산소 유무 필드를 고르므로 염화물 입력을 보지 않는다.
/// `chloride_table`(2.B.2.2)은 [`needs_chloride_table`]일 때만 있으면 된다.
pub fn compute_hcl_alloy(
    input: &HclAlloyInput,
    chloride_table: Option<&ReferenceTable>,
    record_table: &ReferenceTable,
    unit: UnitSystem,
) -> Result<CorrosionRate> {
    let temperature = snap_to_breakpoint(
        temperature_breakpoints(unit),
        input.temperature,
        Axis::Temperature,
    )?;
    let records = RecordListAdapter::new(record_table, unit)?;
    let query = RecordQuery::new(input.alloy.as_str(), temperature.value);

    let rate = match input.oxygen {
        Some(oxygen) => {
            let field = if oxygen.is_yes() { "oxygen" } else { "no_oxygen" };
            debug!(temperature = temperature.value, field, "HCl 합금 산소 조건 조회");
            Interpolated::exact(records.rate_for(&query.field(field))?)
        }
        None => {
            let wppm = match input.chloride {
                ChlorideSource::Wppm(v) => Interpolated::exact(ensure_finite("chloride_wppm", v)?),
                ChlorideSource::Ph(ph) => {
                    let table = chloride_table.ok_or_else(|| {
                        CorrosionError::MissingTableKey(format!(
                            "{}: pH로 염화물 농도를 구하려면 필요합니다",
                            TableId::Table2B22
                        ))
                    })?;
                    chloride_from_ph(table, ph)?
                }
            };
            let wt = chloride_wt_percent(wppm.value)?;
            debug!(
                wppm = wppm.value,
                wt = wt.value,
                temperature = temperature.value,
                "HCl 합금 농도 보간"
            );
            let points = records.to_point_set(&query)?;
            let mut rate = interpolate_clamped(wt.value, &points, Axis::Concentration)?;
            rate.absorb(&wppm.warnings);
            rate.absorb(&wt.warnings);
            rate
        }
    };

    Ok(rate_from(rate, unit).with_warnings(temperature.warnings))
}
