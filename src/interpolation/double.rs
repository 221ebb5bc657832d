use tracing::{debug, warn};

use super::{Interpolated, PointSet, Position};
use crate::error::{ensure_finite, CorrosionError, Result};
use crate::rate::{Axis, RateWarning};

/// 축 2의 한 구간값(예: 온도 100°F)과 그 안의 축 1 점 집합(pH → 속도).
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub key: f64,
    pub points: PointSet,
}

impl Slice {
    pub fn new(key: f64, points: PointSet) -> Self {
        Self { key, points }
    }
}

/// 축 1 기본 축약 정책: 범위 안팎 모두 선형 보간/외삽하고 음수는 0으로 올린다.
///
/// 범위를 벗어나면 `axis1` 축의 외삽 경고를 단다.
pub fn extrapolate_clamped_at_zero(
    axis1_query: f64,
    axis1: Axis,
) -> impl Fn(&PointSet) -> Result<Interpolated> {
    move |points: &PointSet| {
        let value = points.interpolate(axis1_query)?.max(0.0);
        Ok(match points.position_of(axis1_query) {
            Some(Position::Below) => Interpolated::warned(value, RateWarning::ExtrapolatedLow(axis1)),
            Some(Position::Above) => {
                Interpolated::warned(value, RateWarning::ExtrapolatedHigh(axis1))
            }
            _ => Interpolated::exact(value),
        })
    }
}

/// 기본 축약 정책(pH 축)으로 2단 보간한다.
///
/// 각 축 2 구간에서 `axis1_query`의 값을 구한 뒤, 그 값들을 축 2 방향으로 `axis2_value`에서 보간한다.
pub fn double_interpolate(
    axis2_value: f64,
    axis1_query: f64,
    slices: &[Slice],
) -> Result<Interpolated> {
    let axis1_query = ensure_finite("axis1_query", axis1_query)?;
    double_interpolate_with(
        axis2_value,
        Axis::Temperature,
        slices,
        extrapolate_clamped_at_zero(axis1_query, Axis::Ph),
    )
}

/// 구간별 축약 함수 `reduce`를 받아 2단 보간을 수행한다.
///
/// 축 2 경계 정책은 비대칭이다. 최솟값 아래는 외삽 후 0 이상으로 올리고
/// `extrapolated-low`, 최댓값 위는 외삽하지 않고 최대 구간값으로 고정한 뒤
/// `extrapolated-high`를 단다.
pub fn double_interpolate_with<F>(
    axis2_value: f64,
    axis2: Axis,
    slices: &[Slice],
    reduce: F,
) -> Result<Interpolated>
where
    F: Fn(&PointSet) -> Result<Interpolated>,
{
    let axis2_value = ensure_finite("axis2_value", axis2_value)?;

    let mut ordered: Vec<&Slice> = slices.iter().filter(|s| !s.points.is_empty()).collect();
    ordered.sort_by(|a, b| a.key.total_cmp(&b.key));

    let mut warnings = Vec::new();
    let mut reduced = Vec::with_capacity(ordered.len());
    for slice in ordered {
        let r = reduce(&slice.points)?;
        debug!(key = slice.key, rate = r.value, "구간 축약");
        for w in r.warnings {
            if !warnings.contains(&w) {
                warnings.push(w);
            }
        }
        reduced.push((slice.key, r.value));
    }

    let across = PointSet::from_pairs(reduced);
    let (first, last) = match (across.first(), across.last()) {
        (Some(f), Some(l)) => (f, l),
        _ => {
            return Err(CorrosionError::EmptyInput(
                "축약할 구간이 없어 부식 속도를 계산할 수 없습니다.",
            ))
        }
    };

    let mut result = match Position::of(axis2_value, first.x, last.x) {
        Position::Below => {
            let value = across.interpolate(axis2_value)?.max(0.0);
            warn!(axis2_value, min = first.x, axis = axis2.label(), "최소 구간 아래로 외삽");
            Interpolated::warned(value, RateWarning::ExtrapolatedLow(axis2))
        }
        Position::Above => {
            warn!(axis2_value, max = last.x, axis = axis2.label(), "최대 구간값으로 고정");
            Interpolated::warned(last.y, RateWarning::ExtrapolatedHigh(axis2))
        }
        Position::Within => Interpolated::exact(across.interpolate(axis2_value)?.max(0.0)),
    };
    // 축 1 경고를 앞에 둔다.
    let own = std::mem::take(&mut result.warnings);
    result.warnings = warnings;
    result.absorb(&own);
    Ok(result)
}
