use tracing::debug;

use super::{interpolate_clamped, Interpolated, PointSet, Position};
use crate::error::{ensure_finite, CorrosionError, Result};
use crate::rate::{Axis, RateWarning};

/// 표의 한 칸에 적힌 값. 단일 임계값이거나 `[min, max]` 포함 구간이다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Range {
    Scalar(f64),
    Band { min: f64, max: f64 },
}

impl Range {
    /// 다른 표와 상관시킬 때 쓰는 대표값
    pub fn midpoint(&self) -> f64 {
        match *self {
            Range::Scalar(v) => v,
            Range::Band { min, max } => (min + max) / 2.0,
        }
    }
}

/// 키(예: pH)와 그 행의 범위.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeRow {
    pub key: f64,
    pub range: Range,
}

/// 키 값에 대응하는 범위 대표값을 구한다.
///
/// `domain` 밖의 키는 `OutOfDomain` 오류다. 표 행과 정확히 일치하면 그 행의 중앙값을,
/// 두 행 사이면 두 중앙값을 선형 보간한 뒤 정수로 반올림한다.
/// 도메인 안이지만 표 행 범위 밖이면 가장 가까운 행의 중앙값으로 고정하고 경고를 단다.
pub fn correlate_range_midpoint(
    key: f64,
    rows: &[RangeRow],
    domain: (f64, f64),
    axis: Axis,
) -> Result<Interpolated> {
    let midpoints = PointSet::from_pairs(rows.iter().map(|r| (r.key, r.range.midpoint())));
    correlate_midpoints(key, &midpoints, domain, axis)
}

/// `키 → 범위 중앙값` 점 집합으로 [`correlate_range_midpoint`]를 수행한다.
pub fn correlate_midpoints(
    key: f64,
    midpoints: &PointSet,
    domain: (f64, f64),
    axis: Axis,
) -> Result<Interpolated> {
    let key = ensure_finite("key", key)?;
    if key < domain.0 || key > domain.1 {
        return Err(CorrosionError::OutOfDomain(format!(
            "{key} 은(는) {}~{} 범위여야 합니다.",
            domain.0, domain.1
        )));
    }
    let (first, last) = match (midpoints.first(), midpoints.last()) {
        (Some(f), Some(l)) => (f, l),
        _ => return Err(CorrosionError::EmptyInput("범위 표에 행이 없습니다.")),
    };

    let points = midpoints.points();
    if let Some(p) = points.iter().find(|p| p.x == key) {
        return Ok(Interpolated::exact(p.y));
    }
    match Position::of(key, first.x, last.x) {
        Position::Below => {
            return Ok(Interpolated::warned(first.y, RateWarning::ClampedLow(axis)))
        }
        Position::Above => {
            return Ok(Interpolated::warned(last.y, RateWarning::ClampedHigh(axis)))
        }
        Position::Within => {}
    }
    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if key > a.x && key < b.x {
            let value = a.y + (key - a.x) / (b.x - a.x) * (b.y - a.y);
            debug!(key, lower = a.x, upper = b.x, value, "범위 중앙값 보간");
            return Ok(Interpolated::exact(value.round()));
        }
    }
    Err(CorrosionError::MissingTableKey(format!("{key} 를 감싸는 범위 행")))
}

/// 입력을 고정된 구간값 집합 안으로 맞춘다. 안쪽은 그대로, 바깥은 가까운 끝값으로 고정한다.
pub fn clamp_to_breakpoints(x: f64, breakpoints: &[f64], axis: Axis) -> Result<Interpolated> {
    let identity = PointSet::from_pairs(breakpoints.iter().map(|&b| (b, b)));
    interpolate_clamped(x, &identity, axis)
}
