use tracing::debug;

use super::{Interpolated, Position};
use crate::error::{ensure_finite, CorrosionError, Result};
use crate::rate::{Axis, RateWarning};

/// 축 값과 그 값에서의 부식 속도 한 쌍.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// x 오름차순, x 중복 없는 점 집합.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointSet {
    points: Vec<Point>,
}

impl PointSet {
    /// 순서가 섞인 점들을 정렬하고 같은 x는 처음 것만 남긴다.
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Self {
        let mut points: Vec<Point> = points.into_iter().collect();
        // 안정 정렬이므로 같은 x 중 먼저 들어온 점이 앞에 남는다.
        points.sort_by(|a, b| a.x.total_cmp(&b.x));
        points.dedup_by(|later, earlier| later.x == earlier.x);
        Self { points }
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (f64, f64)>) -> Self {
        Self::from_points(pairs.into_iter().map(|(x, y)| Point::new(x, y)))
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<Point> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// 첫 점과 마지막 점의 x
    pub fn x_range(&self) -> Option<(f64, f64)> {
        Some((self.first()?.x, self.last()?.x))
    }

    pub fn position_of(&self, x: f64) -> Option<Position> {
        let (min, max) = self.x_range()?;
        Some(Position::of(x, min, max))
    }

    /// 이 집합에 대해 [`interpolate`]를 수행한다.
    pub fn interpolate(&self, x: f64) -> Result<f64> {
        interpolate(x, &self.points)
    }
}

/// 정렬된 점 집합에서 x의 값을 선형 보간한다.
///
/// 범위 밖이면 가장 가까운 구간의 기울기로 외삽하며 클램프하지 않는다.
/// 점이 하나면 그 y를 그대로 돌려준다. 구간 양 끝 x가 같으면 왼쪽 y를 쓴다.
pub fn interpolate(x: f64, points: &[Point]) -> Result<f64> {
    let x = ensure_finite("x", x)?;
    let n = points.len();
    if n == 0 {
        return Err(CorrosionError::EmptyInput("보간 점 집합이 비어 있습니다."));
    }
    if n == 1 {
        return Ok(points[0].y);
    }

    let mut i = 0;
    while i < n - 2 && x > points[i + 1].x {
        i += 1;
    }
    let Point { x: x1, y: y1 } = points[i];
    let Point { x: x2, y: y2 } = points[i + 1];
    if x1 == x2 {
        return Ok(y1);
    }
    let slope = (y2 - y1) / (x2 - x1);
    Ok(y1 + slope * (x - x1))
}

/// 구간 안에서는 선형 보간하고, 밖에서는 가장 가까운 끝점 값으로 고정한다.
pub fn interpolate_clamped(x: f64, points: &PointSet, axis: Axis) -> Result<Interpolated> {
    let x = ensure_finite("x", x)?;
    let (first, last) = match (points.first(), points.last()) {
        (Some(f), Some(l)) => (f, l),
        _ => return Err(CorrosionError::EmptyInput("보간 점 집합이 비어 있습니다.")),
    };
    match Position::of(x, first.x, last.x) {
        Position::Below => {
            debug!(x, min = first.x, axis = axis.label(), "하한 구간값으로 고정");
            Ok(Interpolated::warned(first.y, RateWarning::ClampedLow(axis)))
        }
        Position::Above => {
            debug!(x, max = last.x, axis = axis.label(), "상한 구간값으로 고정");
            Ok(Interpolated::warned(last.y, RateWarning::ClampedHigh(axis)))
        }
        Position::Within => Ok(Interpolated::exact(points.interpolate(x)?)),
    }
}
