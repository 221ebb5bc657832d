//! 참조표 보간 엔진.
//!
//! 1차원 선형 보간/외삽, 최근접 구간값 반올림, 쌍선형 보간, 2단 축약 보간,
//! 범위 중앙값 상관을 제공한다. 모든 함수는 입력만으로 결과가 정해지는 순수 함수다.

pub mod bilinear;
pub mod double;
pub mod linear;
pub mod nearest;
pub mod range;

pub use bilinear::{bilinear_interpolate, Grid};
pub use double::{double_interpolate, double_interpolate_with, extrapolate_clamped_at_zero, Slice};
pub use linear::{interpolate, interpolate_clamped, Point, PointSet};
pub use nearest::{round_to_nearest, snap_to_breakpoint};
pub use range::{
    clamp_to_breakpoints, correlate_midpoints, correlate_range_midpoint, Range, RangeRow,
};

use crate::rate::RateWarning;

/// 경계 정책이 적용된 보간 결과.
#[derive(Debug, Clone, PartialEq)]
pub struct Interpolated {
    pub value: f64,
    pub warnings: Vec<RateWarning>,
}

impl Interpolated {
    pub fn exact(value: f64) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    pub fn warned(value: f64, warning: RateWarning) -> Self {
        Self {
            value,
            warnings: vec![warning],
        }
    }

    /// 다른 결과의 경고를 중복 없이 합친다.
    pub(crate) fn absorb(&mut self, warnings: &[RateWarning]) {
        for w in warnings {
            if !self.warnings.contains(w) {
                self.warnings.push(*w);
            }
        }
    }
}

/// 입력값이 구간 집합의 어느 쪽에 있는지 나타낸다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Below,
    Within,
    Above,
}

impl Position {
    pub fn of(x: f64, min: f64, max: f64) -> Self {
        if x < min {
            Position::Below
        } else if x > max {
            Position::Above
        } else {
            Position::Within
        }
    }
}
