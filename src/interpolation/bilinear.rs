use crate::error::{ensure_finite, CorrosionError, Result};
use crate::rate::round2;

/// 두 축(예: pH × 온도)으로 된 직사각 격자.
///
/// `cells[i][j]`는 `(axis1[i], axis2[j])`의 값이며 표에 없으면 `None`이다.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    axis1: Vec<f64>,
    axis2: Vec<f64>,
    cells: Vec<Vec<Option<f64>>>,
}

impl Grid {
    /// `(axis1, axis2, rate)` 항목들로 격자를 만든다. 축 값은 정렬/중복 제거된다.
    pub fn from_entries(entries: impl IntoIterator<Item = (f64, f64, f64)>) -> Self {
        let entries: Vec<(f64, f64, f64)> = entries.into_iter().collect();
        let axis1 = sorted_unique(entries.iter().map(|e| e.0));
        let axis2 = sorted_unique(entries.iter().map(|e| e.1));
        let mut cells = vec![vec![None; axis2.len()]; axis1.len()];
        for (a1, a2, rate) in entries {
            if let (Some(i), Some(j)) = (index_of(&axis1, a1), index_of(&axis2, a2)) {
                // 중복 항목은 처음 것을 유지
                cells[i][j].get_or_insert(rate);
            }
        }
        Self {
            axis1,
            axis2,
            cells,
        }
    }

    pub fn axis1(&self) -> &[f64] {
        &self.axis1
    }

    pub fn axis2(&self) -> &[f64] {
        &self.axis2
    }

    /// 격자점 값. 축 값이 격자에 없거나 칸이 비어 있으면 `None`.
    pub fn rate(&self, a1: f64, a2: f64) -> Option<f64> {
        let i = index_of(&self.axis1, a1)?;
        let j = index_of(&self.axis2, a2)?;
        self.cells[i][j]
    }

    fn corner(&self, a1: f64, a2: f64) -> Result<f64> {
        self.rate(a1, a2)
            .ok_or(CorrosionError::MissingGridCorner { axis1: a1, axis2: a2 })
    }
}

fn sorted_unique(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut v: Vec<f64> = values.collect();
    v.sort_by(f64::total_cmp);
    v.dedup();
    v
}

fn index_of(axis: &[f64], value: f64) -> Option<usize> {
    axis.iter().position(|&v| v == value)
}

/// 입력을 감싸는 구간을 찾는다. 범위 밖이면 가장자리 구간을 그대로 쓴다.
/// 축 값이 하나뿐이면 `(v, v)`로 축이 접힌다.
fn bracket(axis: &[f64], x: f64) -> Option<(f64, f64)> {
    match axis.len() {
        0 => None,
        1 => Some((axis[0], axis[0])),
        n => {
            let mut i = 0;
            while i < n - 2 && x > axis[i + 1] {
                i += 1;
            }
            Some((axis[i], axis[i + 1]))
        }
    }
}

fn lerp(x: f64, x1: f64, x2: f64, y1: f64, y2: f64) -> f64 {
    y1 + (x - x1) / (x2 - x1) * (y2 - y1)
}

/// 격자에서 `(a1, a2)` 값을 쌍선형 보간한다. 결과는 소수 둘째 자리로 반올림한다.
///
/// 축 1을 두 축 2 경계에서 먼저 보간한 뒤 그 두 값을 축 2로 보간한다.
/// 한 축이 접히면 나머지 축으로만 선형 보간하고, 둘 다 접히면 모서리 값을 그대로 쓴다.
pub fn bilinear_interpolate(a1: f64, a2: f64, grid: &Grid) -> Result<f64> {
    let a1 = ensure_finite("axis1", a1)?;
    let a2 = ensure_finite("axis2", a2)?;
    let (a1_lo, a1_hi) = bracket(&grid.axis1, a1)
        .ok_or(CorrosionError::EmptyInput("격자 축 1이 비어 있습니다."))?;
    let (a2_lo, a2_hi) = bracket(&grid.axis2, a2)
        .ok_or(CorrosionError::EmptyInput("격자 축 2가 비어 있습니다."))?;

    let r11 = grid.corner(a1_lo, a2_lo)?;
    let r12 = grid.corner(a1_lo, a2_hi)?;
    let r21 = grid.corner(a1_hi, a2_lo)?;
    let r22 = grid.corner(a1_hi, a2_hi)?;

    let rate = if a1_lo == a1_hi && a2_lo == a2_hi {
        r11
    } else if a1_lo == a1_hi {
        lerp(a2, a2_lo, a2_hi, r11, r12)
    } else if a2_lo == a2_hi {
        lerp(a1, a1_lo, a1_hi, r11, r21)
    } else {
        let at_a2_lo = lerp(a1, a1_lo, a1_hi, r11, r21);
        let at_a2_hi = lerp(a1, a1_lo, a1_hi, r12, r22);
        lerp(a2, a2_lo, a2_hi, at_a2_lo, at_a2_hi)
    };
    Ok(round2(rate))
}
