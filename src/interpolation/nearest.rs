use tracing::debug;

use super::Interpolated;
use crate::error::{ensure_finite, CorrosionError, Result};
use crate::rate::{Axis, RateWarning};

/// 연속 입력값을 정렬된 구간값 집합 중 가장 가까운 값으로 맞춘다.
///
/// 최솟값 이하는 최솟값, 최댓값 이상은 최댓값을 돌려준다.
/// 두 후보와의 거리가 같으면 작은 쪽을 고른다.
pub fn round_to_nearest(values: &[f64], target: f64) -> Result<f64> {
    let target = ensure_finite("target", target)?;
    let (min, max) = match (values.first(), values.last()) {
        (Some(&min), Some(&max)) => (min, max),
        _ => return Err(CorrosionError::EmptyInput("구간값 목록이 비어 있습니다.")),
    };
    if target <= min {
        return Ok(min);
    }
    if target >= max {
        return Ok(max);
    }

    // 종료 시 values[high] < target < values[low]
    let mut low = 0usize;
    let mut high = values.len() - 1;
    while low <= high {
        let mid = (low + high) / 2;
        if values[mid] == target {
            return Ok(values[mid]);
        }
        if values[mid] < target {
            low = mid + 1;
        } else {
            // min < target 이므로 mid == 0 인 채로 여기 오지 않는다.
            high = mid - 1;
        }
    }
    let lower = values[high];
    let upper = values[low];
    if (target - lower).abs() <= (upper - target).abs() {
        Ok(lower)
    } else {
        Ok(upper)
    }
}

/// [`round_to_nearest`]에 범위 이탈 경고를 덧붙인다.
pub fn snap_to_breakpoint(values: &[f64], target: f64, axis: Axis) -> Result<Interpolated> {
    let snapped = round_to_nearest(values, target)?;
    let (min, max) = (values[0], values[values.len() - 1]);
    let result = if target < min {
        Interpolated::warned(snapped, RateWarning::ClampedLow(axis))
    } else if target > max {
        Interpolated::warned(snapped, RateWarning::ClampedHigh(axis))
    } else {
        Interpolated::exact(snapped)
    };
    debug!(target, snapped, axis = axis.label(), "구간값으로 반올림");
    Ok(result)
}
