//! 환경별 부식 속도 계산.
//!
//! 각 환경은 단위계 결정, 표 선택, 보간/조회, 보정 계수 적용 순서가 서로 달라서
//! 하나의 파이프라인으로 묶지 않고 파일마다 독립된 함수로 둔다.
//! 모든 함수는 필요한 표와 단위계를 인자로 받는다.

pub mod acid_sour_water;
pub mod hcl;
pub mod hf;
pub mod ht_h2s_h2;
pub mod ht_oxidation;
pub mod ht_sulfidation;
pub mod measured;
pub mod sulfuric_acid;

use crate::interpolation::Interpolated;
use crate::rate::CorrosionRate;
use crate::units::UnitSystem;

/// 보간 결과를 단위계 라벨이 붙은 부식 속도로 바꾼다. 음수는 0으로 올린다.
pub(crate) fn rate_from(result: Interpolated, unit: UnitSystem) -> CorrosionRate {
    CorrosionRate::new(result.value.max(0.0), unit.rate_unit()).with_warnings(result.warnings)
}
