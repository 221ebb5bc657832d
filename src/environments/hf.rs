//! 불산(HF) 부식(Table 2.B.6.2 탄소강, 2.B.6.3 Alloy 400).
//!
//! 선택지가 표 키에서 나오므로 보간하지 않고 정확한 키로 조회한다.

use std::str::FromStr;

use tracing::debug;

use crate::adjustments::Presence;
use crate::error::{CorrosionError, Result};
use crate::rate::CorrosionRate;
use crate::tables::{GridAdapter, ReferenceTable, TableId};
use crate::units::UnitSystem;

/// 표가 있는 HF 재질.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HfMaterial {
    CarbonSteel,
    Alloy400,
}

impl HfMaterial {
    pub fn table(self) -> TableId {
        match self {
            HfMaterial::CarbonSteel => TableId::Table2B62,
            HfMaterial::Alloy400 => TableId::Table2B63,
        }
    }
}

impl FromStr for HfMaterial {
    type Err = CorrosionError;

    /// 탄소강/Alloy 400 외의 재질은 문헌 값이 필요하다.
    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        match key.as_str() {
            "carbon_steel" | "cs" => Ok(HfMaterial::CarbonSteel),
            "alloy_400" | "400" | "monel_400" => Ok(HfMaterial::Alloy400),
            _ => Err(CorrosionError::SpecialistRateRequired(
                "HF 환경에서 탄소강/Alloy 400 외 재질은 문헌의 부식 속도를 사용해야 합니다.",
            )),
        }
    }
}

/// HF 조회 입력. 키는 표에 적힌 그대로 쓴다.
#[derive(Debug, Clone)]
pub struct HfInput {
    /// 최고 사용 온도 키(예: `"<=80"`, `"80_120"`)
    pub temperature_key: String,
    /// 탄소강은 농도 범위 키, Alloy 400은 농도 값(%)
    pub hf_concentration: String,
    /// 탄소강 전용: 유속 키
    pub velocity: Option<String>,
    /// Alloy 400 전용: 폭기 여부
    pub aerated: Option<Presence>,
}

/// 온도 키 목록(앞쪽 숫자 기준 정렬). 선택지 안내용.
pub fn temperature_keys(table: &ReferenceTable, unit: UnitSystem) -> Result<Vec<String>> {
    GridAdapter::new(table, unit)?.keys()
}

/// HF 부식 속도를 조회한다.
///
/// 탄소강: 온도 → HF 범위 → 유속, Alloy 400: 온도 → 폭기(`Yes`/`No`) → HF 농도.
pub fn compute_hf(
    material: HfMaterial,
    input: &HfInput,
    table: &ReferenceTable,
    unit: UnitSystem,
) -> Result<CorrosionRate> {
    let by_temperature = GridAdapter::new(table, unit)?.descend(input.temperature_key.trim())?;
    let rate = match material {
        HfMaterial::CarbonSteel => {
            let velocity = input.velocity.as_deref().ok_or_else(|| {
                CorrosionError::InvalidAdjustmentInput("탄소강은 유속 값이 필요합니다.".into())
            })?;
            by_temperature
                .descend(input.hf_concentration.trim())?
                .descend_key(velocity.trim())?
                .value()?
        }
        HfMaterial::Alloy400 => {
            let aerated = input.aerated.ok_or_else(|| {
                CorrosionError::InvalidAdjustmentInput("Alloy 400은 폭기 여부가 필요합니다.".into())
            })?;
            by_temperature
                .descend(aerated.table_key())?
                .descend_key(input.hf_concentration.trim())?
                .value()?
        }
    };
    debug!(?material, rate, "HF 표 조회");
    Ok(CorrosionRate::new(rate, unit.rate_unit()))
}
