//! 부식 속도 계산 코어의 오류 분류.

use std::path::PathBuf;

/// 한 번의 계산 호출을 중단시키는 오류.
///
/// 표 범위를 벗어난 입력은 오류가 아니라 경고(`RateWarning`)로 처리한다.
/// 여기에는 호출자/표 불일치 또는 명백한 입력 위반만 들어간다.
#[derive(thiserror::Error, Debug)]
pub enum CorrosionError {
    /// 보간할 점이나 표 행이 하나도 없음
    #[error("보간할 데이터가 없습니다: {0}")]
    EmptyInput(&'static str),
    /// 표에 필요한 키가 없음
    #[error("표에 키가 없습니다: {0}")]
    MissingTableKey(String),
    /// 쌍선형 보간에 필요한 모서리 값이 없음
    #[error("격자 모서리 값이 없습니다: ({axis1}, {axis2})")]
    MissingGridCorner { axis1: f64, axis2: f64 },
    /// 선언된 유효 범위를 벗어난 입력
    #[error("유효 범위를 벗어났습니다: {0}")]
    OutOfDomain(String),
    /// NaN 또는 무한대 입력
    #[error("숫자가 아닌 입력: {name} = {value}")]
    InvalidNumericInput { name: &'static str, value: f64 },
    /// 보정 계수 규칙이 알 수 없는 값을 받음
    #[error("알 수 없는 보정 입력: {0}")]
    InvalidAdjustmentInput(String),
    /// 재질에 대응하는 표가 없음
    #[error("알 수 없는 재질: {0}")]
    UnknownMaterial(String),
    /// 표 밖의 조건이라 전문가 입력 부식 속도가 필요함
    #[error("전문가 입력 부식 속도가 필요합니다: {0}")]
    SpecialistRateRequired(&'static str),
    /// 표 파일 입출력 오류
    #[error("표 파일을 읽을 수 없습니다 ({path}): {source}")]
    TableIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 표 파일 JSON 파싱 오류
    #[error("표 파일 파싱 오류 ({path}): {source}")]
    TableParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, CorrosionError>;

/// NaN 전파를 막기 위해 유한한 값인지 확인한다.
pub fn ensure_finite(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CorrosionError::InvalidNumericInput { name, value })
    }
}
