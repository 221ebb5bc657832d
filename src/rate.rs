use serde::Serialize;

use crate::units::RateUnit;

/// 경고가 어느 축에서 발생했는지 표시한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Temperature,
    Ph,
    Concentration,
    Velocity,
}

impl Axis {
    pub fn label(self) -> &'static str {
        match self {
            Axis::Temperature => "temperature",
            Axis::Ph => "pH",
            Axis::Concentration => "concentration",
            Axis::Velocity => "velocity",
        }
    }
}

/// 표 범위를 벗어나 경계 정책이 적용됐음을 알리는 권고 표시.
///
/// 계산을 중단하지 않으며 UI가 안내 문구로 보여준다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "tag", content = "axis", rename_all = "kebab-case")]
pub enum RateWarning {
    /// 최소 구간 아래로 외삽함
    ExtrapolatedLow(Axis),
    /// 최대 구간 위로 외삽했거나 최댓값으로 고정함
    ExtrapolatedHigh(Axis),
    /// 최소 구간 값으로 고정함
    ClampedLow(Axis),
    /// 최대 구간 값으로 고정함
    ClampedHigh(Axis),
    /// 고유속 배수(×5)가 적용됨
    HighVelocity,
}

impl RateWarning {
    /// UI 배너용 태그 문자열
    pub fn tag(&self) -> &'static str {
        match self {
            RateWarning::ExtrapolatedLow(_) => "extrapolated-low",
            RateWarning::ExtrapolatedHigh(_) => "extrapolated-high",
            RateWarning::ClampedLow(_) => "clamped-low",
            RateWarning::ClampedHigh(_) => "clamped-high",
            RateWarning::HighVelocity => "high-velocity",
        }
    }

    pub fn axis(&self) -> Option<Axis> {
        match *self {
            RateWarning::ExtrapolatedLow(a)
            | RateWarning::ExtrapolatedHigh(a)
            | RateWarning::ClampedLow(a)
            | RateWarning::ClampedHigh(a) => Some(a),
            RateWarning::HighVelocity => None,
        }
    }
}

impl std::fmt::Display for RateWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.axis() {
            Some(axis) => write!(f, "{} ({})", self.tag(), axis.label()),
            None => f.write_str(self.tag()),
        }
    }
}

/// 최종 부식 속도. 값, 단위, 경고 목록을 함께 담는다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrosionRate {
    /// 음수가 아닌 부식 속도(반올림 전 원시 값)
    pub value: f64,
    pub unit: RateUnit,
    pub warnings: Vec<RateWarning>,
}

impl CorrosionRate {
    pub fn new(value: f64, unit: RateUnit) -> Self {
        Self {
            value,
            unit,
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(mut self, warnings: impl IntoIterator<Item = RateWarning>) -> Self {
        for w in warnings {
            self.push_warning(w);
        }
        self
    }

    /// 같은 경고는 한 번만 기록한다.
    pub fn push_warning(&mut self, warning: RateWarning) {
        if !self.warnings.contains(&warning) {
            self.warnings.push(warning);
        }
    }

    /// 보정 계수를 곱한 새 값을 돌려준다.
    pub fn scaled(mut self, factor: f64) -> Self {
        self.value *= factor;
        self
    }

    pub fn has_warning(&self, tag: &str) -> bool {
        self.warnings.iter().any(|w| w.tag() == tag)
    }
}

impl std::fmt::Display for CorrosionRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} {}", self.value, self.unit)
    }
}

/// 소수 둘째 자리 반올림(표시 규약)
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
