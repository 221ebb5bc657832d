//! 문자열 키 해석: 단위계 하위 트리, 숫자 문자열 키, 온도 구간 키, 대소문자 맞춤.

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{CorrosionError, Result};
use crate::interpolation::round_to_nearest;
use crate::units::UnitSystem;

/// 단위계별 하위 트리 키 후보. 격자형 표와 레코드형 표의 표기가 다르다.
pub fn unit_keys(unit: UnitSystem) -> [&'static str; 2] {
    match unit {
        UnitSystem::Fahrenheit => ["temperature_in_f", "temperature in f°"],
        UnitSystem::Celsius => ["temperature_in_c", "temperature in c°"],
    }
}

/// 단위계에 맞는 하위 트리를 찾는다. 후보 중 먼저 있는 키를 쓴다.
pub fn unit_subtree<'a>(root: &'a Value, unit: UnitSystem, table: &str) -> Result<&'a Value> {
    let candidates = unit_keys(unit);
    candidates
        .iter()
        .find_map(|k| root.get(*k))
        .ok_or_else(|| {
            CorrosionError::MissingTableKey(format!("{table}: {}", candidates.join(" | ")))
        })
}

pub fn as_object<'a>(node: &'a Value, ctx: &str) -> Result<&'a Map<String, Value>> {
    node.as_object()
        .ok_or_else(|| CorrosionError::MissingTableKey(format!("{ctx}: 객체가 아님")))
}

/// 정확히 같은 문자열 키의 자식
pub fn child<'a>(node: &'a Value, key: &str, ctx: &str) -> Result<&'a Value> {
    node.get(key)
        .ok_or_else(|| CorrosionError::MissingTableKey(format!("{ctx} → {key}")))
}

/// 숫자 값이 같은 키의 자식. `"1"`과 `"1.0"`을 같은 키로 본다.
pub fn numeric_child<'a>(node: &'a Value, value: f64, ctx: &str) -> Result<(&'a str, &'a Value)> {
    let map = as_object(node, ctx)?;
    map.iter()
        .find(|(k, _)| parse_number(k) == Some(value))
        .map(|(k, v)| (k.as_str(), v))
        .ok_or_else(|| CorrosionError::MissingTableKey(format!("{ctx} → {value}")))
}

/// 표의 숫자 값. `null`은 해당 조건의 데이터가 없다는 뜻이다.
pub fn as_rate(node: &Value, ctx: &str) -> Result<f64> {
    match node {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| CorrosionError::MissingTableKey(format!("{ctx}: 숫자 변환 실패"))),
        // 일부 표는 숫자를 문자열로 적어 둔다.
        Value::String(s) => parse_number(s)
            .ok_or_else(|| CorrosionError::MissingTableKey(format!("{ctx}: 숫자가 아님 ({s})"))),
        Value::Null => Err(CorrosionError::MissingTableKey(format!("{ctx}: 데이터 없음"))),
        _ => Err(CorrosionError::MissingTableKey(format!("{ctx}: 숫자가 아님"))),
    }
}

/// 숫자 문자열 키를 해석한다.
pub fn parse_number(key: &str) -> Option<f64> {
    key.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// 정렬용 숫자: `"<=450"`, `">750"`, `"80_120"` 같은 키의 앞쪽 숫자를 쓴다.
pub fn sort_value(key: &str) -> Option<f64> {
    let trimmed = key.trim().trim_start_matches(['<', '>', '=']);
    let head = trimmed.split(['_', ' ']).next().unwrap_or(trimmed);
    parse_number(head)
}

/// 객체 키를 숫자 앞부분 기준으로 정렬해 돌려준다. 숫자가 없는 키는 뒤로 간다.
pub fn sorted_keys(node: &Value, ctx: &str) -> Result<Vec<String>> {
    let mut keys: Vec<String> = as_object(node, ctx)?.keys().cloned().collect();
    keys.sort_by(|a, b| match (sort_value(a), sort_value(b)) {
        (Some(x), Some(y)) => x.total_cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.cmp(b),
    });
    Ok(keys)
}

/// 구간값을 표 키 형식(`450`, `0.5`)으로 적는다.
pub fn format_breakpoint(value: f64) -> String {
    value.to_string()
}

/// 연속 온도를 표의 온도 구간 키로 바꾼 결과.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketKey {
    pub key: String,
    pub breakpoint: f64,
}

/// 온도를 구간 키로 바꾼다.
///
/// 최솟값 이하는 `"<=min"`, 최댓값 초과는 `">max"`, 그 외는 가장 가까운 구간값이다.
pub fn temperature_bucket_key(breakpoints: &[f64], temperature: f64) -> Result<BucketKey> {
    let breakpoint = round_to_nearest(breakpoints, temperature)?;
    let (min, max) = (breakpoints[0], breakpoints[breakpoints.len() - 1]);
    let key = if temperature <= min {
        format!("<={}", format_breakpoint(min))
    } else if temperature > max {
        format!(">{}", format_breakpoint(max))
    } else {
        format_breakpoint(breakpoint)
    };
    debug!(temperature, key = %key, "온도 구간 키");
    Ok(BucketKey { key, breakpoint })
}

/// 첫 글자만 대문자로, 나머지는 소문자로 맞춘다(`"gas oil"` → `"Gas oil"`).
pub fn capitalize_first(s: &str) -> String {
    let lower = s.trim().to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
