//! 모양이 제각각인 참조표를 보간 함수가 쓰는 점 집합/격자로 바꾸는 어댑터.

use serde_json::Value;
use tracing::{debug, warn};

use super::keys::{as_object, as_rate, child, numeric_child, parse_number, sorted_keys, unit_subtree};
use super::ReferenceTable;
use crate::error::{CorrosionError, Result};
use crate::interpolation::{Grid, PointSet, Range, RangeRow, Slice};
use crate::units::UnitSystem;

/// 표 한 부분을 1차원 점 집합으로 바꾸는 공통 인터페이스.
pub trait TableAdapter {
    /// 어떤 점 집합을 꺼낼지 지정하는 질의
    type Query: ?Sized;

    fn to_point_set(&self, query: &Self::Query) -> Result<PointSet>;
}

/// `축1 키 → 축2 키 → 값` 형태의 중첩 객체.
#[derive(Debug, Clone, Copy)]
pub struct GridAdapter<'a> {
    node: &'a Value,
    ctx: &'a str,
}

impl<'a> GridAdapter<'a> {
    /// 표의 단위계 하위 트리를 격자로 본다.
    pub fn new(table: &'a ReferenceTable, unit: UnitSystem) -> Result<Self> {
        let node = unit_subtree(table.root(), unit, table.name())?;
        Ok(Self::at(node, table.name()))
    }

    /// 임의의 하위 노드를 격자로 본다.
    pub fn at(node: &'a Value, ctx: &'a str) -> Self {
        Self { node, ctx }
    }

    /// 문자열 키가 정확히 같은 하위 노드로 내려간다.
    pub fn descend(&self, key: &str) -> Result<GridAdapter<'a>> {
        Ok(Self::at(child(self.node, key, self.ctx)?, self.ctx))
    }

    /// 숫자 값이 같은 키의 하위 노드로 내려간다.
    pub fn descend_numeric(&self, value: f64) -> Result<GridAdapter<'a>> {
        let (_, node) = numeric_child(self.node, value, self.ctx)?;
        Ok(Self::at(node, self.ctx))
    }

    /// 정확한 키를 먼저 찾고, 없으면 숫자 값이 같은 키를 찾는다.
    pub fn descend_key(&self, key: &str) -> Result<GridAdapter<'a>> {
        if let Some(node) = self.node.get(key) {
            return Ok(Self::at(node, self.ctx));
        }
        match parse_number(key) {
            Some(v) => self.descend_numeric(v),
            None => self.descend(key),
        }
    }

    /// 이 단계의 키 목록(숫자 앞부분 기준 정렬)
    pub fn keys(&self) -> Result<Vec<String>> {
        sorted_keys(self.node, self.ctx)
    }

    /// 이 노드의 값 자체를 숫자로 읽는다.
    pub fn value(&self) -> Result<f64> {
        as_rate(self.node, self.ctx)
    }

    /// 축 1 키마다 하나씩, 축 2 점 집합을 만든다. 숫자가 아닌 키와 `null` 값은 건너뛴다.
    pub fn slices(&self) -> Result<Vec<Slice>> {
        let map = as_object(self.node, self.ctx)?;
        let mut slices = Vec::with_capacity(map.len());
        for (key, row) in map {
            let Some(k) = parse_number(key) else {
                warn!(table = self.ctx, key = %key, "숫자가 아닌 키는 보간에서 제외");
                continue;
            };
            slices.push(Slice::new(k, row_points(row, self.ctx)?));
        }
        slices.sort_by(|a, b| a.key.total_cmp(&b.key));
        Ok(slices)
    }

    /// 두 단계 숫자 키를 격자로 만든다.
    pub fn to_grid(&self) -> Result<Grid> {
        let mut entries = Vec::new();
        for slice in self.slices()? {
            for p in slice.points.points() {
                entries.push((slice.key, p.x, p.y));
            }
        }
        if entries.is_empty() {
            return Err(CorrosionError::EmptyInput("격자로 만들 값이 없습니다."));
        }
        Ok(Grid::from_entries(entries))
    }
}

impl TableAdapter for GridAdapter<'_> {
    type Query = str;

    /// 축 1 키 한 줄을 `축2 → 값` 점 집합으로 만든다.
    fn to_point_set(&self, axis1_key: &str) -> Result<PointSet> {
        row_points(child(self.node, axis1_key, self.ctx)?, self.ctx)
    }
}

fn row_points(row: &Value, ctx: &str) -> Result<PointSet> {
    let map = as_object(row, ctx)?;
    let pairs = map.iter().filter_map(|(k, v)| {
        let x = parse_number(k)?;
        match as_rate(v, ctx) {
            Ok(y) => Some((x, y)),
            Err(_) => {
                debug!(table = ctx, key = %k, "값 없는 칸 제외");
                None
            }
        }
    });
    Ok(PointSet::from_pairs(pairs))
}

/// 레코드형 표 질의: 합금, 운전 온도 구간값, 선택적 하위 필드(`oxygen` 등).
#[derive(Debug, Clone, PartialEq)]
pub struct RecordQuery {
    pub alloy: String,
    pub temperature: f64,
    pub field: Option<String>,
}

impl RecordQuery {
    pub fn new(alloy: impl Into<String>, temperature: f64) -> Self {
        Self {
            alloy: alloy.into(),
            temperature,
            field: None,
        }
    }

    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

/// `[{ alloy, cl_concentration?, temperature: { "100": 값 | { 필드: 값 } } }]` 형태의 레코드 목록.
#[derive(Debug, Clone, Copy)]
pub struct RecordListAdapter<'a> {
    records: &'a [Value],
    ctx: &'a str,
}

impl<'a> RecordListAdapter<'a> {
    pub fn new(table: &'a ReferenceTable, unit: UnitSystem) -> Result<Self> {
        let node = unit_subtree(table.root(), unit, table.name())?;
        let records = node.as_array().ok_or_else(|| {
            CorrosionError::MissingTableKey(format!("{}: 레코드 배열이 아님", table.name()))
        })?;
        Ok(Self {
            records,
            ctx: table.name(),
        })
    }

    /// 합금명이 같은 레코드들. 공백과 대소문자 차이는 무시한다.
    pub fn records_for(&self, alloy: &str) -> Vec<&'a Value> {
        let wanted = normalize(alloy);
        self.records
            .iter()
            .filter(|r| {
                r.get("alloy")
                    .and_then(Value::as_str)
                    .is_some_and(|a| normalize(a) == wanted)
            })
            .collect()
    }

    /// 표에 있는 합금명 목록(등장 순서, 중복 제거)
    pub fn alloys(&self) -> Vec<&'a str> {
        let mut out: Vec<&str> = Vec::new();
        for a in self.records.iter().filter_map(|r| r.get("alloy")?.as_str()) {
            if !out.contains(&a) {
                out.push(a);
            }
        }
        out
    }

    /// 레코드 하나에서 온도/필드에 해당하는 값을 읽는다.
    fn record_rate(&self, record: &Value, temperature: f64, field: Option<&str>) -> Result<f64> {
        let temps = child(record, "temperature", self.ctx)?;
        let (_, cell) = numeric_child(temps, temperature, self.ctx)?;
        match field {
            Some(f) => as_rate(child(cell, f, self.ctx)?, self.ctx),
            None => as_rate(cell, self.ctx),
        }
    }

    /// 합금의 첫 레코드에서 값을 읽는다(농도 축이 없는 표).
    pub fn rate_for(&self, query: &RecordQuery) -> Result<f64> {
        let record = self
            .records_for(&query.alloy)
            .into_iter()
            .next()
            .ok_or_else(|| {
                CorrosionError::MissingTableKey(format!("{} → alloy {}", self.ctx, query.alloy))
            })?;
        self.record_rate(record, query.temperature, query.field.as_deref())
    }
}

impl TableAdapter for RecordListAdapter<'_> {
    type Query = RecordQuery;

    /// 합금 레코드들을 `염화물 농도(wt%) → 값` 점 집합으로 만든다.
    fn to_point_set(&self, query: &RecordQuery) -> Result<PointSet> {
        let records = self.records_for(&query.alloy);
        if records.is_empty() {
            return Err(CorrosionError::MissingTableKey(format!(
                "{} → alloy {}",
                self.ctx, query.alloy
            )));
        }
        let mut pairs = Vec::with_capacity(records.len());
        for record in records {
            let conc = record
                .get("cl_concentration")
                .and_then(|c| as_rate(c, self.ctx).ok())
                .ok_or_else(|| {
                    CorrosionError::MissingTableKey(format!("{} → cl_concentration", self.ctx))
                })?;
            pairs.push((
                conc,
                self.record_rate(record, query.temperature, query.field.as_deref())?,
            ));
        }
        Ok(PointSet::from_pairs(pairs))
    }
}

fn normalize(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

/// `{ "ph": [..], "ci_concentration": [[lo, hi] | 값, ..] }` 형태의 범위 띠 표.
#[derive(Debug, Clone, Copy)]
pub struct RangeBandAdapter<'a> {
    keys: &'a [Value],
    ranges: &'a [Value],
    ctx: &'a str,
}

impl<'a> RangeBandAdapter<'a> {
    pub fn new(table: &'a ReferenceTable, key_field: &str, range_field: &str) -> Result<Self> {
        let ctx = table.name();
        let array = |field: &str| -> Result<&'a [Value]> {
            child(table.root(), field, ctx)?
                .as_array()
                .map(Vec::as_slice)
                .ok_or_else(|| CorrosionError::MissingTableKey(format!("{ctx} → {field}: 배열이 아님")))
        };
        Ok(Self {
            keys: array(key_field)?,
            ranges: array(range_field)?,
            ctx,
        })
    }

    /// 키와 범위를 짝지은 행 목록
    pub fn rows(&self) -> Result<Vec<RangeRow>> {
        if self.keys.len() != self.ranges.len() {
            return Err(CorrosionError::MissingTableKey(format!(
                "{}: 키 {}개와 범위 {}개가 맞지 않음",
                self.ctx,
                self.keys.len(),
                self.ranges.len()
            )));
        }
        self.keys
            .iter()
            .zip(self.ranges)
            .map(|(k, r)| {
                Ok(RangeRow {
                    key: as_rate(k, self.ctx)?,
                    range: parse_range(r, self.ctx)?,
                })
            })
            .collect()
    }
}

impl TableAdapter for RangeBandAdapter<'_> {
    type Query = ();

    /// `키 → 범위 중앙값` 점 집합
    fn to_point_set(&self, _: &()) -> Result<PointSet> {
        Ok(PointSet::from_pairs(
            self.rows()?.into_iter().map(|r| (r.key, r.range.midpoint())),
        ))
    }
}

fn parse_range(node: &Value, ctx: &str) -> Result<Range> {
    match node {
        Value::Array(bounds) => match bounds.as_slice() {
            [lo, hi] => Ok(Range::Band {
                min: as_rate(lo, ctx)?,
                max: as_rate(hi, ctx)?,
            }),
            [single] => Ok(Range::Scalar(as_rate(single, ctx)?)),
            _ => Err(CorrosionError::MissingTableKey(format!(
                "{ctx}: 범위는 [min, max] 형식이어야 합니다"
            ))),
        },
        other => Ok(Range::Scalar(as_rate(other, ctx)?)),
    }
}
