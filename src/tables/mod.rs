//! 참조표(JSON) 표현과 키 해석, 어댑터, 표 카탈로그.

pub mod adapters;
pub mod catalog;
pub mod keys;

pub use adapters::{GridAdapter, RangeBandAdapter, RecordListAdapter, RecordQuery, TableAdapter};
pub use catalog::{route_material, MaterialRoute, TableId, TableStore};
pub use keys::{capitalize_first, temperature_bucket_key, BucketKey};

use serde_json::Value;

use crate::error::Result;
use crate::units::UnitSystem;

/// 불러온 뒤에는 바뀌지 않는 참조표 하나.
///
/// 내용은 해석하지 않은 JSON 그대로 두고, 필요한 키만 읽는다.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceTable {
    name: String,
    root: Value,
}

impl ReferenceTable {
    pub fn new(name: impl Into<String>, root: Value) -> Self {
        Self {
            name: name.into(),
            root,
        }
    }

    /// JSON 문자열에서 표를 만든다.
    pub fn from_json_str(name: impl Into<String>, json: &str) -> serde_json::Result<Self> {
        Ok(Self::new(name, serde_json::from_str(json)?))
    }

    /// 오류 메시지에 쓰이는 표 이름
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// 단위계 하위 트리
    pub fn unit_tree(&self, unit: UnitSystem) -> Result<&Value> {
        keys::unit_subtree(&self.root, unit, &self.name)
    }

    /// 경로를 따라 내려간 단계의 키 목록(정렬됨). 선택지 안내에 쓴다.
    pub fn available_keys(&self, path: &[&str]) -> Result<Vec<String>> {
        let mut node = &self.root;
        for key in path {
            node = keys::child(node, key, &self.name)?;
        }
        keys::sorted_keys(node, &self.name)
    }
}
