//! 표 파일 목록과 로더.
//!
//! 계산 코어는 이미 메모리에 올라온 [`ReferenceTable`]만 받는다.
//! 파일을 읽고 캐시하는 일은 이 모듈을 쓰는 호출자 쪽에서 한다.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use super::ReferenceTable;
use crate::error::{CorrosionError, Result};

/// 표 파일 하나를 가리킨다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableId {
    // 산성 사워 워터
    Table2B102,
    Table2B103,
    // HCl
    Table2B22,
    Table2B23,
    Table2B25,
    Table2B26,
    // 황산
    Table2B52,
    Table2B52M,
    Table2B53,
    Table2B54,
    Table2B55,
    Table2B56,
    Table2B57,
    // 고온 황화 + 나프텐산
    Table2B32,
    Table2B33,
    Table2B34,
    Table2B35,
    Table2B36,
    Table2B37,
    Table2B38,
    Table2B39,
    Table2B310,
    // 고온 H2S/H2
    Table2B42,
    Table2B43,
    Table2B44,
    Table2B45,
    Table2B46,
    Table2B47,
    // HF
    Table2B62,
    Table2B63,
    // 고온 산화
    Table2B92,
}

impl TableId {
    pub const ALL: [TableId; 31] = [
        TableId::Table2B102,
        TableId::Table2B103,
        TableId::Table2B22,
        TableId::Table2B23,
        TableId::Table2B25,
        TableId::Table2B26,
        TableId::Table2B52,
        TableId::Table2B52M,
        TableId::Table2B53,
        TableId::Table2B54,
        TableId::Table2B55,
        TableId::Table2B56,
        TableId::Table2B57,
        TableId::Table2B32,
        TableId::Table2B33,
        TableId::Table2B34,
        TableId::Table2B35,
        TableId::Table2B36,
        TableId::Table2B37,
        TableId::Table2B38,
        TableId::Table2B39,
        TableId::Table2B310,
        TableId::Table2B42,
        TableId::Table2B43,
        TableId::Table2B44,
        TableId::Table2B45,
        TableId::Table2B46,
        TableId::Table2B47,
        TableId::Table2B62,
        TableId::Table2B63,
        TableId::Table2B92,
    ];

    /// API 581 표 번호
    pub fn label(self) -> &'static str {
        match self {
            TableId::Table2B102 => "2.B.10.2",
            TableId::Table2B103 => "2.B.10.3",
            TableId::Table2B22 => "2.B.2.2",
            TableId::Table2B23 => "2.B.2.3",
            TableId::Table2B25 => "2.B.2.5",
            TableId::Table2B26 => "2.B.2.6",
            TableId::Table2B52 => "2.B.5.2",
            TableId::Table2B52M => "2.B.5.2M",
            TableId::Table2B53 => "2.B.5.3",
            TableId::Table2B54 => "2.B.5.4",
            TableId::Table2B55 => "2.B.5.5",
            TableId::Table2B56 => "2.B.5.6",
            TableId::Table2B57 => "2.B.5.7",
            TableId::Table2B32 => "2.B.3.2",
            TableId::Table2B33 => "2.B.3.3",
            TableId::Table2B34 => "2.B.3.4",
            TableId::Table2B35 => "2.B.3.5",
            TableId::Table2B36 => "2.B.3.6",
            TableId::Table2B37 => "2.B.3.7",
            TableId::Table2B38 => "2.B.3.8",
            TableId::Table2B39 => "2.B.3.9",
            TableId::Table2B310 => "2.B.3.10",
            TableId::Table2B42 => "2.B.4.2",
            TableId::Table2B43 => "2.B.4.3",
            TableId::Table2B44 => "2.B.4.4",
            TableId::Table2B45 => "2.B.4.5",
            TableId::Table2B46 => "2.B.4.6",
            TableId::Table2B47 => "2.B.4.7",
            TableId::Table2B62 => "2.B.6.2",
            TableId::Table2B63 => "2.B.6.3",
            TableId::Table2B92 => "2.B.9.2",
        }
    }

    /// 표 디렉터리 기준 상대 경로(확장자 제외)
    pub fn file_stem(self) -> &'static str {
        match self {
            TableId::Table2B102 => "acid_sw_corrosion/table_2b102",
            TableId::Table2B103 => "acid_sw_corrosion/table_2b103",
            TableId::Table2B22 => "hcl_corrosion/table_2b22",
            TableId::Table2B23 => "hcl_corrosion/table_2b23",
            TableId::Table2B25 => "hcl_corrosion/table_2b25",
            TableId::Table2B26 => "hcl_corrosion/table_2b26",
            TableId::Table2B52 => "sa_corrosion/table_2b52",
            TableId::Table2B52M => "sa_corrosion/table_2b52M",
            TableId::Table2B53 => "sa_corrosion/table_2b53",
            TableId::Table2B54 => "sa_corrosion/table_2b54",
            TableId::Table2B55 => "sa_corrosion/table_2b55",
            TableId::Table2B56 => "sa_corrosion/table_2b56",
            TableId::Table2B57 => "sa_corrosion/table_2b57",
            TableId::Table2B32 => "ht_sna_corrosion/table_2b32",
            TableId::Table2B33 => "ht_sna_corrosion/table_2b33",
            TableId::Table2B34 => "ht_sna_corrosion/table_2b34",
            TableId::Table2B35 => "ht_sna_corrosion/table_2b35",
            TableId::Table2B36 => "ht_sna_corrosion/table_2b36",
            TableId::Table2B37 => "ht_sna_corrosion/table_2b37",
            TableId::Table2B38 => "ht_sna_corrosion/table_2b38",
            TableId::Table2B39 => "ht_sna_corrosion/table_2b39",
            TableId::Table2B310 => "ht_sna_corrosion/table_2b310",
            TableId::Table2B42 => "ht_h2s2_corrosion/table_2b42",
            TableId::Table2B43 => "ht_h2s2_corrosion/table_2b43",
            TableId::Table2B44 => "ht_h2s2_corrosion/table_2b44",
            TableId::Table2B45 => "ht_h2s2_corrosion/table_2b45",
            TableId::Table2B46 => "ht_h2s2_corrosion/table_2b46",
            TableId::Table2B47 => "ht_h2s2_corrosion/table_2b47",
            TableId::Table2B62 => "hf_corrosion/table_2b62",
            TableId::Table2B63 => "hf_corrosion/table_2b63",
            TableId::Table2B92 => "ht_oxidation/table_2b92",
        }
    }

    /// 확장자 후보를 붙인 경로들. 배포된 표는 `.json`과 `.JSON`이 섞여 있다.
    pub fn candidate_paths(self, dir: &Path) -> [PathBuf; 2] {
        let stem = self.file_stem();
        [
            dir.join(format!("{stem}.json")),
            dir.join(format!("{stem}.JSON")),
        ]
    }
}

impl std::fmt::Display for TableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Table {}", self.label())
    }
}

/// 재질명 하나를 대상(표 등)에 대응시킨다.
#[derive(Debug, Clone, Copy)]
pub struct MaterialRoute<T> {
    pub name: &'static str,
    pub target: T,
}

impl<T> MaterialRoute<T> {
    pub const fn new(name: &'static str, target: T) -> Self {
        Self { name, target }
    }
}

/// 재질명으로 대상을 찾는다. 대소문자와 공백 개수는 구분하지 않는다.
pub fn route_material<T: Copy>(routes: &[MaterialRoute<T>], material: &str) -> Result<T> {
    let wanted = normalize_material(material);
    routes
        .iter()
        .find(|r| normalize_material(r.name) == wanted)
        .map(|r| r.target)
        .ok_or_else(|| CorrosionError::UnknownMaterial(material.trim().to_string()))
}

/// 선택 가능한 재질명 목록
pub fn material_names<T>(routes: &[MaterialRoute<T>]) -> Vec<&'static str> {
    routes.iter().map(|r| r.name).collect()
}

fn normalize_material(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// 표 디렉터리에서 표를 한 번만 읽어 공유한다.
#[derive(Debug, Default)]
pub struct TableStore {
    dir: PathBuf,
    cache: HashMap<TableId, Arc<ReferenceTable>>,
}

impl TableStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cache: HashMap::new(),
        }
    }

    /// 표를 돌려준다. 처음 요청이면 파일에서 읽는다.
    pub fn load(&mut self, id: TableId) -> Result<Arc<ReferenceTable>> {
        if let Some(table) = self.cache.get(&id) {
            debug!(table = %id, "캐시된 표 사용");
            return Ok(Arc::clone(table));
        }
        let table = Arc::new(read_table(&self.dir, id)?);
        self.cache.insert(id, Arc::clone(&table));
        Ok(table)
    }

    /// 파일 대신 메모리의 표를 등록한다. 같은 표가 있으면 바꾼다.
    pub fn insert(&mut self, id: TableId, table: ReferenceTable) -> Arc<ReferenceTable> {
        let table = Arc::new(table);
        self.cache.insert(id, Arc::clone(&table));
        table
    }

    pub fn is_loaded(&self, id: TableId) -> bool {
        self.cache.contains_key(&id)
    }
}

fn read_table(dir: &Path, id: TableId) -> Result<ReferenceTable> {
    let [lower, upper] = id.candidate_paths(dir);
    let path = if lower.exists() || !upper.exists() {
        lower
    } else {
        upper
    };
    let content = fs::read_to_string(&path).map_err(|source| CorrosionError::TableIo {
        path: path.clone(),
        source,
    })?;
    let root = serde_json::from_str(&content).map_err(|source| CorrosionError::TableParse {
        path: path.clone(),
        source,
    })?;
    info!(table = %id, path = %path.display(), "표 로드");
    Ok(ReferenceTable::new(id.to_string(), root))
}
