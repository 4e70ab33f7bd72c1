//! OUI 厂商表
//!
//! 读取 IEEE `oui.csv`（第 2 列为 6 位十六进制分配号，第 3 列为组织名），
//! 按 MAC 前三个字节（`aa:bb:cc`）查询厂商。

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use crate::Error;

const PREFIX_LEN: usize = 8;

#[derive(Debug, Clone, Default)]
pub struct OuiTable {
    vendors: HashMap<String, String>,
}

impl OuiTable {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, csv::Error> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);
        let mut table = Self::default();
        for row in reader.records() {
            let row = row?;
            let (Some(assignment), Some(org)) = (row.get(1), row.get(2)) else {
                continue;
            };
            let Some(prefix) = format_assignment(assignment) else {
                debug!(assignment, "跳过无法识别的 OUI 分配号");
                continue;
            };
            table.vendors.insert(prefix, org.trim().to_string());
        }
        Ok(table)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let table = Self::from_reader(file)?;
        info!(path = %path.display(), entries = table.len(), "📇 OUI 厂商表已加载");
        Ok(table)
    }

    /// 手动登记一个前缀（`aa:bb:cc` 或 `aabbcc`）
    pub fn insert(&mut self, prefix: &str, vendor: impl Into<String>) {
        let key = format_assignment(prefix).unwrap_or_else(|| prefix.to_ascii_lowercase());
        self.vendors.insert(key, vendor.into());
    }

    pub fn lookup(&self, mac: &str) -> Option<&str> {
        let prefix = mac.get(..PREFIX_LEN)?.to_ascii_lowercase();
        self.vendors.get(&prefix).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vendors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vendors.is_empty()
    }
}

/// `001A2B` / `00:1a:2b` -> `00:1a:2b`
fn format_assignment(raw: &str) -> Option<String> {
    let hex: String = raw.trim().chars().filter(|c| *c != ':' && *c != '-').collect();
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let hex = hex.to_ascii_lowercase();
    Some(format!("{}:{}:{}", &hex[0..2], &hex[2..4], &hex[4..6]))
}
