//! 会话配置
//!
//! 可选的 JSON 配置文件；所有字段都有默认值，CLI 参数在此基础上覆盖。

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::Error;
use crate::view::{NodeFilter, ProjectionKind};

pub const DEFAULT_BATCH_INTERVAL_MS: u64 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// 两次 build+diff 之间的间隔（毫秒）
    pub batch_interval_ms: u64,
    pub projection: ProjectionKind,
    /// 启用的节点类别：`eth`、`ip`、`ipv4`、`ipv6`
    pub nodes: Vec<String>,
    /// IEEE oui.csv 路径
    pub oui_path: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            batch_interval_ms: DEFAULT_BATCH_INTERVAL_MS,
            projection: ProjectionKind::Flat,
            nodes: vec!["eth".to_string(), "ip".to_string()],
            oui_path: None,
        }
    }
}

impl SessionConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn batch_interval(&self) -> Duration {
        // 间隔为 0 时 tokio interval 会 panic
        Duration::from_millis(self.batch_interval_ms.max(1))
    }

    pub fn node_filter(&self) -> Result<NodeFilter, Error> {
        NodeFilter::from_kinds(&self.nodes)
    }
}
