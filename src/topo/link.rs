//! 链路类型
//!
//! 接口链路（eth-ip）表示地址归属；通信链路（eth-eth、ip-ip）表示观测到的会话，带计数。

use serde::{Deserialize, Serialize};

use super::id::link_id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkKind {
    #[serde(rename = "eth-eth")]
    EthEth,
    #[serde(rename = "eth-ip")]
    EthIp,
    #[serde(rename = "ip-ip")]
    IpIp,
}

impl LinkKind {
    /// 通信链路在重复观测时计数递增；接口链路不递增
    pub fn is_communication(self) -> bool {
        matches!(self, LinkKind::EthEth | LinkKind::IpIp)
    }
}

/// 聚合后的链路
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub id: String,
    pub source_id: String,
    pub target_id: String,
    pub kind: LinkKind,
    /// 观测次数（>= 1，单调不减）
    pub count: u64,
}

impl Link {
    /// 创建新链路，计数从 1 开始
    pub fn new(source_id: &str, target_id: &str, kind: LinkKind) -> Self {
        Self {
            id: link_id(source_id, target_id),
            source_id: source_id.to_string(),
            target_id: target_id.to_string(),
            kind,
            count: 1,
        }
    }
}
