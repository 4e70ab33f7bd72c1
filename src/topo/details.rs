//! 节点详情
//!
//! 点击节点时展示的信息：地址、关联地址、以及它参与过的每条记录。

use serde::Serialize;

use super::node::Node;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowDirection {
    /// 节点是记录的源
    Outbound,
    /// 节点是记录的目的
    Inbound,
}

/// 一条与节点相关的记录摘要
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Flow {
    pub direction: FlowDirection,
    /// 对端地址：以太网节点为对端 MAC，IP 节点为对端 IP（IPv6 已缩写）
    pub remote: String,
    /// 以太网节点为以太类型标签，IP 节点为 IP 协议标签
    pub protocol: String,
    /// 对端端口（仅 IP 节点）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    pub timestamp: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeDetails {
    pub node: Node,
    /// 关联节点的显示地址
    pub associated: Vec<String>,
    /// 最新的在前
    pub flows: Vec<Flow>,
}
