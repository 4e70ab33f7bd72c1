//! 投影
//!
//! 从注册表派生出的、供渲染器使用的节点/边集合。两种投影共用同一组视图类型，
//! id 空间各自独立。

use std::str::FromStr;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use super::filter::NodeFilter;
use super::{flat, radial};
use crate::Error;
use crate::classify::CastType;
use crate::topo::{LinkKind, Node, NodeKind, Registry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionKind {
    /// 平面地址图
    #[default]
    Flat,
    /// 以 root 为根的径向树
    Radial,
}

impl FromStr for ProjectionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flat" | "graph" | "network" => Ok(Self::Flat),
            "radial" | "tree" | "radial_tree" => Ok(Self::Radial),
            _ => Err(Error::InvalidProjection(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewNodeKind {
    /// 径向树的合成根
    Root,
    Eth,
    Ipv4,
    Ipv6,
}

impl From<NodeKind> for ViewNodeKind {
    fn from(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Eth => Self::Eth,
            NodeKind::Ipv4 => Self::Ipv4,
            NodeKind::Ipv6 => Self::Ipv6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeKind {
    #[serde(rename = "eth-eth")]
    EthEth,
    #[serde(rename = "eth-ip")]
    EthIp,
    #[serde(rename = "ip-ip")]
    IpIp,
    /// 径向树的父子边
    #[serde(rename = "tree")]
    Tree,
}

impl From<LinkKind> for EdgeKind {
    fn from(kind: LinkKind) -> Self {
        match kind {
            LinkKind::EthEth => Self::EthEth,
            LinkKind::EthIp => Self::EthIp,
            LinkKind::IpIp => Self::IpIp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewNode {
    pub id: String,
    pub kind: ViewNodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cast_type: Option<CastType>,
    /// 渲染器的不透明度提示
    pub sender: bool,
    pub receiver: bool,
    /// 径向树中的父节点 id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

impl ViewNode {
    pub(crate) fn from_node(node: &Node, parent: Option<&str>) -> Self {
        Self {
            id: node.id().to_string(),
            kind: node.kind().into(),
            addr: Some(node.addr().to_string()),
            vendor: node.vendor().map(str::to_string),
            cast_type: Some(node.cast_type()),
            sender: node.sender(),
            receiver: node.receiver(),
            parent: parent.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub kind: EdgeKind,
    /// 链路观测次数；树边恒为 1
    pub count: u64,
    /// 目标从未作为源出现过（单向通信）
    pub one_way: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projection {
    pub kind: ProjectionKind,
    pub nodes: Vec<ViewNode>,
    pub edges: Vec<ViewEdge>,
}

impl Projection {
    pub fn empty(kind: ProjectionKind) -> Self {
        Self {
            kind,
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// 只读地从注册表构建投影
    pub fn build(kind: ProjectionKind, registry: &Registry, filter: &NodeFilter) -> Self {
        match kind {
            ProjectionKind::Flat => flat::build(registry, filter),
            ProjectionKind::Radial => radial::build(registry, filter),
        }
    }

    /// 把聚合器的链路脉冲 id 映射到本投影的边 id 空间
    pub fn resolve_pulse<'a, I>(kind: ProjectionKind, pulse: I) -> IndexSet<String>
    where
        I: IntoIterator<Item = &'a String>,
    {
        match kind {
            ProjectionKind::Flat => pulse.into_iter().cloned().collect(),
            ProjectionKind::Radial => radial::translate_pulse(pulse),
        }
    }

    pub fn node(&self, id: &str) -> Option<&ViewNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&ViewEdge> {
        self.edges.iter().find(|e| e.id == id)
    }
}
