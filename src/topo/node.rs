//! 节点类型
//!
//! 以太网节点和 IP 节点组成一个封闭的枚举；两者之间的关联只保存对方的 id。

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::classify::CastType;
use crate::record::{IpVersion, Role};

/// 节点的地址类别（用于视图过滤）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Eth,
    Ipv4,
    Ipv6,
}

/// 以太网（MAC）节点
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EthNode {
    pub id: String,
    pub addr: String,
    pub vendor: Option<String>,
    pub cast_type: CastType,
    pub sender: bool,
    pub receiver: bool,
    /// 观测到的、挂在这个 MAC 上的 IP 节点 id（按发现顺序）
    pub associated_ips: IndexSet<String>,
}

/// IP 节点，id 为 `"mac,ip"`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IpNode {
    pub id: String,
    /// 显示地址（IPv6 已缩写）
    pub addr: String,
    pub ip_version: IpVersion,
    pub cast_type: CastType,
    pub sender: bool,
    pub receiver: bool,
    pub associated_eths: IndexSet<String>,
}

/// 拓扑节点
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    Eth(EthNode),
    Ip(IpNode),
}

impl Node {
    pub fn id(&self) -> &str {
        match self {
            Node::Eth(n) => &n.id,
            Node::Ip(n) => &n.id,
        }
    }

    pub fn addr(&self) -> &str {
        match self {
            Node::Eth(n) => &n.addr,
            Node::Ip(n) => &n.addr,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Eth(_) => NodeKind::Eth,
            Node::Ip(n) => match n.ip_version {
                IpVersion::V4 => NodeKind::Ipv4,
                IpVersion::V6 => NodeKind::Ipv6,
            },
        }
    }

    pub fn cast_type(&self) -> CastType {
        match self {
            Node::Eth(n) => n.cast_type,
            Node::Ip(n) => n.cast_type,
        }
    }

    pub fn sender(&self) -> bool {
        match self {
            Node::Eth(n) => n.sender,
            Node::Ip(n) => n.sender,
        }
    }

    pub fn receiver(&self) -> bool {
        match self {
            Node::Eth(n) => n.receiver,
            Node::Ip(n) => n.receiver,
        }
    }

    pub fn vendor(&self) -> Option<&str> {
        match self {
            Node::Eth(n) => n.vendor.as_deref(),
            Node::Ip(_) => None,
        }
    }

    /// 对端类型节点的 id 集合
    pub fn associated(&self) -> &IndexSet<String> {
        match self {
            Node::Eth(n) => &n.associated_ips,
            Node::Ip(n) => &n.associated_eths,
        }
    }

    pub fn as_eth(&self) -> Option<&EthNode> {
        match self {
            Node::Eth(n) => Some(n),
            Node::Ip(_) => None,
        }
    }

    pub fn as_ip(&self) -> Option<&IpNode> {
        match self {
            Node::Ip(n) => Some(n),
            Node::Eth(_) => None,
        }
    }

    /// 记录一次以 `role` 身份的出现；标志只会从 false 变为 true
    pub(crate) fn mark(&mut self, role: Role) {
        let (sender, receiver) = match self {
            Node::Eth(n) => (&mut n.sender, &mut n.receiver),
            Node::Ip(n) => (&mut n.sender, &mut n.receiver),
        };
        match role {
            Role::Source => *sender = true,
            Role::Destination => *receiver = true,
        }
    }

    /// 登记一条反向关联（只存 id，不持有对方）
    pub(crate) fn associate(&mut self, other_id: &str) {
        let set = match self {
            Node::Eth(n) => &mut n.associated_ips,
            Node::Ip(n) => &mut n.associated_eths,
        };
        if !set.contains(other_id) {
            set.insert(other_id.to_string());
        }
    }
}
