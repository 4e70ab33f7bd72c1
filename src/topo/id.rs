//! 标识符
//!
//! 字符串 id 是对外的稳定身份；arena 下标只在注册表内部使用。

/// 节点在注册表 arena 中的下标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeIdx(pub usize);

/// 链路在注册表 arena 中的下标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LinkIdx(pub usize);

/// id 索引中的一项：节点或链路
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Slot {
    Node(NodeIdx),
    Link(LinkIdx),
}

/// IP 节点 id：`"mac,ip"`（IP 为原始形式，不做缩写）
pub fn ip_node_id(mac: &str, ip: &str) -> String {
    format!("{mac},{ip}")
}

/// 链路 id：`"<source>-<target>"`，按首次观测方向生成
pub fn link_id(source: &str, target: &str) -> String {
    format!("{source}-{target}")
}
