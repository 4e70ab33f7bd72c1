//! 拓扑注册表
//!
//! 节点、链路各自按发现顺序存放在 arena 里；一张 id -> 下标 的索引负责唯一性判定。
//! 节点之间的关联只保存 id，不存在所有权环。

use std::collections::HashMap;

use super::id::{LinkIdx, NodeIdx, Slot};
use super::link::Link;
use super::node::Node;

#[derive(Debug, Default)]
pub struct Registry {
    nodes: Vec<Node>,
    links: Vec<Link>,
    index: HashMap<String, Slot>,
}

impl Registry {
    /// 按发现顺序的全部节点
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// 按发现顺序的全部链路
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        match self.index.get(id)? {
            Slot::Node(idx) => self.nodes.get(idx.0),
            Slot::Link(_) => None,
        }
    }

    pub fn link(&self, id: &str) -> Option<&Link> {
        match self.index.get(id)? {
            Slot::Link(idx) => self.links.get(idx.0),
            Slot::Node(_) => None,
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub(crate) fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        match self.index.get(id)? {
            Slot::Node(idx) => self.nodes.get_mut(idx.0),
            Slot::Link(_) => None,
        }
    }

    pub(crate) fn link_mut(&mut self, id: &str) -> Option<&mut Link> {
        match self.index.get(id)? {
            Slot::Link(idx) => self.links.get_mut(idx.0),
            Slot::Node(_) => None,
        }
    }

    /// 插入新节点；调用方保证 id 尚未被占用
    pub(crate) fn insert_node(&mut self, node: Node) -> NodeIdx {
        debug_assert!(!self.index.contains_key(node.id()), "duplicate id {}", node.id());
        let idx = NodeIdx(self.nodes.len());
        self.index.insert(node.id().to_string(), Slot::Node(idx));
        self.nodes.push(node);
        idx
    }

    /// 插入新链路；调用方保证 id 尚未被占用
    pub(crate) fn insert_link(&mut self, link: Link) -> LinkIdx {
        debug_assert!(!self.index.contains_key(&link.id), "duplicate id {}", link.id);
        let idx = LinkIdx(self.links.len());
        self.index.insert(link.id.clone(), Slot::Link(idx));
        self.links.push(link);
        idx
    }
}
