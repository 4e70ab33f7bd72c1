//! 径向树
//!
//! 层级严格对应 以太网节点 -> 关联 IP 的归属关系，而不是通信链路：
//! root -> eth -> ip。视图中没有以太网节点时，IP 节点直接挂在 root 下。

use indexmap::IndexSet;
use tracing::trace;

use super::filter::NodeFilter;
use super::projection::{EdgeKind, Projection, ProjectionKind, ViewEdge, ViewNode, ViewNodeKind};
use crate::topo::{Node, Registry, link_id};

pub const ROOT_ID: &str = "root";

pub(crate) fn build(registry: &Registry, filter: &NodeFilter) -> Projection {
    let mut nodes = vec![ViewNode {
        id: ROOT_ID.to_string(),
        kind: ViewNodeKind::Root,
        addr: None,
        vendor: None,
        cast_type: None,
        sender: false,
        receiver: false,
        parent: None,
    }];
    let mut edges = Vec::new();

    let surviving = registry
        .nodes()
        .iter()
        .filter(|n| filter.allows(n.kind()))
        .collect::<Vec<_>>();
    let has_eth = surviving.iter().any(|n| matches!(n, Node::Eth(_)));

    if has_eth {
        for eth in surviving.iter().filter_map(|n| n.as_eth()) {
            attach(&mut nodes, &mut edges, ROOT_ID, registry, &eth.id);
            for ip_id in &eth.associated_ips {
                let Some(ip) = registry.node(ip_id) else {
                    continue;
                };
                if filter.allows(ip.kind()) {
                    attach(&mut nodes, &mut edges, &eth.id, registry, ip_id);
                }
            }
        }
    } else {
        for node in &surviving {
            attach(&mut nodes, &mut edges, ROOT_ID, registry, node.id());
        }
    }

    trace!(nodes = nodes.len(), edges = edges.len(), has_eth, "径向树投影");
    Projection {
        kind: ProjectionKind::Radial,
        nodes,
        edges,
    }
}

fn attach(
    nodes: &mut Vec<ViewNode>,
    edges: &mut Vec<ViewEdge>,
    parent: &str,
    registry: &Registry,
    child_id: &str,
) {
    let Some(child) = registry.node(child_id) else {
        return;
    };
    nodes.push(ViewNode::from_node(child, Some(parent)));
    edges.push(ViewEdge {
        id: link_id(parent, child_id),
        source: parent.to_string(),
        target: child_id.to_string(),
        kind: EdgeKind::Tree,
        count: 1,
        one_way: false,
    });
}

/// 把链路脉冲 id 翻译成树边 id。
///
/// 只有 `<mac>-<mac>` 形式（以太网通信链路）能翻译：两个端点各自的 root 边代替它脉冲。
/// eth-ip 与 ip-ip 的脉冲在这个投影里没有对应的边，直接丢弃。
pub fn translate_pulse<'a, I>(pulse: I) -> IndexSet<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut out = IndexSet::new();
    for id in pulse {
        if let Some((a, b)) = split_mac_pair(id) {
            out.insert(link_id(ROOT_ID, a));
            out.insert(link_id(ROOT_ID, b));
        }
    }
    out
}

/// `xx:xx:xx:xx:xx:xx-yy:yy:yy:yy:yy:yy` -> 两个 MAC
fn split_mac_pair(id: &str) -> Option<(&str, &str)> {
    let (a, b) = id.split_once('-')?;
    (is_mac(a) && is_mac(b)).then_some((a, b))
}

fn is_mac(s: &str) -> bool {
    let mut groups = 0;
    for group in s.split(':') {
        if group.len() != 2 || !group.chars().all(|c| c.is_ascii_hexdigit()) {
            return false;
        }
        groups += 1;
    }
    groups == 6
}
