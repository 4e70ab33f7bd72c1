//! 平面地址图
//!
//! 节点按类别过滤；链路保留两端都存活的那些。只要视图里还有以太网节点，
//! ip-ip 链路就被去掉：接口链路已经把 IP 连到了所属的以太网节点上。

use std::collections::HashMap;

use tracing::trace;

use super::filter::NodeFilter;
use super::projection::{EdgeKind, Projection, ProjectionKind, ViewEdge, ViewNode};
use crate::topo::{LinkKind, Node, NodeKind, Registry};

pub(crate) fn build(registry: &Registry, filter: &NodeFilter) -> Projection {
    let kept: HashMap<&str, &Node> = registry
        .nodes()
        .iter()
        .filter(|n| filter.allows(n.kind()))
        .map(|n| (n.id(), n))
        .collect();
    let has_eth = kept.values().any(|n| n.kind() == NodeKind::Eth);

    let nodes = registry
        .nodes()
        .iter()
        .filter(|n| kept.contains_key(n.id()))
        .map(|n| ViewNode::from_node(n, None))
        .collect::<Vec<_>>();

    let edges = registry
        .links()
        .iter()
        .filter(|l| !(has_eth && l.kind == LinkKind::IpIp))
        .filter_map(|l| {
            kept.get(l.source_id.as_str())?;
            let target = kept.get(l.target_id.as_str())?;
            Some(ViewEdge {
                id: l.id.clone(),
                source: l.source_id.clone(),
                target: l.target_id.clone(),
                kind: EdgeKind::from(l.kind),
                count: l.count,
                one_way: !target.sender(),
            })
        })
        .collect::<Vec<_>>();

    trace!(nodes = nodes.len(), edges = edges.len(), has_eth, "平面图投影");
    Projection {
        kind: ProjectionKind::Flat,
        nodes,
        edges,
    }
}
