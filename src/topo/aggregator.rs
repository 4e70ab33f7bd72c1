//! 拓扑聚合器
//!
//! 逐条消费数据包记录，维护注册表、脉冲集合与原始记录日志。
//! 注册表只由聚合器修改，其它组件只拿到只读引用。

use indexmap::IndexSet;
use tracing::{debug, trace, warn};

use super::details::{Flow, FlowDirection, NodeDetails};
use super::id::{ip_node_id, link_id};
use super::link::{Link, LinkKind};
use super::node::{EthNode, IpNode, Node};
use super::registry::Registry;
use super::stats::Stats;
use crate::classify::{
    OuiTable, eth_type_label, ip_cast_type, ip_protocol_label, mac_cast_type, shorten_ipv6,
};
use crate::record::{Endpoint, IpVersion, MalformedRecordError, PacketRecord, Role};

#[derive(Debug, Default)]
pub struct Aggregator {
    registry: Registry,
    /// 自上次构建以来被触及的链路 id
    pulse: IndexSet<String>,
    /// 已接受记录的追加日志
    log: Vec<PacketRecord>,
    oui: Option<OuiTable>,
    stats: Stats,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用 OUI 表为缺少厂商信息的 MAC 补全厂商
    pub fn with_oui(oui: OuiTable) -> Self {
        Self {
            oui: Some(oui),
            ..Self::default()
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn records(&self) -> &[PacketRecord] {
        &self.log
    }

    /// 当前批次的脉冲集合（只读）
    pub fn pulse(&self) -> &IndexSet<String> {
        &self.pulse
    }

    /// 取走并清空脉冲集合
    pub fn take_pulse(&mut self) -> IndexSet<String> {
        std::mem::take(&mut self.pulse)
    }

    pub(crate) fn record_batch(&mut self) {
        self.stats.batches += 1;
    }

    /// 消费一条记录。
    ///
    /// 缺少 MAC 的记录被拒绝且不修改任何状态；缺少 IP 只跳过 IP 相关步骤。
    /// 重复的记录不会产生重复实体，但通信链路计数会继续增长。
    #[tracing::instrument(skip(self, record), fields(src = ?record.src_mac, dst = ?record.dst_mac))]
    pub fn ingest(&mut self, record: PacketRecord) -> Result<(), MalformedRecordError> {
        let (src, dst) = match record.endpoints() {
            Ok(endpoints) => endpoints,
            Err(err) => {
                self.stats.rejected += 1;
                warn!(%err, "丢弃格式错误的记录");
                return Err(err);
            }
        };

        let src_ip_id = self.observe_endpoint(&src);

        // 通信链路只在处理源角色时建立
        self.touch_link(src.mac, dst.mac, LinkKind::EthEth);
        if let (Some(src_ip_id), Some(dst_ip)) = (&src_ip_id, dst.ip) {
            let dst_ip_id = ip_node_id(dst.mac, dst_ip);
            self.touch_link(src_ip_id, &dst_ip_id, LinkKind::IpIp);
        }

        self.observe_endpoint(&dst);

        trace!(pulse = self.pulse.len(), "记录已聚合");
        self.log.push(record);
        self.stats.records += 1;
        Ok(())
    }

    /// 处理一个端点：以太网节点、IP 节点、两者间的接口链路。返回 IP 节点 id。
    fn observe_endpoint(&mut self, ep: &Endpoint<'_>) -> Option<String> {
        self.observe_eth(ep);

        let ip = ep.ip?;
        let ip_id = ip_node_id(ep.mac, ip);
        self.observe_ip(ep, ip, &ip_id);

        if let Some(eth) = self.registry.node_mut(ep.mac) {
            eth.associate(&ip_id);
        }
        if let Some(ip_node) = self.registry.node_mut(&ip_id) {
            ip_node.associate(ep.mac);
        }

        self.touch_link(ep.mac, &ip_id, LinkKind::EthIp);
        Some(ip_id)
    }

    fn observe_eth(&mut self, ep: &Endpoint<'_>) {
        let oui = self.oui.as_ref();
        if let Some(node) = self.registry.node_mut(ep.mac) {
            node.mark(ep.role);
            if let Node::Eth(eth) = node {
                if eth.vendor.is_none() {
                    eth.vendor = resolve_vendor(oui, ep);
                }
            }
            return;
        }

        let node = EthNode {
            id: ep.mac.to_string(),
            addr: ep.mac.to_string(),
            vendor: resolve_vendor(oui, ep),
            cast_type: mac_cast_type(ep.mac),
            sender: ep.role == Role::Source,
            receiver: ep.role == Role::Destination,
            associated_ips: IndexSet::new(),
        };
        debug!(id = %node.id, cast = ?node.cast_type, vendor = ?node.vendor, "新以太网节点");
        self.registry.insert_node(Node::Eth(node));
        self.stats.eth_nodes += 1;
    }

    fn observe_ip(&mut self, ep: &Endpoint<'_>, ip: &str, ip_id: &str) {
        if let Some(node) = self.registry.node_mut(ip_id) {
            node.mark(ep.role);
            return;
        }

        let ip_version = ep.ip_version.unwrap_or(IpVersion::resolve(None, ip));
        let addr = match ip_version {
            IpVersion::V4 => ip.to_string(),
            IpVersion::V6 => shorten_ipv6(ip),
        };
        let node = IpNode {
            id: ip_id.to_string(),
            addr,
            ip_version,
            cast_type: ip_cast_type(ip, ep.mac),
            sender: ep.role == Role::Source,
            receiver: ep.role == Role::Destination,
            associated_eths: IndexSet::new(),
        };
        debug!(id = %node.id, addr = %node.addr, cast = ?node.cast_type, "新 IP 节点");
        self.registry.insert_node(Node::Ip(node));
        self.stats.ip_nodes += 1;
    }

    /// 创建链路或更新已有链路，并把 id 放进脉冲集合。
    ///
    /// 通信链路按无向处理：反向流量命中首次观测方向生成的那条链路，id 不会反向重建。
    fn touch_link(&mut self, source_id: &str, target_id: &str, kind: LinkKind) {
        let mut id = link_id(source_id, target_id);
        if kind.is_communication() && !self.registry.contains(&id) {
            let reverse = link_id(target_id, source_id);
            if self.registry.link(&reverse).is_some() {
                id = reverse;
            }
        }
        match self.registry.link_mut(&id) {
            Some(link) => {
                if link.kind.is_communication() {
                    link.count += 1;
                }
                trace!(id = %link.id, count = link.count, "链路再次观测");
            }
            None => {
                debug!(id = %id, ?kind, "新链路");
                self.registry.insert_link(Link::new(source_id, target_id, kind));
                self.stats.links += 1;
            }
        }
        self.pulse.insert(id);
    }

    /// 该节点参与过的全部原始记录，最新的在前
    pub fn lookup_associated(&self, node_id: &str) -> Vec<&PacketRecord> {
        let Some(node) = self.registry.node(node_id) else {
            return Vec::new();
        };
        self.log
            .iter()
            .rev()
            .filter(|record| participation(record, node).is_some())
            .collect()
    }

    /// 节点详情：基本信息、关联地址以及逐条通信记录
    pub fn node_details(&self, node_id: &str) -> Option<NodeDetails> {
        let node = self.registry.node(node_id)?;
        let associated = node
            .associated()
            .iter()
            .filter_map(|id| self.registry.node(id))
            .map(|n| n.addr().to_string())
            .collect();

        let flows = self
            .log
            .iter()
            .rev()
            .filter_map(|record| {
                let role = participation(record, node)?;
                Some(flow_for(record, node, role))
            })
            .collect();

        Some(NodeDetails {
            node: node.clone(),
            associated,
            flows,
        })
    }
}

fn resolve_vendor(oui: Option<&OuiTable>, ep: &Endpoint<'_>) -> Option<String> {
    ep.vendor
        .or_else(|| oui.and_then(|table| table.lookup(ep.mac)))
        .map(str::to_string)
}

/// 节点在记录中的角色（源优先）
fn participation(record: &PacketRecord, node: &Node) -> Option<Role> {
    let hits = |role: Role| {
        let Ok(ep) = record.endpoint(role) else {
            return false;
        };
        match node {
            Node::Eth(eth) => ep.mac == eth.id,
            Node::Ip(ip) => ep
                .ip
                .is_some_and(|addr| ip_node_id(ep.mac, addr) == ip.id),
        }
    };
    if hits(Role::Source) {
        Some(Role::Source)
    } else if hits(Role::Destination) {
        Some(Role::Destination)
    } else {
        None
    }
}

fn flow_for(record: &PacketRecord, node: &Node, role: Role) -> Flow {
    let (direction, remote_role) = match role {
        Role::Source => (FlowDirection::Outbound, Role::Destination),
        Role::Destination => (FlowDirection::Inbound, Role::Source),
    };
    let remote = record.endpoint(remote_role).ok();

    match node {
        Node::Eth(_) => Flow {
            direction,
            remote: remote.map(|ep| ep.mac.to_string()).unwrap_or_default(),
            protocol: eth_type_label(record.eth_type).into_owned(),
            port: None,
            timestamp: record.timestamp,
        },
        Node::Ip(_) => {
            let remote_ip = remote
                .and_then(|ep| ep.ip.map(|ip| (ip, ep.ip_version)))
                .map(|(ip, version)| match version {
                    Some(IpVersion::V6) => shorten_ipv6(ip),
                    _ => ip.to_string(),
                })
                .unwrap_or_default();
            let port = match remote_role {
                Role::Source => record.src_port,
                Role::Destination => record.dst_port,
            };
            Flow {
                direction,
                remote: remote_ip,
                protocol: record
                    .ip_proto
                    .map(|p| ip_protocol_label(p).into_owned())
                    .unwrap_or_default(),
                port,
                timestamp: record.timestamp,
            }
        }
    }
}
