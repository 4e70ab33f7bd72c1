//! 会话上下文
//!
//! 一个会话拥有唯一的聚合器实例、当前的节点过滤器和上一次的投影快照。
//! 切换投影类型不会清空注册表，只会让下一次差分从空快照开始。

use tracing::{debug, info};

use super::config::SessionConfig;
use crate::Error;
use crate::classify::OuiTable;
use crate::record::{MalformedRecordError, PacketRecord};
use crate::topo::{Aggregator, NodeDetails, Registry, Stats};
use crate::view::{NodeFilter, Projection, ProjectionKind, ViewDiff};

#[derive(Debug, Default)]
pub struct Session {
    aggregator: Aggregator,
    filter: NodeFilter,
    previous: Option<Projection>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_aggregator(aggregator: Aggregator) -> Self {
        Self {
            aggregator,
            ..Self::default()
        }
    }

    /// 按配置创建会话（加载 OUI 表、设置节点过滤器）
    pub fn from_config(config: &SessionConfig) -> Result<Self, Error> {
        let aggregator = match &config.oui_path {
            Some(path) => Aggregator::with_oui(OuiTable::from_path(path)?),
            None => Aggregator::new(),
        };
        let mut session = Self::with_aggregator(aggregator);
        session.set_node_filter(config.node_filter()?);
        Ok(session)
    }

    pub fn ingest(&mut self, record: PacketRecord) -> Result<(), MalformedRecordError> {
        self.aggregator.ingest(record)
    }

    pub fn set_node_filter(&mut self, filter: NodeFilter) {
        debug!(?filter, "更新节点过滤器");
        self.filter = filter;
    }

    pub fn node_filter(&self) -> NodeFilter {
        self.filter
    }

    /// 构建指定投影并与上一次快照做差分；本批次的脉冲集合随之清空。
    #[tracing::instrument(skip(self))]
    pub fn build_and_diff(&mut self, kind: ProjectionKind) -> ViewDiff {
        let next = Projection::build(kind, self.aggregator.registry(), &self.filter);
        let pulse = self.aggregator.take_pulse();

        let (prev, reset) = match self.previous.take() {
            Some(prev) if prev.kind == kind => (prev, false),
            Some(prev) => {
                info!(from = ?prev.kind, to = ?kind, "🔁 切换投影，旧视图整体退出");
                (Projection::empty(kind), true)
            }
            None => (Projection::empty(kind), false),
        };

        let diff = ViewDiff::between(&prev, &next, &pulse, reset);
        self.previous = Some(next);
        self.aggregator.record_batch();

        debug!(
            enter_nodes = diff.nodes.enter.len(),
            update_nodes = diff.nodes.update.len(),
            exit_nodes = diff.nodes.exit.len(),
            enter_edges = diff.edges.enter.len(),
            update_edges = diff.edges.update.len(),
            exit_edges = diff.edges.exit.len(),
            pulses = diff.pulse_edge_ids.len(),
            "差分完成"
        );
        diff
    }

    /// 该节点参与过的原始记录，最新的在前
    pub fn lookup_associated(&self, node_id: &str) -> Vec<&PacketRecord> {
        self.aggregator.lookup_associated(node_id)
    }

    pub fn node_details(&self, node_id: &str) -> Option<NodeDetails> {
        self.aggregator.node_details(node_id)
    }

    /// 上一次交给渲染器的投影
    pub fn previous(&self) -> Option<&Projection> {
        self.previous.as_ref()
    }

    pub fn registry(&self) -> &Registry {
        self.aggregator.registry()
    }

    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    pub fn stats(&self) -> &Stats {
        self.aggregator.stats()
    }
}
