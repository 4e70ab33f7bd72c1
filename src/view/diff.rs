//! 视图差分
//!
//! 前后两次投影按 id 对齐，节点与边分别计算 enter / update / exit：
//! - enter  = next \ prev，保持 next 的顺序
//! - update = next ∩ prev，携带新数据，保持 next 的顺序
//! - exit   = prev \ next，保持 prev 的顺序

use std::collections::HashSet;

use indexmap::IndexSet;
use serde::Serialize;

use super::projection::{Projection, ProjectionKind, ViewEdge, ViewNode};
use super::scale::LinkWidthScale;

/// 以稳定 id 作为差分键
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for ViewNode {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for ViewEdge {
    fn key(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Delta<T> {
    pub enter: Vec<T>,
    pub update: Vec<T>,
    pub exit: Vec<T>,
}

impl<T> Default for Delta<T> {
    fn default() -> Self {
        Self {
            enter: Vec::new(),
            update: Vec::new(),
            exit: Vec::new(),
        }
    }
}

impl<T> Delta<T> {
    pub fn is_empty(&self) -> bool {
        self.enter.is_empty() && self.update.is_empty() && self.exit.is_empty()
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Delta<U> {
        Delta {
            enter: self.enter.into_iter().map(&mut f).collect(),
            update: self.update.into_iter().map(&mut f).collect(),
            exit: self.exit.into_iter().map(&mut f).collect(),
        }
    }
}

/// 按 id 的集合差分
pub fn diff_keyed<'a, T: Keyed>(prev: &'a [T], next: &'a [T]) -> Delta<&'a T> {
    let prev_keys: HashSet<&str> = prev.iter().map(Keyed::key).collect();
    let next_keys: HashSet<&str> = next.iter().map(Keyed::key).collect();

    let (update, enter): (Vec<_>, Vec<_>) =
        next.iter().partition(|item| prev_keys.contains(item.key()));
    let exit = prev
        .iter()
        .filter(|item| !next_keys.contains(item.key()))
        .collect();

    Delta {
        enter,
        update,
        exit,
    }
}

/// 一条边的变化：边数据 + 线宽 + 是否脉冲
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeChange {
    #[serde(flatten)]
    pub edge: ViewEdge,
    pub width: f64,
    /// 仅 update 中、且 id 在已解析脉冲集合里的边为 true
    pub pulse: bool,
}

/// 一次 build+diff 周期交给渲染器的结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewDiff {
    pub projection: ProjectionKind,
    /// 投影类型发生切换：渲染器应先拆掉旧投影
    pub reset: bool,
    pub nodes: Delta<ViewNode>,
    pub edges: Delta<EdgeChange>,
    /// 解析到本投影 id 空间、且存在于本投影中的脉冲边 id
    pub pulse_edge_ids: Vec<String>,
    /// 被标记脉冲的边的两端节点
    pub pulse_node_ids: Vec<String>,
}

impl ViewDiff {
    /// 计算两次投影之间的差分。`pulse` 是聚合器的原始链路 id 集合。
    pub fn between(prev: &Projection, next: &Projection, pulse: &IndexSet<String>, reset: bool) -> Self {
        // 只保留本投影里实际存在的边：被过滤掉的节点、被去掉的 ip-ip 链路不外露
        let visible: HashSet<&str> = next.edges.iter().map(Keyed::key).collect();
        let resolved: IndexSet<String> = Projection::resolve_pulse(next.kind, pulse)
            .into_iter()
            .filter(|id| visible.contains(id.as_str()))
            .collect();

        let nodes = diff_keyed(&prev.nodes, &next.nodes).map(Clone::clone);

        let next_scale = width_scale(next);
        let prev_scale = width_scale(prev);
        let edge_delta = diff_keyed(&prev.edges, &next.edges);
        let edges = Delta {
            enter: edge_delta
                .enter
                .into_iter()
                .map(|e| change(e, &next_scale, false))
                .collect(),
            update: edge_delta
                .update
                .into_iter()
                .map(|e| change(e, &next_scale, resolved.contains(&e.id)))
                .collect(),
            exit: edge_delta
                .exit
                .into_iter()
                .map(|e| change(e, &prev_scale, false))
                .collect::<Vec<_>>(),
        };

        let mut pulse_nodes = IndexSet::new();
        for c in edges.update.iter().filter(|c| c.pulse) {
            pulse_nodes.insert(c.edge.source.clone());
            pulse_nodes.insert(c.edge.target.clone());
        }

        Self {
            projection: next.kind,
            reset,
            nodes,
            edges,
            pulse_edge_ids: resolved.into_iter().collect(),
            pulse_node_ids: pulse_nodes.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

/// 平面图按计数缩放线宽；径向树的边恒为最小线宽
fn width_scale(projection: &Projection) -> LinkWidthScale {
    match projection.kind {
        ProjectionKind::Flat => LinkWidthScale::from_counts(projection.edges.iter().map(|e| e.count)),
        ProjectionKind::Radial => LinkWidthScale::constant(),
    }
}

fn change(edge: &ViewEdge, scale: &LinkWidthScale, pulse: bool) -> EdgeChange {
    EdgeChange {
        edge: edge.clone(),
        width: scale.width(edge.count),
        pulse,
    }
}
