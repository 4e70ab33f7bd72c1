//! 拓扑模型
//!
//! 此模块包含拓扑的核心组件：节点、链路、注册表以及负责维护它们的聚合器。

// 子模块声明
mod aggregator;
mod details;
mod id;
mod link;
mod node;
mod registry;
mod stats;

// 重新导出公共接口
pub use aggregator::Aggregator;
pub use details::{Flow, FlowDirection, NodeDetails};
pub use id::{LinkIdx, NodeIdx, ip_node_id, link_id};
pub use link::{Link, LinkKind};
pub use node::{EthNode, IpNode, Node, NodeKind};
pub use registry::Registry;
pub use stats::Stats;
