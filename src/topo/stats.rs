//! 统计信息
//!
//! 会话级计数器。

use serde::Serialize;

/// 聚合统计
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Stats {
    /// 已接受的记录数
    pub records: u64,
    /// 因格式错误被丢弃的记录数
    pub rejected: u64,
    pub eth_nodes: u64,
    pub ip_nodes: u64,
    pub links: u64,
    /// 已完成的 build+diff 周期数
    pub batches: u64,
}
