//! 会话
//!
//! 对外暴露的接口：会话上下文、配置、推送来源以及按固定周期批处理的监听任务。

// 子模块声明
mod config;
mod context;
mod listener;
mod source;

// 重新导出公共接口
pub use config::{DEFAULT_BATCH_INTERVAL_MS, SessionConfig};
pub use context::Session;
pub use listener::Listener;
pub use source::{JsonLinesSource, RecordSink, RecordSource, SinkClosed, Subscription};
