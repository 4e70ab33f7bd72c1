//! 错误类型
//!
//! 记录校验错误之外，外层接口（配置、OUI 表、CLI 参数、监听任务）共用的错误。

use crate::record::MalformedRecordError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Malformed(#[from] MalformedRecordError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("oui table error: {0}")]
    Csv(#[from] csv::Error),
    #[error("unknown node kind: {0}")]
    InvalidNodeKind(String),
    #[error("unknown projection: {0}")]
    InvalidProjection(String),
    #[error("listener task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
