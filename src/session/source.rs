//! 记录来源
//!
//! 推送通道的抽象：来源把每条记录交给 [`RecordSink`]，订阅返回可取消的 [`Subscription`]。

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::record::PacketRecord;

/// 接收端已关闭，记录原样退回
#[derive(Debug, thiserror::Error)]
#[error("record sink closed")]
pub struct SinkClosed(pub PacketRecord);

/// 记录入口（`onRecord` 回调）
#[derive(Debug, Clone)]
pub struct RecordSink {
    tx: mpsc::UnboundedSender<PacketRecord>,
}

impl RecordSink {
    pub(crate) fn new(tx: mpsc::UnboundedSender<PacketRecord>) -> Self {
        Self { tx }
    }

    /// 投递一条记录；从不阻塞
    pub fn push(&self, record: PacketRecord) -> Result<(), SinkClosed> {
        self.tx.send(record).map_err(|e| SinkClosed(e.0))
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// 一次订阅；丢弃或调用 [`Subscription::unsubscribe`] 即取消
#[derive(Debug)]
pub struct Subscription {
    handle: JoinHandle<()>,
}

impl Subscription {
    pub fn from_task(handle: JoinHandle<()>) -> Self {
        Self { handle }
    }

    pub fn unsubscribe(self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// 推送式记录来源
pub trait RecordSource {
    fn subscribe(self, sink: RecordSink) -> Subscription;
}

/// 逐行读取 JSON 记录；同时接受 SSE 的 `data: {...}` 行。
/// 空行与 SSE 注释行被跳过，无法解析的行记录日志后跳过。
pub struct JsonLinesSource<R> {
    reader: R,
}

impl<R> JsonLinesSource<R>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R> RecordSource for JsonLinesSource<R>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    fn subscribe(self, sink: RecordSink) -> Subscription {
        let handle = tokio::spawn(async move {
            let mut lines = self.reader.lines();
            let mut forwarded = 0u64;
            loop {
                let line = match lines.next_line().await {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(err) => {
                        warn!(%err, "读取输入失败，停止订阅");
                        break;
                    }
                };
                let Some(payload) = payload_of(&line) else {
                    continue;
                };
                let record = match serde_json::from_str::<PacketRecord>(payload) {
                    Ok(record) => record,
                    Err(err) => {
                        warn!(%err, line = %payload, "无法解析的记录行");
                        continue;
                    }
                };
                if sink.push(record).is_err() {
                    debug!("接收端已关闭，停止订阅");
                    break;
                }
                forwarded += 1;
            }
            info!(forwarded, "📭 输入结束");
        });
        Subscription::from_task(handle)
    }
}

/// 取出一行中的 JSON 负载
pub(crate) fn payload_of(line: &str) -> Option<&str> {
    let line = line.trim();
    if line.is_empty() || line.starts_with(':') {
        return None;
    }
    let payload = match line.strip_prefix("data:") {
        Some(rest) => rest.trim_start(),
        None if line.starts_with('{') => line,
        // 其它 SSE 字段（event:、id:、retry:）
        None => return None,
    };
    (!payload.is_empty()).then_some(payload)
}
