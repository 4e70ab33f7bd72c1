//! 批处理监听任务
//!
//! 一个 tokio 任务独占会话：记录到达即聚合，定时器每个周期最多触发一次 build+diff。
//! 周期内多余的记录全部吸收进聚合状态，脉冲通过集合去重合并。

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

use super::context::Session;
use super::source::RecordSink;
use crate::Error;
use crate::record::PacketRecord;
use crate::view::{NodeFilter, ProjectionKind, ViewDiff};

#[derive(Debug)]
enum Command {
    SetFilter(NodeFilter),
    SetProjection(ProjectionKind),
}

/// 正在运行的监听任务句柄
#[derive(Debug)]
pub struct Listener {
    commands: mpsc::UnboundedSender<Command>,
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<Session>,
}

impl Listener {
    /// 启动监听任务，返回任务句柄和记录入口。
    ///
    /// 所有 [`RecordSink`] 被丢弃后（来源结束），任务执行最后一次差分并退出。
    pub fn spawn<F>(
        session: Session,
        interval: Duration,
        projection: ProjectionKind,
        on_batch: F,
    ) -> (Self, RecordSink)
    where
        F: FnMut(ViewDiff) + Send + 'static,
    {
        let (record_tx, record_rx) = mpsc::unbounded_channel();
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        info!(interval_ms = interval.as_millis() as u64, ?projection, "▶️  启动监听");
        let handle = tokio::spawn(run(
            session,
            projection,
            interval,
            record_rx,
            command_rx,
            shutdown_rx,
            on_batch,
        ));

        let listener = Self {
            commands: command_tx,
            shutdown: shutdown_tx,
            handle,
        };
        (listener, RecordSink::new(record_tx))
    }

    /// 下一个周期生效
    pub fn set_node_filter(&self, filter: NodeFilter) -> bool {
        self.commands.send(Command::SetFilter(filter)).is_ok()
    }

    /// 下一个周期生效；注册表保持不变
    pub fn set_projection(&self, projection: ProjectionKind) -> bool {
        self.commands.send(Command::SetProjection(projection)).is_ok()
    }

    /// 停止定时器、关闭记录通道并取回会话（已聚合的状态全部保留）
    pub async fn stop(self) -> Result<Session, Error> {
        // 任务可能已经因来源结束而退出
        let _ = self.shutdown.send(());
        Ok(self.handle.await?)
    }

    /// 等待来源结束、任务自行退出
    pub async fn join(self) -> Result<Session, Error> {
        let Self {
            commands,
            shutdown,
            handle,
        } = self;
        let session = handle.await?;
        drop((commands, shutdown));
        Ok(session)
    }
}

async fn run<F>(
    mut session: Session,
    mut projection: ProjectionKind,
    period: Duration,
    mut records: mpsc::UnboundedReceiver<PacketRecord>,
    mut commands: mpsc::UnboundedReceiver<Command>,
    mut shutdown: oneshot::Receiver<()>,
    mut on_batch: F,
) -> Session
where
    F: FnMut(ViewDiff) + Send + 'static,
{
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    // 自上个周期以来是否有记录被接受或视图参数被修改；
    // 重启时会话里尚未交付的脉冲也算
    let mut dirty = !session.aggregator().pulse().is_empty();
    let mut commands_open = true;

    loop {
        tokio::select! {
            biased;

            _ = &mut shutdown => {
                info!("⏹️  监听停止");
                break;
            }
            command = commands.recv(), if commands_open => match command {
                Some(Command::SetFilter(filter)) => {
                    session.set_node_filter(filter);
                    dirty = true;
                }
                Some(Command::SetProjection(kind)) => {
                    debug!(from = ?projection, to = ?kind, "切换投影");
                    projection = kind;
                    dirty = true;
                }
                None => commands_open = false,
            },
            // 定时器排在记录之前：积压的记录不能推迟本周期的差分
            _ = ticker.tick() => {
                if dirty {
                    on_batch(session.build_and_diff(projection));
                    dirty = false;
                }
            }
            record = records.recv() => match record {
                Some(record) => {
                    if session.ingest(record).is_ok() {
                        dirty = true;
                    }
                }
                None => {
                    if dirty {
                        on_batch(session.build_and_diff(projection));
                    }
                    info!(records = session.stats().records, "来源已关闭，监听结束");
                    return session;
                }
            },
        }
    }

    // 通道里已送达但尚未处理的记录仍然计入聚合状态
    records.close();
    while let Ok(record) = records.try_recv() {
        let _ = session.ingest(record);
    }
    session
}
