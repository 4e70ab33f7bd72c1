//! 流量拓扑监听
//!
//! 从文件或 stdin 读取 JSON 行（或 SSE `data:` 行）格式的数据包记录，
//! 按固定周期输出视图差分，每个差分一行 JSON 写到 stdout。

use std::path::PathBuf;

use clap::Parser;
use flowtopo_rs::session::{JsonLinesSource, Listener, RecordSource, Session, SessionConfig};
use flowtopo_rs::view::ProjectionKind;
use tokio::io::BufReader;
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(
    name = "flowtopo",
    about = "Aggregate packet-flow records into a topology and stream view diffs"
)]
struct Args {
    /// 输入文件（JSON 行或 SSE），缺省读取 stdin
    #[arg(long)]
    input: Option<PathBuf>,

    /// JSON 配置文件
    #[arg(long)]
    config: Option<PathBuf>,

    /// 投影类型：flat 或 radial
    #[arg(long)]
    projection: Option<String>,

    /// 启用的节点类别，逗号分隔：eth,ip,ipv4,ipv6
    #[arg(long)]
    nodes: Option<String>,

    /// 批处理周期（毫秒）
    #[arg(long)]
    interval_ms: Option<u64>,

    /// IEEE oui.csv 路径
    #[arg(long)]
    oui: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化 tracing（stdout 留给差分输出）
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SessionConfig::load(path)?,
        None => SessionConfig::default(),
    };
    if let Some(projection) = &args.projection {
        config.projection = projection.parse::<ProjectionKind>()?;
    }
    if let Some(nodes) = &args.nodes {
        config.nodes = nodes.split(',').map(str::to_string).collect();
    }
    if let Some(interval_ms) = args.interval_ms {
        config.batch_interval_ms = interval_ms;
    }
    if let Some(oui) = args.oui {
        config.oui_path = Some(oui);
    }
    info!(?config, "配置");

    let session = Session::from_config(&config)?;
    let (listener, sink) = Listener::spawn(
        session,
        config.batch_interval(),
        config.projection,
        |diff| match serde_json::to_string(&diff) {
            Ok(line) => println!("{line}"),
            Err(err) => error!(%err, "差分序列化失败"),
        },
    );

    let subscription = match &args.input {
        Some(path) => {
            let file = tokio::fs::File::open(path).await?;
            JsonLinesSource::new(BufReader::new(file)).subscribe(sink)
        }
        None => JsonLinesSource::new(BufReader::new(tokio::io::stdin())).subscribe(sink),
    };

    let session = listener.join().await?;
    drop(subscription);

    let stats = session.stats();
    info!(
        records = stats.records,
        rejected = stats.rejected,
        eth_nodes = stats.eth_nodes,
        ip_nodes = stats.ip_nodes,
        links = stats.links,
        batches = stats.batches,
        "✅ 完成"
    );
    Ok(())
}
