//! Hub Relay CLI
//!
//! 接收 Hub 仓库创建事件，增强后转发到聊天 webhook

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hub_relay::{
    abbreviate, summarize, HubClient, NotificationSink, Relay, RelayConfig, RelayOutcome,
    RepoEvent, Rounding, StdoutSink, WebhookClient, WebhookConfig,
};
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "hub-relay")]
#[command(about = "Hub Relay - 把新建的 Hub 仓库转发到聊天 webhook")]
#[command(version)]
struct Cli {
    /// 配置文件路径（默认 ~/.config/hub-relay/config.json）
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 启动 webhook 接收服务
    Serve {
        /// 监听地址，覆盖配置
        #[arg(long)]
        bind: Option<String>,
        /// 参数量四舍五入（默认截断）
        #[arg(long)]
        round: bool,
    },
    /// 处理单个事件 payload
    Relay {
        /// 事件 JSON
        payload: String,
        /// 只打印通知 JSON，不投递
        #[arg(long)]
        dry_run: bool,
        /// 参数量四舍五入（默认截断）
        #[arg(long)]
        round: bool,
    },
    /// 输出 README 摘要
    Summarize {
        /// Markdown 文件（不指定则读 stdin）
        file: Option<PathBuf>,
    },
    /// 缩写数字，如 7000000000 -> 7B
    Abbreviate {
        #[arg(allow_negative_numbers = true)]
        value: f64,
        /// 四舍五入（默认截断）
        #[arg(long)]
        round: bool,
    },
}

fn rounding(round: bool) -> Rounding {
    if round {
        Rounding::Round
    } else {
        Rounding::Floor
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<RelayConfig> {
    match path {
        Some(path) => RelayConfig::load_from_path(path),
        None => RelayConfig::auto_load(),
    }
}

fn webhook_sink(config: &RelayConfig) -> Result<Arc<dyn NotificationSink>> {
    let client = WebhookClient::new(WebhookConfig {
        url: config.require_webhook_url()?.to_string(),
        timeout_secs: config.timeout_secs,
    })
    .map_err(|e| anyhow::anyhow!(e))?;
    Ok(Arc::new(client))
}

#[tokio::main]
async fn main() -> Result<()> {
    // 通过 RUST_LOG 控制日志级别，默认为 info
    // 例如: RUST_LOG=debug hub-relay serve
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("hub_relay=info"));

    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { bind, round } => {
            let mut config = load_config(cli.config.as_ref())?;
            if let Some(bind) = bind {
                config.bind_addr = bind;
            }

            let hub = Arc::new(HubClient::new(&config.hub_base_url, config.timeout_secs)?);
            let relay = Relay::new(hub, webhook_sink(&config)?).with_rounding(rounding(round));
            hub_relay::server::serve(&config, relay).await?;
        }
        Commands::Relay { payload, dry_run, round } => {
            let config = load_config(cli.config.as_ref())?;
            let event = RepoEvent::from_json(&payload).context("Failed to parse event payload")?;

            let hub = Arc::new(HubClient::new(&config.hub_base_url, config.timeout_secs)?);
            let sink: Arc<dyn NotificationSink> = if dry_run {
                Arc::new(StdoutSink)
            } else {
                webhook_sink(&config)?
            };

            let relay = Relay::new(hub, sink).with_rounding(rounding(round));
            match relay.handle(&event).await? {
                RelayOutcome::Delivered => {
                    if !dry_run {
                        eprintln!("已投递: {}", event.repo.name);
                    }
                }
                RelayOutcome::Skipped(reason) => {
                    eprintln!("已跳过 {}: {}", event.repo.name, reason);
                }
            }
        }
        Commands::Summarize { file } => {
            let raw = match file {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            println!("{}", summarize(Some(&raw)));
        }
        Commands::Abbreviate { value, round } => {
            println!("{}", abbreviate(value, rounding(round)));
        }
    }

    Ok(())
}
