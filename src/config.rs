//! 运行配置
//!
//! 每个字段按优先级读取：
//! 1. 配置文件 `~/.config/hub-relay/config.json`（或 `--config` 指定的路径）
//! 2. 环境变量 `HUB_RELAY_*`
//! 3. 默认值

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::hub::DEFAULT_HUB_URL;

/// 默认监听地址
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// 默认外部请求超时（秒）
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// 中继配置
#[derive(Debug, Clone, PartialEq)]
pub struct RelayConfig {
    /// Chat webhook URL
    pub webhook_url: String,
    /// 入站请求 `X-Webhook-Secret` 的期望值
    pub webhook_secret: String,
    /// Hub 地址，用于拼 README URL
    pub hub_base_url: String,
    /// HTTP 监听地址
    pub bind_addr: String,
    /// 外部请求超时（秒）
    pub timeout_secs: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            webhook_url: String::new(),
            webhook_secret: String::new(),
            hub_base_url: DEFAULT_HUB_URL.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// 配置文件内容，所有字段可选
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    webhook_url: Option<String>,
    webhook_secret: Option<String>,
    hub_base_url: Option<String>,
    bind_addr: Option<String>,
    timeout_secs: Option<u64>,
}

impl RelayConfig {
    /// 默认配置文件路径
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config/hub-relay/config.json"))
    }

    /// 从默认位置和环境变量加载
    pub fn auto_load() -> Result<Self> {
        let file = match Self::default_path() {
            Some(path) if path.exists() => Self::read_file(&path)?,
            _ => FileConfig::default(),
        };
        Ok(Self::merge(file, |key| std::env::var(key).ok()))
    }

    /// 从指定文件和环境变量加载
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let file = Self::read_file(path)?;
        Ok(Self::merge(file, |key| std::env::var(key).ok()))
    }

    fn read_file(path: &Path) -> Result<FileConfig> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// 合并文件配置和环境变量，文件优先
    fn merge(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let env = |key: &str| env(key).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let hub_base_url = file
            .hub_base_url
            .or_else(|| env("HUB_RELAY_HUB_URL"))
            .unwrap_or(defaults.hub_base_url);

        Self {
            webhook_url: file
                .webhook_url
                .or_else(|| env("HUB_RELAY_WEBHOOK_URL"))
                .unwrap_or(defaults.webhook_url),
            webhook_secret: file
                .webhook_secret
                .or_else(|| env("HUB_RELAY_WEBHOOK_SECRET"))
                .unwrap_or(defaults.webhook_secret),
            hub_base_url: hub_base_url.trim_end_matches('/').to_string(),
            bind_addr: file
                .bind_addr
                .or_else(|| env("HUB_RELAY_BIND"))
                .unwrap_or(defaults.bind_addr),
            timeout_secs: file
                .timeout_secs
                .or_else(|| env("HUB_RELAY_TIMEOUT_SECS").and_then(|v| v.parse().ok()))
                .unwrap_or(defaults.timeout_secs),
        }
    }

    /// 投递前检查
    pub fn require_webhook_url(&self) -> Result<&str> {
        if self.webhook_url.is_empty() {
            return Err(anyhow!(
                "webhook_url is not configured (set it in config.json or HUB_RELAY_WEBHOOK_URL)"
            ));
        }
        Ok(&self.webhook_url)
    }

    /// 启动服务前检查
    pub fn require_secret(&self) -> Result<&str> {
        if self.webhook_secret.is_empty() {
            return Err(anyhow!(
                "webhook_secret is not configured \
                 (set it in config.json or HUB_RELAY_WEBHOOK_SECRET)"
            ));
        }
        Ok(&self.webhook_secret)
    }
}
