//! Hub 客户端 - 拉取仓库元数据和 README
//!
//! 两个请求互不依赖：
//! - 元数据：GET 事件里的 API URL，失败即整个事件失败
//! - README：GET `{hub}/{repo}/raw/main/README.md`，非 200 视为没有文档

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::RelayError;

/// 默认 Hub 地址
pub const DEFAULT_HUB_URL: &str = "https://huggingface.co";

/// 仓库元数据（非结构化 JSON，只读取关心的字段）
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SubjectMetadata(Value);

impl SubjectMetadata {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// `safetensors.total`
    pub fn parameter_total(&self) -> Option<f64> {
        self.0.get("safetensors")?.get("total")?.as_f64()
    }

    /// `cardData.license`
    pub fn license(&self) -> Option<&str> {
        self.0.get("cardData")?.get("license")?.as_str()
    }
}

/// 外部数据源抽象，便于测试时替换
#[async_trait]
pub trait HubApi: Send + Sync {
    /// 拉取元数据，网络错误、非 2xx、非 JSON 都是错误
    async fn fetch_metadata(&self, api_url: &str) -> Result<SubjectMetadata, RelayError>;

    /// 拉取 README，任何失败都返回 `None`
    async fn fetch_readme(&self, repo_id: &str) -> Option<String>;
}

/// 基于 reqwest 的 Hub 客户端
#[derive(Debug, Clone)]
pub struct HubClient {
    client: Client,
    base_url: String,
}

impl HubClient {
    /// 创建客户端，所有请求共用同一个超时
    pub fn new(base_url: &str, timeout_secs: u64) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// README 地址
    pub fn readme_url(&self, repo_id: &str) -> String {
        format!("{}/{}/raw/main/README.md", self.base_url, repo_id)
    }
}

#[async_trait]
impl HubApi for HubClient {
    async fn fetch_metadata(&self, api_url: &str) -> Result<SubjectMetadata, RelayError> {
        let response = self
            .client
            .get(api_url)
            .send()
            .await
            .map_err(|e| RelayError::from_metadata_request(api_url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RelayError::MetadataFetch {
                url: api_url.to_string(),
                reason: format!("unexpected status {}", status),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| RelayError::from_metadata_request(api_url, e))?;

        let value: Value = serde_json::from_str(&body).map_err(|e| RelayError::MetadataParse {
            url: api_url.to_string(),
            reason: e.to_string(),
        })?;

        debug!(url = %api_url, "Fetched repo metadata");
        Ok(SubjectMetadata::new(value))
    }

    async fn fetch_readme(&self, repo_id: &str) -> Option<String> {
        let url = self.readme_url(repo_id);
        let response = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!(url = %url, error = %e, "README fetch failed, continuing without it");
                return None;
            }
        };

        if response.status() != StatusCode::OK {
            debug!(url = %url, status = %response.status(), "README not available");
            return None;
        }

        match response.text().await {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(url = %url, error = %e, "README body unreadable, continuing without it");
                None
            }
        }
    }
}
