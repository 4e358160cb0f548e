//! Chat Webhook 客户端模块
//!
//! 把通知文档以 JSON POST 到配置的 webhook URL，非 2xx 即投递失败。

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use super::channel::NotificationSink;
use super::embed::NotificationDocument;
use crate::error::RelayError;

/// Webhook 客户端配置
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    /// Webhook URL
    pub url: String,
    /// 超时时间 (秒)
    pub timeout_secs: u64,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            timeout_secs: 10,
        }
    }
}

/// Chat Webhook 客户端
#[derive(Debug)]
pub struct WebhookClient {
    client: Client,
    config: WebhookConfig,
}

impl WebhookClient {
    /// 创建新的 Webhook 客户端
    pub fn new(config: WebhookConfig) -> Result<Self, String> {
        if config.url.is_empty() {
            return Err("webhook url is required".to_string());
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| format!("Failed to create HTTP client: {}", e))?;

        Ok(Self { client, config })
    }

    pub fn url(&self) -> &str {
        &self.config.url
    }
}

#[async_trait]
impl NotificationSink for WebhookClient {
    fn name(&self) -> &str {
        "webhook"
    }

    async fn deliver(&self, document: &NotificationDocument) -> Result<(), RelayError> {
        let response = self
            .client
            .post(&self.config.url)
            .header("Content-Type", "application/json")
            .json(document)
            .send()
            .await
            .map_err(|e| RelayError::DeliveryTransport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            debug!(status = %status, "Webhook accepted notification");
            return Ok(());
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                debug!(status = %status, error = %e, "Failed to read webhook error body");
                String::new()
            }
        };
        Err(RelayError::Delivery {
            status: status.as_u16(),
            body,
        })
    }
}
