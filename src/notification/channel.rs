//! 投递渠道 trait 定义

use async_trait::async_trait;

use super::embed::NotificationDocument;
use crate::error::RelayError;

/// 通知投递渠道
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// 渠道名称（用于日志）
    fn name(&self) -> &str;

    /// 投递一条通知，不重试
    async fn deliver(&self, document: &NotificationDocument) -> Result<(), RelayError>;
}

/// dry-run 渠道：只把 JSON 打到 stdout
pub struct StdoutSink;

#[async_trait]
impl NotificationSink for StdoutSink {
    fn name(&self) -> &str {
        "stdout"
    }

    async fn deliver(&self, document: &NotificationDocument) -> Result<(), RelayError> {
        let json = serde_json::to_string_pretty(document)
            .map_err(|e| RelayError::DeliveryTransport(e.to_string()))?;
        println!("{}", json);
        Ok(())
    }
}
