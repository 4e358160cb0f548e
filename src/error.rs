//! 单个事件处理过程中的失败类型
//!
//! 被过滤掉的仓库和缺失的 README 都不是错误，分别由
//! [`crate::relay::RelayOutcome::Skipped`] 和 `Option<String>` 表达。

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    /// 元数据请求失败（网络错误或非 2xx）
    #[error("metadata fetch from {url} failed: {reason}")]
    MetadataFetch { url: String, reason: String },

    /// 元数据响应不是合法 JSON
    #[error("metadata from {url} is not valid JSON: {reason}")]
    MetadataParse { url: String, reason: String },

    /// 外部请求超时
    #[error("request to {url} timed out")]
    Timeout { url: String },

    /// Webhook 返回非 2xx
    #[error("webhook delivery rejected with status {status}: {body}")]
    Delivery { status: u16, body: String },

    /// Webhook 请求本身失败
    #[error("webhook delivery failed: {0}")]
    DeliveryTransport(String),
}

impl RelayError {
    /// 把 reqwest 错误归类到元数据失败，超时单独区分
    pub fn from_metadata_request(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RelayError::Timeout { url: url.to_string() }
        } else {
            RelayError::MetadataFetch {
                url: url.to_string(),
                reason: err.to_string(),
            }
        }
    }
}
