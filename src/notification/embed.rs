//! 出站通知文档（Discord embed 格式）
//!
//! ```json
//! {
//!   "embeds": [{
//!     "title": "acme/small-model",
//!     "description": "...",
//!     "url": "https://huggingface.co/acme/small-model",
//!     "color": 16765470,
//!     "timestamp": "2026-02-08T00:00:00Z",
//!     "fields": [{"name": "Type", "value": "Model", "inline": true}],
//!     "footer": {"text": "Hugging Face Hub"}
//!   }]
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Webhook 请求体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationDocument {
    pub embeds: Vec<Embed>,
}

impl NotificationDocument {
    /// 取第一个 embed（composer 总是只生成一个）
    pub fn embed(&self) -> Option<&Embed> {
        self.embeds.first()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub url: String,
    pub color: u32,
    pub timestamp: DateTime<Utc>,
    pub fields: Vec<EmbedField>,
    pub footer: EmbedFooter,
}

impl Embed {
    /// 按名称查找字段值
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl EmbedField {
    pub fn inline(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            inline: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedFooter {
    pub text: String,
}
