//! 通知层 - 文档结构、组装和投递
//!
//! # 使用示例
//! ```ignore
//! use hub_relay::notification::{compose_now, NotificationSink, WebhookClient, WebhookConfig};
//!
//! let sink = WebhookClient::new(WebhookConfig { url, ..Default::default() })?;
//! let document = compose_now(&event, enrichment);
//! sink.deliver(&document).await?;
//! ```

pub mod channel;
pub mod composer;
pub mod embed;
pub mod webhook;

pub use channel::{NotificationSink, StdoutSink};
pub use composer::{accent_color, compose, compose_now, DEFAULT_COLOR, FOOTER_TEXT};
pub use embed::{Embed, EmbedField, EmbedFooter, NotificationDocument};
pub use webhook::{WebhookClient, WebhookConfig};
