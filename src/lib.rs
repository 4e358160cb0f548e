//! Hub Relay - 把 Hub 上新建的仓库转发到聊天 webhook

pub mod abbreviate;
pub mod config;
pub mod enricher;
pub mod error;
pub mod event;
pub mod filter;
pub mod hub;
pub mod notification;
pub mod relay;
pub mod server;
pub mod summarizer;

pub use abbreviate::{abbreviate, Rounding};
pub use config::RelayConfig;
pub use enricher::{Enrichment, MetadataEnricher};
pub use error::RelayError;
pub use event::{EventKind, RepoEvent, RepoInfo, RepoType, RepoUrls};
pub use filter::is_relevant;
pub use hub::{HubApi, HubClient, SubjectMetadata};
pub use notification::{
    NotificationDocument, NotificationSink, StdoutSink, WebhookClient, WebhookConfig,
};
pub use relay::{Relay, RelayOutcome, SkipReason};
pub use summarizer::summarize;
