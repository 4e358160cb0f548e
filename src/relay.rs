//! 通知中继主流程
//!
//! 事件筛选 → 关键词过滤 → 元数据增强 → 组装 → 投递。
//! 筛选和过滤都在任何网络请求之前完成。

use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

use crate::abbreviate::Rounding;
use crate::enricher::MetadataEnricher;
use crate::error::RelayError;
use crate::event::RepoEvent;
use crate::filter;
use crate::hub::HubApi;
use crate::notification::{compose_now, NotificationSink};

/// 跳过原因
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// 不是 repo.create 事件
    NotRepoCreation { scope: String, action: String },
    /// 私有仓库
    Private,
    /// 命中关键词黑名单
    Irrelevant { keyword: &'static str },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotRepoCreation { scope, action } => {
                write!(f, "not a repo creation ({}.{})", scope, action)
            }
            SkipReason::Private => write!(f, "private repo"),
            SkipReason::Irrelevant { keyword } => {
                write!(f, "matched denylist keyword '{}'", keyword)
            }
        }
    }
}

/// 处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayOutcome {
    /// 已投递
    Delivered,
    /// 跳过（无输出）
    Skipped(SkipReason),
}

/// 决定事件是否需要处理，不访问网络
pub fn screen(event: &RepoEvent) -> Option<SkipReason> {
    if !event.event.is_repo_creation() {
        return Some(SkipReason::NotRepoCreation {
            scope: event.event.scope.clone(),
            action: event.event.action.clone(),
        });
    }
    if event.repo.private {
        return Some(SkipReason::Private);
    }
    filter::matched_keyword(&event.repo.name).map(|keyword| SkipReason::Irrelevant { keyword })
}

/// 通知中继
pub struct Relay {
    hub: Arc<dyn HubApi>,
    sink: Arc<dyn NotificationSink>,
    rounding: Rounding,
}

impl Relay {
    pub fn new(hub: Arc<dyn HubApi>, sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            hub,
            sink,
            rounding: Rounding::Floor,
        }
    }

    /// 设置参数量取整方式
    pub fn with_rounding(mut self, rounding: Rounding) -> Self {
        self.rounding = rounding;
        self
    }

    /// 处理一个事件。失败只影响本事件，不重试
    pub async fn handle(&self, event: &RepoEvent) -> Result<RelayOutcome, RelayError> {
        let repo = event.repo.name.as_str();

        if let Some(reason) = screen(event) {
            info!(repo = %repo, reason = %reason, "Skipping event");
            return Ok(RelayOutcome::Skipped(reason));
        }

        let enrichment = MetadataEnricher::new(self.hub.as_ref())
            .with_rounding(self.rounding)
            .enrich(event)
            .await
            .inspect_err(|e| warn!(repo = %repo, error = %e, "Enrichment failed"))?;

        let document = compose_now(event, enrichment);

        self.sink
            .deliver(&document)
            .await
            .inspect_err(|e| {
                warn!(repo = %repo, sink = self.sink.name(), error = %e, "Delivery failed")
            })?;

        info!(repo = %repo, sink = self.sink.name(), "Notification delivered");
        Ok(RelayOutcome::Delivered)
    }
}
