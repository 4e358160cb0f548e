//! 元数据增强 - 并发拉取元数据和 README，合并出通知需要的字段

use tracing::{debug, info};

use crate::abbreviate::{abbreviate, Rounding};
use crate::error::RelayError;
use crate::event::RepoEvent;
use crate::hub::HubApi;
use crate::summarizer::summarize;

/// 增强后的字段
#[derive(Debug, Clone, PartialEq)]
pub struct Enrichment {
    /// README 摘要（总以 `...` 结尾）
    pub description: String,
    /// 缩写后的参数量，如 `7B`
    pub parameters: Option<String>,
    pub license: Option<String>,
}

/// 元数据增强器
pub struct MetadataEnricher<'a> {
    hub: &'a dyn HubApi,
    rounding: Rounding,
}

impl<'a> MetadataEnricher<'a> {
    pub fn new(hub: &'a dyn HubApi) -> Self {
        Self {
            hub,
            rounding: Rounding::Floor,
        }
    }

    /// 设置参数量取整方式
    pub fn with_rounding(mut self, rounding: Rounding) -> Self {
        self.rounding = rounding;
        self
    }

    /// 拉取并合并。元数据失败直接返回错误，README 缺失不影响其他字段
    pub async fn enrich(&self, event: &RepoEvent) -> Result<Enrichment, RelayError> {
        let repo_id = event.repo.name.as_str();

        let (metadata, readme) = tokio::join!(
            self.hub.fetch_metadata(&event.repo.url.api),
            self.hub.fetch_readme(repo_id),
        );
        let metadata = metadata?;

        if readme.is_none() {
            debug!(repo = %repo_id, "No README, description will be empty");
        }

        let description = summarize(readme.as_deref());
        let parameters = metadata
            .parameter_total()
            .map(|total| abbreviate(total, self.rounding));
        let license = metadata.license().map(str::to_string);

        info!(
            repo = %repo_id,
            parameters = parameters.as_deref().unwrap_or("-"),
            license = license.as_deref().unwrap_or("-"),
            "Enriched repo metadata"
        );

        Ok(Enrichment {
            description,
            parameters,
            license,
        })
    }
}
