//! 通知组装 - 把事件和增强字段拼成最终的 embed
//!
//! 字段顺序固定：Type → Parameters（已知时）→ License（已知时）。

use chrono::{DateTime, Utc};

use super::embed::{Embed, EmbedField, EmbedFooter, NotificationDocument};
use crate::enricher::Enrichment;
use crate::event::{RepoEvent, RepoType};

/// 页脚品牌文字
pub const FOOTER_TEXT: &str = "Hugging Face Hub";

/// 未知类型使用的中性灰
pub const DEFAULT_COLOR: u32 = 0x808080;

/// 仓库类型 → 强调色
const COLOR_TABLE: &[(&str, u32)] = &[
    ("model", 0xFFD21E),
    ("dataset", 0x3B82F6),
    ("space", 0xA855F7),
];

/// 根据仓库类型选择强调色
pub fn accent_color(repo_type: &RepoType) -> u32 {
    COLOR_TABLE
        .iter()
        .find(|(name, _)| *name == repo_type.as_str())
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_COLOR)
}

/// 组装通知，时间戳由调用方提供
pub fn compose(
    event: &RepoEvent,
    enrichment: Enrichment,
    timestamp: DateTime<Utc>,
) -> NotificationDocument {
    let repo = &event.repo;

    let mut fields = vec![EmbedField::inline("Type", repo.repo_type.display_name())];
    if let Some(parameters) = enrichment.parameters {
        fields.push(EmbedField::inline("Parameters", parameters));
    }
    if let Some(license) = enrichment.license {
        fields.push(EmbedField::inline("License", license));
    }

    NotificationDocument {
        embeds: vec![Embed {
            title: repo.name.clone(),
            description: enrichment.description,
            url: repo.url.web.clone(),
            color: accent_color(&repo.repo_type),
            timestamp,
            fields,
            footer: EmbedFooter {
                text: FOOTER_TEXT.to_string(),
            },
        }],
    }
}

/// 以当前时间组装通知
pub fn compose_now(event: &RepoEvent, enrichment: Enrichment) -> NotificationDocument {
    compose(event, enrichment, Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventKind, RepoInfo, RepoUrls};
    use chrono::TimeZone;

    fn event(repo_type: RepoType) -> RepoEvent {
        RepoEvent {
            event: EventKind {
                action: "create".to_string(),
                scope: "repo".to_string(),
            },
            repo: RepoInfo {
                repo_type,
                name: "acme/thing".to_string(),
                private: false,
                url: RepoUrls {
                    web: "https://huggingface.co/acme/thing".to_string(),
                    api: "https://huggingface.co/api/models/acme/thing".to_string(),
                },
                tags: Vec::new(),
            },
        }
    }

    fn enrichment(parameters: Option<&str>, license: Option<&str>) -> Enrichment {
        Enrichment {
            description: "Docs...".to_string(),
            parameters: parameters.map(String::from),
            license: license.map(String::from),
        }
    }

    #[test]
    fn test_accent_colors() {
        assert_eq!(accent_color(&RepoType::Model), 0xFFD21E);
        assert_eq!(accent_color(&RepoType::Dataset), 0x3B82F6);
        assert_eq!(accent_color(&RepoType::Space), 0xA855F7);
        assert_eq!(accent_color(&RepoType::Other("collection".into())), DEFAULT_COLOR);
    }

    #[test]
    fn test_field_order_all_present() {
        let ts = Utc.with_ymd_and_hms(2026, 2, 8, 0, 0, 0).unwrap();
        let doc = compose(&event(RepoType::Model), enrichment(Some("7B"), Some("mit")), ts);
        let embed = doc.embed().unwrap();

        let names: Vec<&str> = embed.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Type", "Parameters", "License"]);
        assert_eq!(embed.field("Type"), Some("Model"));
        assert_eq!(embed.title, "acme/thing");
        assert_eq!(embed.url, "https://huggingface.co/acme/thing");
        assert_eq!(embed.description, "Docs...");
        assert_eq!(embed.timestamp, ts);
        assert_eq!(embed.footer.text, FOOTER_TEXT);
        assert!(embed.fields.iter().all(|f| f.inline));
    }

    #[test]
    fn test_optional_fields_omitted() {
        let doc = compose_now(&event(RepoType::Dataset), enrichment(None, Some("cc-by-4.0")));
        let names: Vec<&str> = doc.embeds[0].fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Type", "License"]);

        let doc = compose_now(&event(RepoType::Space), enrichment(None, None));
        assert_eq!(doc.embeds[0].fields.len(), 1);
        assert_eq!(doc.embeds[0].field("Type"), Some("Space"));
    }

    #[test]
    fn test_serialized_shape() {
        let ts = Utc.with_ymd_and_hms(2026, 2, 8, 12, 30, 0).unwrap();
        let doc = compose(&event(RepoType::Model), enrichment(Some("7B"), None), ts);
        let json = serde_json::to_value(&doc).unwrap();

        assert_eq!(json["embeds"][0]["color"], 0xFFD21E);
        assert_eq!(json["embeds"][0]["timestamp"], "2026-02-08T12:30:00Z");
        assert_eq!(json["embeds"][0]["fields"][1]["name"], "Parameters");
        assert_eq!(json["embeds"][0]["fields"][1]["value"], "7B");
        assert_eq!(json["embeds"][0]["footer"]["text"], "Hugging Face Hub");
    }
}
