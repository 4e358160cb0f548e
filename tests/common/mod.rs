//! 集成测试共用的 mock 数据源和渠道

#![allow(dead_code)]

use async_trait::async_trait;
use hub_relay::{
    HubApi, NotificationDocument, NotificationSink, RelayError, RepoEvent, SubjectMetadata,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// 可配置的 Hub mock，记录调用次数
pub struct MockHub {
    pub metadata: Option<serde_json::Value>,
    pub readme: Option<String>,
    pub metadata_calls: AtomicUsize,
    pub readme_calls: AtomicUsize,
}

impl MockHub {
    pub fn new(metadata: Option<serde_json::Value>, readme: Option<&str>) -> Self {
        Self {
            metadata,
            readme: readme.map(String::from),
            metadata_calls: AtomicUsize::new(0),
            readme_calls: AtomicUsize::new(0),
        }
    }

    pub fn total_calls(&self) -> usize {
        self.metadata_calls.load(Ordering::SeqCst) + self.readme_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HubApi for MockHub {
    async fn fetch_metadata(&self, api_url: &str) -> Result<SubjectMetadata, RelayError> {
        self.metadata_calls.fetch_add(1, Ordering::SeqCst);
        self.metadata
            .clone()
            .map(SubjectMetadata::new)
            .ok_or_else(|| RelayError::MetadataParse {
                url: api_url.to_string(),
                reason: "expected value at line 1 column 1".to_string(),
            })
    }

    async fn fetch_readme(&self, _repo_id: &str) -> Option<String> {
        self.readme_calls.fetch_add(1, Ordering::SeqCst);
        self.readme.clone()
    }
}

/// 记录投递内容的渠道，`reject_status` 非空时模拟 webhook 拒绝
pub struct RecordingSink {
    pub delivered: Mutex<Vec<NotificationDocument>>,
    pub reject_status: Option<u16>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self {
            delivered: Mutex::new(Vec::new()),
            reject_status: None,
        }
    }

    pub fn rejecting(status: u16) -> Self {
        Self {
            delivered: Mutex::new(Vec::new()),
            reject_status: Some(status),
        }
    }

    pub fn count(&self) -> usize {
        self.delivered.lock().unwrap().len()
    }

    pub fn last(&self) -> Option<NotificationDocument> {
        self.delivered.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    fn name(&self) -> &str {
        "recording"
    }

    async fn deliver(&self, document: &NotificationDocument) -> Result<(), RelayError> {
        if let Some(status) = self.reject_status {
            return Err(RelayError::Delivery {
                status,
                body: "rejected".to_string(),
            });
        }
        self.delivered.lock().unwrap().push(document.clone());
        Ok(())
    }
}

/// 构造一个公开仓库创建事件
pub fn create_event(repo_type: &str, name: &str) -> RepoEvent {
    serde_json::from_value(serde_json::json!({
        "event": {"action": "create", "scope": "repo"},
        "repo": {
            "type": repo_type,
            "name": name,
            "private": false,
            "url": {
                "web": format!("https://huggingface.co/{}", name),
                "api": format!("https://huggingface.co/api/models/{}", name)
            }
        }
    }))
    .unwrap()
}
