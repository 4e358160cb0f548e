//! Hub webhook 事件模型
//!
//! 入站 payload 形如：
//! ```json
//! {
//!   "event": { "action": "create", "scope": "repo" },
//!   "repo": {
//!     "type": "model",
//!     "name": "acme/small-model",
//!     "private": false,
//!     "url": { "web": "https://huggingface.co/acme/small-model",
//!              "api": "https://huggingface.co/api/models/acme/small-model" },
//!     "tags": ["text-generation"]
//!   }
//! }
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// 入站 webhook 事件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoEvent {
    /// 事件类型 (scope + action)
    pub event: EventKind,
    /// 事件对应的仓库
    pub repo: RepoInfo,
}

/// 事件类型
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventKind {
    pub action: String,
    pub scope: String,
}

impl EventKind {
    /// 是否为仓库创建事件
    pub fn is_repo_creation(&self) -> bool {
        self.scope == "repo" && self.action == "create"
    }
}

/// 仓库信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoInfo {
    /// 仓库类型
    #[serde(rename = "type")]
    pub repo_type: RepoType,
    /// 带命名空间的仓库标识，如 `acme/small-model`
    pub name: String,
    /// 是否私有
    #[serde(default)]
    pub private: bool,
    pub url: RepoUrls,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoUrls {
    /// 网页地址
    pub web: String,
    /// 元数据 API 地址
    pub api: String,
}

/// 仓库类型
///
/// 未知类型保留原始字符串，展示时使用中性灰色。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RepoType {
    Model,
    Dataset,
    Space,
    Other(String),
}

impl RepoType {
    pub fn as_str(&self) -> &str {
        match self {
            RepoType::Model => "model",
            RepoType::Dataset => "dataset",
            RepoType::Space => "space",
            RepoType::Other(s) => s,
        }
    }

    /// 首字母大写的展示名，如 `Model`
    pub fn display_name(&self) -> String {
        let raw = self.as_str();
        let mut chars = raw.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl From<&str> for RepoType {
    fn from(s: &str) -> Self {
        match s {
            "model" => RepoType::Model,
            "dataset" => RepoType::Dataset,
            "space" => RepoType::Space,
            other => RepoType::Other(other.to_string()),
        }
    }
}

impl fmt::Display for RepoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RepoType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RepoType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(RepoType::from(s.as_str()))
    }
}

impl RepoEvent {
    /// 从 JSON 字符串解析事件
    pub fn from_json(payload: &str) -> serde_json::Result<Self> {
        serde_json::from_str(payload)
    }
}
