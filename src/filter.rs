//! 相关性过滤 - 跳过量化/格式转换类仓库
//!
//! 匹配规则是大小写不敏感的子串包含，而不是按 token 边界匹配。
//! 像 `acme/mlxtend-demo` 这样恰好包含关键词的名字也会被拒绝，这是既定行为。

/// 量化/格式转换关键词（小写）
pub const DENYLIST: &[&str] = &[
    "gguf",
    "ggml",
    "gptq",
    "awq",
    "exl2",
    "exl3",
    "fp8",
    "mlx",
    "bnb",
    "4bit",
    "8bit",
    "int4",
    "int8",
    "quantized",
    "imatrix",
];

/// 判断仓库是否值得通知
///
/// 空字符串和不包含任何关键词的标识返回 `true`。
pub fn is_relevant(repo_id: &str) -> bool {
    matched_keyword(repo_id).is_none()
}

/// 返回第一个命中的关键词（用于日志）
pub fn matched_keyword(repo_id: &str) -> Option<&'static str> {
    let lowered = repo_id.to_lowercase();
    DENYLIST.iter().copied().find(|kw| lowered.contains(kw))
}
