//! README 摘要模块 - 把 Markdown/HTML 文档压缩成纯文本摘要
//!
//! 处理顺序固定，后一步作用于前一步的输出：
//! 1. 去掉 BOM 和开头的 `---` frontmatter
//! 2. 整块删除结构性 HTML 元素（details、table、div 等，连同内部内容）
//! 3. 删除自闭合元素（img、br、hr ...）
//! 4. 剥掉剩余 HTML 标签，保留内部文本
//! 5. 删除 ATX 标题行和 Setext 下划线行
//! 6. 删除 Markdown 图片 `![alt](url)`
//! 7. 删除表格行（以 `|` 开头并以 `|` 结尾）
//! 8. 解码少量 HTML 实体
//! 9. 规整空白
//! 10. 截断到 [`MAX_CHARS`] 个字符并追加 `...`
//!
//! 截断按 Unicode 标量值（`char`）计数，不按 UTF-16 code unit：
//! emoji 等辅助平面字符算 1 个而不是 2 个，也不会被切成半个代理对。
//!
//! 第 10 步无条件追加 `...`，即使文本本来就比上限短。
//! 下游依赖这个输出格式，不要改。

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// 摘要正文最多保留的 `char` 数（不含后缀）
pub const MAX_CHARS: usize = 1021;

/// 固定后缀
pub const SUFFIX: &str = "...";

/// 连同内容整块删除的 HTML 元素
const BLOCK_TAGS: &[&str] = &[
    "details", "summary", "div", "table", "thead", "tbody", "tfoot", "tr", "th", "td", "style",
    "script", "footer", "header", "nav", "section", "aside", "figure", "figcaption",
];

static FRONTMATTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A---[ \t]*\n(?:.*?\n)?---[ \t]*(?:\n|\z)").expect("frontmatter regex")
});

/// 每个块元素一条规则，开闭标签必须同名（regex crate 不支持反向引用）
static BLOCK_ELEMENTS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    BLOCK_TAGS
        .iter()
        .filter_map(|tag| Regex::new(&format!(r"(?is)<{tag}\b[^>]*>.*?</{tag}\s*>")).ok())
        .collect()
});

static VOID_ELEMENTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<(?:img|br|hr|input|meta|link)\b[^>]*>").expect("void element regex")
});

/// HTML 注释和剩余的开/闭标签
static REMAINING_TAGS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [r"(?s)<!--.*?-->", r"</?[A-Za-z][^>]*>"]
        .iter()
        .filter_map(|p| Regex::new(p).ok())
        .collect()
});

/// Markdown 结构噪音，按顺序应用
static MARKDOWN_NOISE: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // ATX headings
        r"(?m)^ {0,3}#{1,6}(?:[^#\n].*)?$",
        // Setext underlines
        r"(?m)^[ \t]*(?:-{3,}|={3,})[ \t]*$",
        // Images
        r"!\[[^\]]*\]\([^)]*\)",
        // Table rows
        r"(?m)^[ \t]*\|.*\|[ \t]*$",
    ]
    .iter()
    .filter_map(|p| Regex::new(p).ok())
    .collect()
});

static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:nbsp|amp|lt|gt|#[0-9]+|#[xX][0-9a-fA-F]+);").expect("entity regex")
});

static TRAILING_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+\n").expect("trailing space regex"));

static BLANK_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("blank run regex"));

/// 生成 README 摘要，`None` 视为空文档
pub fn summarize(raw: Option<&str>) -> String {
    let text = clean(raw.unwrap_or_default());
    truncate_with_suffix(&text)
}

/// 执行第 1-9 步，不截断
pub fn clean(raw: &str) -> String {
    let text = raw.strip_prefix('\u{FEFF}').unwrap_or(raw).replace("\r\n", "\n");
    let text = strip_frontmatter(&text);
    let text = strip_html(&text);
    let text = strip_markdown_noise(&text);
    let text = decode_entities(&text);
    normalize_whitespace(&text)
}

/// 去掉开头的单个 frontmatter 块
fn strip_frontmatter(text: &str) -> String {
    FRONTMATTER.replace(text, "").into_owned()
}

fn strip_html(text: &str) -> String {
    let mut result = text.to_string();
    for re in BLOCK_ELEMENTS.iter() {
        result = re.replace_all(&result, "").into_owned();
    }
    result = VOID_ELEMENTS.replace_all(&result, "").into_owned();
    for re in REMAINING_TAGS.iter() {
        result = re.replace_all(&result, "").into_owned();
    }
    result
}

fn strip_markdown_noise(text: &str) -> String {
    let mut result = text.to_string();
    for re in MARKDOWN_NOISE.iter() {
        result = re.replace_all(&result, "").into_owned();
    }
    result
}

/// 单遍解码，`&amp;lt;` 只解一层得到 `&lt;`
fn decode_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &Captures| {
            let entity = &caps[0];
            let decoded = match entity {
                "&nbsp;" => Some(' '),
                "&amp;" => Some('&'),
                "&lt;" => Some('<'),
                "&gt;" => Some('>'),
                _ => {
                    let body = &entity[2..entity.len() - 1];
                    let code = match body.strip_prefix(&['x', 'X'][..]) {
                        Some(hex) => u32::from_str_radix(hex, 16).ok(),
                        None => body.parse::<u32>().ok(),
                    };
                    code.and_then(char::from_u32)
                }
            };
            // 无效码点原样保留
            decoded.map_or_else(|| entity.to_string(), |c| c.to_string())
        })
        .into_owned()
}

fn normalize_whitespace(text: &str) -> String {
    let text = TRAILING_SPACE.replace_all(text, "\n");
    let text = BLANK_RUNS.replace_all(&text, "\n\n");
    text.trim().to_string()
}

fn truncate_with_suffix(text: &str) -> String {
    let mut out: String = text.chars().take(MAX_CHARS).collect();
    out.push_str(SUFFIX);
    out
}
