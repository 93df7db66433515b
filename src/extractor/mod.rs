//! 题目解析
//!
//! 两套实现共享同一接口：
//! - `DomExtractor` - 基于 `scraper` 的结构化解析（`html-parser` 特性）
//! - `PatternExtractor` - 纯正则解析，任何构建下都可用
//!
//! 行过滤与题目组装放在 `row` 中，两条路径对规整的输入给出相同结果。

#[cfg(feature = "html-parser")]
pub mod dom;
pub mod pattern;
pub mod row;

#[cfg(feature = "html-parser")]
pub use dom::DomExtractor;
pub use pattern::PatternExtractor;

use crate::models::{HeaderLabels, QuestionRecord};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// 题目解析能力
pub trait QuestionExtractor {
    /// 后端名称（用于日志）
    fn name(&self) -> &'static str;

    /// 按文档顺序解析出所有题目行，非题目行直接跳过
    fn extract(&self, markup: &str) -> Vec<QuestionRecord>;
}

/// 解析后端选择
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// 有 HTML 解析库时用 DOM，否则用正则
    #[default]
    Auto,
    Dom,
    Pattern,
}

impl Backend {
    /// 当前构建是否带有 HTML 解析库
    pub const fn dom_available() -> bool {
        cfg!(feature = "html-parser")
    }

    /// 把 `Auto` 以及不可用的 `Dom` 落到实际后端
    pub fn resolve(self) -> Self {
        match self {
            Backend::Auto if Self::dom_available() => Backend::Dom,
            Backend::Auto => Backend::Pattern,
            Backend::Dom if !Self::dom_available() => {
                warn!("⚠️ 未启用 html-parser 特性，改用正则解析");
                Backend::Pattern
            }
            other => other,
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Some(Backend::Auto),
            "dom" | "html" => Some(Backend::Dom),
            "pattern" | "regex" => Some(Backend::Pattern),
            _ => None,
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Backend::Auto => "auto",
            Backend::Dom => "dom",
            Backend::Pattern => "pattern",
        };
        write!(f, "{}", name)
    }
}

/// 按后端构造解析器
pub fn build_extractor(backend: Backend, labels: HeaderLabels) -> Box<dyn QuestionExtractor> {
    let extractor: Box<dyn QuestionExtractor> = match backend.resolve() {
        #[cfg(feature = "html-parser")]
        Backend::Dom => Box::new(DomExtractor::new(labels)),
        _ => Box::new(PatternExtractor::new(labels)),
    };
    info!("🔧 使用 {} 解析后端", extractor.name());
    extractor
}
