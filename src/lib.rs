//! # Parse Questions
//!
//! 把题库答案表（HTML 表格）解析成结构化的答案键，并写出 `|` 分隔文件
//!
//! ## 处理流程
//!
//! 1. `extractor` - 从表格行中解析题目：过滤表头、定位正确答案、拆分题干与选项
//! 2. `output` - 写出带 BOM 的 `|` 分隔文件或 JSON，输出文件自动编号
//! 3. `app` - 串起一次运行：读取 → 解析 → 写出 → 状态提示
//!
//! ## 解析后端
//!
//! - `DomExtractor` - 基于 `scraper` 的 DOM 解析（默认特性 `html-parser`）
//! - `PatternExtractor` - 纯正则解析，不依赖 HTML 解析库
//!
//! 两者共享行过滤与题目组装逻辑，对规整的输入结果一致。

pub mod app;
pub mod config;
pub mod error;
pub mod extractor;
pub mod models;
pub mod output;
pub mod utils;

// 重新导出常用类型
pub use app::{App, RunOutcome};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use extractor::{build_extractor, Backend, PatternExtractor, QuestionExtractor};
#[cfg(feature = "html-parser")]
pub use extractor::DomExtractor;
pub use models::{AnswerIndex, HeaderLabels, QuestionRecord};
