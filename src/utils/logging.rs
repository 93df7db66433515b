//! 日志工具模块
//!
//! 初始化 tracing 订阅器，并提供运行过程中的日志输出函数

use crate::config::Config;
use crate::models::QuestionRecord;
use std::path::Path;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// 优先使用 `RUST_LOG`，否则按 `verbose` 取 debug / info。日志写到 stderr，
/// stdout 只留给结果提示。重复调用时忽略。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `config`: 当前配置
/// - `input`: 实际使用的输入文件
pub fn log_startup(config: &Config, input: &Path) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 题库解析启动 - {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("📄 输入文件: {}", input.display());
    info!("📁 输出目录: {} (前缀 {})", config.output_dir.display(), config.file_prefix);
    info!("{}", "=".repeat(60));
}

/// 记录解析结果
///
/// # 参数
/// - `records`: 解析出的题目
/// - `verbose`: 为真时逐题输出预览
pub fn log_extracted(records: &[QuestionRecord], verbose: bool) {
    let answered = records.iter().filter(|r| r.has_answer()).count();
    info!("✓ 解析出 {} 题，其中 {} 题有答案", records.len(), answered);

    if verbose {
        for (i, record) in records.iter().enumerate() {
            debug!("  {}. {}", i + 1, record);
        }
    }
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大字符数
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
