//! 输出
//!
//! 把解析结果写成 `|` 分隔文本或 JSON，并负责输出文件的自动编号

pub mod delimited;
pub mod numbering;

pub use delimited::{write_delimited, DEFAULT_COLUMN_NAMES, DELIMITER};
pub use numbering::next_output_path;

use crate::error::{AppError, AppResult};
use crate::models::QuestionRecord;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// 输出格式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `|` 分隔，带 BOM 的 UTF-8
    #[default]
    Csv,
    /// 题目数组（含题号）
    Json,
}

impl OutputFormat {
    /// 文件扩展名
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Some(OutputFormat::Csv),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// 按格式写出全部题目
pub fn write_records(
    records: &[QuestionRecord],
    path: &Path,
    format: OutputFormat,
    column_names: &[String],
) -> AppResult<()> {
    debug!("写出 {} 题到 {} ({:?})", records.len(), path.display(), format);
    match format {
        OutputFormat::Csv => write_delimited(records, path, column_names),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(records)?;
            fs::write(path, json).map_err(|e| AppError::write_failed(path, e))
        }
    }
}
