use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::extractor::{build_extractor, QuestionExtractor};
use crate::output::{self, next_output_path};
use crate::utils::logging::{log_extracted, log_startup};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// 一次运行的结果
///
/// 输入缺失和没有题目都是正常结束，不写任何输出。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// 已写出 `count` 题
    Written { path: PathBuf, count: usize },
    /// 输入文件不存在
    MissingInput(PathBuf),
    /// 没有解析出题目
    NoRows(PathBuf),
}

impl RunOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, RunOutcome::Written { .. })
    }

    /// 面向用户的一行状态提示
    pub fn status_line(&self) -> String {
        match self {
            RunOutcome::Written { path, count } => {
                let shown = std::path::absolute(path).unwrap_or_else(|_| path.clone());
                format!("✓ 輸出 {} 筆到 {}", count, shown.display())
            }
            RunOutcome::MissingInput(path) => format!(
                "✗ {}",
                AppError::MissingInputFile { path: path.clone() }
            ),
            RunOutcome::NoRows(path) => format!(
                "✗ {}",
                AppError::NoRowsExtracted { path: path.clone() }
            ),
        }
    }
}

/// 应用主结构
pub struct App {
    config: Config,
    extractor: Box<dyn QuestionExtractor>,
}

impl App {
    /// 按配置选择解析后端
    pub fn new(config: Config) -> Self {
        let extractor = build_extractor(config.parser, config.header_labels.clone());
        Self { config, extractor }
    }

    /// 读取输入、解析并写出
    ///
    /// # 参数
    /// - `input`: 输入 HTML，None 时使用配置中的默认文件
    /// - `output`: 输出文件，None 时在输出目录中自动编号
    pub fn run(&self, input: Option<&Path>, output: Option<&Path>) -> AppResult<RunOutcome> {
        let input = input.unwrap_or(self.config.input_file.as_path());
        log_startup(&self.config, input);

        if !input.exists() {
            warn!("⚠️ 输入文件不存在: {}", input.display());
            return Ok(RunOutcome::MissingInput(input.to_path_buf()));
        }

        let markup = fs::read_to_string(input).map_err(|e| AppError::read_failed(input, e))?;
        let records = self.extractor.extract(&markup);
        log_extracted(&records, self.config.verbose_logging);

        if records.is_empty() {
            warn!("⚠️ 没有找到任何题目行，不写出文件");
            return Ok(RunOutcome::NoRows(input.to_path_buf()));
        }

        let path = match output {
            Some(path) => path.to_path_buf(),
            None => next_output_path(
                &self.config.output_dir,
                &self.config.file_prefix,
                self.config.format.extension(),
            )?,
        };

        output::write_records(
            &records,
            &path,
            self.config.format,
            &self.config.column_names,
        )?;
        info!("💾 已写出: {}", path.display());

        Ok(RunOutcome::Written {
            path,
            count: records.len(),
        })
    }
}
