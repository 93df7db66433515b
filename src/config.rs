use crate::error::{AppError, AppResult};
use crate::extractor::Backend;
use crate::models::HeaderLabels;
use crate::output::{OutputFormat, DEFAULT_COLUMN_NAMES};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// 程序配置
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// 默认输入 HTML 文件
    pub input_file: PathBuf,
    /// 自动编号输出所在目录
    pub output_dir: PathBuf,
    /// 输出文件前缀（例如 `1_`、`2_`）
    pub file_prefix: String,
    /// 输出格式
    pub format: OutputFormat,
    /// 解析后端
    pub parser: Backend,
    /// 用来识别表头行的文字
    pub header_labels: HeaderLabels,
    /// 输出表头列名：题目、选项1-4、答案
    pub column_names: Vec<String>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_file: PathBuf::from("questions.html"),
            output_dir: PathBuf::from("parsed_questions_csv"),
            file_prefix: "1_".to_string(),
            format: OutputFormat::Csv,
            parser: Backend::Auto,
            header_labels: HeaderLabels::default(),
            column_names: DEFAULT_COLUMN_NAMES.iter().map(|s| s.to_string()).collect(),
            verbose_logging: false,
        }
    }
}

/// TOML 配置文件，所有字段可省略
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    input_file: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    file_prefix: Option<String>,
    format: Option<OutputFormat>,
    parser: Option<Backend>,
    header_labels: Option<Vec<String>>,
    column_names: Option<Vec<String>>,
    verbose_logging: Option<bool>,
}

impl Config {
    /// 默认配置叠加环境变量
    pub fn from_env() -> Self {
        Self::default().with_env(|key| std::env::var(key).ok())
    }

    /// 依次叠加：默认值 < 配置文件 < 环境变量
    pub fn load(config_file: Option<&Path>) -> AppResult<Self> {
        match config_file {
            Some(path) => Ok(Self::from_toml_file(path)?.with_env(|key| std::env::var(key).ok())),
            None => Ok(Self::from_env()),
        }
    }

    /// 从 TOML 文件加载，未给出的字段取默认值
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| AppError::read_failed(path, e))?;
        Self::parse_toml(&content, path)
    }

    fn parse_toml(content: &str, path: &Path) -> AppResult<Self> {
        let file: ConfigFile = toml::from_str(content).map_err(|source| AppError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        Self::default().merge(file)
    }

    fn merge(self, file: ConfigFile) -> AppResult<Self> {
        let column_names = match file.column_names {
            Some(names) if names.len() != DEFAULT_COLUMN_NAMES.len() => {
                return Err(AppError::config_value(
                    "column_names",
                    names.join("|"),
                    format!("{} 个列名", DEFAULT_COLUMN_NAMES.len()),
                ));
            }
            Some(names) => names,
            None => self.column_names,
        };

        Ok(Self {
            input_file: file.input_file.unwrap_or(self.input_file),
            output_dir: file.output_dir.unwrap_or(self.output_dir),
            file_prefix: file.file_prefix.unwrap_or(self.file_prefix),
            format: file.format.unwrap_or(self.format),
            parser: file.parser.unwrap_or(self.parser),
            header_labels: file
                .header_labels
                .map(HeaderLabels::from)
                .unwrap_or(self.header_labels),
            column_names,
            verbose_logging: file.verbose_logging.unwrap_or(self.verbose_logging),
        })
    }

    /// 用环境变量覆盖配置；无法识别的值保留原配置
    pub fn with_env(self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let format = lookup("OUTPUT_FORMAT")
            .and_then(|v| parse_or_warn("OUTPUT_FORMAT", &v, OutputFormat::from_name))
            .unwrap_or(self.format);
        let parser = lookup("PARSER_BACKEND")
            .and_then(|v| parse_or_warn("PARSER_BACKEND", &v, Backend::from_name))
            .unwrap_or(self.parser);

        Self {
            input_file: lookup("INPUT_FILE")
                .map(PathBuf::from)
                .unwrap_or(self.input_file),
            output_dir: lookup("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(self.output_dir),
            file_prefix: lookup("FILE_PREFIX").unwrap_or(self.file_prefix),
            format,
            parser,
            header_labels: self.header_labels,
            column_names: self.column_names,
            verbose_logging: lookup("VERBOSE_LOGGING")
                .and_then(|v| v.parse().ok())
                .unwrap_or(self.verbose_logging),
        }
    }
}

fn parse_or_warn<T>(key: &str, value: &str, parse: impl Fn(&str) -> Option<T>) -> Option<T> {
    let parsed = parse(value);
    if parsed.is_none() {
        warn!("⚠️ 忽略无效的环境变量 {}={}", key, value);
    }
    parsed
}
