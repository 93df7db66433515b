use std::path::PathBuf;
use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 输入文件不存在
    #[error("找不到檔案: {}", path.display())]
    MissingInputFile { path: PathBuf },

    /// 没有解析出任何题目
    #[error("未解析到任何題目，請確認輸入格式是否正確: {}", path.display())]
    NoRowsExtracted { path: PathBuf },

    /// 读取文件失败
    #[error("读取文件失败 ({}): {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 写入文件失败
    #[error("写入文件失败 ({}): {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 配置文件解析失败
    #[error("配置文件解析失败 ({}): {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// 配置值非法
    #[error("配置项 {key} 的值 '{value}' 无效: 期望 {expected}")]
    ConfigValue {
        key: String,
        value: String,
        expected: String,
    },

    /// JSON 序列化失败
    #[error("JSON 序列化失败: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// 创建文件读取错误
    pub fn read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::ReadFailed {
            path: path.into(),
            source,
        }
    }

    /// 创建文件写入错误
    pub fn write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::WriteFailed {
            path: path.into(),
            source,
        }
    }

    /// 创建配置值错误
    pub fn config_value(
        key: impl Into<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        AppError::ConfigValue {
            key: key.into(),
            value: value.into(),
            expected: expected.into(),
        }
    }
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
