//! 输出文件自动编号
//!
//! 扫描目录中 `<前缀><数字>.<扩展名>` 形式的文件，取最大编号加一

use crate::error::{AppError, AppResult};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 生成下一个输出文件路径，目录不存在时创建
pub fn next_output_path(output_dir: &Path, prefix: &str, extension: &str) -> AppResult<PathBuf> {
    fs::create_dir_all(output_dir).map_err(|e| AppError::write_failed(output_dir, e))?;

    let pattern = format!(
        r"^{}(\d+)\.{}$",
        regex::escape(prefix),
        regex::escape(extension)
    );
    let re = Regex::new(&pattern)
        .map_err(|_| AppError::config_value("file_prefix", prefix, "可用作文件名的前缀"))?;

    let entries = fs::read_dir(output_dir).map_err(|e| AppError::read_failed(output_dir, e))?;
    let max_num = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let name = entry.file_name();
            let caps = re.captures(name.to_str()?)?;
            caps.get(1)?.as_str().parse::<u64>().ok()
        })
        .max()
        .unwrap_or(0);

    let next_num = max_num.checked_add(1).ok_or_else(|| {
        AppError::config_value(
            "output_dir",
            output_dir.display().to_string(),
            format!("编号未用尽的输出目录（已有 {}{}.{}）", prefix, max_num, extension),
        )
    })?;
    let filename = format!("{}{}.{}", prefix, next_num, extension);
    debug!("已有最大编号 {}，新文件: {}", max_num, filename);
    Ok(output_dir.join(filename))
}
