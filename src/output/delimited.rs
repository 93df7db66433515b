//! `|` 分隔输出
//!
//! 由 `csv` 按最小引用规则写出：字段含分隔符、引号或换行时加双引号，内部引号加倍。

use crate::error::{AppError, AppResult};
use crate::models::QuestionRecord;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// 字段分隔符
pub const DELIMITER: u8 = b'|';

/// 默认表头列名：题目、选项1-4、答案
pub const DEFAULT_COLUMN_NAMES: [&str; 6] = ["題目", "選項1", "選項2", "選項3", "選項4", "答案"];

const BOM: &[u8] = b"\xEF\xBB\xBF";

/// 写出带 BOM 的 UTF-8 文件，首行为表头
pub fn write_delimited(
    records: &[QuestionRecord],
    path: &Path,
    column_names: &[String],
) -> AppResult<()> {
    write_with_bom(records, path, column_names).map_err(|e| AppError::write_failed(path, e))
}

fn write_with_bom(
    records: &[QuestionRecord],
    path: &Path,
    column_names: &[String],
) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(BOM)?;

    let mut writer = csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .terminator(csv::Terminator::CRLF)
        .from_writer(file);
    writer.write_record(column_names)?;
    for record in records {
        writer.write_record(record.to_row())?;
    }
    writer.flush()
}
