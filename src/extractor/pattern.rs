//! 正则后端
//!
//! 不依赖 HTML 解析库，直接用正则匹配 `<tr>` / `<td>` 标签，适用于结构规整的表格。

use super::row::{self, RowCells, BLOCK_TAGS};
use super::QuestionExtractor;
use crate::models::{HeaderLabels, QuestionRecord};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static ROW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<tr\b[^>]*>(.*?)</tr\s*>").expect("行正则"));

static CELL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<td\b([^>]*)>(.*?)</td\s*>").expect("单元格正则"));

static COLSPAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:^|\s)colspan\s*=").expect("colspan 正则"));

static COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<!--.*?-->|<script\b.*?</script\s*>|<style\b.*?</style\s*>")
        .expect("注释正则")
});

static BREAK_RE: LazyLock<Regex> = LazyLock::new(|| {
    let block_tags = BLOCK_TAGS.iter().copied().collect::<Vec<_>>().join("|");
    Regex::new(&format!(r"(?i)<br\b[^>]*>|</?(?:{})\b[^>]*>", block_tags)).expect("换行正则")
});

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("标签正则"));

static SPAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<span\b[^>]*>(.*?)</span\s*>").expect("span 正则"));

/// 基于正则的题目解析器
#[derive(Debug, Clone, Default)]
pub struct PatternExtractor {
    labels: HeaderLabels,
}

impl PatternExtractor {
    pub fn new(labels: HeaderLabels) -> Self {
        Self { labels }
    }

    fn read_row(&self, row_html: &str) -> Option<RowCells> {
        let cells: Vec<(&str, &str)> = CELL_RE
            .captures_iter(row_html)
            .filter_map(|caps| Some((caps.get(1)?.as_str(), caps.get(2)?.as_str())))
            .collect();

        let texts: Vec<String> = cells.iter().map(|(_, html)| cell_text(html)).collect();
        let first_spans = cells
            .first()
            .is_some_and(|(attrs, _)| COLSPAN_RE.is_match(attrs));

        if !row::is_question_row(&texts, first_spans, &self.labels) {
            return None;
        }

        let question_html = cells[2].1;
        let annotated_answer = SPAN_RE
            .captures_iter(question_html)
            .filter_map(|caps| caps.get(1))
            .find_map(|inner| row::find_answer_marker(&cell_text(inner.as_str())));

        Some(RowCells {
            number: texts[0].trim().to_string(),
            answer_cell: texts[1].trim().to_string(),
            question_text: texts[2].clone(),
            annotated_answer,
        })
    }
}

impl QuestionExtractor for PatternExtractor {
    fn name(&self) -> &'static str {
        "pattern"
    }

    fn extract(&self, markup: &str) -> Vec<QuestionRecord> {
        let markup = COMMENT_RE.replace_all(markup, "");
        let rows: Vec<&str> = ROW_RE
            .captures_iter(&markup)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
            .collect();
        debug!("正则后端找到 {} 个 <tr>", rows.len());

        rows.into_iter()
            .filter_map(|row_html| self.read_row(row_html))
            .map(|cells| row::assemble(&cells))
            .collect()
    }
}

/// 单元格 HTML 转纯文本：`<br>` 与块级标签变为换行，其余标签去掉，再解码字符实体
fn cell_text(html: &str) -> String {
    let text = BREAK_RE.replace_all(html, "\n");
    let text = TAG_RE.replace_all(&text, "");
    decode_entities(&text)
}

/// 按 HTML5 实体表解码字符实体
pub fn decode_entities(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}
