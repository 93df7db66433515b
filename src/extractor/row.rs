//! 行级解析逻辑
//!
//! 两个后端只负责把 `<tr>` 拆成单元格文本，过滤和组装题目都在这里完成，
//! 保证两条路径对同一份输入得到完全相同的结果。

use crate::models::question::OPTION_COUNT;
use crate::models::{AnswerIndex, HeaderLabels, QuestionRecord};
use phf::phf_set;
use regex::Regex;
use std::sync::LazyLock;

/// 视为换行的块级标签（`<br>` 单独处理）
pub static BLOCK_TAGS: phf::Set<&'static str> = phf_set! {
    "p",
    "div",
    "li",
};

/// 内联的正确答案标记，例如 `正確答案為:3`
static ANSWER_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"正確答案為[:：]?\s*([1-4])").expect("答案标记正则"));

/// 选项标记 `(1)` ~ `(4)`，括号内允许空白
static OPTION_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\s*([1-4])\s*\)").expect("选项标记正则"));

/// 一行表格拆出的单元格内容
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowCells {
    /// 第一格：题号
    pub number: String,
    /// 第二格：答案栏纯文本
    pub answer_cell: String,
    /// 第三格：题目与选项文本，块级元素之间以换行分隔
    pub question_text: String,
    /// 后端在标注元素（如红色 span）里直接找到的答案编号
    pub annotated_answer: Option<AnswerIndex>,
}

/// 判断一行是否为题目行
///
/// `cell_texts` 为该行所有直接子单元格的纯文本，`first_cell_spans` 表示第一格带 colspan。
pub fn is_question_row(
    cell_texts: &[String],
    first_cell_spans: bool,
    labels: &HeaderLabels,
) -> bool {
    if cell_texts.len() < 3 {
        return false;
    }
    if first_cell_spans {
        return false;
    }
    !cell_texts.iter().take(3).any(|text| labels.matches(text))
}

/// 由单元格内容组装题目
pub fn assemble(cells: &RowCells) -> QuestionRecord {
    let text = normalize_lines(&cells.question_text);

    let answer_index = cells
        .annotated_answer
        .or_else(|| find_answer_marker(&text))
        .or_else(|| first_answer_digit(&cells.answer_cell));

    let text = normalize_lines(&strip_answer_markers(&text));
    let (title, options) = split_options(&text);

    QuestionRecord::new(cells.number.trim(), title, options, answer_index)
}

/// 在文本中查找 `正確答案為:N` 标记
pub fn find_answer_marker(text: &str) -> Option<AnswerIndex> {
    ANSWER_MARKER_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().chars().next())
        .and_then(AnswerIndex::from_digit)
}

/// 去掉所有 `正確答案為:N` 标记
pub fn strip_answer_markers(text: &str) -> String {
    ANSWER_MARKER_RE.replace_all(text, "").into_owned()
}

/// 答案栏中第一个 1-4 的数字
pub fn first_answer_digit(text: &str) -> Option<AnswerIndex> {
    text.chars().find_map(AnswerIndex::from_digit)
}

/// 拆分题干与选项
///
/// 有 `(N)` 标记时按标记切分，选项按声明的编号归位；同一编号出现多次时后者覆盖前者。
/// 没有标记时退回按行切分。
pub fn split_options(text: &str) -> (String, [String; OPTION_COUNT]) {
    let markers: Vec<(usize, usize, AnswerIndex)> = OPTION_MARKER_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let index = caps
                .get(1)?
                .as_str()
                .chars()
                .next()
                .and_then(AnswerIndex::from_digit)?;
            Some((whole.start(), whole.end(), index))
        })
        .collect();

    let Some(&(first_start, _, _)) = markers.first() else {
        return split_lines(text);
    };

    let mut options: [String; OPTION_COUNT] = Default::default();
    for (i, &(_, end, index)) in markers.iter().enumerate() {
        let next_start = markers.get(i + 1).map_or(text.len(), |&(start, _, _)| start);
        options[index.slot()] = collapse_whitespace(&text[end..next_start]);
    }

    (collapse_whitespace(&text[..first_start]), options)
}

/// 无选项标记时的按行切分：至少 5 行时首行为题干、随后 4 行为选项
fn split_lines(text: &str) -> (String, [String; OPTION_COUNT]) {
    let lines: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    let mut options: [String; OPTION_COUNT] = Default::default();

    if lines.len() < OPTION_COUNT + 1 {
        return (text.trim().to_string(), options);
    }

    for (slot, line) in options.iter_mut().zip(&lines[1..=OPTION_COUNT]) {
        *slot = line.to_string();
    }
    (lines[0].to_string(), options)
}

/// 每行去掉首尾空白并丢弃空行，行间以 `\n` 连接
pub fn normalize_lines(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// 连续空白合并为单个空格并去掉首尾空白
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
