//! 结构化后端
//!
//! 使用 `scraper` 构建 DOM 后按元素遍历表格行

use super::row::{self, RowCells, BLOCK_TAGS};
use super::QuestionExtractor;
use crate::models::{HeaderLabels, QuestionRecord};
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use tracing::debug;

static ROW_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tr").expect("tr 选择器"));

static SPAN_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span").expect("span 选择器"));

/// 基于 HTML 解析库的题目解析器
#[derive(Debug, Clone, Default)]
pub struct DomExtractor {
    labels: HeaderLabels,
}

impl DomExtractor {
    pub fn new(labels: HeaderLabels) -> Self {
        Self { labels }
    }

    fn read_row(&self, tr: ElementRef<'_>) -> Option<RowCells> {
        let cells: Vec<ElementRef<'_>> = tr
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|el| el.value().name() == "td")
            .collect();

        let texts: Vec<String> = cells.iter().map(|cell| cell_text(*cell)).collect();
        let first_spans = cells
            .first()
            .is_some_and(|cell| cell.value().attr("colspan").is_some());

        if !row::is_question_row(&texts, first_spans, &self.labels) {
            return None;
        }

        let annotated_answer = cells[2]
            .select(&SPAN_SELECTOR)
            .find_map(|span| row::find_answer_marker(&cell_text(span)));

        Some(RowCells {
            number: texts[0].trim().to_string(),
            answer_cell: texts[1].trim().to_string(),
            question_text: texts[2].clone(),
            annotated_answer,
        })
    }
}

impl QuestionExtractor for DomExtractor {
    fn name(&self) -> &'static str {
        "dom"
    }

    fn extract(&self, markup: &str) -> Vec<QuestionRecord> {
        let document = Html::parse_document(&ensure_table(markup));
        let rows: Vec<ElementRef<'_>> = document.select(&ROW_SELECTOR).collect();
        debug!("DOM 后端找到 {} 个 <tr>", rows.len());

        rows.into_iter()
            .filter_map(|tr| self.read_row(tr))
            .map(|cells| row::assemble(&cells))
            .collect()
    }
}

/// 没有 `<table>` 的片段补上外层表格，否则 HTML5 树构建会丢掉孤立的 `<tr>`/`<td>`
fn ensure_table(markup: &str) -> String {
    if markup.to_ascii_lowercase().contains("<table") {
        markup.to_string()
    } else {
        format!("<table>{}</table>", markup)
    }
}

/// 元素的纯文本：`<br>` 与块级元素前后插入换行，跳过 script/style
fn cell_text(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    push_text(element, &mut out);
    out
}

fn push_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(_) => {
                let Some(el) = ElementRef::wrap(child) else {
                    continue;
                };
                let name = el.value().name();
                if name == "br" {
                    out.push('\n');
                    continue;
                }
                if name == "script" || name == "style" {
                    continue;
                }
                let block = BLOCK_TAGS.contains(name);
                if block {
                    out.push('\n');
                }
                push_text(el, out);
                if block {
                    out.push('\n');
                }
            }
            _ => {}
        }
    }
}
