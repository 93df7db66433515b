//! 表头标签
//!
//! 行过滤时用来识别表头行的单元格文本

use phf::phf_set;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 题库表格默认的表头文字
pub static DEFAULT_HEADER_LABELS: phf::Set<&'static str> = phf_set! {
    "題號",
    "答案",
    "題目",
};

/// 表头标签集合
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct HeaderLabels(HashSet<String>);

impl HeaderLabels {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(labels.into_iter().map(Into::into).collect())
    }

    /// 单元格文本（去掉首尾空白后）是否与某个表头标签完全一致
    pub fn matches(&self, cell_text: &str) -> bool {
        self.0.contains(cell_text.trim())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for HeaderLabels {
    fn default() -> Self {
        Self::new(DEFAULT_HEADER_LABELS.iter().copied())
    }
}

impl From<Vec<String>> for HeaderLabels {
    fn from(labels: Vec<String>) -> Self {
        Self::new(labels)
    }
}

impl From<HeaderLabels> for Vec<String> {
    fn from(labels: HeaderLabels) -> Self {
        let mut list: Vec<String> = labels.0.into_iter().collect();
        list.sort();
        list
    }
}
