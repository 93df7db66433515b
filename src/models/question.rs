use serde::{Deserialize, Serialize};

/// 每题固定的选项数量
pub const OPTION_COUNT: usize = 4;

/// 正确答案的选项编号（1-4）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct AnswerIndex(u8);

impl AnswerIndex {
    /// 从数字构造，超出 1-4 返回 None
    pub fn new(n: u8) -> Option<Self> {
        (1..=OPTION_COUNT as u8).contains(&n).then_some(Self(n))
    }

    /// 从单个字符构造（'1'..'4'）
    pub fn from_digit(c: char) -> Option<Self> {
        c.to_digit(10).and_then(|d| Self::new(d as u8))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// 对应 options 数组中的下标（0-based）
    pub fn slot(self) -> usize {
        usize::from(self.0) - 1
    }
}

impl TryFrom<u8> for AnswerIndex {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Self::new(n).ok_or_else(|| format!("答案编号必须在 1-{} 之间: {}", OPTION_COUNT, n))
    }
}

impl From<AnswerIndex> for u8 {
    fn from(index: AnswerIndex) -> Self {
        index.0
    }
}

impl std::fmt::Display for AnswerIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 解析出的单道题目
///
/// 通过 `new` 构造时，`answer` 要么为空，要么等于某个选项的文本。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// 源表格中的题号（不写入 `|` 分隔输出）
    #[serde(default)]
    pub number: String,
    /// 题干（已去掉选项和正确答案标记）
    pub title: String,
    /// 选项 1-4，缺失的为空字符串
    pub options: [String; OPTION_COUNT],
    /// 正确答案对应的选项文本，无法判定时为空
    #[serde(default)]
    pub answer: String,
}

impl QuestionRecord {
    /// 根据题干、选项和答案编号组装题目
    ///
    /// 答案编号指向空选项时得到空答案，不视为错误。
    pub fn new(
        number: impl Into<String>,
        title: impl Into<String>,
        options: [String; OPTION_COUNT],
        answer_index: Option<AnswerIndex>,
    ) -> Self {
        let answer = answer_index
            .map(|index| options[index.slot()].clone())
            .unwrap_or_default();
        Self {
            number: number.into(),
            title: title.into(),
            options,
            answer,
        }
    }

    /// 反查答案对应的选项编号
    ///
    /// 多个选项文本相同时返回第一个。
    pub fn answer_index(&self) -> Option<AnswerIndex> {
        if self.answer.is_empty() {
            return None;
        }
        self.options
            .iter()
            .position(|opt| *opt == self.answer)
            .and_then(|pos| AnswerIndex::new(pos as u8 + 1))
    }

    pub fn has_answer(&self) -> bool {
        !self.answer.is_empty()
    }

    /// 按输出列顺序排列的字段：题目、选项1-4、答案
    pub fn to_row(&self) -> [&str; OPTION_COUNT + 2] {
        [
            self.title.as_str(),
            self.options[0].as_str(),
            self.options[1].as_str(),
            self.options[2].as_str(),
            self.options[3].as_str(),
            self.answer.as_str(),
        ]
    }
}

impl std::fmt::Display for QuestionRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let title_preview = crate::utils::logging::truncate_text(&self.title, 40);
        if let Some(index) = self.answer_index() {
            write!(f, "{} [答案: ({}) {}]", title_preview, index, self.answer)
        } else {
            write!(f, "{} [答案: 未知]", title_preview)
        }
    }
}
