//! 已加载的数据源
//!
//! 文件读取完成后的内存表示，交给合并器处理。

use crate::models::provenance::ProvenanceTag;
use crate::models::quiz_bank::QuizBank;
use serde::Deserialize;

/// 表格源的列布局
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct TabularLayout {
    /// 第 4 列是分类（category），第 5 列是作用机制
    #[serde(default)]
    pub has_category: bool,
    /// 第 6 列是周次（仅在 `has_category` 时生效）
    #[serde(default)]
    pub has_sub_week: bool,
}

impl TabularLayout {
    pub fn new(has_category: bool, has_sub_week: bool) -> Self {
        Self {
            has_category,
            has_sub_week,
        }
    }
}

#[derive(Debug, Clone)]
pub enum SourceContent {
    /// 逗号分隔的表格行
    Tabular {
        rows: Vec<Vec<String>>,
        layout: TabularLayout,
    },
    /// 带 easy / hard 题池的题库
    QuizBank(QuizBank),
}

/// 一个数据源
#[derive(Debug, Clone)]
pub struct Source {
    /// 不含路径的文件名，用于推断标签
    pub name: String,
    /// 固定标签；为 `None` 时按文件名推断
    pub tag: Option<ProvenanceTag>,
    pub content: SourceContent,
}

impl Source {
    pub fn tabular(name: impl Into<String>, rows: Vec<Vec<String>>, layout: TabularLayout) -> Self {
        Self {
            name: name.into(),
            tag: None,
            content: SourceContent::Tabular { rows, layout },
        }
    }

    pub fn quiz_bank(name: impl Into<String>, bank: QuizBank) -> Self {
        Self {
            name: name.into(),
            tag: None,
            content: SourceContent::QuizBank(bank),
        }
    }

    /// 使用构建时配置的固定标签，跳过文件名推断
    pub fn with_tag(mut self, tag: Option<ProvenanceTag>) -> Self {
        self.tag = tag;
        self
    }

    pub fn kind(&self) -> &'static str {
        match self.content {
            SourceContent::Tabular { .. } => "表格",
            SourceContent::QuizBank(_) => "题库",
        }
    }
}
