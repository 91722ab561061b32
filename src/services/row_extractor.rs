//! 表格行抽取服务 - 业务能力层
//!
//! 只负责"把表格行变成候选记录"能力，不做去重。

use crate::models::{ProvenanceTag, RawCandidate, TabularLayout};
use tracing::debug;

/// 表头行第一列中的标记
pub const HEADER_SENTINEL: &str = "Generic Name";

/// 必须存在的前导列（通用名、商品名、类别）
const REQUIRED_COLUMNS: usize = 3;

/// 单个数据源的抽取结果
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub candidates: Vec<RawCandidate>,
    /// 无法抽取而被跳过的行 / 题目数量
    pub skipped: usize,
}

/// 从表格行中抽取候选记录
///
/// # 参数
/// - `rows`: 已读取的所有行
/// - `default_tag`: 该数据源的标签
/// - `layout`: 列布局
///
/// # 返回
/// 每个数据行对应一个候选记录（可能重复）
pub fn extract_rows(
    rows: &[Vec<String>],
    default_tag: ProvenanceTag,
    layout: TabularLayout,
) -> Extraction {
    let mut extraction = Extraction::default();
    let mut seen_header = false;

    for (index, row) in rows.iter().enumerate() {
        if row.is_empty() {
            continue;
        }

        // 文件中可能重复出现表头
        if row[0].contains(HEADER_SENTINEL) {
            seen_header = true;
            continue;
        }

        if !seen_header {
            continue;
        }

        if row.len() < REQUIRED_COLUMNS {
            debug!("第 {} 行只有 {} 列，已跳过", index + 1, row.len());
            extraction.skipped += 1;
            continue;
        }

        extraction.candidates.push(extract_row(row, index, default_tag, layout));
    }

    extraction
}

fn extract_row(
    row: &[String],
    index: usize,
    default_tag: ProvenanceTag,
    layout: TabularLayout,
) -> RawCandidate {
    let column = |i: usize| row.get(i).map(String::as_str);

    let (category, moa, tag) = if layout.has_category {
        let tag = match column(5) {
            Some(raw) if layout.has_sub_week => match raw.trim().parse::<u32>() {
                Ok(week) => default_tag.with_sub_week(week),
                Err(_) => {
                    debug!("第 {} 行周次无法解析: '{}'", index + 1, raw);
                    default_tag
                }
            },
            _ => default_tag,
        };
        (column(3), column(4), tag)
    } else {
        (None, column(3), default_tag)
    };

    RawCandidate::new(row[0].as_str(), tag)
        .with_brand(column(1))
        .with_class(column(2))
        .with_category(category)
        .with_moa(moa)
}
