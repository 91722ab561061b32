//! 合并器 - 编排层
//!
//! ## 职责
//!
//! 逐个处理数据源，把候选记录合并进主题库。
//!
//! ## 核心流程
//!
//! 1. **确定标签**：使用固定标签，或通过 `TagResolver` 按文件名推断；推断失败则跳过整个数据源
//! 2. **抽取候选**：表格走行抽取，题库走题目抽取
//! 3. **查找合并**：按 (lab, quiz, 小写通用名) 查找已有记录
//!    - 找到：只补全空字段，已有值永不覆盖
//!    - 未找到：插入新记录
//!
//! 通用名和标签在首次插入后不再改变。

use crate::models::{DrugRecord, ProvenanceTag, RawCandidate, Source, SourceContent};
use crate::services::{extract_items, extract_rows, Extraction, TagResolver};
use std::collections::HashMap;
use tracing::{debug, info};

/// 去重键：(lab, quiz, 小写通用名)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MergeKey {
    group: u32,
    sequence: u32,
    generic: String,
}

impl MergeKey {
    pub fn new(tag: &ProvenanceTag, generic: &str) -> Self {
        Self {
            group: tag.group(),
            sequence: tag.sequence(),
            generic: generic.trim().to_lowercase(),
        }
    }

    pub fn of(record: &DrugRecord) -> Self {
        Self::new(&record.provenance, &record.generic)
    }
}

/// 单个候选记录的合并结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// 新记录
    Inserted,
    /// 补全了已有记录的至少一个空字段
    Completed,
    /// 已有记录没有变化
    Unchanged,
    /// 通用名为空，丢弃
    Discarded,
}

/// 主题库（一次运行内的累积结果）
///
/// 记录按首次插入顺序保存，索引只用于查找。
#[derive(Debug, Default)]
pub struct DrugPool {
    records: Vec<DrugRecord>,
    index: HashMap<MergeKey, usize>,
}

impl DrugPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// 合并一个候选记录
    pub fn merge(&mut self, candidate: RawCandidate) -> MergeOutcome {
        if candidate.generic.trim().is_empty() {
            return MergeOutcome::Discarded;
        }

        let key = MergeKey::new(&candidate.tag, &candidate.generic);

        match self.index.get(&key) {
            Some(&position) => {
                if complete_fields(&mut self.records[position], candidate) {
                    MergeOutcome::Completed
                } else {
                    MergeOutcome::Unchanged
                }
            }
            None => {
                self.index.insert(key, self.records.len());
                self.records.push(DrugRecord::from(candidate));
                MergeOutcome::Inserted
            }
        }
    }

    pub fn get(&self, tag: &ProvenanceTag, generic: &str) -> Option<&DrugRecord> {
        self.index
            .get(&MergeKey::new(tag, generic))
            .map(|&position| &self.records[position])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[DrugRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<DrugRecord> {
        self.records
    }
}

/// 只填补空字段，返回是否有字段被填补
fn complete_fields(record: &mut DrugRecord, candidate: RawCandidate) -> bool {
    let mut changed = false;
    changed |= fill(&mut record.brand, candidate.brand);
    changed |= fill(&mut record.drug_class, candidate.drug_class);
    changed |= fill(&mut record.category, candidate.category);
    changed |= fill(&mut record.mechanism_of_action, candidate.mechanism_of_action);
    changed
}

fn fill(slot: &mut Option<String>, value: Option<String>) -> bool {
    let is_empty = slot.as_deref().map_or(true, |s| s.trim().is_empty());
    match value {
        Some(value) if is_empty && !value.trim().is_empty() => {
            *slot = Some(value);
            true
        }
        _ => false,
    }
}

/// 数据源被整体跳过的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// 文件名不匹配任何标签规则
    Untaggable,
    /// 文件不存在、无法打开或无法解析
    Unreadable,
}

/// 单个数据源的合并统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SourceStats {
    pub extracted: usize,
    pub inserted: usize,
    pub completed: usize,
    pub unchanged: usize,
    pub discarded: usize,
    /// 抽取阶段被跳过的行 / 题目
    pub skipped: usize,
}

impl SourceStats {
    fn record(&mut self, outcome: MergeOutcome) {
        match outcome {
            MergeOutcome::Inserted => self.inserted += 1,
            MergeOutcome::Completed => self.completed += 1,
            MergeOutcome::Unchanged => self.unchanged += 1,
            MergeOutcome::Discarded => self.discarded += 1,
        }
    }
}

/// 单个数据源的处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceOutcome {
    Merged(SourceStats),
    Skipped(SkipReason),
}

/// 合并器
pub struct Consolidator {
    resolver: TagResolver,
    pool: DrugPool,
}

impl Consolidator {
    pub fn new(resolver: TagResolver) -> Self {
        Self {
            resolver,
            pool: DrugPool::new(),
        }
    }

    /// 处理一个数据源并合并进主题库
    pub fn ingest(&mut self, source: &Source) -> SourceOutcome {
        let Some(tag) = source.tag.or_else(|| self.resolver.resolve(&source.name)) else {
            debug!("{} 不匹配任何标签规则，已跳过", source.name);
            return SourceOutcome::Skipped(SkipReason::Untaggable);
        };

        let extraction: Extraction = match &source.content {
            SourceContent::Tabular { rows, layout } => extract_rows(rows, tag, *layout),
            SourceContent::QuizBank(bank) => extract_items(bank, tag),
        };

        let mut stats = SourceStats {
            extracted: extraction.candidates.len(),
            skipped: extraction.skipped,
            ..Default::default()
        };

        for candidate in extraction.candidates {
            stats.record(self.pool.merge(candidate));
        }

        info!(
            "{} 已加载 {} 条（来自 {}）{}: 新增 {}, 补全 {}",
            source.kind(),
            stats.extracted,
            source.name,
            tag,
            stats.inserted,
            stats.completed
        );

        SourceOutcome::Merged(stats)
    }

    pub fn pool(&self) -> &DrugPool {
        &self.pool
    }

    pub fn into_records(self) -> Vec<DrugRecord> {
        self.pool.into_records()
    }
}

/// 依次合并所有数据源，返回去重后的记录
pub fn consolidate(
    resolver: TagResolver,
    sources: impl IntoIterator<Item = Source>,
) -> Vec<DrugRecord> {
    let mut consolidator = Consolidator::new(resolver);
    for source in sources {
        consolidator.ingest(&source);
    }
    consolidator.into_records()
}
