//! 批量数据源处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责一次完整的主题库构建。
//!
//! ## 核心功能
//!
//! 1. **加载数据源**：按配置顺序读取表格文件，再按文件名顺序读取题库文件夹
//! 2. **容错**：单个文件无法读取时记录警告并跳过，不影响其余数据源
//! 3. **向下委托**：每个数据源交给 `Consolidator` 合并
//! 4. **写出结果**：写入主题库 JSON，写入失败是唯一的致命错误
//! 5. **全局统计**：汇总所有数据源的处理结果

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{list_quiz_bank_files, load_csv_rows, load_quiz_bank, Source};
use crate::orchestrator::consolidator::{Consolidator, SkipReason, SourceOutcome};
use crate::services::{PoolWriter, TagResolver};
use crate::utils::logging::{log_source_skipped, log_startup, print_final_stats};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// 处理统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProcessingStats {
    /// 已合并的数据源
    pub merged: usize,
    /// 文件名不匹配规则而跳过的数据源
    pub untaggable: usize,
    /// 无法读取而跳过的数据源
    pub unreadable: usize,
    /// 抽取出的候选记录总数
    pub candidates: usize,
    /// 抽取阶段跳过的行 / 题目
    pub skipped_entries: usize,
    /// 写出的记录数
    pub written: usize,
}

impl ProcessingStats {
    pub fn total_sources(&self) -> usize {
        self.merged + self.untaggable + self.unreadable
    }

    fn record(&mut self, outcome: SourceOutcome) {
        match outcome {
            SourceOutcome::Merged(stats) => {
                self.merged += 1;
                self.candidates += stats.extracted;
                self.skipped_entries += stats.skipped + stats.discarded;
            }
            SourceOutcome::Skipped(SkipReason::Untaggable) => self.untaggable += 1,
            SourceOutcome::Skipped(SkipReason::Unreadable) => self.unreadable += 1,
        }
    }
}

/// 应用主结构
pub struct App {
    config: Config,
    resolver: TagResolver,
    writer: PoolWriter,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> AppResult<Self> {
        log_startup(&config);

        let resolver = TagResolver::new()?;
        let writer = PoolWriter::with_path(&config.output_path);

        Ok(Self {
            config,
            resolver,
            writer,
        })
    }

    pub fn output_path(&self) -> &Path {
        self.writer.output_path()
    }

    /// 运行一次完整的构建
    pub fn run(&self) -> AppResult<ProcessingStats> {
        let mut stats = ProcessingStats::default();
        let mut consolidator = Consolidator::new(self.resolver.clone());

        self.process_tabular_sources(&mut consolidator, &mut stats);
        self.process_quiz_banks(&mut consolidator, &mut stats);

        let records = consolidator.into_records();
        self.writer.write(&records)?;
        stats.written = records.len();

        print_final_stats(&stats, &self.writer.output_path().display().to_string());

        Ok(stats)
    }

    /// 处理配置中的表格数据源
    fn process_tabular_sources(
        &self,
        consolidator: &mut Consolidator,
        stats: &mut ProcessingStats,
    ) {
        for entry in &self.config.tabular_sources {
            let path = PathBuf::from(&entry.path);

            let outcome = match load_csv_rows(&path) {
                Ok(rows) => {
                    let source = Source::tabular(file_name(&path), rows, entry.layout)
                        .with_tag(entry.tag);
                    consolidator.ingest(&source)
                }
                Err(e) => unreadable(&e),
            };

            stats.record(outcome);
        }
    }

    /// 处理题库文件夹中的所有题库
    fn process_quiz_banks(&self, consolidator: &mut Consolidator, stats: &mut ProcessingStats) {
        let folder = Path::new(&self.config.quiz_folder);
        let files = match list_quiz_bank_files(folder) {
            Ok(files) => files,
            Err(e) => {
                warn!("⚠️ {}", e);
                return;
            }
        };

        info!("📁 在 {} 中找到 {} 个题库文件", folder.display(), files.len());

        for path in files {
            let name = file_name(&path);

            // 无法推断标签的文件不必读取
            if self.resolver.resolve(&name).is_none() {
                log_source_skipped(&name);
                stats.record(SourceOutcome::Skipped(SkipReason::Untaggable));
                continue;
            }

            let outcome = match load_quiz_bank(&path) {
                Ok(bank) => consolidator.ingest(&Source::quiz_bank(name, bank)),
                Err(e) => unreadable(&e),
            };

            stats.record(outcome);
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

fn unreadable(error: &AppError) -> SourceOutcome {
    warn!("⚠️ {}，已跳过", error);
    SourceOutcome::Skipped(SkipReason::Unreadable)
}
