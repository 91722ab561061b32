//! # Drug Pool
//!
//! 把分散在多个数据源中的药物信息整理成一个去重后的主题库（master pool），
//! 供出题程序使用。
//!
//! ## 架构设计
//!
//! ### ① 数据层（Models）
//! - `models/` - 药物记录、来源标签、题库结构
//! - `models/loaders/` - 读取 CSV / JSON / TOML 文件，只负责 I/O
//!
//! ### ② 业务能力层（Services）
//! - `TagResolver` - 根据文件名推断来源标签（有序规则表）
//! - `extract_rows` - 表格行 → 候选记录
//! - `extract_items` - 题库题目 → 候选记录（含作用机制推断）
//! - `PoolWriter` - 写 master_pool.json 能力
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/consolidator` - 按 (lab, quiz, 通用名) 合并，只补全不覆盖
//! - `orchestrator/batch_processor` - 加载所有数据源、写出结果、输出统计
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{DrugRecord, ProvenanceTag, RawCandidate, Source, SourceContent, TabularLayout};
pub use orchestrator::{consolidate, App, Consolidator, DrugPool, ProcessingStats};
pub use services::{PoolWriter, TagResolver, TagRule};
pub use utils::logging;
