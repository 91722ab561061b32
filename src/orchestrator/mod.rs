//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量数据源处理器
//! - 管理一次构建的生命周期（加载、合并、写出）
//! - 按配置顺序读取数据源，单个失败不影响整体
//! - 输出全局统计信息
//!
//! ### `consolidator` - 合并器
//! - 为单个数据源确定标签
//! - 调用抽取服务得到候选记录
//! - 按去重键合并进主题库
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<Source>)
//!     ↓
//! consolidator (处理单个 Source)
//!     ↓
//! services (能力层：tag / rows / items / writer)
//!     ↓
//! models (数据类型与加载器)
//! ```

pub mod batch_processor;
pub mod consolidator;

// 重新导出主要类型
pub use batch_processor::{App, ProcessingStats};
pub use consolidator::{
    consolidate, Consolidator, DrugPool, MergeKey, MergeOutcome, SkipReason, SourceOutcome,
    SourceStats,
};
