//! 日志工具模块
//!
//! 提供日志初始化、格式化和输出的辅助函数
use crate::config::Config;
use crate::orchestrator::ProcessingStats;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// 默认级别为 `info`，可通过 `RUST_LOG` 覆盖。
/// 重复调用是安全的（测试中常见）。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 主题库构建开始 - {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("📊 表格数据源: {} 个", config.tabular_sources.len());
    info!("📁 题库文件夹: {}", config.quiz_folder);
    info!("{}", "=".repeat(60));
}

/// 记录因无法推断标签而跳过的数据源
pub fn log_source_skipped(name: &str) {
    debug!("{} 不匹配任何标签规则，已跳过", name);
}

/// 打印最终统计信息
///
/// # 参数
/// - `stats`: 处理统计
/// - `output_path`: 输出文件路径
pub fn print_final_stats(stats: &ProcessingStats, output_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 已合并数据源: {}/{}", stats.merged, stats.total_sources());
    info!("⏭️ 无标签跳过: {}", stats.untaggable);
    info!("❌ 无法读取: {}", stats.unreadable);
    info!(
        "🧾 候选记录: {} | 跳过条目: {}",
        stats.candidates, stats.skipped_entries
    );
    info!("{}", "=".repeat(60));
    info!("\n主题库已保存至: {} ({} 条)", output_path, stats.written);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
