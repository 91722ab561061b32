//! 主题库写入服务 - 业务能力层
//!
//! 只负责"写 master_pool.json"能力，不关心合并流程

use crate::error::{AppError, AppResult};
use crate::models::DrugRecord;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// 主题库写入服务
pub struct PoolWriter {
    output_path: PathBuf,
}

impl PoolWriter {
    /// 使用自定义文件路径创建
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: path.into(),
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// 写入主题库（格式化 JSON 数组，UTF-8）
    ///
    /// 任何 I/O 失败都返回 `OutputWriteFailed`，由调用方中止运行。
    pub fn write(&self, records: &[DrugRecord]) -> AppResult<()> {
        let display_path = self.output_path.display().to_string();
        debug!("写入主题库: {} | 记录数: {}", display_path, records.len());

        if let Some(parent) = self.output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| AppError::output_write_failed(&display_path, e))?;
        }

        let file = File::create(&self.output_path)
            .map_err(|e| AppError::output_write_failed(&display_path, e))?;
        let mut writer = BufWriter::new(file);

        serde_json::to_writer_pretty(&mut writer, records)
            .map_err(|e| AppError::output_write_failed(&display_path, e))?;
        writer
            .flush()
            .map_err(|e| AppError::output_write_failed(&display_path, e))?;

        Ok(())
    }
}
