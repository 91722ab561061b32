use crate::error::{AppError, AppResult};
use crate::models::quiz_bank::QuizBank;
use std::fs;
use std::path::{Path, PathBuf};

/// 从 JSON 文件加载题库
pub fn load_quiz_bank(json_file_path: &Path) -> AppResult<QuizBank> {
    let display = json_file_path.display().to_string();
    let content =
        fs::read_to_string(json_file_path).map_err(|e| AppError::source_unreadable(&display, e))?;

    serde_json::from_str(&content).map_err(|e| AppError::source_malformed(&display, e))
}

/// 列出文件夹中所有 JSON 题库文件
///
/// 按文件名排序，保证每次运行的处理顺序一致。
/// 文件夹不存在时返回空列表。
pub fn list_quiz_bank_files(folder_path: &Path) -> AppResult<Vec<PathBuf>> {
    if !folder_path.exists() {
        tracing::warn!("⚠️ 题库文件夹不存在: {}", folder_path.display());
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(folder_path)
        .map_err(|e| AppError::source_unreadable(folder_path.display().to_string(), e))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = match entry {
            Ok(entry) => entry.path(),
            Err(e) => {
                tracing::warn!("读取目录项失败 {}: {}", folder_path.display(), e);
                continue;
            }
        };
        if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json") {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}
