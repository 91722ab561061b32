use crate::error::{AppError, AppResult};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// 从 CSV 文件读取所有行（不做表头识别）
///
/// 列数可变；表头和空行的处理交给行抽取器。
pub fn load_csv_rows(csv_file_path: &Path) -> AppResult<Vec<Vec<String>>> {
    let display = csv_file_path.display().to_string();
    let file = File::open(csv_file_path).map_err(|e| AppError::source_unreadable(&display, e))?;

    parse_csv_rows(file).map_err(|e| AppError::source_malformed(&display, e))
}

/// 解析 CSV 内容
pub fn parse_csv_rows<R: Read>(reader: R) -> Result<Vec<Vec<String>>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(rows)
}
