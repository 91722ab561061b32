use crate::config::Config;
use crate::error::{AppError, AppResult};
use std::fs;
use std::path::Path;

/// 从 TOML 清单加载配置
///
/// 清单中未出现的字段使用内置默认值。
pub fn load_config_manifest(toml_file_path: &Path) -> AppResult<Config> {
    let display_path = toml_file_path.display().to_string();
    let content =
        fs::read_to_string(toml_file_path).map_err(|e| AppError::config_invalid(&display_path, e))?;

    let config: Config =
        toml::from_str(&content).map_err(|e| AppError::config_invalid(&display_path, e))?;

    tracing::info!(
        "已加载配置清单 {}: {} 个表格数据源",
        display_path,
        config.tabular_sources.len()
    );

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProvenanceTag;

    #[test]
    fn test_manifest_overrides_sources() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("master_pool.toml");
        fs::write(
            &path,
            r#"
output_path = "out/pool.json"

[[tabular_sources]]
path = "data/lab1_part2.csv"
tag = { lab = 1, quiz = 2 }
has_category = true
has_sub_week = true

[[tabular_sources]]
path = "data/lab-quiz5-antiarrhythmics.csv"
"#,
        )
        .unwrap();

        let config = load_config_manifest(&path).unwrap();

        assert_eq!(config.output_path, "out/pool.json");
        assert_eq!(config.quiz_folder, "quizzes");
        assert_eq!(config.tabular_sources.len(), 2);
        assert_eq!(config.tabular_sources[0].tag, Some(ProvenanceTag::new(1, 2)));
        assert!(config.tabular_sources[0].layout.has_sub_week);
        assert_eq!(config.tabular_sources[1].tag, None);
        assert!(!config.tabular_sources[1].layout.has_category);
    }

    #[test]
    fn test_invalid_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("master_pool.toml");
        fs::write(&path, "tabular_sources = 3").unwrap();

        let err = load_config_manifest(&path).unwrap_err();
        assert!(matches!(err, AppError::ConfigInvalid { .. }));
    }
}
