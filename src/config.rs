use crate::error::AppResult;
use crate::models::loaders::load_config_manifest;
use crate::models::{ProvenanceTag, TabularLayout};
use serde::Deserialize;
use std::path::Path;

/// 配置清单的默认文件名（位于工作目录）
pub const DEFAULT_MANIFEST: &str = "master_pool.toml";

/// 程序配置
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 输出的主题库 JSON 文件
    pub output_path: String,
    /// 题库 JSON 文件夹
    pub quiz_folder: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 表格数据源，按顺序处理
    pub tabular_sources: Vec<TabularSourceConfig>,
}

/// 单个表格数据源
#[derive(Clone, Debug, Deserialize)]
pub struct TabularSourceConfig {
    pub path: String,
    /// 固定标签；省略时按文件名推断
    #[serde(default)]
    pub tag: Option<ProvenanceTag>,
    #[serde(flatten)]
    pub layout: TabularLayout,
}

impl TabularSourceConfig {
    pub fn new(path: impl Into<String>, tag: ProvenanceTag, layout: TabularLayout) -> Self {
        Self {
            path: path.into(),
            tag: Some(tag),
            layout,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_path: "master_pool.json".to_string(),
            quiz_folder: "quizzes".to_string(),
            verbose_logging: false,
            tabular_sources: vec![
                TabularSourceConfig::new(
                    "data/lab1.csv",
                    ProvenanceTag::new(1, 1),
                    TabularLayout::new(true, true),
                ),
                TabularSourceConfig::new(
                    "data/lab2_quiz1.csv",
                    ProvenanceTag::new(2, 1),
                    TabularLayout::new(true, false),
                ),
                TabularSourceConfig::new(
                    "data/lab2_quiz2.csv",
                    ProvenanceTag::new(2, 2),
                    TabularLayout::new(false, false),
                ),
            ],
        }
    }
}

impl Config {
    /// 读取配置清单；清单不存在时使用内置配置
    pub fn load(manifest_path: &Path) -> AppResult<Self> {
        if !manifest_path.exists() {
            return Ok(Self::default());
        }
        load_config_manifest(manifest_path)
    }
}
