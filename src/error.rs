use thiserror::Error;

/// 应用程序错误类型
///
/// 只有 `OutputWriteFailed` 和 `ConfigInvalid` 会中止运行，
/// 其余错误由调用方记录后跳过对应数据源。
#[derive(Debug, Error)]
pub enum AppError {
    /// 数据源文件不存在或无法打开
    #[error("无法读取数据源 ({path}): {source}")]
    SourceUnreadable {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// 数据源内容无法解析
    #[error("数据源格式错误 ({path}): {source}")]
    SourceMalformed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// 无法创建或写入输出文件
    #[error("写入输出文件失败 ({path}): {source}")]
    OutputWriteFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// 配置清单无法读取或解析
    #[error("配置文件无效 ({path}): {source}")]
    ConfigInvalid {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// 标签规则的正则表达式无效
    #[error("标签规则无效: {0}")]
    RuleInvalid(#[from] regex::Error),
}

// ========== 便捷构造函数 ==========

impl AppError {
    pub fn source_unreadable(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::SourceUnreadable {
            path: path.into(),
            source: Box::new(source),
        }
    }

    pub fn source_malformed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::SourceMalformed {
            path: path.into(),
            source: Box::new(source),
        }
    }

    pub fn output_write_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::OutputWriteFailed {
            path: path.into(),
            source: Box::new(source),
        }
    }

    pub fn config_invalid(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::ConfigInvalid {
            path: path.into(),
            source: Box::new(source),
        }
    }

    /// 是否应当中止整个运行
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            AppError::OutputWriteFailed { .. }
                | AppError::ConfigInvalid { .. }
                | AppError::RuleInvalid(_)
        )
    }
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_fatal_classification() {
        let missing = AppError::source_unreadable(
            "data/lab1.csv",
            io::Error::new(io::ErrorKind::NotFound, "missing"),
        );
        assert!(!missing.is_fatal());
        assert!(missing.to_string().contains("data/lab1.csv"));

        let output = AppError::output_write_failed(
            "master_pool.json",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(output.is_fatal());
    }
}
