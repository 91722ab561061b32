use anyhow::{Context, Result};
use drug_pool::config::{Config, DEFAULT_MANIFEST};
use drug_pool::{logging, App};
use std::path::Path;

fn main() -> Result<()> {
    // 加载配置
    let config = Config::load(Path::new(DEFAULT_MANIFEST)).context("加载配置失败")?;

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用
    let app = App::initialize(config)?;
    let stats = app
        .run()
        .with_context(|| format!("生成 {} 失败", app.output_path().display()))?;

    println!(
        "Generated {} with {} drugs.",
        app.output_path().display(),
        stats.written
    );

    Ok(())
}
