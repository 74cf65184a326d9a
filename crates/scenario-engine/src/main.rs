//! 场景执行 CLI
//!
//! 列出、预置和执行商品管理后端的脚本化用户场景。

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use prodman_scenarios::cli::{Cli, CommandRunner};
use prodman_shared::config::AppConfig;
use prodman_shared::observability;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref()).context("加载配置失败")?;

    // CLI 参数覆盖配置文件
    config.observability.log_level = cli.log_level.clone();
    if let Some(base_url) = &cli.base_url {
        config.api.base_url = base_url.clone();
    }
    if let Some(time_scale) = cli.time_scale {
        config.runner.time_scale = time_scale;
    }

    observability::init(&config.observability)?;
    info!(
        environment = %config.environment,
        base_url = %config.api.base_url,
        time_scale = config.runner.time_scale,
        "场景执行工具启动"
    );

    CommandRunner::new(config).execute(cli.command).await
}
