//! 子命令执行
//!
//! 根据配置构建 HTTP 客户端与执行器，把子命令映射到
//! 目录、预置器、执行器和批量执行器上。

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use tracing::info;

use prodman_api_client::{AuthClient, ProductClient};
use prodman_shared::api::TracingNotifier;
use prodman_shared::config::AppConfig;

use crate::batch::BatchRunner;
use crate::catalog::ScenarioCatalog;
use crate::cli::Commands;
use crate::executor::{Pacing, ScenarioExecutor};
use crate::provisioner::ActorProvisioner;
use crate::report;

/// 子命令执行器
pub struct CommandRunner {
    config: AppConfig,
    catalog: ScenarioCatalog,
}

impl CommandRunner {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            catalog: ScenarioCatalog::builtin(),
        }
    }

    /// 分发并执行子命令
    pub async fn execute(&self, command: Commands) -> Result<()> {
        match command {
            Commands::List => self.list(),
            Commands::SetupUsers => self.setup_users().await,
            Commands::Run { name } => self.run_scenario(&name).await,
            Commands::RunAll { setup, cool_down_ms } => self.run_all(setup, cool_down_ms).await,
        }
    }

    fn list(&self) -> Result<()> {
        println!("可用场景 ({} 个):", self.catalog.len());
        for scenario in self.catalog.scenarios() {
            println!(
                "  {} ({} 步, 执行者 {})",
                scenario.name,
                scenario.steps.len(),
                scenario.actor.email
            );
        }
        Ok(())
    }

    async fn setup_users(&self) -> Result<()> {
        let auth = self.auth_client()?;
        let provisioner = ActorProvisioner::new(auth);
        let summary = provisioner.ensure_actors(&self.catalog.actors()).await;

        println!("{}", report::render_provisioning(&summary));
        if !summary.is_all_ready() {
            bail!("{} 个账号预置失败", summary.failed_count());
        }
        Ok(())
    }

    async fn run_scenario(&self, name: &str) -> Result<()> {
        let Some(scenario) = self.catalog.get(name) else {
            bail!("场景不存在: {}（用 list 子命令查看可用场景）", name);
        };

        let summary = self.executor()?.run(scenario).await;
        println!("{}", report::render_scenario(&summary));

        if summary.is_auth_failed() {
            bail!("场景登录失败（先执行 setup-users 预置账号）");
        }
        Ok(())
    }

    async fn run_all(&self, setup: bool, cool_down_ms: Option<u64>) -> Result<()> {
        if setup {
            self.setup_users().await?;
        }

        let cool_down = cool_down_ms.unwrap_or(self.config.runner.cool_down_ms);
        info!(
            scenarios = self.catalog.len(),
            cool_down_ms = cool_down,
            "准备批量执行"
        );

        let runner = BatchRunner::new(self.executor()?)
            .with_cool_down_ms(cool_down)
            .with_notifier(Arc::new(TracingNotifier));
        let batch = runner.run_all(&self.catalog).await;

        println!("{}", report::render_batch(&batch));
        Ok(())
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.config.api.timeout_seconds)
    }

    fn auth_client(&self) -> Result<Arc<AuthClient>> {
        let client = AuthClient::new(&self.config.api.base_url, self.timeout())
            .context("创建认证客户端失败")?;
        Ok(Arc::new(client))
    }

    fn executor(&self) -> Result<ScenarioExecutor> {
        let auth = self.auth_client()?;
        let products = ProductClient::new(&self.config.api.base_url, self.timeout())
            .context("创建商品客户端失败")?;
        Ok(
            ScenarioExecutor::new(auth, Arc::new(products))
                .with_pacing(Pacing::new(self.config.runner.time_scale)),
        )
    }
}
