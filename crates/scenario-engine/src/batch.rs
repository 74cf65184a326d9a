//! 批量执行
//!
//! 按目录顺序逐个执行场景，场景之间插入冷却停顿，任意时刻只有
//! 一个场景在执行。批量执行只做回放，不创建账号：预置由
//! `ActorProvisioner` 单独完成。

use std::sync::Arc;

use chrono::Utc;
use std::time::Instant;
use tracing::{info, instrument, warn};

use prodman_shared::api::Notifier;

use crate::catalog::ScenarioCatalog;
use crate::executor::{Pacing, ScenarioExecutor};
use crate::model::BatchSummary;
use crate::report;

/// 默认的场景间冷却时间（毫秒）
pub const DEFAULT_COOL_DOWN_MS: u64 = 2000;

/// 批量执行器
pub struct BatchRunner {
    executor: ScenarioExecutor,
    cool_down_ms: u64,
    notifier: Option<Arc<dyn Notifier>>,
}

impl BatchRunner {
    pub fn new(executor: ScenarioExecutor) -> Self {
        Self {
            executor,
            cool_down_ms: DEFAULT_COOL_DOWN_MS,
            notifier: None,
        }
    }

    /// 覆盖场景间冷却时间
    pub fn with_cool_down_ms(mut self, cool_down_ms: u64) -> Self {
        self.cool_down_ms = cool_down_ms;
        self
    }

    /// 批量完成后发送通知
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// 顺序执行目录中的所有场景
    ///
    /// 冷却时间与步骤停顿一样受执行器的节奏缩放控制。
    /// 单个场景的登录失败只影响该场景，批量继续执行。
    #[instrument(skip_all, fields(scenarios = catalog.len()))]
    pub async fn run_all(&self, catalog: &ScenarioCatalog) -> BatchSummary {
        let started_at = Utc::now();
        let start = Instant::now();
        info!(cool_down_ms = self.cool_down_ms, "开始批量执行场景");

        let pacing = self.executor.pacing();
        let mut scenarios = Vec::with_capacity(catalog.len());
        for (i, scenario) in catalog.scenarios().iter().enumerate() {
            let summary = self.executor.run(scenario).await;
            if summary.is_auth_failed() {
                warn!(scenario = %summary.scenario_name, "场景登录失败，继续后续场景");
            }
            scenarios.push(summary);

            // 最后一个场景之后不再冷却
            if i + 1 < catalog.len() {
                pacing.sleep_ms(self.cool_down_ms).await;
            }
        }

        let batch = BatchSummary {
            scenarios,
            started_at,
            duration_ms: start.elapsed().as_millis() as u64,
        };
        info!(
            scenarios = batch.scenarios.len(),
            total_steps = batch.total_steps(),
            success = batch.total_success(),
            failed = batch.total_failed(),
            skipped = batch.total_skipped(),
            "批量执行完成"
        );

        if let Some(notifier) = &self.notifier {
            notifier
                .notify("场景批量执行完成", &report::render_batch(&batch))
                .await;
        }

        batch
    }
}
