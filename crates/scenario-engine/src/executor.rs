//! 场景执行器
//!
//! 每个场景执行一次登录，然后按序解释步骤动作。
//! 单步失败或跳过不影响后续步骤；登录失败则整个场景中止，
//! 不产生任何步骤记录。步骤之间的停顿无论成败都会执行，
//! 以保持场景的节奏可预测。

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use serde_json::json;
use tracing::{debug, error, info, instrument, warn};

use prodman_shared::api::{AuthApi, ProductApi};
use prodman_shared::error::ApiError;
use prodman_shared::models::{Product, ProductDraft};

use crate::model::{
    ExecutionRecord, FailureCause, Scenario, ScenarioSummary, Step, StepAction, StepOutcome,
};

// ====== 节奏控制 ======

/// 节奏控制：把脚本里的毫秒数按比例缩放
///
/// 缩放系数 1.0 为真实节奏，0.0 完全关闭停顿（测试用）。
#[derive(Debug, Clone, Copy)]
pub struct Pacing {
    time_scale: f64,
}

impl Pacing {
    pub fn new(time_scale: f64) -> Self {
        Self {
            time_scale: time_scale.max(0.0),
        }
    }

    /// 缩放后的停顿时长
    pub fn scaled(&self, ms: u64) -> Duration {
        Duration::from_millis((ms as f64 * self.time_scale) as u64)
    }

    /// 按缩放后的时长停顿；缩放结果为零时不等待
    pub async fn sleep_ms(&self, ms: u64) {
        let duration = self.scaled(ms);
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self::new(1.0)
    }
}

// ====== 执行上下文 ======

/// 场景内的执行上下文
///
/// 保存最近一次 `ListProducts` 步骤捕获的列表快照。
/// 按下标和按名称的动作都针对该快照解析；创建、更新、删除
/// 不会刷新快照，场景需要显式安排列表步骤。
#[derive(Debug, Default)]
pub struct ExecutionContext {
    listing: Option<Vec<Product>>,
}

impl ExecutionContext {
    /// 记录新的列表快照
    pub fn record_listing(&mut self, products: Vec<Product>) {
        self.listing = Some(products);
    }

    /// 当前快照；尚未列出时跳过
    fn listing(&self) -> Result<&[Product], StepError> {
        self.listing
            .as_deref()
            .ok_or_else(|| StepError::Skip("尚未获取商品列表".to_string()))
    }

    /// 快照中第 index 个商品
    fn product_at(&self, index: usize) -> Result<&Product, StepError> {
        let listing = self.listing()?;
        listing.get(index).ok_or_else(|| {
            StepError::Skip(format!(
                "商品列表只有 {} 条，无法访问下标 {}",
                listing.len(),
                index
            ))
        })
    }

    /// 快照中最后一个商品
    fn last_product(&self) -> Result<&Product, StepError> {
        let listing = self.listing()?;
        listing
            .last()
            .ok_or_else(|| StepError::Skip("商品列表为空".to_string()))
    }

    /// 快照中名称包含指定片段的第一个商品
    fn find_by_name(&self, fragment: &str) -> Result<&Product, StepError> {
        self.listing()?
            .iter()
            .find(|p| p.name.contains(fragment))
            .ok_or_else(|| StepError::Skip(format!("没有名称包含 {} 的商品", fragment)))
    }
}

/// 步骤级错误：跳过（前置条件不满足）或后端失败
enum StepError {
    Skip(String),
    Api(ApiError),
}

impl From<ApiError> for StepError {
    fn from(err: ApiError) -> Self {
        Self::Api(err)
    }
}

// ====== 执行器 ======

/// 场景执行器
pub struct ScenarioExecutor {
    auth: Arc<dyn AuthApi>,
    products: Arc<dyn ProductApi>,
    pacing: Pacing,
}

impl ScenarioExecutor {
    pub fn new(auth: Arc<dyn AuthApi>, products: Arc<dyn ProductApi>) -> Self {
        Self {
            auth,
            products,
            pacing: Pacing::default(),
        }
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    /// 执行单个场景
    ///
    /// 先以场景执行者身份登录；登录失败直接返回不含记录的摘要。
    /// 登录成功后按序执行每个步骤并收集记录。
    #[instrument(skip_all, fields(scenario = %scenario.name))]
    pub async fn run(&self, scenario: &Scenario) -> ScenarioSummary {
        let started_at = Utc::now();
        let start = Instant::now();
        info!(
            actor = %scenario.actor.email,
            steps = scenario.steps.len(),
            "开始执行场景"
        );

        if let Err(err) = self
            .auth
            .login(&scenario.actor.email, &scenario.actor.password)
            .await
        {
            warn!(actor = %scenario.actor.email, error = %err, "登录失败，场景中止");
            return ScenarioSummary {
                scenario_name: scenario.name.clone(),
                actor_email: scenario.actor.email.clone(),
                auth_failure: Some(FailureCause::from_api(&err)),
                records: Vec::new(),
                started_at,
                duration_ms: start.elapsed().as_millis() as u64,
            };
        }

        let mut ctx = ExecutionContext::default();
        let mut records = Vec::with_capacity(scenario.steps.len());
        for step in &scenario.steps {
            records.push(self.execute_step(step, &mut ctx).await);
            self.pacing.sleep_ms(step.delay_after_ms).await;
        }

        let summary = ScenarioSummary {
            scenario_name: scenario.name.clone(),
            actor_email: scenario.actor.email.clone(),
            auth_failure: None,
            records,
            started_at,
            duration_ms: start.elapsed().as_millis() as u64,
        };
        info!(
            success = summary.success_count(),
            failed = summary.failed_count(),
            skipped = summary.skipped_count(),
            "场景执行完成"
        );
        summary
    }

    /// 执行单个步骤并生成记录
    async fn execute_step(&self, step: &Step, ctx: &mut ExecutionContext) -> ExecutionRecord {
        debug!(step = %step.name, kind = step.action.kind(), "执行步骤");
        let started_at = Utc::now();
        let start = Instant::now();

        let outcome = match self.apply(&step.action, ctx).await {
            Ok(detail) => StepOutcome::Success { detail },
            Err(StepError::Skip(reason)) => {
                info!(step = %step.name, reason = %reason, "跳过步骤");
                StepOutcome::Skipped { reason }
            }
            Err(StepError::Api(err)) => {
                error!(step = %step.name, error = %err, "步骤失败");
                StepOutcome::Failed {
                    cause: FailureCause::from_api(&err),
                }
            }
        };

        ExecutionRecord {
            step_name: step.name.clone(),
            outcome,
            started_at,
            duration_ms: start.elapsed().as_millis() as u64,
        }
    }

    /// 解释单个动作
    async fn apply(
        &self,
        action: &StepAction,
        ctx: &mut ExecutionContext,
    ) -> Result<serde_json::Value, StepError> {
        match action {
            StepAction::ListProducts => {
                let products = self.products.list_all().await?;
                let count = products.len();
                ctx.record_listing(products);
                Ok(json!({ "count": count }))
            }
            StepAction::FilterListing { min_price } => {
                let matched = ctx
                    .listing()?
                    .iter()
                    .filter(|p| p.price > *min_price)
                    .count();
                Ok(json!({ "min_price": min_price, "matched": matched }))
            }
            StepAction::ViewProductAt { index } => {
                let id = ctx.product_at(*index)?.id.clone();
                let product = self.products.get_by_id(&id).await?;
                Ok(json!({ "id": product.id, "name": product.name }))
            }
            StepAction::ViewProductById { id } => {
                let product = self.products.get_by_id(id).await?;
                Ok(json!({ "id": product.id, "name": product.name }))
            }
            StepAction::CreateProduct {
                name,
                price,
                expiration_date,
            } => {
                let draft = ProductDraft {
                    name: name.clone(),
                    price: *price,
                    expiration_date: *expiration_date,
                };
                let product = self.products.create(&draft).await?;
                Ok(json!({ "id": product.id, "name": product.name }))
            }
            StepAction::UpdateProductAt {
                index,
                name_suffix,
                price_factor,
            } => {
                let target = ctx.product_at(*index)?.clone();
                self.apply_update(&target, name_suffix, *price_factor).await
            }
            StepAction::UpdateProductMatching {
                name_contains,
                name_suffix,
                price_factor,
            } => {
                let target = ctx.find_by_name(name_contains)?.clone();
                self.apply_update(&target, name_suffix, *price_factor).await
            }
            StepAction::DeleteProductAt { index } => {
                let id = ctx.product_at(*index)?.id.clone();
                self.products.delete(&id).await?;
                Ok(json!({ "id": id }))
            }
            StepAction::DeleteLastProduct => {
                let id = ctx.last_product()?.id.clone();
                self.products.delete(&id).await?;
                Ok(json!({ "id": id }))
            }
            StepAction::DeleteProductById { id } => {
                self.products.delete(id).await?;
                Ok(json!({ "id": id }))
            }
        }
    }

    /// 对目标商品应用后缀与价格系数
    async fn apply_update(
        &self,
        target: &Product,
        name_suffix: &str,
        price_factor: f64,
    ) -> Result<serde_json::Value, StepError> {
        let draft = ProductDraft {
            name: format!("{}{}", target.name, name_suffix),
            price: target.price * price_factor,
            expiration_date: target.expiration_date,
        };
        let updated = self.products.update(&target.id, &draft).await?;
        Ok(json!({ "id": updated.id, "name": updated.name, "price": updated.price }))
    }
}
