//! 场景数据模型
//!
//! 场景是纯数据：一个执行者加一串带节奏的步骤。
//! 步骤动作是可序列化的枚举，由执行器统一解释，
//! 因此场景可以被列出、落盘、比对，而不绑定任何闭包。

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use prodman_shared::error::ApiError;

// ====== 执行者 ======

/// 场景执行者：一个合成用户账号
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// 展示名称
    pub name: String,
    /// 登录邮箱（同时作为账号标识）
    pub email: String,
    /// 登录密码
    pub password: String,
    /// 注册时填写的年龄
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u8>,
}

impl Actor {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        age: u8,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            age: Some(age),
        }
    }
}

// ====== 步骤动作 ======

/// 步骤动作
///
/// 按下标的动作（`ViewProductAt` 等）针对最近一次 `ListProducts`
/// 步骤捕获的列表快照解析，不会隐式重新拉取列表。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepAction {
    /// 拉取全量商品列表并刷新快照
    ListProducts,
    /// 在当前快照中统计价格高于阈值的商品
    FilterListing { min_price: f64 },
    /// 查看快照中第 index 个商品的详情
    ViewProductAt { index: usize },
    /// 按固定 ID 查看商品详情
    ViewProductById { id: String },
    /// 创建商品
    CreateProduct {
        name: String,
        price: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        expiration_date: Option<NaiveDate>,
    },
    /// 更新快照中第 index 个商品：名称追加后缀，价格乘以系数
    UpdateProductAt {
        index: usize,
        name_suffix: String,
        price_factor: f64,
    },
    /// 更新快照中名称包含指定片段的第一个商品
    UpdateProductMatching {
        name_contains: String,
        name_suffix: String,
        price_factor: f64,
    },
    /// 删除快照中第 index 个商品
    DeleteProductAt { index: usize },
    /// 删除快照中最后一个商品
    DeleteLastProduct,
    /// 按固定 ID 删除商品
    DeleteProductById { id: String },
}

impl StepAction {
    /// 动作类型标识（日志用）
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ListProducts => "list_products",
            Self::FilterListing { .. } => "filter_listing",
            Self::ViewProductAt { .. } => "view_product_at",
            Self::ViewProductById { .. } => "view_product_by_id",
            Self::CreateProduct { .. } => "create_product",
            Self::UpdateProductAt { .. } => "update_product_at",
            Self::UpdateProductMatching { .. } => "update_product_matching",
            Self::DeleteProductAt { .. } => "delete_product_at",
            Self::DeleteLastProduct => "delete_last_product",
            Self::DeleteProductById { .. } => "delete_product_by_id",
        }
    }
}

// ====== 步骤与场景 ======

/// 场景步骤
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// 步骤名称（出现在执行记录与报告中）
    pub name: String,
    /// 要执行的动作
    pub action: StepAction,
    /// 步骤结束后的停顿（毫秒），无论成败都会等待
    pub delay_after_ms: u64,
}

/// 场景：执行者 + 有序步骤列表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub actor: Actor,
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn builder(name: impl Into<String>, actor: Actor) -> ScenarioBuilder {
        ScenarioBuilder {
            name: name.into(),
            actor,
            steps: Vec::new(),
        }
    }

    /// 从 JSON 字符串解析场景
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// 序列化为 JSON 字符串
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// 场景构建器
pub struct ScenarioBuilder {
    name: String,
    actor: Actor,
    steps: Vec<Step>,
}

impl ScenarioBuilder {
    /// 追加一个步骤
    pub fn step(mut self, name: impl Into<String>, action: StepAction, delay_after_ms: u64) -> Self {
        self.steps.push(Step {
            name: name.into(),
            action,
            delay_after_ms,
        });
        self
    }

    pub fn build(self) -> Scenario {
        Scenario {
            name: self.name,
            actor: self.actor,
            steps: self.steps,
        }
    }
}

// ====== 执行结果 ======

/// 步骤失败原因
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureCause {
    /// 稳定的错误码（如 NOT_FOUND）
    pub code: String,
    /// 人类可读的描述
    pub message: String,
}

impl FailureCause {
    pub fn from_api(err: &ApiError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

/// 单步执行结果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepOutcome {
    /// 成功，附带动作相关的摘要信息
    Success { detail: serde_json::Value },
    /// 后端调用失败
    Failed { cause: FailureCause },
    /// 前置条件不满足，动作未发起
    Skipped { reason: String },
}

impl StepOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }

    /// 失败时的错误码
    pub fn failure_code(&self) -> Option<&str> {
        match self {
            Self::Failed { cause } => Some(&cause.code),
            _ => None,
        }
    }
}

/// 单步执行记录
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionRecord {
    pub step_name: String,
    pub outcome: StepOutcome,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
}

/// 单场景执行摘要
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioSummary {
    pub scenario_name: String,
    pub actor_email: String,
    /// 登录失败时的原因；此时 records 为空
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_failure: Option<FailureCause>,
    pub records: Vec<ExecutionRecord>,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
}

impl ScenarioSummary {
    pub fn is_auth_failed(&self) -> bool {
        self.auth_failure.is_some()
    }

    pub fn success_count(&self) -> usize {
        self.records.iter().filter(|r| r.outcome.is_success()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.records.iter().filter(|r| r.outcome.is_failed()).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.records.iter().filter(|r| r.outcome.is_skipped()).count()
    }

    /// 成功率（0.0 - 1.0），无记录时为 0
    pub fn success_rate(&self) -> f64 {
        if self.records.is_empty() {
            return 0.0;
        }
        self.success_count() as f64 / self.records.len() as f64
    }
}

/// 批量执行摘要
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub scenarios: Vec<ScenarioSummary>,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
}

impl BatchSummary {
    pub fn total_steps(&self) -> usize {
        self.scenarios.iter().map(|s| s.records.len()).sum()
    }

    pub fn total_success(&self) -> usize {
        self.scenarios.iter().map(|s| s.success_count()).sum()
    }

    pub fn total_failed(&self) -> usize {
        self.scenarios.iter().map(|s| s.failed_count()).sum()
    }

    pub fn total_skipped(&self) -> usize {
        self.scenarios.iter().map(|s| s.skipped_count()).sum()
    }

    /// 登录失败的场景名列表
    pub fn auth_failures(&self) -> Vec<&str> {
        self.scenarios
            .iter()
            .filter(|s| s.is_auth_failed())
            .map(|s| s.scenario_name.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_actor() -> Actor {
        Actor::new("Admin User", "admin@productmanager.com", "admin123", 30)
    }

    #[test]
    fn test_scenario_builder() {
        let scenario = Scenario::builder("Test Scenario", sample_actor())
            .step("View all products", StepAction::ListProducts, 1000)
            .step(
                "View first product details",
                StepAction::ViewProductAt { index: 0 },
                1500,
            )
            .build();

        assert_eq!(scenario.name, "Test Scenario");
        assert_eq!(scenario.steps.len(), 2);
        assert_eq!(scenario.steps[0].action, StepAction::ListProducts);
        assert_eq!(scenario.steps[1].delay_after_ms, 1500);
    }

    #[test]
    fn test_scenario_json_roundtrip() {
        let scenario = Scenario::builder("Roundtrip", sample_actor())
            .step(
                "Create premium product",
                StepAction::CreateProduct {
                    name: "Admin Premium Laptop".to_string(),
                    price: 2499.99,
                    expiration_date: NaiveDate::from_ymd_opt(2026, 12, 31),
                },
                1500,
            )
            .step("Delete last product", StepAction::DeleteLastProduct, 1000)
            .build();

        let json = scenario.to_json().unwrap();
        let parsed = Scenario::from_json(&json).unwrap();
        assert_eq!(parsed, scenario);
    }

    #[test]
    fn test_step_action_tagged_format() {
        let action = StepAction::UpdateProductAt {
            index: 0,
            name_suffix: " (Updated by Admin)".to_string(),
            price_factor: 1.1,
        };
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(value["type"], "update_product_at");
        assert_eq!(value["index"], 0);
    }

    #[test]
    fn test_step_outcome_accessors() {
        let success = StepOutcome::Success {
            detail: json!({"count": 3}),
        };
        assert!(success.is_success());
        assert_eq!(success.failure_code(), None);

        let failed = StepOutcome::Failed {
            cause: FailureCause {
                code: "NOT_FOUND".to_string(),
                message: "商品不存在".to_string(),
            },
        };
        assert!(failed.is_failed());
        assert_eq!(failed.failure_code(), Some("NOT_FOUND"));

        let skipped = StepOutcome::Skipped {
            reason: "尚未获取商品列表".to_string(),
        };
        assert!(skipped.is_skipped());
    }

    #[test]
    fn test_failure_cause_from_api_error() {
        let err = ApiError::NotFound {
            entity: "Product".to_string(),
            id: "invalid-id-99999".to_string(),
        };
        let cause = FailureCause::from_api(&err);
        assert_eq!(cause.code, "NOT_FOUND");
        assert!(cause.message.contains("invalid-id-99999"));
    }

    #[test]
    fn test_summary_counts() {
        let now = Utc::now();
        let record = |outcome: StepOutcome| ExecutionRecord {
            step_name: "step".to_string(),
            outcome,
            started_at: now,
            duration_ms: 5,
        };
        let summary = ScenarioSummary {
            scenario_name: "Counts".to_string(),
            actor_email: "admin@productmanager.com".to_string(),
            auth_failure: None,
            records: vec![
                record(StepOutcome::Success { detail: json!(null) }),
                record(StepOutcome::Success { detail: json!(null) }),
                record(StepOutcome::Failed {
                    cause: FailureCause {
                        code: "NOT_FOUND".to_string(),
                        message: "gone".to_string(),
                    },
                }),
                record(StepOutcome::Skipped {
                    reason: "列表太短".to_string(),
                }),
            ],
            started_at: now,
            duration_ms: 20,
        };

        assert_eq!(summary.success_count(), 2);
        assert_eq!(summary.failed_count(), 1);
        assert_eq!(summary.skipped_count(), 1);
        assert!((summary.success_rate() - 0.5).abs() < f64::EPSILON);
        assert!(!summary.is_auth_failed());
    }
}
