//! 场景用户预置
//!
//! 在执行场景之前确保每个执行者的账号存在。对每个执行者尝试注册，
//! 把"已存在"冲突视为正常结果，因此重复执行是幂等的，
//! 不会产生重复账号。

use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info, instrument};

use prodman_shared::api::AuthApi;
use prodman_shared::models::SignupRequest;

use crate::model::{Actor, FailureCause};

/// 单个执行者的预置结果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ProvisioningOutcome {
    /// 本次注册创建了账号
    Created,
    /// 账号已存在，无需创建
    AlreadyExists,
    /// 注册失败（非冲突错误）
    Failed { cause: FailureCause },
}

/// 执行者与其预置结果
#[derive(Debug, Clone, Serialize)]
pub struct ActorProvisioning {
    pub email: String,
    pub outcome: ProvisioningOutcome,
}

/// 一批执行者的预置摘要
#[derive(Debug, Clone, Serialize)]
pub struct ProvisioningSummary {
    pub outcomes: Vec<ActorProvisioning>,
}

impl ProvisioningSummary {
    pub fn created_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.outcome == ProvisioningOutcome::Created)
            .count()
    }

    pub fn already_existed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.outcome == ProvisioningOutcome::AlreadyExists)
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.outcome, ProvisioningOutcome::Failed { .. }))
            .count()
    }

    /// 所有账号就绪（已创建或已存在）
    pub fn is_all_ready(&self) -> bool {
        self.failed_count() == 0
    }
}

/// 执行者账号预置器
pub struct ActorProvisioner {
    auth: Arc<dyn AuthApi>,
}

impl ActorProvisioner {
    pub fn new(auth: Arc<dyn AuthApi>) -> Self {
        Self { auth }
    }

    /// 确保所有执行者的账号存在
    ///
    /// 对每个执行者发起注册。冲突（账号已存在）计为 `AlreadyExists`，
    /// 其他错误计为 `Failed`；单个失败不阻止剩余执行者的预置。
    #[instrument(skip_all, fields(actors = actors.len()))]
    pub async fn ensure_actors(&self, actors: &[Actor]) -> ProvisioningSummary {
        let mut outcomes = Vec::with_capacity(actors.len());

        for actor in actors {
            let req = SignupRequest {
                name: actor.name.clone(),
                email: actor.email.clone(),
                password: actor.password.clone(),
                age: actor.age,
            };

            let outcome = match self.auth.signup(&req).await {
                Ok(_) => {
                    info!(email = %actor.email, "创建场景账号");
                    ProvisioningOutcome::Created
                }
                Err(err) if err.is_conflict() => {
                    info!(email = %actor.email, "场景账号已存在");
                    ProvisioningOutcome::AlreadyExists
                }
                Err(err) => {
                    error!(email = %actor.email, error = %err, "场景账号创建失败");
                    ProvisioningOutcome::Failed {
                        cause: FailureCause::from_api(&err),
                    }
                }
            };
            outcomes.push(ActorProvisioning {
                email: actor.email.clone(),
                outcome,
            });
        }

        let summary = ProvisioningSummary { outcomes };
        info!(
            created = summary.created_count(),
            already_existed = summary.already_existed_count(),
            failed = summary.failed_count(),
            "账号预置完成"
        );
        summary
    }
}
