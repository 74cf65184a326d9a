//! 结果渲染
//!
//! 把执行摘要渲染成人类可读的文本报告，CLI 输出和批量完成
//! 通知共用同一份渲染结果。

use crate::model::{BatchSummary, ScenarioSummary, StepOutcome};
use crate::provisioner::{ProvisioningOutcome, ProvisioningSummary};

const LINE_WIDTH: usize = 60;

/// 渲染单个场景的执行报告
pub fn render_scenario(summary: &ScenarioSummary) -> String {
    let mut out = String::new();
    out.push_str(&"=".repeat(LINE_WIDTH));
    out.push('\n');
    out.push_str(&format!("场景: {}\n", summary.scenario_name));
    out.push_str(&format!("执行者: {}\n", summary.actor_email));
    out.push_str(&format!("耗时: {} ms\n", summary.duration_ms));
    out.push_str(&"-".repeat(LINE_WIDTH));
    out.push('\n');

    if let Some(cause) = &summary.auth_failure {
        out.push_str(&format!("登录失败 [{}]: {}\n", cause.code, cause.message));
        out.push_str(&"=".repeat(LINE_WIDTH));
        out.push('\n');
        return out;
    }

    for (i, record) in summary.records.iter().enumerate() {
        let status = match &record.outcome {
            StepOutcome::Success { .. } => "成功".to_string(),
            StepOutcome::Failed { cause } => format!("失败 [{}]", cause.code),
            StepOutcome::Skipped { .. } => "跳过".to_string(),
        };
        out.push_str(&format!(
            "  {:>2}. {} - {} ({} ms)\n",
            i + 1,
            record.step_name,
            status,
            record.duration_ms
        ));
        match &record.outcome {
            StepOutcome::Failed { cause } => {
                out.push_str(&format!("      原因: {}\n", cause.message));
            }
            StepOutcome::Skipped { reason } => {
                out.push_str(&format!("      原因: {}\n", reason));
            }
            StepOutcome::Success { .. } => {}
        }
    }

    out.push_str(&"-".repeat(LINE_WIDTH));
    out.push('\n');
    out.push_str(&format!(
        "共 {} 步: {} 成功, {} 失败, {} 跳过 (成功率 {:.0}%)\n",
        summary.records.len(),
        summary.success_count(),
        summary.failed_count(),
        summary.skipped_count(),
        summary.success_rate() * 100.0
    ));
    out.push_str(&"=".repeat(LINE_WIDTH));
    out.push('\n');
    out
}

/// 渲染批量执行报告
pub fn render_batch(batch: &BatchSummary) -> String {
    let mut out = String::new();
    for summary in &batch.scenarios {
        out.push_str(&render_scenario(summary));
        out.push('\n');
    }

    out.push_str(&"=".repeat(LINE_WIDTH));
    out.push('\n');
    out.push_str(&format!(
        "批量汇总: {} 个场景, 共 {} 步\n",
        batch.scenarios.len(),
        batch.total_steps()
    ));
    out.push_str(&format!(
        "  {} 成功, {} 失败, {} 跳过\n",
        batch.total_success(),
        batch.total_failed(),
        batch.total_skipped()
    ));
    let auth_failures = batch.auth_failures();
    if !auth_failures.is_empty() {
        out.push_str(&format!("  登录失败的场景: {}\n", auth_failures.join(", ")));
    }
    out.push_str(&format!("总耗时: {} ms\n", batch.duration_ms));
    out.push_str(&"=".repeat(LINE_WIDTH));
    out.push('\n');
    out
}

/// 渲染账号预置报告
pub fn render_provisioning(summary: &ProvisioningSummary) -> String {
    let mut out = String::new();
    out.push_str(&"=".repeat(LINE_WIDTH));
    out.push('\n');
    out.push_str("账号预置结果\n");
    out.push_str(&"-".repeat(LINE_WIDTH));
    out.push('\n');

    for entry in &summary.outcomes {
        let status = match &entry.outcome {
            ProvisioningOutcome::Created => "已创建".to_string(),
            ProvisioningOutcome::AlreadyExists => "已存在".to_string(),
            ProvisioningOutcome::Failed { cause } => {
                format!("失败 [{}]: {}", cause.code, cause.message)
            }
        };
        out.push_str(&format!("  {} - {}\n", entry.email, status));
    }

    out.push_str(&"-".repeat(LINE_WIDTH));
    out.push('\n');
    out.push_str(&format!(
        "{} 已创建, {} 已存在, {} 失败\n",
        summary.created_count(),
        summary.already_existed_count(),
        summary.failed_count()
    ));
    out.push_str(&"=".repeat(LINE_WIDTH));
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ExecutionRecord, FailureCause};
    use chrono::Utc;
    use serde_json::json;

    fn summary_with_mixed_outcomes() -> ScenarioSummary {
        let now = Utc::now();
        let record = |name: &str, outcome: StepOutcome| ExecutionRecord {
            step_name: name.to_string(),
            outcome,
            started_at: now,
            duration_ms: 12,
        };
        ScenarioSummary {
            scenario_name: "Error-Prone User - Testing Error Handling".to_string(),
            actor_email: "error@productmanager.com".to_string(),
            auth_failure: None,
            records: vec![
                record(
                    "View valid products",
                    StepOutcome::Success {
                        detail: json!({"count": 3}),
                    },
                ),
                record(
                    "Try to delete non-existent product (ID: invalid-id-88888)",
                    StepOutcome::Failed {
                        cause: FailureCause {
                            code: "NOT_FOUND".to_string(),
                            message: "Product 不存在: invalid-id-88888".to_string(),
                        },
                    },
                ),
                record(
                    "View product 10 details",
                    StepOutcome::Skipped {
                        reason: "商品列表只有 3 条，无法访问下标 9".to_string(),
                    },
                ),
            ],
            started_at: now,
            duration_ms: 123,
        }
    }

    #[test]
    fn test_render_scenario_lists_every_step() {
        let text = render_scenario(&summary_with_mixed_outcomes());
        assert!(text.contains("Error-Prone User - Testing Error Handling"));
        assert!(text.contains("成功"));
        assert!(text.contains("失败 [NOT_FOUND]"));
        assert!(text.contains("跳过"));
        assert!(text.contains("1 成功, 1 失败, 1 跳过"));
    }

    #[test]
    fn test_render_auth_failure() {
        let summary = ScenarioSummary {
            scenario_name: "Admin Heavy User - Full CRUD Operations".to_string(),
            actor_email: "admin@productmanager.com".to_string(),
            auth_failure: Some(FailureCause {
                code: "INVALID_CREDENTIALS".to_string(),
                message: "邮箱或密码错误".to_string(),
            }),
            records: Vec::new(),
            started_at: Utc::now(),
            duration_ms: 8,
        };
        let text = render_scenario(&summary);
        assert!(text.contains("登录失败 [INVALID_CREDENTIALS]"));
    }

    #[test]
    fn test_render_batch_includes_totals() {
        let batch = BatchSummary {
            scenarios: vec![summary_with_mixed_outcomes()],
            started_at: Utc::now(),
            duration_ms: 456,
        };
        let text = render_batch(&batch);
        assert!(text.contains("批量汇总: 1 个场景, 共 3 步"));
        assert!(text.contains("总耗时: 456 ms"));
    }

    #[test]
    fn test_render_provisioning() {
        let summary = ProvisioningSummary {
            outcomes: vec![
                crate::provisioner::ActorProvisioning {
                    email: "admin@productmanager.com".to_string(),
                    outcome: ProvisioningOutcome::Created,
                },
                crate::provisioner::ActorProvisioning {
                    email: "browser@productmanager.com".to_string(),
                    outcome: ProvisioningOutcome::AlreadyExists,
                },
            ],
        };
        let text = render_provisioning(&summary);
        assert!(text.contains("admin@productmanager.com - 已创建"));
        assert!(text.contains("1 已创建, 1 已存在, 0 失败"));
    }
}
