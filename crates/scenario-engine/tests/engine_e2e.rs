//! 端到端测试
//!
//! 启动进程内的 Mock 后端，经由真实的 HTTP 客户端预置账号并
//! 执行场景，验证引擎在完整链路上的行为。

use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use prodman_api_client::{AuthClient, ProductClient};
use prodman_mock_api::build_router;
use prodman_mock_api::services::{AuthServiceState, ProductServiceState};
use prodman_scenarios::batch::BatchRunner;
use prodman_scenarios::catalog::ScenarioCatalog;
use prodman_scenarios::executor::{Pacing, ScenarioExecutor};
use prodman_scenarios::provisioner::ActorProvisioner;
use prodman_shared::api::ProductApi;
use prodman_shared::models::ProductDraft;

const TIMEOUT: Duration = Duration::from_secs(5);

/// 后台启动 Mock 后端，返回基础地址
async fn spawn_backend() -> String {
    let auth = Arc::new(AuthServiceState::new());
    let products = Arc::new(ProductServiceState::new());
    let app = build_router(auth, products);

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("绑定端口失败");
    let addr = listener.local_addr().expect("获取本地地址失败");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Mock 后端退出");
    });

    format!("http://{}", addr)
}

fn clients(base_url: &str) -> (Arc<AuthClient>, Arc<ProductClient>) {
    let auth = AuthClient::new(base_url, TIMEOUT).expect("创建认证客户端失败");
    let products = ProductClient::new(base_url, TIMEOUT).expect("创建商品客户端失败");
    (Arc::new(auth), Arc::new(products))
}

fn executor(auth: Arc<AuthClient>, products: Arc<ProductClient>) -> ScenarioExecutor {
    ScenarioExecutor::new(auth, products).with_pacing(Pacing::new(0.0))
}

#[tokio::test]
async fn test_provisioning_is_idempotent_over_http() {
    let base_url = spawn_backend().await;
    let (auth, _) = clients(&base_url);
    let provisioner = ActorProvisioner::new(auth);
    let actors = ScenarioCatalog::builtin().actors();

    let first = provisioner.ensure_actors(&actors).await;
    assert_eq!(first.created_count(), 6);
    assert!(first.is_all_ready());

    let second = provisioner.ensure_actors(&actors).await;
    assert_eq!(second.created_count(), 0);
    assert_eq!(second.already_existed_count(), 6);
}

#[tokio::test]
async fn test_browser_scenario_skips_out_of_range_index() {
    let base_url = spawn_backend().await;
    let (auth, products) = clients(&base_url);

    let catalog = ScenarioCatalog::builtin();
    ActorProvisioner::new(auth.clone())
        .ensure_actors(&catalog.actors())
        .await;

    // 只有 3 个商品，下标 9 的步骤应跳过
    for (name, price) in [
        ("Mechanical Keyboard", 129.99),
        ("Ergonomic Mouse", 49.99),
        ("USB-C Dock", 89.99),
    ] {
        products
            .create(&ProductDraft::new(name, price))
            .await
            .expect("预置商品失败");
    }

    let scenario = catalog
        .get("Browser User - Read-Only Exploration")
        .expect("目录缺少浏览场景");
    let summary = executor(auth, products).run(scenario).await;

    assert!(!summary.is_auth_failed());
    assert_eq!(summary.records.len(), scenario.steps.len());

    let skipped = summary
        .records
        .iter()
        .find(|r| r.step_name == "View product 10 details")
        .expect("缺少下标 9 的记录");
    assert!(skipped.outcome.is_skipped());

    // 其余步骤全部成功
    assert_eq!(summary.skipped_count(), 1);
    assert_eq!(summary.success_count(), scenario.steps.len() - 1);
}

#[tokio::test]
async fn test_error_prone_scenario_records_failures_and_continues() {
    let base_url = spawn_backend().await;
    let (auth, products) = clients(&base_url);

    let catalog = ScenarioCatalog::builtin();
    ActorProvisioner::new(auth.clone())
        .ensure_actors(&catalog.actors())
        .await;

    let scenario = catalog
        .get("Error-Prone User - Testing Error Handling")
        .expect("目录缺少错误路径场景");
    let summary = executor(auth, products.clone()).run(scenario).await;

    assert_eq!(summary.records.len(), 5);
    assert_eq!(summary.records[0].outcome.failure_code(), Some("NOT_FOUND"));
    assert_eq!(summary.records[2].outcome.failure_code(), Some("NOT_FOUND"));

    // 删除失败之后创建仍然执行并落库
    assert!(summary.records[3].outcome.is_success());
    let names: Vec<String> = products
        .list_all()
        .await
        .expect("列出商品失败")
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert!(names.contains(&"Error Test Product".to_string()));
}

#[tokio::test]
async fn test_unprovisioned_actor_fails_login_without_records() {
    let base_url = spawn_backend().await;
    let (auth, products) = clients(&base_url);

    let catalog = ScenarioCatalog::builtin();
    let scenario = catalog
        .get("Admin Heavy User - Full CRUD Operations")
        .expect("目录缺少管理员场景");

    // 未预置账号，登录应失败且不产生记录
    let summary = executor(auth, products.clone()).run(scenario).await;
    assert!(summary.is_auth_failed());
    assert_eq!(
        summary.auth_failure.as_ref().unwrap().code,
        "INVALID_CREDENTIALS"
    );
    assert!(summary.records.is_empty());
    assert!(products.list_all().await.expect("列出商品失败").is_empty());
}

#[tokio::test]
async fn test_run_all_executes_every_scenario_in_order() {
    let base_url = spawn_backend().await;
    let (auth, products) = clients(&base_url);

    let catalog = ScenarioCatalog::builtin();
    let provisioning = ActorProvisioner::new(auth.clone())
        .ensure_actors(&catalog.actors())
        .await;
    assert!(provisioning.is_all_ready());

    let batch = BatchRunner::new(executor(auth, products))
        .with_cool_down_ms(0)
        .run_all(&catalog)
        .await;

    assert_eq!(batch.scenarios.len(), 6);
    let names: Vec<&str> = batch
        .scenarios
        .iter()
        .map(|s| s.scenario_name.as_str())
        .collect();
    let expected: Vec<&str> = catalog
        .scenarios()
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(names, expected);

    // 每个场景产生与步骤数一致的记录
    for (summary, scenario) in batch.scenarios.iter().zip(catalog.scenarios()) {
        assert!(!summary.is_auth_failed(), "{} 登录失败", scenario.name);
        assert_eq!(summary.records.len(), scenario.steps.len());
    }
    assert_eq!(batch.total_steps(), 41);
}
