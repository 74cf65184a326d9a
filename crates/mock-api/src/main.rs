//! Mock 后端 CLI
//!
//! 启动模拟商品管理后端的命令行入口点。

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use uuid::Uuid;

use prodman_mock_api::seed::sample_products;
use prodman_mock_api::services::{AuthServiceState, ProductServiceState};
use prodman_mock_api::build_router;
use prodman_shared::models::Product;

/// Mock 商品管理后端
#[derive(Parser, Debug)]
#[command(name = "mock-api")]
#[command(version, about = "模拟商品管理后端")]
struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// 服务端口
    #[arg(short, long, default_value = "8090")]
    port: u16,

    /// 启动时预填充示例商品
    #[arg(long)]
    seed: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 初始化 tracing 日志
    // 优先使用环境变量 RUST_LOG，否则使用命令行参数指定的级别
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_level.clone().into()),
        )
        .init();

    let auth_state = Arc::new(AuthServiceState::new());
    let product_state = Arc::new(ProductServiceState::new());

    if cli.seed {
        for draft in sample_products() {
            let now = Utc::now();
            product_state.insert_product(Product {
                id: Uuid::new_v4().to_string(),
                name: draft.name,
                price: draft.price,
                expiration_date: draft.expiration_date,
                created_at: now,
                updated_at: now,
            });
        }
        info!("已预填充示例商品");
    }

    let app = build_router(auth_state, product_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
    let listener = TcpListener::bind(addr).await.context("绑定端口失败")?;

    info!("Mock 后端已启动: http://{}", addr);
    info!("可用端点:");
    info!("  GET /health - 健康检查");
    info!("  POST /api/users/register, /api/users/login - 认证");
    info!("  GET/POST /api/products, GET/PUT/DELETE /api/products/{{id}} - 商品管理");
    info!("按 Ctrl+C 停止服务");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("服务器运行失败")?;

    info!("Mock 后端已停止");
    Ok(())
}

/// 等待关闭信号
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("安装 CTRL+C 信号处理器失败");
    info!("收到关闭信号，正在停止服务...");
}
