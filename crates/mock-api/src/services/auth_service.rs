//! Mock 认证服务
//!
//! 模拟用户注册与登录的 REST API。
//! 账号以明文密码存在内存中，仅用于开发与测试。

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::post,
};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use prodman_shared::models::{AuthSession, LoginRequest, SignupRequest, UserAccount};

use crate::store::MemoryStore;

/// 认证服务状态
pub struct AuthServiceState {
    pub accounts: MemoryStore<StoredAccount>,
}

/// 存储的账号：公开资料加登录密码
#[derive(Debug, Clone)]
pub struct StoredAccount {
    pub account: UserAccount,
    pub password: String,
}

impl AuthServiceState {
    pub fn new() -> Self {
        Self {
            accounts: MemoryStore::new(),
        }
    }
}

impl Default for AuthServiceState {
    fn default() -> Self {
        Self::new()
    }
}

/// API 错误响应
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiErr = (StatusCode, Json<ErrorResponse>);

fn api_err(status: StatusCode, message: impl Into<String>) -> ApiErr {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// 构建认证服务路由
pub fn auth_routes() -> Router<Arc<AuthServiceState>> {
    Router::new()
        .route("/api/users/register", post(register))
        .route("/api/users/login", post(login))
}

/// 用户注册
///
/// 邮箱已存在时返回 409，响应文本沿用原后端的 "already exists" 措辞，
/// 供客户端归类为冲突。
async fn register(
    State(state): State<Arc<AuthServiceState>>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<UserAccount>), ApiErr> {
    if req.name.trim().is_empty() || req.email.trim().is_empty() || req.password.is_empty() {
        return Err(api_err(
            StatusCode::BAD_REQUEST,
            "name, email and password are required",
        ));
    }

    if state.accounts.contains(&req.email) {
        tracing::warn!(email = %req.email, "注册冲突，账号已存在");
        return Err(api_err(
            StatusCode::CONFLICT,
            format!("User {} already exists", req.email),
        ));
    }

    let account = UserAccount {
        id: Uuid::new_v4().to_string(),
        name: req.name.clone(),
        email: req.email.clone(),
        age: req.age,
        created_at: Utc::now(),
    };
    state.accounts.insert(
        &req.email,
        StoredAccount {
            account: account.clone(),
            password: req.password,
        },
    );

    tracing::info!(email = %account.email, "创建新账号");
    Ok((StatusCode::CREATED, Json(account)))
}

/// 用户登录
async fn login(
    State(state): State<Arc<AuthServiceState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthSession>, ApiErr> {
    let stored = state.accounts.get(&req.email);

    match stored {
        Some(stored) if stored.password == req.password => {
            tracing::info!(email = %req.email, "登录成功");
            Ok(Json(AuthSession {
                token: format!("mock-jwt-token-{}", stored.account.id),
                user: stored.account,
            }))
        }
        _ => {
            tracing::warn!(email = %req.email, "登录失败，凭据无效");
            Err(api_err(StatusCode::UNAUTHORIZED, "Invalid credentials"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(email: &str) -> SignupRequest {
        SignupRequest {
            name: "Admin User".to_string(),
            email: email.to_string(),
            password: "admin123".to_string(),
            age: Some(30),
        }
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let state = Arc::new(AuthServiceState::new());

        let (status, Json(account)) =
            register(State(state.clone()), Json(signup("admin@productmanager.com")))
                .await
                .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(account.email, "admin@productmanager.com");

        let Json(session) = login(
            State(state),
            Json(LoginRequest {
                email: "admin@productmanager.com".to_string(),
                password: "admin123".to_string(),
            }),
        )
        .await
        .unwrap();
        assert!(session.token.starts_with("mock-jwt-token-"));
        assert_eq!(session.user.email, "admin@productmanager.com");
    }

    #[tokio::test]
    async fn test_register_conflict() {
        let state = Arc::new(AuthServiceState::new());

        register(State(state.clone()), Json(signup("dup@productmanager.com")))
            .await
            .unwrap();
        let (status, Json(body)) =
            register(State(state), Json(signup("dup@productmanager.com")))
                .await
                .unwrap_err();
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body.error.contains("already exists"));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let state = Arc::new(AuthServiceState::new());
        register(State(state.clone()), Json(signup("user@productmanager.com")))
            .await
            .unwrap();

        let (status, _) = login(
            State(state),
            Json(LoginRequest {
                email: "user@productmanager.com".to_string(),
                password: "wrong".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_register_validation() {
        let state = Arc::new(AuthServiceState::new());
        let mut req = signup("x@productmanager.com");
        req.name = String::new();

        let (status, _) = register(State(state), Json(req)).await.unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
