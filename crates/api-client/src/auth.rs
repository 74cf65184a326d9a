//! 认证客户端
//!
//! 封装 /api/users 下的登录与注册接口。

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use prodman_shared::api::AuthApi;
use prodman_shared::error::{ApiError, Result};
use prodman_shared::models::{AuthSession, LoginRequest, SignupRequest, UserAccount};

use crate::http::{build_client, handle_json, into_network};

/// 认证协作方的 HTTP 实现
#[derive(Debug, Clone)]
pub struct AuthClient {
    client: reqwest::Client,
    base_url: String,
}

impl AuthClient {
    /// 创建认证客户端
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl AuthApi for AuthClient {
    async fn login(&self, email: &str, password: &str) -> Result<AuthSession> {
        debug!(email, "登录");

        let req = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let resp = self
            .client
            .post(self.url("/api/users/login"))
            .json(&req)
            .send()
            .await
            .map_err(into_network)?;

        match handle_json(resp, "User", email).await {
            // 登录接口的 401 语义是凭据错误，而非令牌缺失
            Err(ApiError::Unauthorized) => Err(ApiError::InvalidCredentials),
            other => other,
        }
    }

    async fn signup(&self, req: &SignupRequest) -> Result<UserAccount> {
        debug!(email = %req.email, "注册");

        let resp = self
            .client
            .post(self.url("/api/users/register"))
            .json(req)
            .send()
            .await
            .map_err(into_network)?;

        handle_json(resp, "User", &req.email).await
    }
}
