//! HTTP 响应处理
//!
//! 统一的状态码到 `ApiError` 的映射和响应体解析。

use reqwest::{Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

use prodman_shared::error::{ApiError, Result};

/// 后端错误响应体
///
/// 兼容 `{"error": "..."}` 与 `{"message": "..."}` 两种格式。
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// 构建带超时的 reqwest 客户端
pub(crate) fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(into_network)
}

/// 传输层错误统一归类为 Network
pub(crate) fn into_network(err: reqwest::Error) -> ApiError {
    ApiError::Network(err.to_string())
}

/// 解析成功响应体，失败响应映射为 `ApiError`
pub(crate) async fn handle_json<T: DeserializeOwned>(
    resp: Response,
    entity: &str,
    id: &str,
) -> Result<T> {
    let status = resp.status();
    if status.is_success() {
        return resp.json().await.map_err(into_network);
    }
    Err(error_from_response(resp, entity, id).await)
}

/// 检查无响应体接口（如 DELETE）的状态
pub(crate) async fn handle_empty(resp: Response, entity: &str, id: &str) -> Result<()> {
    if resp.status().is_success() {
        return Ok(());
    }
    Err(error_from_response(resp, entity, id).await)
}

async fn error_from_response(resp: Response, entity: &str, id: &str) -> ApiError {
    let status = resp.status();
    let message = extract_message(resp).await;

    match status {
        StatusCode::NOT_FOUND => ApiError::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        },
        StatusCode::CONFLICT => ApiError::AlreadyExists {
            entity: entity.to_string(),
            value: id.to_string(),
        },
        // 原后端对重复注册返回 400，靠响应文本区分
        StatusCode::BAD_REQUEST if message.contains("already exists") => ApiError::AlreadyExists {
            entity: entity.to_string(),
            value: id.to_string(),
        },
        StatusCode::BAD_REQUEST => ApiError::Validation(message),
        StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
        _ => ApiError::Unexpected {
            status: status.as_u16(),
            message,
        },
    }
}

async fn extract_message(resp: Response) -> String {
    let text = resp.text().await.unwrap_or_default();
    if let Ok(body) = serde_json::from_str::<ErrorBody>(&text) {
        if let Some(msg) = body.error.or(body.message) {
            return msg;
        }
    }
    text
}
