//! 商品管理后端 HTTP 客户端
//!
//! 基于 reqwest 实现 `AuthApi` 和 `ProductApi` 协作方接口。
//! 请求超时在这一层配置，场景引擎本身不做超时控制。

mod auth;
mod http;
mod products;

pub use auth::AuthClient;
pub use products::ProductClient;
