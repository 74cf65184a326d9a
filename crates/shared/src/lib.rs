//! 共享库
//!
//! 包含场景引擎与各客户端共用的领域模型、协作方接口、错误处理、
//! 配置和可观测性基础代码。

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod observability;
pub mod test_utils;
