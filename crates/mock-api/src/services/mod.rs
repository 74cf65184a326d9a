//! REST 服务实现

mod auth_service;
mod product_service;

pub use auth_service::{AuthServiceState, auth_routes};
pub use product_service::{ProductServiceState, product_routes};
