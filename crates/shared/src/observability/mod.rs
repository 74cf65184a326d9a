//! 可观测性模块
//!
//! 提供日志初始化。场景引擎的 span 通过 `tracing` 宏产生，
//! 引擎逻辑不依赖任何导出后端是否存在。

mod tracing;

pub use tracing::init;
