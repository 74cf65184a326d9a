//! 场景执行引擎
//!
//! 针对商品管理后端回放脚本化的多步用户会话，覆盖 CRUD 路径、
//! 错误路径和节奏控制，用于演示与集成验证。
//!
//! # 主要模块
//!
//! - `model`: 场景、步骤与执行记录的数据结构
//! - `catalog`: 内置的场景目录
//! - `executor`: 单场景执行器（认证一次，按序执行步骤，步骤级失败隔离）
//! - `provisioner`: 场景用户账号的幂等预置
//! - `batch`: 顺序批量执行与冷却控制
//! - `report`: 人类可读的结果渲染

pub mod batch;
pub mod catalog;
pub mod cli;
pub mod executor;
pub mod model;
pub mod provisioner;
pub mod report;
