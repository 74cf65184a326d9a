//! 配置管理模块
//!
//! 支持配置文件加载、环境变量覆盖，以及类型安全的配置访问。

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// 后端 API 配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// 后端基础地址，如 http://localhost:8090
    pub base_url: String,
    /// HTTP 请求超时（秒）
    ///
    /// 引擎本身不设超时，卡死防护依赖客户端的这一超时。
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8090".to_string(),
            timeout_seconds: 30,
        }
    }
}

/// 场景执行配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// 场景之间的冷却时间（毫秒）
    pub cool_down_ms: u64,
    /// 延时缩放系数
    ///
    /// 1.0 为目录声明的原始节奏，0.0 关闭全部延时（测试用）。
    pub time_scale: f64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            cool_down_ms: 2000,
            time_scale: 1.0,
        }
    }
}

/// 可观测性配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub log_level: String,
    /// 日志输出格式：json（结构化）或 pretty（人类可读）
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub environment: String,
    pub api: ApiConfig,
    pub runner: RunnerConfig,
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// 从配置文件和环境变量加载配置
    ///
    /// 加载顺序（后加载的覆盖先加载的同名配置项）：
    /// 1. 内置默认值
    /// 2. config/default.toml
    /// 3. config/{environment}.toml
    /// 4. 显式指定的配置文件（如 CLI 的 --config）
    /// 5. 环境变量（PRODMAN_ 前缀，如 PRODMAN_API__BASE_URL -> api.base_url）
    pub fn load(explicit_file: Option<&str>) -> Result<Self, ConfigError> {
        let env = std::env::var("PRODMAN_ENV").unwrap_or_else(|_| "development".to_string());
        let config_dir = std::env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

        let mut builder = Config::builder()
            .set_default("environment", env.clone())?
            .add_source(File::from(Path::new(&config_dir).join("default.toml")).required(false))
            .add_source(
                File::from(Path::new(&config_dir).join(format!("{}.toml", env))).required(false),
            );

        if let Some(path) = explicit_file {
            builder = builder.add_source(File::from(Path::new(path)).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("PRODMAN")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }
}
