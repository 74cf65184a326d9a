//! 统一错误处理模块
//!
//! 定义协作方调用的共享错误类型，使用 thiserror 提供良好的错误信息。
//! 场景引擎在步骤边界捕获这些错误并记录，不向上传播。

use thiserror::Error;

/// 协作方（认证 / 商品 CRUD）调用错误类型
#[derive(Debug, Error)]
pub enum ApiError {
    // ==================== 资源错误 ====================
    #[error("记录未找到: {entity} id={id}")]
    NotFound { entity: String, id: String },

    #[error("记录已存在: {entity} {value}")]
    AlreadyExists { entity: String, value: String },

    // ==================== 认证错误 ====================
    #[error("邮箱或密码错误")]
    InvalidCredentials,

    #[error("未授权访问")]
    Unauthorized,

    // ==================== 验证错误 ====================
    #[error("参数验证失败: {0}")]
    Validation(String),

    // ==================== 传输错误 ====================
    #[error("网络错误: {0}")]
    Network(String),

    #[error("非预期响应: status={status} {message}")]
    Unexpected { status: u16, message: String },
}

/// 错误结果类型别名
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// 获取错误码
    ///
    /// 供执行记录和测试断言使用，与错误的展示文本解耦。
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::AlreadyExists { .. } => "ALREADY_EXISTS",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Network(_) => "NETWORK_ERROR",
            Self::Unexpected { .. } => "UNEXPECTED_STATUS",
        }
    }

    /// 是否为冲突类错误（注册时账号已存在）
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }

    /// 是否为可重试错误
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}
