//! 协作方接口定义
//!
//! 场景引擎通过这些 trait 调用外部系统（认证、商品 CRUD、结果通知），
//! 不关心背后是 HTTP 客户端还是进程内实现。
//! 启用 `mocks` feature 后提供 mockall 模拟实现，供依赖方测试使用。

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{AuthSession, Product, ProductDraft, SignupRequest, UserAccount};

/// 认证协作方
#[cfg_attr(feature = "mocks", mockall::automock)]
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// 用户登录
    ///
    /// 失败时返回 `InvalidCredentials` 或 `Network` 错误。
    async fn login(&self, email: &str, password: &str) -> Result<AuthSession>;

    /// 用户注册
    ///
    /// 账号已存在时返回 `AlreadyExists` 错误，由调用方决定如何归类。
    async fn signup(&self, req: &SignupRequest) -> Result<UserAccount>;
}

/// 商品 CRUD 协作方
///
/// `list_all` 的返回顺序必须在后端侧稳定，场景中的按下标操作依赖该顺序。
#[cfg_attr(feature = "mocks", mockall::automock)]
#[async_trait]
pub trait ProductApi: Send + Sync {
    /// 列出所有商品（有序）
    async fn list_all(&self) -> Result<Vec<Product>>;

    /// 按 ID 获取商品
    async fn get_by_id(&self, id: &str) -> Result<Product>;

    /// 创建商品
    async fn create(&self, draft: &ProductDraft) -> Result<Product>;

    /// 更新商品
    async fn update(&self, id: &str, draft: &ProductDraft) -> Result<Product>;

    /// 删除商品
    async fn delete(&self, id: &str) -> Result<()>;
}

/// 结果通知协作方
///
/// 批次执行完成后接收人类可读的摘要，纯展示副作用，
/// 引擎的控制流不依赖通知结果。
#[cfg_attr(feature = "mocks", mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, title: &str, message: &str);
}

/// 基于 tracing 的通知实现
///
/// 将摘要输出到日志，作为默认的通知渠道。
#[derive(Debug, Default)]
pub struct TracingNotifier;

#[async_trait]
impl Notifier for TracingNotifier {
    async fn notify(&self, title: &str, message: &str) {
        tracing::info!(title, "{}", message);
    }
}
