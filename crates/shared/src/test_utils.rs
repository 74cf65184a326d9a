//! 测试工具模块
//!
//! 提供进程内的协作方实现，供引擎的单元/集成测试在不启动
//! HTTP 服务的情况下运行完整场景。

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::api::{AuthApi, ProductApi};
use crate::error::{ApiError, Result};
use crate::models::{AuthSession, Product, ProductDraft, SignupRequest, UserAccount};

/// 进程内的商品管理后端
///
/// 同时实现 `AuthApi` 和 `ProductApi`，持有内存中的用户与商品状态。
/// 商品列表保持插入顺序，与真实后端的排序约定一致。
/// 记录 login/signup 调用次数，供测试断言"每场景只认证一次"之类的属性。
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    users: RwLock<HashMap<String, StoredUser>>,
    products: RwLock<Vec<Product>>,
    /// 仅允许已注册账号登录；默认关闭，便于无需预置用户的测试
    strict_login: bool,
    login_calls: AtomicUsize,
    signup_calls: AtomicUsize,
}

#[derive(Debug, Clone)]
struct StoredUser {
    account: UserAccount,
    password: String,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// 开启严格登录模式
    pub fn with_strict_login(mut self) -> Self {
        self.strict_login = true;
        self
    }

    /// 预置商品
    pub async fn seed_product(&self, name: &str, price: f64) -> Product {
        let product = new_product(name, price, None);
        self.products.write().await.push(product.clone());
        product
    }

    /// 预置 n 个顺序命名的商品
    pub async fn seed_products(&self, count: usize) {
        for i in 0..count {
            self.seed_product(&format!("Seed Product {}", i + 1), 10.0 * (i as f64 + 1.0))
                .await;
        }
    }

    /// 当前商品快照
    pub async fn products(&self) -> Vec<Product> {
        self.products.read().await.clone()
    }

    /// 清空商品（场景间需要隔离时由测试显式调用）
    pub async fn reset_products(&self) {
        self.products.write().await.clear();
    }

    /// login 被调用的次数
    pub fn login_calls(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }

    /// signup 被调用的次数
    pub fn signup_calls(&self) -> usize {
        self.signup_calls.load(Ordering::SeqCst)
    }
}

fn new_product(name: &str, price: f64, expiration: Option<chrono::NaiveDate>) -> Product {
    let now = Utc::now();
    Product {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        price,
        expiration_date: expiration,
        created_at: now,
        updated_at: now,
    }
}

#[async_trait]
impl AuthApi for InMemoryBackend {
    async fn login(&self, email: &str, password: &str) -> Result<AuthSession> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);

        let users = self.users.read().await;
        match users.get(email) {
            Some(stored) if stored.password == password => Ok(AuthSession {
                token: format!("mock-token-{}", Uuid::new_v4()),
                user: stored.account.clone(),
            }),
            Some(_) => Err(ApiError::InvalidCredentials),
            None if self.strict_login => Err(ApiError::InvalidCredentials),
            None => Ok(AuthSession {
                token: format!("mock-token-{}", Uuid::new_v4()),
                user: UserAccount {
                    id: Uuid::new_v4().to_string(),
                    name: email.to_string(),
                    email: email.to_string(),
                    age: None,
                    created_at: Utc::now(),
                },
            }),
        }
    }

    async fn signup(&self, req: &SignupRequest) -> Result<UserAccount> {
        self.signup_calls.fetch_add(1, Ordering::SeqCst);

        let mut users = self.users.write().await;
        if users.contains_key(&req.email) {
            return Err(ApiError::AlreadyExists {
                entity: "User".to_string(),
                value: req.email.clone(),
            });
        }

        let account = UserAccount {
            id: Uuid::new_v4().to_string(),
            name: req.name.clone(),
            email: req.email.clone(),
            age: req.age,
            created_at: Utc::now(),
        };
        users.insert(
            req.email.clone(),
            StoredUser {
                account: account.clone(),
                password: req.password.clone(),
            },
        );
        Ok(account)
    }
}

#[async_trait]
impl ProductApi for InMemoryBackend {
    async fn list_all(&self) -> Result<Vec<Product>> {
        Ok(self.products.read().await.clone())
    }

    async fn get_by_id(&self, id: &str) -> Result<Product> {
        self.products
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound {
                entity: "Product".to_string(),
                id: id.to_string(),
            })
    }

    async fn create(&self, draft: &ProductDraft) -> Result<Product> {
        validate_draft(draft)?;
        let product = new_product(&draft.name, draft.price, draft.expiration_date);
        self.products.write().await.push(product.clone());
        Ok(product)
    }

    async fn update(&self, id: &str, draft: &ProductDraft) -> Result<Product> {
        validate_draft(draft)?;
        let mut products = self.products.write().await;
        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| ApiError::NotFound {
                entity: "Product".to_string(),
                id: id.to_string(),
            })?;
        product.name = draft.name.clone();
        product.price = draft.price;
        product.expiration_date = draft.expiration_date;
        product.updated_at = Utc::now();
        Ok(product.clone())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut products = self.products.write().await;
        let before = products.len();
        products.retain(|p| p.id != id);
        if products.len() == before {
            return Err(ApiError::NotFound {
                entity: "Product".to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }
}

fn validate_draft(draft: &ProductDraft) -> Result<()> {
    if draft.name.trim().is_empty() {
        return Err(ApiError::Validation("商品名称不能为空".to_string()));
    }
    if draft.price <= 0.0 {
        return Err(ApiError::Validation("商品价格必须大于 0".to_string()));
    }
    Ok(())
}
