//! Mock 商品服务
//!
//! 模拟商品 CRUD 的 REST API。
//! 列表顺序按创建序号稳定排序，场景中的按下标操作依赖该顺序。

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

use prodman_shared::models::{Product, ProductDraft};

use crate::store::MemoryStore;

/// 商品服务状态
pub struct ProductServiceState {
    pub products: MemoryStore<StoredProduct>,
    seq: AtomicU64,
}

/// 存储的商品：实体加创建序号
#[derive(Debug, Clone)]
pub struct StoredProduct {
    pub product: Product,
    pub seq: u64,
}

impl ProductServiceState {
    pub fn new() -> Self {
        Self {
            products: MemoryStore::new(),
            seq: AtomicU64::new(0),
        }
    }

    /// 直接插入商品（预填充用）
    pub fn insert_product(&self, product: Product) {
        let seq = self.seq.fetch_add(1, Ordering::SeqCst);
        let id = product.id.clone();
        self.products.insert(&id, StoredProduct { product, seq });
    }

    /// 按创建顺序列出商品
    pub fn list_ordered(&self) -> Vec<Product> {
        self.products
            .list_sorted_by(|stored| stored.seq)
            .into_iter()
            .map(|stored| stored.product)
            .collect()
    }
}

impl Default for ProductServiceState {
    fn default() -> Self {
        Self::new()
    }
}

/// API 错误响应
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiErr = (StatusCode, Json<ErrorResponse>);

fn api_err(status: StatusCode, message: impl Into<String>) -> ApiErr {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

fn not_found(id: &str) -> ApiErr {
    api_err(StatusCode::NOT_FOUND, format!("Product {} not found", id))
}

fn validate(draft: &ProductDraft) -> Result<(), ApiErr> {
    if draft.name.trim().is_empty() {
        return Err(api_err(StatusCode::BAD_REQUEST, "name is required"));
    }
    if draft.price <= 0.0 {
        return Err(api_err(StatusCode::BAD_REQUEST, "price must be positive"));
    }
    Ok(())
}

/// 构建商品服务路由
pub fn product_routes() -> Router<Arc<ProductServiceState>> {
    Router::new()
        .route("/api/products", get(list_products).post(create_product))
        .route(
            "/api/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
}

/// 列出所有商品
async fn list_products(State(state): State<Arc<ProductServiceState>>) -> Json<Vec<Product>> {
    let products = state.list_ordered();
    tracing::info!(count = products.len(), "列出商品");
    Json(products)
}

/// 按 ID 获取商品
async fn get_product(
    State(state): State<Arc<ProductServiceState>>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiErr> {
    state
        .products
        .get(&id)
        .map(|stored| Json(stored.product))
        .ok_or_else(|| {
            tracing::warn!(id = %id, "商品不存在");
            not_found(&id)
        })
}

/// 创建商品
async fn create_product(
    State(state): State<Arc<ProductServiceState>>,
    Json(draft): Json<ProductDraft>,
) -> Result<(StatusCode, Json<Product>), ApiErr> {
    validate(&draft)?;

    let now = Utc::now();
    let product = Product {
        id: Uuid::new_v4().to_string(),
        name: draft.name,
        price: draft.price,
        expiration_date: draft.expiration_date,
        created_at: now,
        updated_at: now,
    };
    state.insert_product(product.clone());

    tracing::info!(id = %product.id, name = %product.name, "创建商品");
    Ok((StatusCode::CREATED, Json(product)))
}

/// 更新商品
async fn update_product(
    State(state): State<Arc<ProductServiceState>>,
    Path(id): Path<String>,
    Json(draft): Json<ProductDraft>,
) -> Result<Json<Product>, ApiErr> {
    validate(&draft)?;

    let mut stored = state.products.get(&id).ok_or_else(|| {
        tracing::warn!(id = %id, "商品不存在");
        not_found(&id)
    })?;

    stored.product.name = draft.name;
    stored.product.price = draft.price;
    stored.product.expiration_date = draft.expiration_date;
    stored.product.updated_at = Utc::now();
    state.products.insert(&id, stored.clone());

    tracing::info!(id = %id, "更新商品");
    Ok(Json(stored.product))
}

/// 删除商品
async fn delete_product(
    State(state): State<Arc<ProductServiceState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiErr> {
    if state.products.remove(&id).is_none() {
        tracing::warn!(id = %id, "商品不存在");
        return Err(not_found(&id));
    }

    tracing::info!(id = %id, "删除商品");
    Ok(StatusCode::NO_CONTENT)
}
