//! 商品客户端
//!
//! 封装 /api/products 下的 CRUD 接口。

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use prodman_shared::api::ProductApi;
use prodman_shared::error::Result;
use prodman_shared::models::{Product, ProductDraft};

use crate::http::{build_client, handle_empty, handle_json, into_network};

/// 商品 CRUD 协作方的 HTTP 实现
#[derive(Debug, Clone)]
pub struct ProductClient {
    client: reqwest::Client,
    base_url: String,
}

impl ProductClient {
    /// 创建商品客户端
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl ProductApi for ProductClient {
    async fn list_all(&self) -> Result<Vec<Product>> {
        let resp = self
            .client
            .get(self.url("/api/products"))
            .send()
            .await
            .map_err(into_network)?;
        let products: Vec<Product> = handle_json(resp, "Product", "*").await?;
        debug!(count = products.len(), "获取商品列表");
        Ok(products)
    }

    async fn get_by_id(&self, id: &str) -> Result<Product> {
        let resp = self
            .client
            .get(self.url(&format!("/api/products/{}", id)))
            .send()
            .await
            .map_err(into_network)?;
        handle_json(resp, "Product", id).await
    }

    async fn create(&self, draft: &ProductDraft) -> Result<Product> {
        debug!(name = %draft.name, price = draft.price, "创建商品");

        let resp = self
            .client
            .post(self.url("/api/products"))
            .json(draft)
            .send()
            .await
            .map_err(into_network)?;
        handle_json(resp, "Product", &draft.name).await
    }

    async fn update(&self, id: &str, draft: &ProductDraft) -> Result<Product> {
        debug!(id, name = %draft.name, "更新商品");

        let resp = self
            .client
            .put(self.url(&format!("/api/products/{}", id)))
            .json(draft)
            .send()
            .await
            .map_err(into_network)?;
        handle_json(resp, "Product", id).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        debug!(id, "删除商品");

        let resp = self
            .client
            .delete(self.url(&format!("/api/products/{}", id)))
            .send()
            .await
            .map_err(into_network)?;
        handle_empty(resp, "Product", id).await
    }
}
