//! 内存存储
//!
//! 使用 DashMap 实现的并发内存存储。
//! 商品列表接口要求稳定顺序，因此提供按键排序的列出方法。

use dashmap::DashMap;
use std::sync::Arc;

/// 通用内存存储
#[derive(Debug)]
pub struct MemoryStore<T> {
    data: Arc<DashMap<String, T>>,
}

impl<T: Clone> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> MemoryStore<T> {
    /// 创建新的内存存储实例
    pub fn new() -> Self {
        Self {
            data: Arc::new(DashMap::new()),
        }
    }

    /// 插入或更新数据
    pub fn insert(&self, id: &str, value: T) {
        self.data.insert(id.to_string(), value);
    }

    /// 获取数据的克隆
    pub fn get(&self, id: &str) -> Option<T> {
        self.data.get(id).map(|v| v.clone())
    }

    /// 删除数据，返回被删除的值
    pub fn remove(&self, id: &str) -> Option<T> {
        self.data.remove(id).map(|(_, v)| v)
    }

    /// 检查是否存在指定 key
    pub fn contains(&self, id: &str) -> bool {
        self.data.contains_key(id)
    }

    /// 按排序键列出所有数据
    ///
    /// DashMap 本身不保序，调用方提供排序键（如插入序号）
    /// 以获得跨请求稳定的列表顺序。
    pub fn list_sorted_by<K, F>(&self, key_fn: F) -> Vec<T>
    where
        K: Ord,
        F: Fn(&T) -> K,
    {
        let mut items: Vec<T> = self
            .data
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        items.sort_by_key(|item| key_fn(item));
        items
    }

    /// 获取数据总数
    pub fn count(&self) -> usize {
        self.data.len()
    }

    /// 清空所有数据
    pub fn clear(&self) {
        self.data.clear();
    }
}

impl<T: Clone> Clone for MemoryStore<T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}
