//! 示例数据
//!
//! 启动时可选的预填充商品，便于立即跑通浏览类场景。

use chrono::NaiveDate;

use prodman_shared::models::ProductDraft;

/// 内置的示例商品草稿
pub fn sample_products() -> Vec<ProductDraft> {
    vec![
        ProductDraft::new("Mechanical Keyboard", 129.99)
            .with_expiration(NaiveDate::from_ymd_opt(2026, 6, 30).unwrap()),
        ProductDraft::new("Ergonomic Mouse", 49.99),
        ProductDraft::new("USB-C Dock", 89.99)
            .with_expiration(NaiveDate::from_ymd_opt(2027, 1, 1).unwrap()),
        ProductDraft::new("Laptop Stand", 39.99),
        ProductDraft::new("Desk Lamp", 24.99),
        ProductDraft::new("Noise-Cancelling Headset", 149.99)
            .with_expiration(NaiveDate::from_ymd_opt(2026, 12, 31).unwrap()),
        ProductDraft::new("1080p Webcam", 79.99),
        ProductDraft::new("Cable Organizer", 9.99),
        ProductDraft::new("Monitor Arm", 119.99),
        ProductDraft::new("Standing Desk Mat", 59.99),
    ]
}
