//! 内置场景目录
//!
//! 六个固定场景，覆盖管理员全量 CRUD、纯浏览、批量创建、批量删除、
//! 错误路径和混合行为。目录内容是确定的：每次构建产生相同的
//! 场景、步骤与节奏。

use chrono::NaiveDate;

use crate::model::{Actor, Scenario, StepAction};

/// 场景目录
#[derive(Debug, Clone)]
pub struct ScenarioCatalog {
    scenarios: Vec<Scenario>,
}

impl ScenarioCatalog {
    /// 构建内置目录
    pub fn builtin() -> Self {
        Self {
            scenarios: vec![
                admin_heavy(),
                browser(),
                creator(),
                deleter(),
                error_prone(),
                mixed(),
            ],
        }
    }

    /// 从给定场景构建目录（测试与自定义批次用）
    pub fn from_scenarios(scenarios: Vec<Scenario>) -> Self {
        Self { scenarios }
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    /// 按名称查找场景
    pub fn get(&self, name: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.name == name)
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// 目录中所有场景的执行者（去重，保持出现顺序）
    pub fn actors(&self) -> Vec<Actor> {
        let mut actors: Vec<Actor> = Vec::new();
        for scenario in &self.scenarios {
            if !actors.iter().any(|a| a.email == scenario.actor.email) {
                actors.push(scenario.actor.clone());
            }
        }
        actors
    }
}

fn date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

/// 管理员：完整 CRUD 流程
fn admin_heavy() -> Scenario {
    let actor = Actor::new("Admin User", "admin@productmanager.com", "admin123", 30);
    Scenario::builder("Admin Heavy User - Full CRUD Operations", actor)
        .step("View all products", StepAction::ListProducts, 1000)
        .step(
            "Search for expensive products",
            StepAction::FilterListing { min_price: 1000.0 },
            1500,
        )
        .step(
            "View first product details",
            StepAction::ViewProductAt { index: 0 },
            1000,
        )
        .step(
            "Create premium product",
            StepAction::CreateProduct {
                name: "Admin Premium Laptop".to_string(),
                price: 2499.99,
                expiration_date: date(2026, 12, 31),
            },
            1500,
        )
        .step(
            "Create budget product",
            StepAction::CreateProduct {
                name: "Admin Budget Mouse".to_string(),
                price: 15.99,
                expiration_date: date(2025, 6, 30),
            },
            1000,
        )
        .step("View all products again", StepAction::ListProducts, 1000)
        .step(
            "Update first product",
            StepAction::UpdateProductAt {
                index: 0,
                name_suffix: " (Updated by Admin)".to_string(),
                price_factor: 1.1,
            },
            1500,
        )
        .step("Delete last product", StepAction::DeleteLastProduct, 1000)
        .build()
}

/// 浏览者：只读访问，包含越界下标
fn browser() -> Scenario {
    let actor = Actor::new("Browser User", "browser@productmanager.com", "browse123", 25);
    Scenario::builder("Browser User - Read-Only Exploration", actor)
        .step("View all products", StepAction::ListProducts, 2000)
        .step(
            "View product 1 details",
            StepAction::ViewProductAt { index: 0 },
            1500,
        )
        .step(
            "View product 2 details",
            StepAction::ViewProductAt { index: 1 },
            1500,
        )
        .step(
            "View product 3 details",
            StepAction::ViewProductAt { index: 2 },
            1500,
        )
        .step("Browse products again", StepAction::ListProducts, 2000)
        .step(
            "View product 5 details",
            StepAction::ViewProductAt { index: 4 },
            1500,
        )
        .step(
            "View product 10 details",
            StepAction::ViewProductAt { index: 9 },
            1500,
        )
        .step("Final products view", StepAction::ListProducts, 1000)
        .build()
}

/// 创建者：连续创建五个商品
fn creator() -> Scenario {
    let actor = Actor::new("Creator User", "creator@productmanager.com", "create123", 28);
    Scenario::builder("Creator User - Bulk Product Creation", actor)
        .step("View existing products", StepAction::ListProducts, 1000)
        .step(
            "Create product 1: Gaming Keyboard",
            StepAction::CreateProduct {
                name: "RGB Gaming Keyboard".to_string(),
                price: 89.99,
                expiration_date: date(2026, 3, 15),
            },
            800,
        )
        .step(
            "Create product 2: Wireless Mouse",
            StepAction::CreateProduct {
                name: "Wireless Gaming Mouse".to_string(),
                price: 59.99,
                expiration_date: date(2026, 3, 15),
            },
            800,
        )
        .step(
            "Create product 3: Monitor",
            StepAction::CreateProduct {
                name: "27\" 4K Monitor".to_string(),
                price: 399.99,
                expiration_date: date(2027, 1, 1),
            },
            800,
        )
        .step(
            "Create product 4: Headset",
            StepAction::CreateProduct {
                name: "Noise-Cancelling Headset".to_string(),
                price: 149.99,
                expiration_date: date(2026, 6, 30),
            },
            800,
        )
        .step(
            "Create product 5: Webcam",
            StepAction::CreateProduct {
                name: "1080p Webcam".to_string(),
                price: 79.99,
                expiration_date: date(2025, 12, 31),
            },
            800,
        )
        .step("View all created products", StepAction::ListProducts, 1000)
        .build()
}

/// 删除者：按下标连续删除
fn deleter() -> Scenario {
    let actor = Actor::new("Deleter User", "deleter@productmanager.com", "delete123", 32);
    Scenario::builder("Deleter User - Cleanup Operations", actor)
        .step("View all products", StepAction::ListProducts, 1500)
        .step(
            "Delete product at index 0",
            StepAction::DeleteProductAt { index: 0 },
            1000,
        )
        .step(
            "Delete product at index 1",
            StepAction::DeleteProductAt { index: 1 },
            1000,
        )
        .step("View remaining products", StepAction::ListProducts, 1500)
        .step(
            "Delete product at index 2",
            StepAction::DeleteProductAt { index: 2 },
            1000,
        )
        .step("Final products check", StepAction::ListProducts, 1000)
        .build()
}

/// 易错用户：访问不存在的 ID，失败后继续
fn error_prone() -> Scenario {
    let actor = Actor::new("Error User", "error@productmanager.com", "error123", 27);
    Scenario::builder("Error-Prone User - Testing Error Handling", actor)
        .step(
            "Try to view non-existent product (ID: invalid-id-99999)",
            StepAction::ViewProductById {
                id: "invalid-id-99999".to_string(),
            },
            1000,
        )
        .step("View valid products", StepAction::ListProducts, 1000)
        .step(
            "Try to delete non-existent product (ID: invalid-id-88888)",
            StepAction::DeleteProductById {
                id: "invalid-id-88888".to_string(),
            },
            1000,
        )
        .step(
            "Create product with minimal data",
            StepAction::CreateProduct {
                name: "Error Test Product".to_string(),
                price: 10.0,
                expiration_date: None,
            },
            1000,
        )
        .step("View products after errors", StepAction::ListProducts, 1000)
        .build()
}

/// 普通用户：浏览、创建并回头更新自己的商品
fn mixed() -> Scenario {
    let actor = Actor::new(
        "Regular User",
        "regular@productmanager.com",
        "regular123",
        29,
    );
    Scenario::builder("Mixed Behavior User - Realistic Usage", actor)
        .step("Browse products", StepAction::ListProducts, 2000)
        .step(
            "View specific product",
            StepAction::ViewProductAt { index: 4 },
            1500,
        )
        .step(
            "Create own product",
            StepAction::CreateProduct {
                name: "Regular User Office Chair".to_string(),
                price: 249.99,
                expiration_date: date(2026, 12, 31),
            },
            1500,
        )
        .step("Browse again", StepAction::ListProducts, 2000)
        .step(
            "View another product",
            StepAction::ViewProductAt { index: 7 },
            1500,
        )
        .step(
            "Update own product",
            StepAction::UpdateProductMatching {
                name_contains: "Regular User".to_string(),
                name_suffix: " (Price Reduced)".to_string(),
                price_factor: 0.9,
            },
            1500,
        )
        .step("Final browse", StepAction::ListProducts, 1000)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_shape() {
        let catalog = ScenarioCatalog::builtin();
        assert_eq!(catalog.len(), 6);

        let step_counts: Vec<usize> = catalog
            .scenarios()
            .iter()
            .map(|s| s.steps.len())
            .collect();
        assert_eq!(step_counts, [8, 8, 7, 6, 5, 7]);
    }

    #[test]
    fn test_builtin_catalog_is_deterministic() {
        let first = ScenarioCatalog::builtin();
        let second = ScenarioCatalog::builtin();
        assert_eq!(first.scenarios(), second.scenarios());
    }

    #[test]
    fn test_actors_are_unique() {
        let catalog = ScenarioCatalog::builtin();
        let actors = catalog.actors();
        assert_eq!(actors.len(), 6);
        assert_eq!(actors[0].email, "admin@productmanager.com");
        assert_eq!(actors[0].age, Some(30));
    }

    #[test]
    fn test_catalog_uses_canonical_scenario_names() {
        // 场景名是 run --name 的查找键和报告标签，必须与后端约定的
        // 目录名逐字一致
        let catalog = ScenarioCatalog::builtin();
        for name in [
            "Admin Heavy User - Full CRUD Operations",
            "Browser User - Read-Only Exploration",
            "Creator User - Bulk Product Creation",
            "Deleter User - Cleanup Operations",
            "Error-Prone User - Testing Error Handling",
            "Mixed Behavior User - Realistic Usage",
        ] {
            assert!(catalog.get(name).is_some(), "目录缺少场景: {}", name);
        }

        let creator = catalog.get("Creator User - Bulk Product Creation").unwrap();
        assert_eq!(creator.steps[2].name, "Create product 2: Wireless Mouse");
    }

    #[test]
    fn test_get_by_name() {
        let catalog = ScenarioCatalog::builtin();
        assert!(catalog.get("Browser User - Read-Only Exploration").is_some());
        assert!(catalog.get("No Such Scenario").is_none());
    }

    #[test]
    fn test_browser_scenario_reaches_out_of_range_index() {
        let catalog = ScenarioCatalog::builtin();
        let browser = catalog.get("Browser User - Read-Only Exploration").unwrap();
        assert_eq!(
            browser.steps[6].action,
            StepAction::ViewProductAt { index: 9 }
        );
    }

    #[test]
    fn test_error_prone_scenario_continues_after_failures() {
        let catalog = ScenarioCatalog::builtin();
        let scenario = catalog.get("Error-Prone User - Testing Error Handling").unwrap();

        assert_eq!(
            scenario.steps[2].action,
            StepAction::DeleteProductById {
                id: "invalid-id-88888".to_string()
            }
        );
        // 删除失败之后仍有创建步骤
        assert!(matches!(
            scenario.steps[3].action,
            StepAction::CreateProduct { .. }
        ));
    }
}
