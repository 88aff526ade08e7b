//! Category Model

use serde::{Deserialize, Serialize};

/// Menu category entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name_en: String,
    pub name_ar: String,
    pub display_order: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Create category payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCreate {
    pub name_en: String,
    pub name_ar: String,
    pub display_order: Option<i32>,
}

/// Update category payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryUpdate {
    pub name_en: Option<String>,
    pub name_ar: Option<String>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}
