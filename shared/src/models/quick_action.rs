//! Quick Action Model

use serde::{Deserialize, Serialize};

/// Quick action definition entity
///
/// Admin-managed catalog of one-tap service requests shown on the
/// customer menu ("call waiter", "request bill", "bring napkins").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuickActionDef {
    pub id: i64,
    pub label_en: String,
    pub label_ar: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub display_order: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Create quick action payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuickActionDefCreate {
    pub label_en: String,
    pub label_ar: String,
    pub icon: Option<String>,
    pub display_order: Option<i32>,
}

/// Update quick action payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuickActionDefUpdate {
    pub label_en: Option<String>,
    pub label_ar: Option<String>,
    pub icon: Option<String>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}
