//! Menu Item Model

use serde::{Deserialize, Serialize};

/// Size/price variant for a menu item
///
/// Every item has at least one variant; single-size items use one
/// variant with an empty size label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceVariant {
    pub size_label: Option<String>,
    /// Price in currency units
    pub price: f64,
}

/// Menu item entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: i64,
    pub category_id: i64,
    pub name_en: String,
    pub name_ar: String,
    #[serde(default)]
    pub description_en: String,
    #[serde(default)]
    pub description_ar: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub prices: Vec<PriceVariant>,
    /// Estimated preparation time in minutes
    #[serde(default = "default_prep_time")]
    pub prep_time_minutes: i32,
    #[serde(default = "default_true")]
    pub is_available: bool,
    pub display_order: i32,
}

fn default_prep_time() -> i32 {
    15
}

fn default_true() -> bool {
    true
}

impl MenuItem {
    /// Look up the price for a given size label
    pub fn price_for_size(&self, size_label: Option<&str>) -> Option<f64> {
        self.prices
            .iter()
            .find(|v| v.size_label.as_deref() == size_label)
            .map(|v| v.price)
    }
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub category_id: i64,
    pub name_en: String,
    pub name_ar: String,
    #[serde(default)]
    pub description_en: String,
    #[serde(default)]
    pub description_ar: String,
    pub image_url: Option<String>,
    pub prices: Vec<PriceVariant>,
    pub prep_time_minutes: Option<i32>,
    pub display_order: Option<i32>,
}

/// Update menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemUpdate {
    pub category_id: Option<i64>,
    pub name_en: Option<String>,
    pub name_ar: Option<String>,
    pub description_en: Option<String>,
    pub description_ar: Option<String>,
    pub image_url: Option<String>,
    pub prices: Option<Vec<PriceVariant>>,
    pub prep_time_minutes: Option<i32>,
    pub is_available: Option<bool>,
    pub display_order: Option<i32>,
}
