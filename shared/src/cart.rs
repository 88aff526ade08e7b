//! Cart types
//!
//! The cart is client-local state: lines live on the customer's device
//! until submission turns them into an order. Two lines are the same
//! line (and merge by summing quantity) iff menu item, size and special
//! instructions are all equal.

use crate::money;
use crate::order::OrderLine;
use serde::{Deserialize, Serialize};

/// One entry in a customer's in-progress selection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Locally generated ID, distinct from any backend ID
    pub line_id: String,
    /// Menu item reference (backend ID)
    pub menu_item_id: i64,
    pub name: String,
    pub size_label: Option<String>,
    /// Unit price snapshotted at add time; later menu price changes do
    /// not retroactively change the cart
    pub unit_price: f64,
    pub quantity: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
    /// When the line was added (UTC milliseconds)
    pub added_at: i64,
}

impl CartLine {
    /// Merge key: lines with equal keys are the same line
    pub fn merge_key(&self) -> (i64, Option<&str>, Option<&str>) {
        (
            self.menu_item_id,
            self.size_label.as_deref(),
            self.special_instructions.as_deref(),
        )
    }

    /// Line total (unit price × quantity)
    pub fn line_total(&self) -> f64 {
        money::line_total(self.unit_price, self.quantity)
    }

    /// Convert into an order line for submission
    pub fn to_order_line(&self) -> OrderLine {
        OrderLine {
            menu_item_id: self.menu_item_id,
            name: self.name.clone(),
            size_label: self.size_label.clone(),
            unit_price: self.unit_price,
            quantity: self.quantity,
            special_instructions: self.special_instructions.clone(),
        }
    }
}

/// Cart line input - what the menu view hands to the cart when the
/// customer taps "add" (no line ID yet; merging may reuse an existing
/// line instead of creating one)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLineInput {
    pub menu_item_id: i64,
    pub name: String,
    pub size_label: Option<String>,
    pub unit_price: f64,
    pub quantity: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
}

impl CartLineInput {
    /// Merge key, comparable with [`CartLine::merge_key`]
    pub fn merge_key(&self) -> (i64, Option<&str>, Option<&str>) {
        (
            self.menu_item_id,
            self.size_label.as_deref(),
            self.special_instructions.as_deref(),
        )
    }
}

/// Immutable view of the cart at a specific instant
///
/// Always computed from the current lines, never cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartSnapshot {
    pub table_number: String,
    pub lines: Vec<CartLine>,
    /// Sum of quantities
    pub item_count: i32,
    /// Sum of line totals
    pub total: f64,
}

impl CartSnapshot {
    /// Build a snapshot from a line list, computing the derived fields
    pub fn compute(table_number: impl Into<String>, lines: Vec<CartLine>) -> Self {
        let item_count = lines.iter().map(|l| l.quantity).sum();
        let total = money::sum_lines(lines.iter().map(|l| (l.unit_price, l.quantity)));
        Self {
            table_number: table_number.into(),
            lines,
            item_count,
            total,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
