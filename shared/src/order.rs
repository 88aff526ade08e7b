//! Order and quick-request models
//!
//! Orders are backend-owned records: line contents are immutable after
//! creation, only `status` changes. Status progressions are validated
//! locally before any update call is issued.

use crate::money;
use serde::{Deserialize, Serialize};

/// Order status
///
/// Canonical progression: `pending → preparing → ready → completed`,
/// with `cancelled` reachable from `pending` or `preparing` only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    Ready,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Whether a status change from `self` to `target` is legal
    pub fn can_transition_to(&self, target: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, target),
            (Pending, Preparing)
                | (Preparing, Ready)
                | (Ready, Completed)
                | (Pending, Cancelled)
                | (Preparing, Cancelled)
        )
    }

    /// Whether the order still needs staff attention
    pub fn is_active(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Preparing | OrderStatus::Ready)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Preparing => write!(f, "preparing"),
            Self::Ready => write!(f, "ready"),
            Self::Completed => write!(f, "completed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Quick request status
///
/// `pending → in_progress → completed`, with the direct
/// `pending → completed` shortcut for one-tap "mark done".
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl RequestStatus {
    /// Whether a status change from `self` to `target` is legal
    pub fn can_transition_to(&self, target: RequestStatus) -> bool {
        use RequestStatus::*;
        matches!(
            (self, target),
            (Pending, InProgress) | (InProgress, Completed) | (Pending, Completed)
        )
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// Order line
///
/// Size and price are snapshotted at the time the customer added the
/// item; later menu edits do not change submitted orders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLine {
    /// Menu item reference (backend ID)
    pub menu_item_id: i64,
    pub name: String,
    pub size_label: Option<String>,
    /// Unit price in currency units
    pub unit_price: f64,
    pub quantity: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
}

impl OrderLine {
    /// Line total (unit price × quantity)
    pub fn line_total(&self) -> f64 {
        money::line_total(self.unit_price, self.quantity)
    }
}

/// Order entity (backend-owned)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Server-assigned ID
    pub id: String,
    pub table_number: String,
    pub lines: Vec<OrderLine>,
    /// Total amount in currency units
    pub total_amount: f64,
    pub status: OrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_notes: Option<String>,
    /// Creation time (UTC milliseconds)
    pub created_at: i64,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub table_number: String,
    pub lines: Vec<OrderLine>,
    /// Total amount, recomputed from `lines` at build time
    pub total_amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_notes: Option<String>,
}

impl OrderCreate {
    /// Build a create payload, recomputing the total from the lines.
    ///
    /// The total is never taken from a cached value so that concurrent
    /// local edits between display and submission cannot produce a
    /// stale amount.
    pub fn from_lines(
        table_number: impl Into<String>,
        lines: Vec<OrderLine>,
        customer_notes: Option<String>,
    ) -> Self {
        let total_amount = money::sum_lines(lines.iter().map(|l| (l.unit_price, l.quantity)));
        Self {
            table_number: table_number.into(),
            lines,
            total_amount,
            customer_notes,
        }
    }
}

/// Quick action request entity (backend-owned)
///
/// A one-tap, item-less service request ("call waiter", "request bill").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuickRequest {
    /// Server-assigned ID
    pub id: String,
    pub table_number: String,
    pub action_label: String,
    pub status: RequestStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Creation time (UTC milliseconds)
    pub created_at: i64,
}

/// Create quick request payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuickRequestCreate {
    pub table_number: String,
    pub action_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}
