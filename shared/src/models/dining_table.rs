//! Dining Table Model

use serde::{Deserialize, Serialize};

/// Table status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TableStatus {
    #[default]
    Available,
    Occupied,
    Reserved,
}

impl TableStatus {
    /// Next status in the cashier's tap cycle:
    /// available → occupied → reserved → available
    pub fn next_in_cycle(&self) -> TableStatus {
        match self {
            Self::Available => Self::Occupied,
            Self::Occupied => Self::Reserved,
            Self::Reserved => Self::Available,
        }
    }
}

impl std::fmt::Display for TableStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available => write!(f, "available"),
            Self::Occupied => write!(f, "occupied"),
            Self::Reserved => write!(f, "reserved"),
        }
    }
}

/// Dining table entity
///
/// `number` is the customer-facing identifier encoded in the QR code
/// URL; it scopes the cart and all orders/requests from that device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTable {
    pub number: String,
    pub status: TableStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i32>,
}
