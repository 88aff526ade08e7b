//! Shared types for the TableTap ordering system
//!
//! Domain models used across the customer menu, cashier and admin
//! clients: menu reference data, orders, quick requests, cart types,
//! change-notification payloads and money/id helpers.

pub mod cart;
pub mod message;
pub mod models;
pub mod money;
pub mod order;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

// Order re-exports (for convenient access)
pub use order::{Order, OrderLine, OrderStatus, QuickRequest, RequestStatus};

// Cart re-exports
pub use cart::{CartLine, CartLineInput, CartSnapshot};
