//! Data models
//!
//! Backend-owned reference data consumed read-only by the clients.
//! Names and descriptions carry both locales as data; which one a view
//! renders is presentation, not model, concern.

pub mod category;
pub mod dining_table;
pub mod menu_item;
pub mod quick_action;

// Re-exports
pub use category::*;
pub use dining_table::*;
pub use menu_item::*;
pub use quick_action::*;
