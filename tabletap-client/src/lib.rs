//! TableTap Client - client core for the QR ordering system
//!
//! Everything the customer menu, cashier and admin views sit on top of:
//! the backend gateway abstraction, the durable cart engine, the order
//! submission pipeline, the live order feed and the status transition
//! controller.

pub mod analytics;
pub mod cart;
pub mod config;
pub mod error;
pub mod feed;
pub mod gateway;
pub mod status;
pub mod submit;

pub use cart::{CartEngine, CartStore};
pub use config::{ClientConfig, FeedRole};
pub use error::{ClientError, ClientResult};
pub use feed::{FeedAlert, LiveOrderFeed};
pub use gateway::{BackendGateway, HttpGateway, MemoryGateway};
pub use status::StatusController;
pub use submit::SubmissionPipeline;

// Re-export shared types for convenience
pub use shared::{CartLine, CartSnapshot, Order, OrderStatus, QuickRequest, RequestStatus};
