//! Backend gateway abstraction
//!
//! All persistence lives in a hosted backend; clients only see these
//! operations. Every call returns current full state (no delta or
//! cursor protocol), and the store provides last-write-wins per record
//! across concurrent clients - nothing stronger.

mod http;
mod memory;

pub use http::{ApiResponse, HttpGateway};
pub use memory::MemoryGateway;

use crate::error::ClientResult;
use async_trait::async_trait;
use shared::models::{Category, DiningTable, MenuItem, QuickActionDef, TableStatus};
use shared::order::{Order, OrderCreate, QuickRequest, QuickRequestCreate};
use shared::{OrderStatus, RequestStatus};

/// Operations the clients consume from the hosted backend
#[async_trait]
pub trait BackendGateway: Send + Sync {
    // ========== Reference Data ==========

    /// List menu categories, in display order
    async fn list_categories(&self) -> ClientResult<Vec<Category>>;

    /// List menu items, in display order
    async fn list_menu_items(&self) -> ClientResult<Vec<MenuItem>>;

    /// List quick action definitions, in display order
    async fn list_quick_action_defs(&self) -> ClientResult<Vec<QuickActionDef>>;

    /// List dining tables
    async fn list_tables(&self) -> ClientResult<Vec<DiningTable>>;

    // ========== Orders ==========

    /// List orders, optionally filtered by status, newest first
    async fn list_orders(&self, status: Option<OrderStatus>) -> ClientResult<Vec<Order>>;

    /// Create an order; returns the persisted record with its server ID
    async fn create_order(&self, order: OrderCreate) -> ClientResult<Order>;

    /// Update an order's status; returns the updated record
    async fn update_order_status(&self, id: &str, status: OrderStatus) -> ClientResult<Order>;

    // ========== Quick Requests ==========

    /// List quick action requests, optionally filtered by status, newest first
    async fn list_quick_requests(
        &self,
        status: Option<RequestStatus>,
    ) -> ClientResult<Vec<QuickRequest>>;

    /// Create a quick action request
    async fn create_quick_request(
        &self,
        request: QuickRequestCreate,
    ) -> ClientResult<QuickRequest>;

    /// Update a quick request's status; returns the updated record
    async fn update_quick_request_status(
        &self,
        id: &str,
        status: RequestStatus,
    ) -> ClientResult<QuickRequest>;

    // ========== Tables ==========

    /// Update a table's status (best-effort callers tolerate failure)
    async fn update_table_status(
        &self,
        table_number: &str,
        status: TableStatus,
    ) -> ClientResult<()>;
}
