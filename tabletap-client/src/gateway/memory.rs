//! In-memory gateway
//!
//! Backend stand-in for tests, examples and offline demos: the same
//! operations against process-local state, with fault injection and
//! call counting so failure contracts can be exercised, plus a change
//! feed that mimics the hosted backend's push notifications.

use crate::error::{ClientError, ClientResult};
use crate::gateway::BackendGateway;
use async_trait::async_trait;
use shared::message::{ChangeNotification, ChangeTopic};
use shared::models::{Category, DiningTable, MenuItem, QuickActionDef, TableStatus};
use shared::order::{Order, OrderCreate, QuickRequest, QuickRequestCreate};
use shared::{util, OrderStatus, RequestStatus};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use tokio::sync::mpsc;

#[derive(Default)]
struct MemoryState {
    categories: Vec<Category>,
    menu_items: Vec<MenuItem>,
    quick_action_defs: Vec<QuickActionDef>,
    tables: Vec<DiningTable>,
    orders: Vec<Order>,
    requests: Vec<QuickRequest>,
    next_order_id: u64,
    next_request_id: u64,
    fail_next: bool,
    subscribers: Vec<mpsc::UnboundedSender<ChangeNotification>>,
}

/// In-memory backend gateway
pub struct MemoryGateway {
    state: Mutex<MemoryState>,
    create_calls: AtomicUsize,
    update_calls: AtomicUsize,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MemoryState {
                next_order_id: 1,
                next_request_id: 1,
                ..Default::default()
            }),
            create_calls: AtomicUsize::new(0),
            update_calls: AtomicUsize::new(0),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ========== Test Hooks ==========

    /// Make the next gateway call fail with a simulated outage
    pub fn fail_next_call(&self) {
        self.lock().fail_next = true;
    }

    /// Number of create calls received (orders + quick requests)
    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    /// Number of status update calls received (orders + quick requests)
    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    /// Subscribe to change notifications (the push transport stand-in)
    pub fn subscribe_changes(&self) -> mpsc::UnboundedReceiver<ChangeNotification> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.lock().subscribers.push(tx);
        rx
    }

    // ========== Seeding ==========

    /// Seed reference data
    pub fn seed_menu(&self, categories: Vec<Category>, items: Vec<MenuItem>) {
        let mut state = self.lock();
        state.categories = categories;
        state.menu_items = items;
    }

    /// Seed quick action definitions
    pub fn seed_quick_actions(&self, defs: Vec<QuickActionDef>) {
        self.lock().quick_action_defs = defs;
    }

    /// Seed dining tables
    pub fn seed_tables(&self, tables: Vec<DiningTable>) {
        self.lock().tables = tables;
    }

    /// Current status of a table, if known
    pub fn table_status(&self, number: &str) -> Option<TableStatus> {
        self.lock()
            .tables
            .iter()
            .find(|t| t.number == number)
            .map(|t| t.status)
    }

    // ========== Internals ==========

    fn take_fail(state: &mut MemoryState) -> ClientResult<()> {
        if state.fail_next {
            state.fail_next = false;
            return Err(ClientError::Unavailable(
                "simulated network failure".to_string(),
            ));
        }
        Ok(())
    }

    fn notify(state: &mut MemoryState, topic: ChangeTopic, entity_id: &str) {
        let notification = ChangeNotification::for_entity(topic, entity_id);
        state
            .subscribers
            .retain(|tx| tx.send(notification.clone()).is_ok());
    }
}

impl Default for MemoryGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BackendGateway for MemoryGateway {
    async fn list_categories(&self) -> ClientResult<Vec<Category>> {
        let mut state = self.lock();
        Self::take_fail(&mut state)?;
        let mut categories = state.categories.clone();
        categories.sort_by_key(|c| c.display_order);
        Ok(categories)
    }

    async fn list_menu_items(&self) -> ClientResult<Vec<MenuItem>> {
        let mut state = self.lock();
        Self::take_fail(&mut state)?;
        let mut items = state.menu_items.clone();
        items.sort_by_key(|i| i.display_order);
        Ok(items)
    }

    async fn list_quick_action_defs(&self) -> ClientResult<Vec<QuickActionDef>> {
        let mut state = self.lock();
        Self::take_fail(&mut state)?;
        let mut defs = state.quick_action_defs.clone();
        defs.sort_by_key(|d| d.display_order);
        Ok(defs)
    }

    async fn list_tables(&self) -> ClientResult<Vec<DiningTable>> {
        let mut state = self.lock();
        Self::take_fail(&mut state)?;
        Ok(state.tables.clone())
    }

    async fn list_orders(&self, status: Option<OrderStatus>) -> ClientResult<Vec<Order>> {
        let mut state = self.lock();
        Self::take_fail(&mut state)?;
        let mut orders: Vec<Order> = state
            .orders
            .iter()
            .filter(|o| status.is_none_or(|s| o.status == s))
            .cloned()
            .collect();
        orders.sort_by_key(|o| std::cmp::Reverse(o.created_at));
        Ok(orders)
    }

    async fn create_order(&self, order: OrderCreate) -> ClientResult<Order> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        let mut state = self.lock();
        Self::take_fail(&mut state)?;

        let id = format!("ORD-{}", state.next_order_id);
        state.next_order_id += 1;

        let order = Order {
            id: id.clone(),
            table_number: order.table_number,
            lines: order.lines,
            total_amount: order.total_amount,
            status: OrderStatus::Pending,
            customer_notes: order.customer_notes,
            created_at: util::now_millis(),
        };
        state.orders.push(order.clone());
        Self::notify(&mut state, ChangeTopic::Orders, &id);
        Ok(order)
    }

    async fn update_order_status(&self, id: &str, status: OrderStatus) -> ClientResult<Order> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        let mut state = self.lock();
        Self::take_fail(&mut state)?;

        let order = state
            .orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| ClientError::NotFound(format!("order {}", id)))?;
        order.status = status;
        let order = order.clone();
        Self::notify(&mut state, ChangeTopic::Orders, id);
        Ok(order)
    }

    async fn list_quick_requests(
        &self,
        status: Option<RequestStatus>,
    ) -> ClientResult<Vec<QuickRequest>> {
        let mut state = self.lock();
        Self::take_fail(&mut state)?;
        let mut requests: Vec<QuickRequest> = state
            .requests
            .iter()
            .filter(|r| status.is_none_or(|s| r.status == s))
            .cloned()
            .collect();
        requests.sort_by_key(|r| std::cmp::Reverse(r.created_at));
        Ok(requests)
    }

    async fn create_quick_request(
        &self,
        request: QuickRequestCreate,
    ) -> ClientResult<QuickRequest> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        let mut state = self.lock();
        Self::take_fail(&mut state)?;

        let id = format!("REQ-{}", state.next_request_id);
        state.next_request_id += 1;

        let request = QuickRequest {
            id: id.clone(),
            table_number: request.table_number,
            action_label: request.action_label,
            status: RequestStatus::Pending,
            note: request.note,
            created_at: util::now_millis(),
        };
        state.requests.push(request.clone());
        Self::notify(&mut state, ChangeTopic::QuickRequests, &id);
        Ok(request)
    }

    async fn update_quick_request_status(
        &self,
        id: &str,
        status: RequestStatus,
    ) -> ClientResult<QuickRequest> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        let mut state = self.lock();
        Self::take_fail(&mut state)?;

        let request = state
            .requests
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| ClientError::NotFound(format!("quick request {}", id)))?;
        request.status = status;
        let request = request.clone();
        Self::notify(&mut state, ChangeTopic::QuickRequests, id);
        Ok(request)
    }

    async fn update_table_status(
        &self,
        table_number: &str,
        status: TableStatus,
    ) -> ClientResult<()> {
        let mut state = self.lock();
        Self::take_fail(&mut state)?;

        if let Some(table) = state.tables.iter_mut().find(|t| t.number == table_number) {
            table.status = status;
            Self::notify(&mut state, ChangeTopic::Tables, table_number);
        }
        Ok(())
    }
}
