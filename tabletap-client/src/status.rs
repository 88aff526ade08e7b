//! Status transition controller
//!
//! Applies one legal status change to one order or quick request.
//! Illegal transitions are rejected against the last known local
//! status before any network call; the local cache only moves after
//! the backend acknowledges, so a cashier never acts on a status the
//! backend has not accepted.

use crate::error::{ClientError, ClientResult};
use crate::feed::LiveOrderFeed;
use crate::gateway::BackendGateway;
use shared::order::{Order, QuickRequest};
use shared::{OrderStatus, RequestStatus};
use std::collections::HashMap;
use std::sync::Arc;

/// Validated status changes for orders and quick requests
pub struct StatusController {
    gateway: Arc<dyn BackendGateway>,
    orders: HashMap<String, OrderStatus>,
    requests: HashMap<String, RequestStatus>,
}

impl StatusController {
    pub fn new(gateway: Arc<dyn BackendGateway>) -> Self {
        Self {
            gateway,
            orders: HashMap::new(),
            requests: HashMap::new(),
        }
    }

    // ========== Cache Seeding ==========

    /// Record an order's observed status
    pub fn observe_order(&mut self, id: impl Into<String>, status: OrderStatus) {
        self.orders.insert(id.into(), status);
    }

    /// Record a quick request's observed status
    pub fn observe_request(&mut self, id: impl Into<String>, status: RequestStatus) {
        self.requests.insert(id.into(), status);
    }

    /// Seed the cache from a feed's last fetched state
    pub fn sync_from_feed(&mut self, feed: &LiveOrderFeed) {
        for order in feed.orders() {
            self.orders.insert(order.id.clone(), order.status);
        }
        for request in feed.requests() {
            self.requests.insert(request.id.clone(), request.status);
        }
    }

    /// Last known status of an order
    pub fn order_status(&self, id: &str) -> Option<OrderStatus> {
        self.orders.get(id).copied()
    }

    /// Last known status of a quick request
    pub fn request_status(&self, id: &str) -> Option<RequestStatus> {
        self.requests.get(id).copied()
    }

    // ========== Transitions ==========

    /// Apply a status change to an order
    ///
    /// Exactly one update call on the legal path; zero calls on a
    /// locally rejected one.
    pub async fn transition_order(
        &mut self,
        id: &str,
        target: OrderStatus,
    ) -> ClientResult<Order> {
        let current = self
            .orders
            .get(id)
            .copied()
            .ok_or_else(|| ClientError::NotFound(format!("order {}", id)))?;

        if !current.can_transition_to(target) {
            return Err(ClientError::invalid_order_transition(current, target));
        }

        let order = match self.gateway.update_order_status(id, target).await {
            Ok(order) => order,
            Err(err) => {
                // Cache untouched: the badge keeps showing the status
                // the backend last confirmed
                tracing::warn!(order_id = %id, from = %current, to = %target, error = %err, "Order transition failed");
                return Err(ClientError::Transition(err.to_string()));
            }
        };

        tracing::info!(order_id = %id, from = %current, to = %order.status, "Order transitioned");
        self.orders.insert(id.to_string(), order.status);
        Ok(order)
    }

    /// Apply a status change to a quick request
    pub async fn transition_request(
        &mut self,
        id: &str,
        target: RequestStatus,
    ) -> ClientResult<QuickRequest> {
        let current = self
            .requests
            .get(id)
            .copied()
            .ok_or_else(|| ClientError::NotFound(format!("quick request {}", id)))?;

        if !current.can_transition_to(target) {
            return Err(ClientError::invalid_request_transition(current, target));
        }

        let request = match self.gateway.update_quick_request_status(id, target).await {
            Ok(request) => request,
            Err(err) => {
                tracing::warn!(request_id = %id, from = %current, to = %target, error = %err, "Request transition failed");
                return Err(ClientError::Transition(err.to_string()));
            }
        };

        tracing::info!(request_id = %id, from = %current, to = %request.status, "Request transitioned");
        self.requests.insert(id.to_string(), request.status);
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::MemoryGateway;
    use shared::order::{OrderCreate, OrderLine, QuickRequestCreate};

    async fn seeded(gateway: &Arc<MemoryGateway>) -> (StatusController, String) {
        let order = gateway
            .create_order(OrderCreate::from_lines(
                "1",
                vec![OrderLine {
                    menu_item_id: 1,
                    name: "Pizza".to_string(),
                    size_label: None,
                    unit_price: 18.0,
                    quantity: 1,
                    special_instructions: None,
                }],
                None,
            ))
            .await
            .unwrap();

        let mut controller = StatusController::new(gateway.clone());
        controller.observe_order(&order.id, order.status);
        (controller, order.id)
    }

    #[tokio::test]
    async fn test_legal_transition_issues_one_call() {
        let gateway = Arc::new(MemoryGateway::new());
        let (mut controller, id) = seeded(&gateway).await;
        let updates_before = gateway.update_calls();

        let order = controller
            .transition_order(&id, OrderStatus::Preparing)
            .await
            .unwrap();

        assert_eq!(order.status, OrderStatus::Preparing);
        assert_eq!(controller.order_status(&id), Some(OrderStatus::Preparing));
        assert_eq!(gateway.update_calls(), updates_before + 1);
    }

    #[tokio::test]
    async fn test_illegal_transition_issues_zero_calls() {
        let gateway = Arc::new(MemoryGateway::new());
        let (mut controller, id) = seeded(&gateway).await;
        let updates_before = gateway.update_calls();

        // pending → ready skips preparing
        let err = controller
            .transition_order(&id, OrderStatus::Ready)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidTransition { .. }));

        // pending → completed skips everything
        let err = controller
            .transition_order(&id, OrderStatus::Completed)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidTransition { .. }));

        assert_eq!(gateway.update_calls(), updates_before);
        assert_eq!(controller.order_status(&id), Some(OrderStatus::Pending));
    }

    #[tokio::test]
    async fn test_failed_transition_keeps_local_status() {
        let gateway = Arc::new(MemoryGateway::new());
        let (mut controller, id) = seeded(&gateway).await;

        gateway.fail_next_call();
        let err = controller
            .transition_order(&id, OrderStatus::Preparing)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Transition(_)));
        assert_eq!(controller.order_status(&id), Some(OrderStatus::Pending));

        // Retry succeeds
        controller
            .transition_order(&id, OrderStatus::Preparing)
            .await
            .unwrap();
        assert_eq!(controller.order_status(&id), Some(OrderStatus::Preparing));
    }

    #[tokio::test]
    async fn test_full_lifecycle() {
        let gateway = Arc::new(MemoryGateway::new());
        let (mut controller, id) = seeded(&gateway).await;

        for target in [
            OrderStatus::Preparing,
            OrderStatus::Ready,
            OrderStatus::Completed,
        ] {
            let order = controller.transition_order(&id, target).await.unwrap();
            assert_eq!(order.status, target);
        }

        // Completed is terminal
        let err = controller
            .transition_order(&id, OrderStatus::Cancelled)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidTransition { .. }));
    }

    #[tokio::test]
    async fn test_request_shortcut_transition() {
        let gateway = Arc::new(MemoryGateway::new());
        let request = gateway
            .create_quick_request(QuickRequestCreate {
                table_number: "2".to_string(),
                action_label: "Call Waiter".to_string(),
                note: None,
            })
            .await
            .unwrap();

        let mut controller = StatusController::new(gateway.clone());
        controller.observe_request(&request.id, request.status);

        // One-tap "mark done": pending → completed directly
        let updated = controller
            .transition_request(&request.id, RequestStatus::Completed)
            .await
            .unwrap();
        assert_eq!(updated.status, RequestStatus::Completed);

        // Completed requests are never re-opened
        let err = controller
            .transition_request(&request.id, RequestStatus::InProgress)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidTransition { .. }));
    }

    #[tokio::test]
    async fn test_unknown_entity() {
        let gateway = Arc::new(MemoryGateway::new());
        let mut controller = StatusController::new(gateway.clone());

        let err = controller
            .transition_order("ORD-404", OrderStatus::Preparing)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::NotFound(_)));
        assert_eq!(gateway.update_calls(), 0);
    }
}
