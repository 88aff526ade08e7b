//! Order submission pipeline
//!
//! Turns a cart snapshot into a durable backend order. The cart is
//! cleared only after the backend confirms the create call; on any
//! failure the lines stay in place so the customer can retry without
//! re-entering the selection. The pipeline never retries on its own -
//! without a dedup key from the backend an automatic retry could
//! create a duplicate order.

use crate::cart::CartEngine;
use crate::error::{ClientError, ClientResult};
use crate::gateway::BackendGateway;
use shared::models::TableStatus;
use shared::order::{Order, OrderCreate, QuickRequest, QuickRequestCreate};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Clears the in-flight flag on every exit path
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Submission pipeline for orders and quick action requests
pub struct SubmissionPipeline {
    gateway: Arc<dyn BackendGateway>,
    order_in_flight: AtomicBool,
    request_in_flight: AtomicBool,
}

impl SubmissionPipeline {
    pub fn new(gateway: Arc<dyn BackendGateway>) -> Self {
        Self {
            gateway,
            order_in_flight: AtomicBool::new(false),
            request_in_flight: AtomicBool::new(false),
        }
    }

    /// Submit the cart as an order
    ///
    /// Exactly one create call is issued. While it is awaited the
    /// pipeline rejects further submissions, mirroring the disabled
    /// submit button that guards against double taps.
    pub async fn submit_order(
        &self,
        cart: &mut CartEngine,
        customer_notes: Option<String>,
    ) -> ClientResult<Order> {
        let snapshot = cart.snapshot();
        if snapshot.is_empty() {
            return Err(ClientError::Validation("cart is empty".to_string()));
        }
        if snapshot.table_number.is_empty() {
            return Err(ClientError::Validation("table number is not set".to_string()));
        }

        let _guard = Self::acquire(&self.order_in_flight)?;

        // The total is recomputed from the lines here, not read from any
        // cached display value.
        let create = OrderCreate::from_lines(
            snapshot.table_number.clone(),
            snapshot.lines.iter().map(|l| l.to_order_line()).collect(),
            customer_notes,
        );

        let order = match self.gateway.create_order(create).await {
            Ok(order) => order,
            Err(err) => {
                tracing::warn!(table = %snapshot.table_number, error = %err, "Order submission failed, cart preserved");
                return Err(ClientError::Submission {
                    message: err.to_string(),
                    retryable: err.is_retryable(),
                });
            }
        };

        tracing::info!(order_id = %order.id, table = %order.table_number, total = order.total_amount, "Order submitted");

        // The order exists server-side from here on; a local store
        // failure must not be reported as a failed submission.
        if let Err(err) = cart.clear() {
            tracing::error!(order_id = %order.id, error = %err, "Failed to clear cart after submission");
        }

        // Best-effort secondary call; its failure never rolls back the order
        if let Err(err) = self
            .gateway
            .update_table_status(&order.table_number, TableStatus::Occupied)
            .await
        {
            tracing::warn!(table = %order.table_number, error = %err, "Failed to mark table occupied");
        }

        Ok(order)
    }

    /// Submit a quick action request ("call waiter", "request bill")
    ///
    /// Same single-call, no-auto-retry contract as orders, with no cart
    /// involved.
    pub async fn submit_quick_action(
        &self,
        table_number: &str,
        action_label: &str,
        note: Option<String>,
    ) -> ClientResult<QuickRequest> {
        if table_number.is_empty() {
            return Err(ClientError::Validation("table number is not set".to_string()));
        }
        if action_label.is_empty() {
            return Err(ClientError::Validation("action label is empty".to_string()));
        }

        let _guard = Self::acquire(&self.request_in_flight)?;

        let create = QuickRequestCreate {
            table_number: table_number.to_string(),
            action_label: action_label.to_string(),
            note,
        };

        match self.gateway.create_quick_request(create).await {
            Ok(request) => {
                tracing::info!(request_id = %request.id, table = %table_number, action = %action_label, "Quick action submitted");
                Ok(request)
            }
            Err(err) => {
                tracing::warn!(table = %table_number, action = %action_label, error = %err, "Quick action submission failed");
                Err(ClientError::Submission {
                    message: err.to_string(),
                    retryable: err.is_retryable(),
                })
            }
        }
    }

    fn acquire(flag: &AtomicBool) -> ClientResult<InFlightGuard<'_>> {
        if flag
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(ClientError::Validation(
                "submission already in progress".to_string(),
            ));
        }
        Ok(InFlightGuard(flag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartStore;
    use crate::gateway::MemoryGateway;
    use shared::CartLineInput;

    fn cart_with_pizza(qty: i32) -> CartEngine {
        let mut cart = CartEngine::open(CartStore::open_in_memory().unwrap(), "4").unwrap();
        cart.add_line(CartLineInput {
            menu_item_id: 1,
            name: "Pizza".to_string(),
            size_label: Some("Medium".to_string()),
            unit_price: 18.0,
            quantity: qty,
            special_instructions: None,
        })
        .unwrap();
        cart
    }

    #[tokio::test]
    async fn test_submit_clears_cart_on_success() {
        let gateway = Arc::new(MemoryGateway::new());
        let pipeline = SubmissionPipeline::new(gateway.clone());
        let mut cart = cart_with_pizza(2);

        let order = pipeline.submit_order(&mut cart, None).await.unwrap();

        assert_eq!(order.table_number, "4");
        assert_eq!(order.total_amount, 36.0);
        assert!(cart.snapshot().is_empty());
        assert_eq!(gateway.create_calls(), 1);
    }

    #[tokio::test]
    async fn test_failed_submit_preserves_cart() {
        let gateway = Arc::new(MemoryGateway::new());
        let pipeline = SubmissionPipeline::new(gateway.clone());
        let mut cart = cart_with_pizza(2);
        let before = cart.snapshot();

        gateway.fail_next_call();
        let err = pipeline.submit_order(&mut cart, None).await.unwrap_err();

        assert!(matches!(
            err,
            ClientError::Submission { retryable: true, .. }
        ));
        let after = cart.snapshot();
        assert_eq!(after.total, before.total);
        assert_eq!(after.item_count, before.item_count);

        // Manual retry succeeds with the same cart
        let order = pipeline.submit_order(&mut cart, None).await.unwrap();
        assert_eq!(order.total_amount, 36.0);
        assert!(cart.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_empty_cart_never_reaches_backend() {
        let gateway = Arc::new(MemoryGateway::new());
        let pipeline = SubmissionPipeline::new(gateway.clone());
        let mut cart = CartEngine::open(CartStore::open_in_memory().unwrap(), "4").unwrap();

        let err = pipeline.submit_order(&mut cart, None).await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
        assert_eq!(gateway.create_calls(), 0);
    }

    #[tokio::test]
    async fn test_table_marked_occupied_best_effort() {
        let gateway = Arc::new(MemoryGateway::new());
        gateway.seed_tables(vec![shared::models::DiningTable {
            number: "4".to_string(),
            status: TableStatus::Available,
            capacity: Some(4),
        }]);
        let pipeline = SubmissionPipeline::new(gateway.clone());
        let mut cart = cart_with_pizza(1);

        pipeline.submit_order(&mut cart, None).await.unwrap();
        assert_eq!(gateway.table_status("4"), Some(TableStatus::Occupied));
    }

    #[tokio::test]
    async fn test_quick_action_submission() {
        let gateway = Arc::new(MemoryGateway::new());
        let pipeline = SubmissionPipeline::new(gateway.clone());

        let request = pipeline
            .submit_quick_action("9", "Call Waiter", None)
            .await
            .unwrap();
        assert_eq!(request.table_number, "9");
        assert_eq!(request.status, shared::RequestStatus::Pending);

        gateway.fail_next_call();
        let err = pipeline
            .submit_quick_action("9", "Request Bill", None)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Submission { .. }));

        let err = pipeline.submit_quick_action("9", "", None).await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
    }
}
