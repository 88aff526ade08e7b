//! Live order feed
//!
//! Gives cashier/admin views a near-real-time, deduplicated stream of
//! orders and quick action requests. Each refresh fetches current full
//! state, diffs it against the previous cycle's id→status maps, and
//! alerts only on first appearance or an actual status change - never
//! twice for the same id in the same status.

mod source;
pub use source::{ChangeHint, ChangeSource, FeedWorker, PauseHandle, PollingSource, PushSource};

use crate::error::{ClientError, ClientResult};
use crate::gateway::BackendGateway;
use shared::order::{Order, QuickRequest};
use shared::{OrderStatus, RequestStatus};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Alert sounds the dashboards play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertSound {
    NewOrder,
    QuickAction,
    OrderReady,
}

impl AlertSound {
    /// Chime for an order reaching a status, if that status has one
    pub fn for_order_status(status: OrderStatus) -> Option<Self> {
        (status == OrderStatus::Ready).then_some(Self::OrderReady)
    }
}

/// A change worth surfacing to staff
#[derive(Debug, Clone, PartialEq)]
pub enum FeedAlert {
    NewOrder {
        order_id: String,
        table_number: String,
    },
    OrderStatusChanged {
        order_id: String,
        from: OrderStatus,
        to: OrderStatus,
    },
    NewQuickRequest {
        request_id: String,
        table_number: String,
        action_label: String,
    },
    QuickRequestStatusChanged {
        request_id: String,
        from: RequestStatus,
        to: RequestStatus,
    },
}

impl FeedAlert {
    /// Sound to play for this alert, if any
    pub fn sound(&self) -> Option<AlertSound> {
        match self {
            Self::NewOrder { .. } => Some(AlertSound::NewOrder),
            Self::NewQuickRequest { .. } => Some(AlertSound::QuickAction),
            Self::OrderStatusChanged { to, .. } => AlertSound::for_order_status(*to),
            Self::QuickRequestStatusChanged { .. } => None,
        }
    }
}

/// Alert broadcast channel capacity
const ALERT_CHANNEL_CAPACITY: usize = 256;

/// Deduplicating order/request feed for one staff view
pub struct LiveOrderFeed {
    gateway: Arc<dyn BackendGateway>,
    /// id → status as of the previous refresh cycle
    known_orders: HashMap<String, OrderStatus>,
    known_requests: HashMap<String, RequestStatus>,
    /// Last successfully fetched lists, newest first
    orders: Vec<Order>,
    requests: Vec<QuickRequest>,
    alert_tx: broadcast::Sender<FeedAlert>,
}

impl LiveOrderFeed {
    pub fn new(gateway: Arc<dyn BackendGateway>) -> Self {
        let (alert_tx, _) = broadcast::channel(ALERT_CHANNEL_CAPACITY);
        Self {
            gateway,
            known_orders: HashMap::new(),
            known_requests: HashMap::new(),
            orders: Vec::new(),
            requests: Vec::new(),
            alert_tx,
        }
    }

    /// Subscribe to alerts (sound/visual fan-out for views)
    pub fn subscribe(&self) -> broadcast::Receiver<FeedAlert> {
        self.alert_tx.subscribe()
    }

    /// Last successfully fetched orders, newest first
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Last successfully fetched quick requests, newest first
    pub fn requests(&self) -> &[QuickRequest] {
        &self.requests
    }

    /// Run one refresh cycle
    ///
    /// On a fetch failure nothing is replaced: the previous lists stay
    /// rendered and the previous maps stay authoritative, so the next
    /// successful cycle alerts exactly as if this one had not happened.
    pub async fn refresh(&mut self) -> ClientResult<Vec<FeedAlert>> {
        let (orders, requests) = tokio::join!(
            self.gateway.list_orders(None),
            self.gateway.list_quick_requests(None),
        );
        let mut orders = orders.map_err(|e| ClientError::Sync(e.to_string()))?;
        let mut requests = requests.map_err(|e| ClientError::Sync(e.to_string()))?;

        orders.sort_by_key(|o| std::cmp::Reverse(o.created_at));
        requests.sort_by_key(|r| std::cmp::Reverse(r.created_at));

        let mut alerts = Vec::new();

        // Orders: first appearance is a new order; a different status
        // than last cycle is a status change. An unchanged status stays
        // silent no matter how many cycles observe it.
        let mut next_orders = HashMap::with_capacity(orders.len());
        for order in &orders {
            match self.known_orders.get(&order.id) {
                None => alerts.push(FeedAlert::NewOrder {
                    order_id: order.id.clone(),
                    table_number: order.table_number.clone(),
                }),
                Some(&prev) if prev != order.status => {
                    alerts.push(FeedAlert::OrderStatusChanged {
                        order_id: order.id.clone(),
                        from: prev,
                        to: order.status,
                    })
                }
                Some(_) => {}
            }
            next_orders.insert(order.id.clone(), order.status);
        }

        // Quick requests: same comparison; only a pending first
        // appearance rings the quick-action alert.
        let mut next_requests = HashMap::with_capacity(requests.len());
        for request in &requests {
            match self.known_requests.get(&request.id) {
                None => {
                    if request.status == RequestStatus::Pending {
                        alerts.push(FeedAlert::NewQuickRequest {
                            request_id: request.id.clone(),
                            table_number: request.table_number.clone(),
                            action_label: request.action_label.clone(),
                        });
                    }
                }
                Some(&prev) if prev != request.status => {
                    alerts.push(FeedAlert::QuickRequestStatusChanged {
                        request_id: request.id.clone(),
                        from: prev,
                        to: request.status,
                    })
                }
                Some(_) => {}
            }
            next_requests.insert(request.id.clone(), request.status);
        }

        // Replace wholesale: ids that vanished from the backend are
        // forgotten, and an administrative cancelled→pending override
        // re-alerts as a status change on the next cycle.
        self.known_orders = next_orders;
        self.known_requests = next_requests;
        self.orders = orders;
        self.requests = requests;

        for alert in &alerts {
            // No receivers is fine; views subscribe when they care
            let _ = self.alert_tx.send(alert.clone());
        }

        if !alerts.is_empty() {
            tracing::debug!(alerts = alerts.len(), "Feed refresh produced alerts");
        }

        Ok(alerts)
    }
}
