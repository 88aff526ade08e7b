//! End-to-end flows wiring the cart, pipeline, feed and controller
//! together over the in-memory backend.

use shared::models::{DiningTable, TableStatus};
use shared::{CartLineInput, OrderStatus, RequestStatus};
use std::sync::Arc;
use tabletap_client::feed::{FeedAlert, FeedWorker, PushSource};
use tabletap_client::{
    CartEngine, CartStore, ClientError, LiveOrderFeed, MemoryGateway, StatusController,
    SubmissionPipeline,
};
use tokio_util::sync::CancellationToken;

fn pizza(qty: i32) -> CartLineInput {
    CartLineInput {
        menu_item_id: 1,
        name: "Pizza".to_string(),
        size_label: Some("Medium".to_string()),
        unit_price: 18.0,
        quantity: qty,
        special_instructions: None,
    }
}

fn soup(qty: i32) -> CartLineInput {
    CartLineInput {
        menu_item_id: 2,
        name: "Soup".to_string(),
        size_label: None,
        unit_price: 8.0,
        quantity: qty,
        special_instructions: Some("extra bread".to_string()),
    }
}

#[tokio::test]
async fn customer_order_reaches_cashier() {
    let gateway = Arc::new(MemoryGateway::new());
    gateway.seed_tables(vec![DiningTable {
        number: "12".to_string(),
        status: TableStatus::Available,
        capacity: Some(4),
    }]);

    // Customer: add the same selection twice, then something else
    let mut cart = CartEngine::open(CartStore::open_in_memory().unwrap(), "12").unwrap();
    cart.add_line(pizza(1)).unwrap();
    cart.add_line(pizza(1)).unwrap();
    cart.add_line(soup(1)).unwrap();

    let snapshot = cart.snapshot();
    assert_eq!(snapshot.lines.len(), 2);
    assert_eq!(snapshot.item_count, 3);
    assert_eq!(snapshot.total, 44.0);

    let pipeline = SubmissionPipeline::new(gateway.clone());
    let order = pipeline
        .submit_order(&mut cart, Some("birthday table".to_string()))
        .await
        .unwrap();

    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.total_amount, 44.0);
    assert!(cart.snapshot().is_empty());
    assert_eq!(gateway.table_status("12"), Some(TableStatus::Occupied));

    // Cashier: the feed sees exactly one new order
    let mut feed = LiveOrderFeed::new(gateway.clone());
    let alerts = feed.refresh().await.unwrap();
    assert_eq!(
        alerts,
        vec![FeedAlert::NewOrder {
            order_id: order.id.clone(),
            table_number: "12".to_string(),
        }]
    );
    assert_eq!(feed.orders()[0].customer_notes.as_deref(), Some("birthday table"));
}

#[tokio::test]
async fn failed_submission_preserves_cart_for_retry() {
    let gateway = Arc::new(MemoryGateway::new());
    let pipeline = SubmissionPipeline::new(gateway.clone());

    let mut cart = CartEngine::open(CartStore::open_in_memory().unwrap(), "3").unwrap();
    cart.add_line(pizza(2)).unwrap();
    cart.add_line(soup(2)).unwrap();
    assert_eq!(cart.snapshot().total, 52.0);

    gateway.fail_next_call();
    let err = pipeline.submit_order(&mut cart, None).await.unwrap_err();
    assert!(matches!(err, ClientError::Submission { retryable: true, .. }));

    // Unchanged snapshot: same total, same item count
    let snapshot = cart.snapshot();
    assert_eq!(snapshot.total, 52.0);
    assert_eq!(snapshot.item_count, 4);

    // User-initiated retry with the untouched cart succeeds
    let order = pipeline.submit_order(&mut cart, None).await.unwrap();
    assert_eq!(order.total_amount, 52.0);
    assert!(cart.snapshot().is_empty());
    assert_eq!(gateway.create_calls(), 2);
}

#[tokio::test]
async fn cart_survives_reload_and_edits_drive_total() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("carts.redb");

    let line_id = {
        let store = CartStore::open(&path).unwrap();
        let mut cart = CartEngine::open(store, "5").unwrap();
        cart.add_line(pizza(1)).unwrap();
        let id = cart.add_line(soup(2)).unwrap();
        id
    };

    // Simulated reload: a new process opens the same store
    let store = CartStore::open(&path).unwrap();
    let mut cart = CartEngine::open(store, "5").unwrap();
    let snapshot = cart.snapshot();
    assert_eq!(snapshot.lines.len(), 2);
    assert_eq!(snapshot.total, 34.0);

    // setQuantity(0) removes the line
    cart.set_quantity(&line_id, 0).unwrap();
    let snapshot = cart.snapshot();
    assert_eq!(snapshot.lines.len(), 1);
    assert_eq!(snapshot.item_count, 1);
    assert_eq!(snapshot.total, 18.0);
}

#[tokio::test]
async fn feed_alerts_once_per_change_across_cycles() {
    let gateway = Arc::new(MemoryGateway::new());
    let pipeline = SubmissionPipeline::new(gateway.clone());
    let mut feed = LiveOrderFeed::new(gateway.clone());

    // Cycle 1: one pending order -> one alert
    let mut cart = CartEngine::open(CartStore::open_in_memory().unwrap(), "1").unwrap();
    cart.add_line(pizza(1)).unwrap();
    let o1 = pipeline.submit_order(&mut cart, None).await.unwrap();
    assert_eq!(feed.refresh().await.unwrap().len(), 1);

    // Cycle 2: O1 unchanged, O2 new -> exactly one alert, for O2
    cart.add_line(soup(1)).unwrap();
    let o2 = pipeline.submit_order(&mut cart, None).await.unwrap();
    let alerts = feed.refresh().await.unwrap();
    assert_eq!(
        alerts,
        vec![FeedAlert::NewOrder {
            order_id: o2.id.clone(),
            table_number: "1".to_string(),
        }]
    );

    // Cycle 3: nothing moved -> silence
    assert!(feed.refresh().await.unwrap().is_empty());
    assert_ne!(o1.id, o2.id);
}

#[tokio::test]
async fn staff_transitions_follow_the_lifecycle() {
    let gateway = Arc::new(MemoryGateway::new());
    let pipeline = SubmissionPipeline::new(gateway.clone());

    let mut cart = CartEngine::open(CartStore::open_in_memory().unwrap(), "8").unwrap();
    cart.add_line(pizza(1)).unwrap();
    let order = pipeline.submit_order(&mut cart, None).await.unwrap();

    let mut feed = LiveOrderFeed::new(gateway.clone());
    feed.refresh().await.unwrap();

    let mut controller = StatusController::new(gateway.clone());
    controller.sync_from_feed(&feed);

    // Skipping preparing is rejected locally, with zero update calls
    let updates_before = gateway.update_calls();
    let err = controller
        .transition_order(&order.id, OrderStatus::Ready)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::InvalidTransition { .. }));
    assert_eq!(gateway.update_calls(), updates_before);
    assert_eq!(controller.order_status(&order.id), Some(OrderStatus::Pending));

    // The legal step issues exactly one call
    controller
        .transition_order(&order.id, OrderStatus::Preparing)
        .await
        .unwrap();
    assert_eq!(gateway.update_calls(), updates_before + 1);

    // Another staff terminal's feed converges on the new status
    let mut other_feed = LiveOrderFeed::new(gateway.clone());
    other_feed.refresh().await.unwrap();
    assert_eq!(other_feed.orders()[0].status, OrderStatus::Preparing);
}

#[tokio::test]
async fn quick_request_flow_with_mark_done_shortcut() {
    let gateway = Arc::new(MemoryGateway::new());
    let pipeline = SubmissionPipeline::new(gateway.clone());

    let request = pipeline
        .submit_quick_action("6", "Request Bill", None)
        .await
        .unwrap();

    let mut feed = LiveOrderFeed::new(gateway.clone());
    let alerts = feed.refresh().await.unwrap();
    assert!(matches!(&alerts[0], FeedAlert::NewQuickRequest { request_id, .. } if *request_id == request.id));

    let mut controller = StatusController::new(gateway.clone());
    controller.sync_from_feed(&feed);
    let done = controller
        .transition_request(&request.id, RequestStatus::Completed)
        .await
        .unwrap();
    assert_eq!(done.status, RequestStatus::Completed);

    // The completion shows up as a change, not a new request
    let alerts = feed.refresh().await.unwrap();
    assert!(matches!(
        &alerts[0],
        FeedAlert::QuickRequestStatusChanged {
            to: RequestStatus::Completed,
            ..
        }
    ));
}

#[tokio::test]
async fn push_driven_feed_converges_without_polling() {
    let gateway = Arc::new(MemoryGateway::new());
    let feed = Arc::new(tokio::sync::Mutex::new(LiveOrderFeed::new(gateway.clone())));
    let mut alerts = feed.lock().await.subscribe();

    let shutdown = CancellationToken::new();
    let worker = FeedWorker::new(
        feed.clone(),
        Box::new(PushSource::new(gateway.subscribe_changes())),
        shutdown.clone(),
    );
    let handle = tokio::spawn(worker.run());

    let pipeline = SubmissionPipeline::new(gateway.clone());
    let mut cart = CartEngine::open(CartStore::open_in_memory().unwrap(), "2").unwrap();
    cart.add_line(pizza(1)).unwrap();
    let order = pipeline.submit_order(&mut cart, None).await.unwrap();

    let alert = alerts.recv().await.unwrap();
    assert!(matches!(alert, FeedAlert::NewOrder { order_id, .. } if order_id == order.id));

    shutdown.cancel();
    handle.await.unwrap();
}
