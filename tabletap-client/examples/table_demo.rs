// tabletap-client/examples/table_demo.rs
// End-to-end walk-through of one table's visit against the in-memory
// backend: customer orders, cashier feed alerts, status lifecycle.

use anyhow::Result;
use shared::models::{Category, MenuItem, PriceVariant};
use shared::{CartLineInput, OrderStatus};
use std::sync::Arc;
use tabletap_client::{
    BackendGateway, CartEngine, CartStore, LiveOrderFeed, MemoryGateway, StatusController,
    SubmissionPipeline,
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let gateway = Arc::new(MemoryGateway::new());
    gateway.seed_menu(
        vec![Category {
            id: 1,
            name_en: "Mains".to_string(),
            name_ar: "الأطباق الرئيسية".to_string(),
            display_order: 0,
            is_active: true,
        }],
        vec![MenuItem {
            id: 1,
            category_id: 1,
            name_en: "Margherita Pizza".to_string(),
            name_ar: "بيتزا مارغريتا".to_string(),
            description_en: String::new(),
            description_ar: String::new(),
            image_url: None,
            prices: vec![
                PriceVariant {
                    size_label: Some("Medium".to_string()),
                    price: 18.0,
                },
                PriceVariant {
                    size_label: Some("Large".to_string()),
                    price: 22.0,
                },
            ],
            prep_time_minutes: 15,
            is_available: true,
            display_order: 0,
        }],
    );

    // ===== Customer side: table 7 scans the QR code =====
    let menu = gateway.list_menu_items().await?;
    let pizza = &menu[0];
    let price = pizza.price_for_size(Some("Medium")).unwrap_or_default();

    let mut cart = CartEngine::open(CartStore::open_in_memory()?, "7")?;
    cart.add_line(CartLineInput {
        menu_item_id: pizza.id,
        name: pizza.name_en.clone(),
        size_label: Some("Medium".to_string()),
        unit_price: price,
        quantity: 1,
        special_instructions: None,
    })?;
    // Tapping the same selection again merges instead of duplicating
    cart.add_line(CartLineInput {
        menu_item_id: pizza.id,
        name: pizza.name_en.clone(),
        size_label: Some("Medium".to_string()),
        unit_price: price,
        quantity: 1,
        special_instructions: None,
    })?;
    tracing::info!(snapshot = ?cart.snapshot(), "Cart before submission");

    let pipeline = SubmissionPipeline::new(gateway.clone());
    let order = pipeline.submit_order(&mut cart, None).await?;
    tracing::info!(order_id = %order.id, total = order.total_amount, "Order placed, cart cleared");

    pipeline
        .submit_quick_action("7", "Call Waiter", Some("extra napkins".to_string()))
        .await?;

    // ===== Cashier side: feed pass picks both up =====
    let mut feed = LiveOrderFeed::new(gateway.clone());
    for alert in feed.refresh().await? {
        tracing::info!(alert = ?alert, sound = ?alert.sound(), "Cashier alert");
    }

    let mut controller = StatusController::new(gateway.clone());
    controller.sync_from_feed(&feed);

    // Kitchen works the order through its lifecycle
    for target in [
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Completed,
    ] {
        let updated = controller.transition_order(&order.id, target).await?;
        tracing::info!(order_id = %updated.id, status = %updated.status, "Order status updated");
    }

    // Skipping states is rejected locally before any network call
    let mut fresh_cart = CartEngine::open(CartStore::open_in_memory()?, "7")?;
    fresh_cart.add_line(CartLineInput {
        menu_item_id: pizza.id,
        name: pizza.name_en.clone(),
        size_label: Some("Large".to_string()),
        unit_price: 22.0,
        quantity: 1,
        special_instructions: None,
    })?;
    let second = pipeline.submit_order(&mut fresh_cart, None).await?;
    controller.observe_order(&second.id, second.status);
    match controller
        .transition_order(&second.id, OrderStatus::Completed)
        .await
    {
        Err(err) => tracing::info!(error = %err, "Illegal transition rejected"),
        Ok(_) => unreachable!("pending cannot jump to completed"),
    }

    Ok(())
}
