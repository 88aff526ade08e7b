//! Client-side analytics aggregation
//!
//! The admin dashboard computes its numbers from the full order list;
//! the backend keeps no aggregates. These are pure functions - the
//! chart layer consuming the results is someone else's problem.

use chrono::{TimeZone, Utc};
use shared::money;
use shared::order::{Order, OrderStatus};
use std::collections::HashMap;

/// Overview numbers for the admin dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsSummary {
    pub total_orders: usize,
    /// Revenue across non-cancelled orders
    pub total_revenue: f64,
    /// Revenue divided by non-cancelled order count
    pub average_order_value: f64,
    pub orders_by_status: HashMap<OrderStatus, usize>,
}

/// An item's popularity across all orders
#[derive(Debug, Clone, PartialEq)]
pub struct TopItem {
    pub menu_item_id: i64,
    pub name: String,
    /// Total quantity ordered
    pub count: i32,
}

/// Summarize the order list
pub fn summarize(orders: &[Order]) -> AnalyticsSummary {
    let mut orders_by_status: HashMap<OrderStatus, usize> = HashMap::new();
    for order in orders {
        *orders_by_status.entry(order.status).or_default() += 1;
    }

    let billable: Vec<&Order> = orders
        .iter()
        .filter(|o| o.status != OrderStatus::Cancelled)
        .collect();
    let total_revenue = money::round2(billable.iter().map(|o| o.total_amount).sum());
    let average_order_value = if billable.is_empty() {
        0.0
    } else {
        money::round2(total_revenue / billable.len() as f64)
    };

    AnalyticsSummary {
        total_orders: orders.len(),
        total_revenue,
        average_order_value,
        orders_by_status,
    }
}

/// Most ordered items, by total quantity, descending
pub fn top_items(orders: &[Order], limit: usize) -> Vec<TopItem> {
    let mut counts: HashMap<i64, TopItem> = HashMap::new();
    for order in orders {
        if order.status == OrderStatus::Cancelled {
            continue;
        }
        for line in &order.lines {
            counts
                .entry(line.menu_item_id)
                .and_modify(|item| item.count += line.quantity)
                .or_insert_with(|| TopItem {
                    menu_item_id: line.menu_item_id,
                    name: line.name.clone(),
                    count: line.quantity,
                });
        }
    }

    let mut items: Vec<TopItem> = counts.into_values().collect();
    items.sort_by(|a, b| b.count.cmp(&a.count).then(a.menu_item_id.cmp(&b.menu_item_id)));
    items.truncate(limit);
    items
}

/// Revenue per ISO date ("2025-03-14"), cancelled orders excluded
pub fn sales_by_day(orders: &[Order]) -> HashMap<String, f64> {
    let mut days: HashMap<String, f64> = HashMap::new();
    for order in orders {
        if order.status == OrderStatus::Cancelled {
            continue;
        }
        let Some(date) = Utc.timestamp_millis_opt(order.created_at).single() else {
            continue;
        };
        let key = date.format("%Y-%m-%d").to_string();
        *days.entry(key).or_default() += order.total_amount;
    }
    for value in days.values_mut() {
        *value = money::round2(*value);
    }
    days
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::order::OrderLine;

    fn order(id: &str, status: OrderStatus, total: f64, created_at: i64, lines: Vec<OrderLine>) -> Order {
        Order {
            id: id.to_string(),
            table_number: "1".to_string(),
            lines,
            total_amount: total,
            status,
            customer_notes: None,
            created_at,
        }
    }

    fn line(item: i64, name: &str, qty: i32) -> OrderLine {
        OrderLine {
            menu_item_id: item,
            name: name.to_string(),
            size_label: None,
            unit_price: 10.0,
            quantity: qty,
            special_instructions: None,
        }
    }

    // 2025-03-14T12:00:00Z
    const DAY_1: i64 = 1_741_953_600_000;
    // 2025-03-15T12:00:00Z
    const DAY_2: i64 = 1_742_040_000_000;

    #[test]
    fn test_summarize_excludes_cancelled_revenue() {
        let orders = vec![
            order("O1", OrderStatus::Completed, 30.0, DAY_1, vec![]),
            order("O2", OrderStatus::Pending, 20.0, DAY_1, vec![]),
            order("O3", OrderStatus::Cancelled, 99.0, DAY_1, vec![]),
        ];

        let summary = summarize(&orders);
        assert_eq!(summary.total_orders, 3);
        assert_eq!(summary.total_revenue, 50.0);
        assert_eq!(summary.average_order_value, 25.0);
        assert_eq!(summary.orders_by_status[&OrderStatus::Cancelled], 1);
        assert_eq!(summary.orders_by_status[&OrderStatus::Completed], 1);
    }

    #[test]
    fn test_summarize_empty() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_orders, 0);
        assert_eq!(summary.total_revenue, 0.0);
        assert_eq!(summary.average_order_value, 0.0);
    }

    #[test]
    fn test_top_items_by_quantity() {
        let orders = vec![
            order(
                "O1",
                OrderStatus::Completed,
                50.0,
                DAY_1,
                vec![line(1, "Pizza", 2), line(2, "Cola", 3)],
            ),
            order(
                "O2",
                OrderStatus::Pending,
                20.0,
                DAY_1,
                vec![line(1, "Pizza", 4)],
            ),
            order(
                "O3",
                OrderStatus::Cancelled,
                10.0,
                DAY_1,
                vec![line(3, "Salad", 99)],
            ),
        ];

        let top = top_items(&orders, 10);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].name, "Pizza");
        assert_eq!(top[0].count, 6);
        assert_eq!(top[1].name, "Cola");

        let top1 = top_items(&orders, 1);
        assert_eq!(top1.len(), 1);
        assert_eq!(top1[0].menu_item_id, 1);
    }

    #[test]
    fn test_sales_by_day() {
        let orders = vec![
            order("O1", OrderStatus::Completed, 30.0, DAY_1, vec![]),
            order("O2", OrderStatus::Completed, 12.5, DAY_1, vec![]),
            order("O3", OrderStatus::Completed, 8.0, DAY_2, vec![]),
            order("O4", OrderStatus::Cancelled, 99.0, DAY_2, vec![]),
        ];

        let days = sales_by_day(&orders);
        assert_eq!(days.len(), 2);
        assert_eq!(days["2025-03-14"], 42.5);
        assert_eq!(days["2025-03-15"], 8.0);
    }
}
