//! Order domain types.

use chrono::{DateTime, Utc};

use pizzeria_core::{CustomerId, OrderId, Price};

use super::menu::{CartLine, total_cost};

/// A checked-out order.
#[derive(Debug, Clone)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub order_date: DateTime<Utc>,
}

/// An order with its lines and total, as shown to staff and on confirmation.
#[derive(Debug, Clone)]
pub struct OrderSummary {
    pub order: Order,
    pub lines: Vec<CartLine>,
    pub total: Price,
}

impl OrderSummary {
    #[must_use]
    pub fn new(order: Order, lines: Vec<CartLine>) -> Self {
        let total = total_cost(&lines);
        Self {
            order,
            lines,
            total,
        }
    }

    /// Number of pizzas across all lines.
    #[must_use]
    pub fn pizza_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

/// Attach lines to their orders, keeping the order of `orders`.
///
/// Lines whose order is not in `orders` are dropped; orders without lines get
/// an empty list.
#[must_use]
pub fn group_lines(orders: Vec<Order>, lines: Vec<(OrderId, CartLine)>) -> Vec<OrderSummary> {
    let mut by_order: std::collections::HashMap<OrderId, Vec<CartLine>> =
        std::collections::HashMap::with_capacity(orders.len());
    for (order_id, line) in lines {
        by_order.entry(order_id).or_default().push(line);
    }

    orders
        .into_iter()
        .map(|order| {
            let lines = by_order.remove(&order.id).unwrap_or_default();
            OrderSummary::new(order, lines)
        })
        .collect()
}
