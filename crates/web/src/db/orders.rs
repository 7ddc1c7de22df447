//! Order repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use pizzeria_core::{CustomerId, OrderId};

use super::RepositoryError;
use super::cart::CartLineRow;
use crate::models::order::group_lines;
use crate::models::{CartLine, Order, OrderSummary};

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i32,
    customer_id: i32,
    customer_name: String,
    order_date: DateTime<Utc>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            id: OrderId::new(row.id),
            customer_id: CustomerId::new(row.customer_id),
            customer_name: row.customer_name,
            order_date: row.order_date,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct OrderLineRow {
    order_id: i32,
    #[sqlx(flatten)]
    line: CartLineRow,
}

/// Repository for placed orders.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Every outstanding order with its lines, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    /// Returns `RepositoryError::DataCorruption` if a line has a negative quantity.
    pub async fn list_with_lines(&self) -> Result<Vec<OrderSummary>, RepositoryError> {
        let orders = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT o.id, o.customer_id, c.name AS customer_name, o.order_date
            FROM orders o
            JOIN customers c ON c.id = o.customer_id
            ORDER BY o.order_date ASC, o.id ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        let lines = sqlx::query_as::<_, OrderLineRow>(
            r"
            SELECT ci.order_id, ci.pizza_id, p.name AS pizza_name, p.price, ci.quantity
            FROM cart_items ci
            JOIN pizzas p ON p.id = ci.pizza_id
            WHERE ci.order_id IS NOT NULL
            ORDER BY p.name ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        let lines = lines
            .into_iter()
            .map(|row| Ok((OrderId::new(row.order_id), CartLine::try_from(row.line)?)))
            .collect::<Result<Vec<_>, RepositoryError>>()?;

        Ok(group_lines(
            orders.into_iter().map(Order::from).collect(),
            lines,
        ))
    }

    /// One order with its lines, only if it belongs to `customer`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get_for_customer(
        &self,
        id: OrderId,
        customer: CustomerId,
    ) -> Result<Option<OrderSummary>, RepositoryError> {
        let order = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT o.id, o.customer_id, c.name AS customer_name, o.order_date
            FROM orders o
            JOIN customers c ON c.id = o.customer_id
            WHERE o.id = $1 AND o.customer_id = $2
            ",
        )
        .bind(id)
        .bind(customer)
        .fetch_optional(self.pool)
        .await?;

        let Some(order) = order else {
            return Ok(None);
        };

        let lines = sqlx::query_as::<_, CartLineRow>(
            r"
            SELECT ci.pizza_id, p.name AS pizza_name, p.price, ci.quantity
            FROM cart_items ci
            JOIN pizzas p ON p.id = ci.pizza_id
            WHERE ci.order_id = $1
            ORDER BY p.name ASC
            ",
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?
        .into_iter()
        .map(TryInto::try_into)
        .collect::<Result<Vec<CartLine>, _>>()?;

        Ok(Some(OrderSummary::new(order.into(), lines)))
    }

    /// Mark orders as completed by deleting them. Their lines go with them.
    ///
    /// Unknown IDs are ignored. Returns how many orders were removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn complete(&self, ids: &[OrderId]) -> Result<u64, RepositoryError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let ids: Vec<i32> = ids.iter().map(OrderId::as_i32).collect();

        let result = sqlx::query("DELETE FROM orders WHERE id = ANY($1)")
            .bind(&ids)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
