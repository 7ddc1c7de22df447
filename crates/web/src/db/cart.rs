//! Cart repository.
//!
//! A customer's open cart is the set of `cart_items` rows with a NULL
//! `order_id`. There is at most one open line per pizza (partial unique
//! index), so adding to cart is an upsert on that index.

use rust_decimal::Decimal;
use sqlx::PgPool;

use pizzeria_core::{CustomerId, OrderId, PizzaId, Price};

use super::{RepositoryError, quantity_from_db};
use crate::models::CartLine;

#[derive(Debug, sqlx::FromRow)]
pub(super) struct CartLineRow {
    pub(super) pizza_id: i32,
    pub(super) pizza_name: String,
    pub(super) price: Decimal,
    pub(super) quantity: i32,
}

impl TryFrom<CartLineRow> for CartLine {
    type Error = RepositoryError;

    fn try_from(row: CartLineRow) -> Result<Self, Self::Error> {
        Ok(Self {
            pizza_id: PizzaId::new(row.pizza_id),
            pizza_name: row.pizza_name,
            unit_price: Price::usd(row.price),
            quantity: quantity_from_db(row.quantity)?,
        })
    }
}

/// What happened to a cart line when one pizza was removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// Quantity went down by one.
    Decremented,
    /// The line had quantity one and was deleted.
    Removed,
    /// The pizza was not in the open cart.
    NotInCart,
}

/// Repository for customers' open carts.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Open cart lines for a customer, alphabetically by pizza.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn open_lines(&self, customer: CustomerId) -> Result<Vec<CartLine>, RepositoryError> {
        let rows = sqlx::query_as::<_, CartLineRow>(
            r"
            SELECT ci.pizza_id, p.name AS pizza_name, p.price, ci.quantity
            FROM cart_items ci
            JOIN pizzas p ON p.id = ci.pizza_id
            WHERE ci.customer_id = $1 AND ci.order_id IS NULL
            ORDER BY p.name ASC
            ",
        )
        .bind(customer)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Add one of a pizza to the open cart.
    ///
    /// Increments the existing open line, or inserts one with quantity 1.
    /// Returns the new quantity.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the pizza does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn add(&self, customer: CustomerId, pizza: PizzaId) -> Result<u32, RepositoryError> {
        let (quantity,): (i32,) = sqlx::query_as(
            r"
            INSERT INTO cart_items (customer_id, pizza_id, quantity)
            VALUES ($1, $2, 1)
            ON CONFLICT (customer_id, pizza_id) WHERE order_id IS NULL
            DO UPDATE SET quantity = cart_items.quantity + 1
            RETURNING quantity
            ",
        )
        .bind(customer)
        .bind(pizza)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_write(e, "duplicate open cart line"))?;

        quantity_from_db(quantity)
    }

    /// Remove one of a pizza from the open cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn remove_one(
        &self,
        customer: CustomerId,
        pizza: PizzaId,
    ) -> Result<RemoveOutcome, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let decremented = sqlx::query(
            r"
            UPDATE cart_items
            SET quantity = quantity - 1
            WHERE customer_id = $1 AND pizza_id = $2 AND order_id IS NULL AND quantity > 1
            ",
        )
        .bind(customer)
        .bind(pizza)
        .execute(&mut *tx)
        .await?;

        let outcome = if decremented.rows_affected() > 0 {
            RemoveOutcome::Decremented
        } else {
            let deleted = sqlx::query(
                r"
                DELETE FROM cart_items
                WHERE customer_id = $1 AND pizza_id = $2 AND order_id IS NULL
                ",
            )
            .bind(customer)
            .bind(pizza)
            .execute(&mut *tx)
            .await?;

            if deleted.rows_affected() > 0 {
                RemoveOutcome::Removed
            } else {
                RemoveOutcome::NotInCart
            }
        };

        tx.commit().await?;
        Ok(outcome)
    }

    /// Turn the open cart into an order.
    ///
    /// Creates the order and stamps every open line with its ID in one
    /// transaction. Returns `None` (and creates nothing) if the cart is empty.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails.
    pub async fn checkout(&self, customer: CustomerId) -> Result<Option<OrderId>, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        // Lock the open lines so a concurrent add can't slip in between
        // counting and stamping.
        let open: Vec<(i32,)> = sqlx::query_as(
            r"
            SELECT id FROM cart_items
            WHERE customer_id = $1 AND order_id IS NULL
            FOR UPDATE
            ",
        )
        .bind(customer)
        .fetch_all(&mut *tx)
        .await?;

        if open.is_empty() {
            return Ok(None);
        }

        let (order_id,): (i32,) =
            sqlx::query_as("INSERT INTO orders (customer_id) VALUES ($1) RETURNING id")
                .bind(customer)
                .fetch_one(&mut *tx)
                .await?;

        let ids: Vec<i32> = open.into_iter().map(|(id,)| id).collect();
        sqlx::query("UPDATE cart_items SET order_id = $1 WHERE id = ANY($2)")
            .bind(order_id)
            .bind(&ids)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        let order_id = OrderId::new(order_id);
        tracing::info!(order_id = %order_id, customer_id = %customer, lines = ids.len(), "order placed");
        Ok(Some(order_id))
    }
}
