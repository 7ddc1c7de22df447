//! Pizza (menu) repository.

use rust_decimal::Decimal;
use sqlx::PgPool;

use pizzeria_core::{PizzaId, Price};

use super::RepositoryError;
use crate::models::Pizza;

#[derive(Debug, sqlx::FromRow)]
struct PizzaRow {
    id: i32,
    name: String,
    price: Decimal,
    description: Option<String>,
}

impl From<PizzaRow> for Pizza {
    fn from(row: PizzaRow) -> Self {
        Self {
            id: PizzaId::new(row.id),
            name: row.name,
            price: Price::usd(row.price),
            description: row.description,
        }
    }
}

/// Repository for the menu.
pub struct PizzaRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PizzaRepository<'a> {
    /// Create a new pizza repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every pizza, alphabetically.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Pizza>, RepositoryError> {
        let rows = sqlx::query_as::<_, PizzaRow>(
            r"
            SELECT id, name, price, description
            FROM pizzas
            ORDER BY name ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Pizza::from).collect())
    }

    /// Add a pizza to the menu.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if a pizza with this name exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        name: &str,
        price: Decimal,
        description: Option<&str>,
    ) -> Result<Pizza, RepositoryError> {
        let row = sqlx::query_as::<_, PizzaRow>(
            r"
            INSERT INTO pizzas (name, price, description)
            VALUES ($1, $2, $3)
            RETURNING id, name, price, description
            ",
        )
        .bind(name)
        .bind(price)
        .bind(description)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_write(e, "pizza already on the menu"))?;

        Ok(row.into())
    }

    /// Remove a pizza by name. Cart lines and order lines for it go with it.
    ///
    /// Returns `true` if a pizza was removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete_by_name(&self, name: &str) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM pizzas WHERE name = $1")
            .bind(name)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
