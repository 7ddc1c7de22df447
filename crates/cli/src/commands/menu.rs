//! Menu management commands.
//!
//! ```bash
//! pizzeria menu add -n Margherita -p 9.50 -d "Tomato, mozzarella, basil"
//! pizzeria menu list
//! pizzeria menu remove -n Margherita
//! pizzeria menu seed
//! ```

use rust_decimal::Decimal;

use pizzeria_web::db::{PizzaRepository, RepositoryError};

use super::{CliError, connect};

pub const MAX_NAME_LENGTH: usize = 50;
pub const MAX_DESCRIPTION_LENGTH: usize = 200;

/// The menu inserted by `pizzeria menu seed`: name, price in cents, description.
const DEFAULT_MENU: &[(&str, i64, &str)] = &[
    ("Margherita", 950, "Tomato, mozzarella, basil"),
    ("Marinara", 800, "Tomato, garlic, oregano"),
    ("Diavola", 1125, "Tomato, mozzarella, spicy salami"),
    ("Quattro Formaggi", 1200, "Mozzarella, gorgonzola, parmesan, fontina"),
    ("Capricciosa", 1250, "Ham, mushrooms, artichokes, olives"),
    ("Vegetariana", 1100, "Peppers, courgette, aubergine, onion"),
];

/// Check a pizza's name, price and description against the column limits.
fn validate(name: &str, price: Decimal, description: Option<&str>) -> Result<(), CliError> {
    if name.trim().is_empty() {
        return Err(CliError::Invalid("pizza name is required".to_owned()));
    }
    if name.trim().chars().count() > MAX_NAME_LENGTH {
        return Err(CliError::Invalid(format!(
            "pizza name must be at most {MAX_NAME_LENGTH} characters"
        )));
    }
    if price.is_sign_negative() {
        return Err(CliError::Invalid("price can't be negative".to_owned()));
    }
    if price.scale() > 2 {
        return Err(CliError::Invalid("price has more than two decimals".to_owned()));
    }
    if description.is_some_and(|d| d.chars().count() > MAX_DESCRIPTION_LENGTH) {
        return Err(CliError::Invalid(format!(
            "description must be at most {MAX_DESCRIPTION_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Add a pizza to the menu.
///
/// # Errors
///
/// Returns an error for invalid input, a duplicate name, or database failures.
pub async fn add(name: &str, price: Decimal, description: Option<&str>) -> Result<(), CliError> {
    validate(name, price, description)?;
    let pool = connect().await?;

    let pizza = PizzaRepository::new(&pool)
        .create(name.trim(), price, description)
        .await?;

    tracing::info!(pizza_id = %pizza.id, name = %pizza.name, price = %pizza.price, "Pizza added");
    Ok(())
}

/// Print the menu.
///
/// # Errors
///
/// Returns an error if the database can't be queried.
pub async fn list() -> Result<(), CliError> {
    let pool = connect().await?;
    let pizzas = PizzaRepository::new(&pool).list().await?;

    #[allow(clippy::print_stdout)]
    {
        println!("Menu ({} pizzas)", pizzas.len());
        for pizza in &pizzas {
            println!(
                "  {:>4}  {:<30}  {:>8}  {}",
                pizza.id,
                pizza.name,
                pizza.price.to_string(),
                pizza.description.as_deref().unwrap_or("")
            );
        }
    }
    Ok(())
}

/// Remove a pizza by name. Open carts and outstanding orders lose that line.
///
/// # Errors
///
/// Returns an error if no pizza has that name, or the database fails.
pub async fn remove(name: &str) -> Result<(), CliError> {
    let pool = connect().await?;

    if !PizzaRepository::new(&pool).delete_by_name(name.trim()).await? {
        return Err(CliError::Invalid(format!("no pizza named {:?}", name.trim())));
    }

    tracing::info!(name = %name.trim(), "Pizza removed");
    Ok(())
}

/// Insert the default menu. Pizzas that already exist are left alone.
///
/// # Errors
///
/// Returns an error if the database fails.
pub async fn seed() -> Result<(), CliError> {
    let pool = connect().await?;
    let repo = PizzaRepository::new(&pool);

    let mut added = 0;
    for &(name, cents, description) in DEFAULT_MENU {
        let price = Decimal::new(cents, 2);
        match repo.create(name, price, Some(description)).await {
            Ok(_) => added += 1,
            Err(RepositoryError::Conflict(_)) => {
                tracing::debug!(name, "already on the menu, skipping");
            }
            Err(e) => return Err(e.into()),
        }
    }

    tracing::info!(added, skipped = DEFAULT_MENU.len() - added, "Menu seeded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_normal_pizza() {
        assert!(validate("Margherita", Decimal::new(950, 2), Some("Classic")).is_ok());
        assert!(validate("Free Slice", Decimal::ZERO, None).is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_input() {
        assert!(validate("  ", Decimal::new(950, 2), None).is_err());
        assert!(validate("Margherita", Decimal::new(-1, 0), None).is_err());
        assert!(validate("Margherita", Decimal::new(9999, 3), None).is_err());
        assert!(validate(&"x".repeat(51), Decimal::ONE, None).is_err());
        assert!(validate("Margherita", Decimal::ONE, Some(&"y".repeat(201))).is_err());
    }

    #[test]
    fn test_default_menu_is_valid() {
        for &(name, cents, description) in DEFAULT_MENU {
            assert!(validate(name, Decimal::new(cents, 2), Some(description)).is_ok());
        }
    }
}
