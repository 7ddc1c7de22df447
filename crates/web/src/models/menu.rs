//! Menu and cart domain types.

use pizzeria_core::{PizzaId, Price};

/// A pizza on the menu.
#[derive(Debug, Clone)]
pub struct Pizza {
    pub id: PizzaId,
    pub name: String,
    pub price: Price,
    pub description: Option<String>,
}

/// One pizza in a cart or order, with its quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub pizza_id: PizzaId,
    pub pizza_name: String,
    pub unit_price: Price,
    pub quantity: u32,
}

impl CartLine {
    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.line_total(self.quantity)
    }
}

/// Total cost of a set of lines (sum of price times quantity).
#[must_use]
pub fn total_cost(lines: &[CartLine]) -> Price {
    Price::total(lines.iter().map(CartLine::line_total))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn line(id: i32, cents: i64, quantity: u32) -> CartLine {
        CartLine {
            pizza_id: PizzaId::new(id),
            pizza_name: format!("Pizza {id}"),
            unit_price: Price::usd(Decimal::new(cents, 2)),
            quantity,
        }
    }

    #[test]
    fn test_line_total() {
        assert_eq!(line(1, 1250, 2).line_total().to_string(), "$25.00");
    }

    #[test]
    fn test_total_cost() {
        let lines = [line(1, 1250, 2), line(2, 999, 1)];
        assert_eq!(total_cost(&lines).to_string(), "$34.99");
    }

    #[test]
    fn test_empty_cart_costs_nothing() {
        assert_eq!(total_cost(&[]).to_string(), "$0.00");
    }
}
