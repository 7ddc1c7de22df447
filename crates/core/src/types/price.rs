//! Menu prices using decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
///
/// Pizza prices are stored as `NUMERIC(8,2)`; all arithmetic stays in
/// `Decimal` so cart totals never pick up floating-point drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// A price in the shop's default currency.
    #[must_use]
    pub const fn usd(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::USD)
    }

    /// A zero amount in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::ZERO, currency_code)
    }

    /// Price of `quantity` units at this unit price.
    #[must_use]
    pub fn line_total(self, quantity: u32) -> Self {
        Self::new(self.amount * Decimal::from(quantity), self.currency_code)
    }

    /// Sum of several prices. An empty iterator yields zero USD.
    ///
    /// The currency of the first price is used for the total.
    #[must_use]
    pub fn total<I>(prices: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        let mut iter = prices.into_iter();
        let Some(first) = iter.next() else {
            return Self::zero(CurrencyCode::default());
        };
        iter.fold(first, |acc, p| Self::new(acc.amount + p.amount, acc.currency_code))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:.2}", self.currency_code.symbol(), self.amount.round_dp(2))
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
}

impl CurrencyCode {
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::USD => "$",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd(cents: i64) -> Price {
        Price::usd(Decimal::new(cents, 2))
    }

    #[test]
    fn test_display_pads_to_two_places() {
        assert_eq!(usd(1250).to_string(), "$12.50");
        assert_eq!(Price::usd(Decimal::from(9)).to_string(), "$9.00");
    }

    #[test]
    fn test_line_total() {
        assert_eq!(usd(1099).line_total(3), usd(3297));
        assert_eq!(usd(1099).line_total(0), usd(0));
    }

    #[test]
    fn test_total_sums_lines() {
        let total = Price::total([usd(1000).line_total(2), usd(850)]);
        assert_eq!(total, usd(2850));
        assert_eq!(total.to_string(), "$28.50");
    }

    #[test]
    fn test_total_of_nothing_is_zero() {
        assert_eq!(Price::total([]), Price::zero(CurrencyCode::USD));
    }

    #[test]
    fn test_decimal_avoids_float_drift() {
        let total = Price::total([usd(10), usd(20)]);
        assert_eq!(total.amount, Decimal::new(30, 2));
    }
}
