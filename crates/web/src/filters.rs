//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year, for the footer.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Renders a count as "1 pizza" / "3 pizzas".
///
/// Usage in templates: `{{ summary.pizza_count()|pizzas }}`
#[askama::filter_fn]
pub fn pizzas(count: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(pizza_label(&count.to_string()))
}

fn pizza_label(count: &str) -> String {
    if count == "1" {
        "1 pizza".to_owned()
    } else {
        format!("{count} pizzas")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pizza_label() {
        assert_eq!(pizza_label("1"), "1 pizza");
        assert_eq!(pizza_label("0"), "0 pizzas");
        assert_eq!(pizza_label("12"), "12 pizzas");
    }
}
