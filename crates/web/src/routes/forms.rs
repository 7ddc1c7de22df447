//! Helpers for urlencoded bodies with repeated keys.
//!
//! `axum::Form` (`serde_urlencoded`) can't collect `key=1&key=2` into a
//! `Vec`, which is how checkbox lists arrive.

use std::str::FromStr;

/// Every value submitted under `key`, in order.
#[must_use]
pub fn repeated_values(body: &[u8], key: &str) -> Vec<String> {
    url::form_urlencoded::parse(body)
        .filter(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
        .collect()
}

/// Every value under `key` that parses as `T`. Unparsable values are skipped.
#[must_use]
pub fn parse_ids<T: FromStr>(body: &[u8], key: &str) -> Vec<T> {
    repeated_values(body, key)
        .iter()
        .filter_map(|v| v.parse().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use pizzeria_core::{EmployeeId, OrderId};

    use super::*;

    #[test]
    fn test_repeated_values_keeps_order_and_ignores_other_keys() {
        let body = b"completed_orders=3&other=x&completed_orders=1";
        assert_eq!(repeated_values(body, "completed_orders"), vec!["3", "1"]);
    }

    #[test]
    fn test_values_are_percent_decoded() {
        let body = b"name=Margherita+Classic&name=Quattro%20Stagioni";
        assert_eq!(
            repeated_values(body, "name"),
            vec!["Margherita Classic", "Quattro Stagioni"]
        );
    }

    #[test]
    fn test_parse_ids_skips_garbage() {
        let body = b"selected_employees=2&selected_employees=abc&selected_employees=+5";
        let ids: Vec<EmployeeId> = parse_ids(body, "selected_employees");
        assert_eq!(ids, vec![EmployeeId::new(2), EmployeeId::new(5)]);
    }

    #[test]
    fn test_parse_ids_empty_body() {
        let ids: Vec<OrderId> = parse_ids(b"", "completed_orders");
        assert!(ids.is_empty());
    }
}
