//! Cross-crate tests of the business rules that don't need a database.
//!
//! These run with a plain `cargo test`.

#![allow(clippy::unwrap_used)]

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;

use pizzeria_core::{CustomerId, EmployeeId, ManagerId, OrderId, PizzaId, Price, Role, ShiftId, ShiftWindow};
use pizzeria_web::models::menu::total_cost;
use pizzeria_web::models::order::group_lines;
use pizzeria_web::models::{CartLine, Order, Profiles, Shift};
use pizzeria_web::services::auth::{NewCustomer, NewStaff, SignupError, SignupInput, StaffKind};

fn line(pizza: i32, name: &str, cents: i64, quantity: u32) -> CartLine {
    CartLine {
        pizza_id: PizzaId::new(pizza),
        pizza_name: name.to_owned(),
        unit_price: Price::usd(Decimal::new(cents, 2)),
        quantity,
    }
}

fn order(id: i32, customer: &str) -> Order {
    Order {
        id: OrderId::new(id),
        customer_id: CustomerId::new(id * 10),
        customer_name: customer.to_owned(),
        order_date: Utc.with_ymd_and_hms(2024, 3, 1, 18, 30, 0).unwrap(),
    }
}

// ============================================================================
// Role dispatch
// ============================================================================

#[test]
fn test_employee_beats_manager_beats_customer() {
    let everything = Profiles {
        customer: Some(CustomerId::new(1)),
        employee: Some(EmployeeId::new(2)),
        manager: Some(ManagerId::new(3)),
    };
    assert_eq!(everything.role(), Some(Role::Employee));
    assert_eq!(Role::Employee.landing_path(), "/employee/orders");

    let manager_and_customer = Profiles {
        employee: None,
        ..everything
    };
    assert_eq!(manager_and_customer.role(), Some(Role::Manager));
    assert_eq!(Role::Manager.landing_path(), "/manager/shifts");

    let customer = Profiles {
        customer: Some(CustomerId::new(1)),
        ..Profiles::default()
    };
    assert_eq!(customer.role(), Some(Role::Customer));
    assert_eq!(Role::Customer.landing_path(), "/menu");

    assert_eq!(Profiles::default().role(), None);
}

// ============================================================================
// Cart and orders
// ============================================================================

#[test]
fn test_cart_total_is_sum_of_price_times_quantity() {
    let cart = vec![
        line(1, "Margherita", 950, 2),
        line(2, "Diavola", 1125, 1),
    ];
    assert_eq!(total_cost(&cart).amount, Decimal::new(3025, 2));
    assert_eq!(total_cost(&cart).to_string(), "$30.25");
    assert_eq!(total_cost(&[]).to_string(), "$0.00");
}

#[test]
fn test_orders_keep_their_own_lines() {
    let orders = vec![order(1, "Ada"), order(2, "Grace")];
    let lines = vec![
        (OrderId::new(2), line(1, "Margherita", 950, 1)),
        (OrderId::new(1), line(2, "Diavola", 1125, 3)),
        (OrderId::new(2), line(3, "Marinara", 800, 2)),
    ];

    let summaries = group_lines(orders, lines);
    assert_eq!(summaries.len(), 2);

    let first = summaries.first().unwrap();
    assert_eq!(first.order.customer_name, "Ada");
    assert_eq!(first.pizza_count(), 3);
    assert_eq!(first.total.to_string(), "$33.75");

    let second = summaries.get(1).unwrap();
    assert_eq!(second.lines.len(), 2);
    assert_eq!(second.total.to_string(), "$25.50");
}

// ============================================================================
// Account validation
// ============================================================================

#[test]
fn test_signup_requires_every_field() {
    let input = SignupInput {
        name: "Ada",
        email: "ada@example.com",
        address: "1 Via Roma",
        phone: "",
        username: "ada",
        password: "long-enough",
    };
    assert_eq!(
        NewCustomer::validate(&input).unwrap_err(),
        SignupError::MissingFields
    );
    assert_eq!(SignupError::MissingFields.to_string(), "Please fill in all fields");
}

#[test]
fn test_signup_normalizes_fields() {
    let input = SignupInput {
        name: "  Ada Lovelace ",
        email: " ada@example.com ",
        address: "1 Via Roma",
        phone: "(06) 555-0100",
        username: " ada ",
        password: "long-enough",
    };
    let customer = NewCustomer::validate(&input).unwrap();
    assert_eq!(customer.username, "ada");
    assert_eq!(customer.name, "Ada Lovelace");
    assert_eq!(customer.phone.as_str(), "065550100");
}

#[test]
fn test_staff_kinds() {
    let employee = NewStaff::employee("luigi", "Luigi", "555 0100 11").unwrap();
    assert!(matches!(employee.kind, StaffKind::Employee { .. }));

    let manager = NewStaff::manager("maria", "Maria").unwrap();
    assert_eq!(manager.kind, StaffKind::Manager);
}

// ============================================================================
// Shifts
// ============================================================================

#[test]
fn test_shift_formats_for_each_view() {
    let window = ShiftWindow::parse("2024-03-01", "09:00", "17:30").unwrap();
    let shift = Shift {
        id: ShiftId::new(4),
        window,
        employee_id: None,
        employee_name: None,
    };

    assert_eq!(shift.date_label(), "2024-03-01");
    assert_eq!(shift.start_short(), "09:00");
    assert_eq!(shift.end_long(), "17:30:00");
    assert_eq!(shift.employee_label(), "Not assigned");
}
