//! Employee handlers: order fulfillment and own shifts.

use askama::Template;
use askama_web::WebTemplate;
use axum::{body::Bytes, extract::State, response::Redirect};
use tower_sessions::Session;

use pizzeria_core::{OrderId, Role};

use super::{Page, forms};
use crate::db::{EmployeeRepository, OrderRepository, ShiftRepository};
use crate::error::AppError;
use crate::filters;
use crate::middleware::{Flashes, RequireEmployee, RequireStaff, flash};
use crate::models::{Flash, OrderSummary, Shift};
use crate::state::AppState;

const ORDERS_PATH: &str = "/employee/orders";

/// An order row with its date preformatted.
pub struct OrderView {
    pub summary: OrderSummary,
    pub order_date: String,
}

impl From<OrderSummary> for OrderView {
    fn from(summary: OrderSummary) -> Self {
        let order_date = summary.order.order_date.format("%Y-%m-%d %H:%M").to_string();
        Self {
            summary,
            order_date,
        }
    }
}

/// Outstanding orders template.
#[derive(Template, WebTemplate)]
#[template(path = "employee/orders.html")]
pub struct OrdersTemplate {
    pub page: Page,
    pub orders: Vec<OrderView>,
}

/// The employee's own shifts.
#[derive(Template, WebTemplate)]
#[template(path = "employee/shifts.html")]
pub struct ShiftsTemplate {
    pub page: Page,
    pub employee_name: String,
    pub shifts: Vec<Shift>,
}

/// `GET /employee/orders`: every order awaiting fulfillment, oldest first.
///
/// Managers can see this page too.
pub async fn orders(
    State(state): State<AppState>,
    RequireStaff(ctx): RequireStaff,
    Flashes(flashes): Flashes,
) -> Result<OrdersTemplate, AppError> {
    let orders = OrderRepository::new(state.pool())
        .list_with_lines()
        .await?
        .into_iter()
        .map(OrderView::from)
        .collect();

    Ok(OrdersTemplate {
        page: Page::for_user(ctx.user, Some(ctx.role), flashes),
        orders,
    })
}

/// `POST /employee/orders/complete`: delete every ticked order.
pub async fn complete_orders(
    State(state): State<AppState>,
    session: Session,
    RequireStaff(ctx): RequireStaff,
    body: Bytes,
) -> Result<Redirect, AppError> {
    let ids: Vec<OrderId> = forms::parse_ids(&body, "completed_orders");
    let completed = OrderRepository::new(state.pool()).complete(&ids).await?;

    tracing::info!(
        user_id = %ctx.user.id,
        requested = ids.len(),
        completed,
        "orders completed"
    );
    if completed > 0 {
        flash(&session, Flash::success(completed_message(completed))).await;
    }
    Ok(Redirect::to(ORDERS_PATH))
}

fn completed_message(count: u64) -> String {
    if count == 1 {
        "Completed 1 order".to_owned()
    } else {
        format!("Completed {count} orders")
    }
}

/// `GET /employee/shifts`: the logged-in employee's shifts.
pub async fn shifts(
    State(state): State<AppState>,
    RequireEmployee(ctx): RequireEmployee,
    Flashes(flashes): Flashes,
) -> Result<ShiftsTemplate, AppError> {
    let employee = EmployeeRepository::new(state.pool())
        .get_by_user(ctx.user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("employee profile".to_owned()))?;
    let shifts = ShiftRepository::new(state.pool())
        .list_for_employee(ctx.employee_id)
        .await?;

    Ok(ShiftsTemplate {
        page: Page::for_user(ctx.user, Some(Role::Employee), flashes),
        employee_name: employee.name,
        shifts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completed_message() {
        assert_eq!(completed_message(1), "Completed 1 order");
        assert_eq!(completed_message(3), "Completed 3 orders");
    }
}
