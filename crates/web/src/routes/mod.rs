//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                           - Dashboard (dispatches on role)
//!
//! # Auth (rate limited unless PIZZERIA_AUTH_RATE_LIMIT=false)
//! GET  /auth/signup                - Customer signup page
//! POST /auth/signup                - Create customer account
//! GET  /auth/login                 - Login page
//! POST /auth/login                 - Login action
//! GET  /auth/logout                - Logout
//! POST /auth/logout                - Logout
//!
//! # Customer
//! GET  /menu                       - Menu and open cart
//! POST /cart/add/{pizza_id}        - Add one pizza to the cart
//! POST /cart/remove/{pizza_id}     - Remove one pizza from the cart
//! POST /checkout                   - Place the order, render confirmation
//!
//! # Employee (orders: any staff)
//! GET  /employee/orders            - Outstanding orders
//! POST /employee/orders/complete   - Complete selected orders
//! GET  /employee/shifts            - Own shifts
//!
//! # Manager
//! GET  /manager/shifts             - All shifts
//! POST /manager/shifts             - Add a shift
//! GET  /manager/shifts/new         - Add shift form
//! GET  /manager/employees          - Current employees
//! POST /manager/employees/delete   - Delete selected employees
//! ```

pub mod auth;
pub mod dashboard;
pub mod employee;
pub mod forms;
pub mod manager;
pub mod menu;

use axum::{
    Router,
    routing::{get, post},
};

use pizzeria_core::Role;

use crate::middleware::auth_rate_limiter;
use crate::models::{CurrentUser, Flash};
use crate::state::AppState;

/// Layout data every page template needs: who is logged in and the
/// pending flash messages.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub user: Option<CurrentUser>,
    pub role: Option<Role>,
    pub flashes: Vec<Flash>,
}

impl Page {
    /// A page for a visitor who is not logged in.
    #[must_use]
    pub const fn anonymous(flashes: Vec<Flash>) -> Self {
        Self {
            user: None,
            role: None,
            flashes,
        }
    }

    /// A page for a logged-in user acting as `role`.
    #[must_use]
    pub const fn for_user(user: CurrentUser, role: Option<Role>, flashes: Vec<Flash>) -> Self {
        Self {
            user: Some(user),
            role,
            flashes,
        }
    }

    #[must_use]
    pub fn is_customer(&self) -> bool {
        self.role == Some(Role::Customer)
    }

    #[must_use]
    pub fn is_employee(&self) -> bool {
        self.role == Some(Role::Employee)
    }

    #[must_use]
    pub fn is_manager(&self) -> bool {
        self.role == Some(Role::Manager)
    }
}

/// Create the auth routes router, optionally rate limited.
pub fn auth_routes(rate_limited: bool) -> Router<AppState> {
    let router = Router::new()
        .route("/signup", get(auth::signup_page).post(auth::signup))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout).post(auth::logout));

    if rate_limited {
        router.layer(auth_rate_limiter())
    } else {
        router
    }
}

/// Create the customer routes router.
pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/menu", get(menu::show))
        .route("/cart/add/{pizza_id}", post(menu::add_to_cart))
        .route("/cart/remove/{pizza_id}", post(menu::remove_from_cart))
        .route("/checkout", post(menu::checkout))
}

/// Create the employee routes router.
pub fn employee_routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(employee::orders))
        .route("/orders/complete", post(employee::complete_orders))
        .route("/shifts", get(employee::shifts))
}

/// Create the manager routes router.
pub fn manager_routes() -> Router<AppState> {
    Router::new()
        .route("/shifts", get(manager::shifts).post(manager::create_shift))
        .route("/shifts/new", get(manager::new_shift))
        .route("/employees", get(manager::employees))
        .route("/employees/delete", post(manager::delete_employees))
}

/// Create all application routes.
pub fn routes(auth_rate_limit: bool) -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::dashboard))
        .nest("/auth", auth_routes(auth_rate_limit))
        .merge(customer_routes())
        .nest("/employee", employee_routes())
        .nest("/manager", manager_routes())
}

#[cfg(test)]
mod tests {
    use pizzeria_core::UserId;

    use super::*;

    #[test]
    fn test_page_role_flags() {
        let user = CurrentUser {
            id: UserId::new(1),
            username: "luigi".to_owned(),
        };
        let page = Page::for_user(user, Some(Role::Manager), Vec::new());
        assert!(page.is_manager());
        assert!(!page.is_employee());
        assert!(!page.is_customer());

        let anon = Page::anonymous(vec![Flash::error("Missing data")]);
        assert!(anon.user.is_none());
        assert_eq!(anon.flashes.len(), 1);
    }
}
