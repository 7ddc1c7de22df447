//! Customer menu, cart and checkout handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use pizzeria_core::{PizzaId, Price, Role};

use super::Page;
use crate::db::cart::RemoveOutcome;
use crate::db::{
    CartRepository, OrderRepository, PizzaRepository, RepositoryError, UserRepository,
};
use crate::error::AppError;
use crate::filters;
use crate::middleware::{Flashes, RequireCustomer, flash};
use crate::models::{CartLine, Customer, Flash, OrderSummary, Pizza, menu::total_cost};
use crate::state::AppState;

const MENU_PATH: &str = "/menu";

/// Menu page template.
#[derive(Template, WebTemplate)]
#[template(path = "menu.html")]
pub struct MenuTemplate {
    pub page: Page,
    pub pizzas: Vec<Pizza>,
    pub cart: Vec<CartLine>,
    pub total: Price,
}

/// Order confirmation template, rendered straight from checkout.
#[derive(Template, WebTemplate)]
#[template(path = "order_confirmation.html")]
pub struct OrderConfirmationTemplate {
    pub page: Page,
    pub summary: OrderSummary,
    pub order_date: String,
    pub customer: Customer,
}

/// `GET /menu`: every pizza plus the open cart and its total.
pub async fn show(
    State(state): State<AppState>,
    RequireCustomer(ctx): RequireCustomer,
    Flashes(flashes): Flashes,
) -> Result<MenuTemplate, AppError> {
    let pizzas = PizzaRepository::new(state.pool()).list().await?;
    let cart = CartRepository::new(state.pool())
        .open_lines(ctx.customer_id)
        .await?;
    let total = total_cost(&cart);

    Ok(MenuTemplate {
        page: Page::for_user(ctx.user, Some(Role::Customer), flashes),
        pizzas,
        cart,
        total,
    })
}

/// `POST /cart/add/{pizza_id}`.
pub async fn add_to_cart(
    State(state): State<AppState>,
    session: Session,
    RequireCustomer(ctx): RequireCustomer,
    Path(pizza_id): Path<PizzaId>,
) -> Result<Redirect, AppError> {
    match CartRepository::new(state.pool())
        .add(ctx.customer_id, pizza_id)
        .await
    {
        Ok(quantity) => {
            tracing::debug!(customer_id = %ctx.customer_id, %pizza_id, quantity, "added to cart");
        }
        Err(RepositoryError::NotFound) => {
            flash(&session, Flash::error("That pizza is no longer on the menu")).await;
        }
        Err(e) => return Err(e.into()),
    }
    Ok(Redirect::to(MENU_PATH))
}

/// `POST /cart/remove/{pizza_id}`. Removing something not in the cart is a no-op.
pub async fn remove_from_cart(
    State(state): State<AppState>,
    RequireCustomer(ctx): RequireCustomer,
    Path(pizza_id): Path<PizzaId>,
) -> Result<Redirect, AppError> {
    let outcome = CartRepository::new(state.pool())
        .remove_one(ctx.customer_id, pizza_id)
        .await?;

    if outcome == RemoveOutcome::NotInCart {
        tracing::debug!(customer_id = %ctx.customer_id, %pizza_id, "remove for pizza not in cart");
    }
    Ok(Redirect::to(MENU_PATH))
}

/// `POST /checkout`: turn the open cart into an order.
pub async fn checkout(
    State(state): State<AppState>,
    session: Session,
    RequireCustomer(ctx): RequireCustomer,
) -> Result<Response, AppError> {
    let Some(order_id) = CartRepository::new(state.pool())
        .checkout(ctx.customer_id)
        .await?
    else {
        flash(&session, Flash::error("Your cart is empty")).await;
        return Ok(Redirect::to(MENU_PATH).into_response());
    };

    let summary = OrderRepository::new(state.pool())
        .get_for_customer(order_id, ctx.customer_id)
        .await?
        .ok_or_else(|| AppError::Internal(format!("order {order_id} vanished after checkout")))?;

    let customer = UserRepository::new(state.pool())
        .get_customer(ctx.user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("customer profile".to_owned()))?;

    let order_date = summary.order.order_date.format("%Y-%m-%d %H:%M").to_string();
    Ok(OrderConfirmationTemplate {
        page: Page::for_user(ctx.user, Some(Role::Customer), Vec::new()),
        summary,
        order_date,
        customer,
    }
    .into_response())
}
