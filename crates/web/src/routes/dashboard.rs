//! Dashboard: sends each user to the landing page of their role.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use super::Page;
use crate::db::UserRepository;
use crate::error::AppError;
use crate::filters;
use crate::middleware::{RequireAuth, auth::LOGIN_PATH, take_flashes};
use crate::state::AppState;

/// Fallback page for a user with no role profile.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub page: Page,
}

/// `GET /`.
///
/// Employee beats manager beats customer. A user with no profile at all
/// (e.g. a half-created staff account) sees a plain dashboard.
pub async fn dashboard(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
) -> Result<Response, AppError> {
    let Some(profiles) = UserRepository::new(state.pool()).profiles(user.id).await? else {
        session.flush().await?;
        return Ok(Redirect::to(LOGIN_PATH).into_response());
    };

    if let Some(role) = profiles.role() {
        tracing::debug!(user_id = %user.id, %role, "dispatching to landing page");
        return Ok(Redirect::to(role.landing_path()).into_response());
    }

    let flashes = take_flashes(&session).await;
    Ok(DashboardTemplate {
        page: Page::for_user(user, None, flashes),
    }
    .into_response())
}
