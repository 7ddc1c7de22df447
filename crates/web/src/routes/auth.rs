//! Authentication route handlers.
//!
//! Customer signup, username/password login and logout. Failures flash a
//! message and redirect back to the form.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use super::Page;
use crate::error::{AppError, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{
    OptionalAuth, clear_current_user, flash, set_current_user, take_flashes,
};
use crate::models::{CurrentUser, Flash};
use crate::services::auth::{AuthError, AuthService, SignupInput};
use crate::state::AppState;

const SIGNUP_PATH: &str = "/auth/signup";
const LOGIN_PATH: &str = "/auth/login";

// =============================================================================
// Form Types
// =============================================================================

/// Signup form data. Missing fields arrive as empty strings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub address: String,
    pub phone: String,
    pub username: String,
    pub password: String,
}

impl SignupForm {
    fn as_input(&self) -> SignupInput<'_> {
        SignupInput {
            name: &self.name,
            email: &self.email,
            address: &self.address,
            phone: &self.phone,
            username: &self.username,
            password: &self.password,
        }
    }
}

/// Login form data.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Signup page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/signup.html")]
pub struct SignupTemplate {
    pub page: Page,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub page: Page,
}

// =============================================================================
// Signup
// =============================================================================

/// Display the signup page. Logged-in users go to their dashboard.
pub async fn signup_page(OptionalAuth(user): OptionalAuth, session: Session) -> Response {
    if user.is_some() {
        return Redirect::to("/").into_response();
    }
    SignupTemplate {
        page: Page::anonymous(take_flashes(&session).await),
    }
    .into_response()
}

/// Handle signup form submission.
///
/// Creates the user and customer profile, then sends them to log in.
pub async fn signup(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SignupForm>,
) -> Result<Redirect, AppError> {
    match AuthService::new(state.pool())
        .register_customer(&form.as_input())
        .await
    {
        Ok(_) => {
            flash(&session, Flash::success("Account created, please log in")).await;
            Ok(Redirect::to(LOGIN_PATH))
        }
        Err(e) if !e.is_internal() => {
            tracing::info!(username = %form.username.trim(), reason = %e, "signup rejected");
            flash(&session, Flash::error(e.user_message())).await;
            Ok(Redirect::to(SIGNUP_PATH))
        }
        Err(e) => Err(e.into()),
    }
}

// =============================================================================
// Login / Logout
// =============================================================================

/// Display the login page. Logged-in users go to their dashboard.
pub async fn login_page(OptionalAuth(user): OptionalAuth, session: Session) -> Response {
    if user.is_some() {
        return Redirect::to("/").into_response();
    }
    LoginTemplate {
        page: Page::anonymous(take_flashes(&session).await),
    }
    .into_response()
}

/// Handle login form submission.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Redirect, AppError> {
    let user = match AuthService::new(state.pool())
        .login(&form.username, &form.password)
        .await
    {
        Ok(user) => user,
        Err(AuthError::InvalidCredentials) => {
            tracing::info!(username = %form.username.trim(), "login failed");
            flash(
                &session,
                Flash::error(AuthError::InvalidCredentials.user_message()),
            )
            .await;
            return Ok(Redirect::to(LOGIN_PATH));
        }
        Err(e) => return Err(e.into()),
    };

    let current = CurrentUser {
        id: user.id,
        username: user.username,
    };
    set_current_user(&session, &current).await?;
    set_sentry_user(&current.id, &current.username);

    tracing::info!(user_id = %current.id, "user logged in");
    Ok(Redirect::to("/"))
}

/// Log out: drop the whole session, not just the user key.
pub async fn logout(session: Session) -> Result<Redirect, AppError> {
    clear_current_user(&session).await?;
    session.flush().await?;
    clear_sentry_user();
    Ok(Redirect::to(LOGIN_PATH))
}
