//! Authentication and role extractors.
//!
//! The session only stores who is logged in. Which role they act in is looked
//! up on every request from the `customers`, `employees` and `managers`
//! tables, so deleting an employee locks them out immediately.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use pizzeria_core::{CustomerId, EmployeeId, ManagerId, Role};

use crate::db::UserRepository;
use crate::models::{CurrentUser, Profiles, session_keys};
use crate::state::AppState;

/// Where unauthenticated requests are sent.
pub const LOGIN_PATH: &str = "/auth/login";

/// Extractor that requires a logged-in user of any role.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(RequireAuth(user): RequireAuth) -> impl IntoResponse {
///     format!("Hello, {}!", user.username)
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

/// Error returned when a request lacks the required login or role.
#[derive(Debug)]
pub enum AuthRejection {
    /// Not logged in (or the account is gone): go to the login page.
    RedirectToLogin,
    /// Logged in, but without the role this page needs.
    Forbidden(&'static str),
    /// Session layer missing or role lookup failed.
    Internal,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to(LOGIN_PATH).into_response(),
            Self::Forbidden(message) => (StatusCode::FORBIDDEN, message).into_response(),
            Self::Internal => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

async fn session_user(parts: &Parts) -> Result<(Session, CurrentUser), AuthRejection> {
    // Get the session from extensions (set by SessionManagerLayer)
    let session = parts
        .extensions
        .get::<Session>()
        .cloned()
        .ok_or(AuthRejection::Internal)?;

    let user: CurrentUser = session
        .get(session_keys::CURRENT_USER)
        .await
        .ok()
        .flatten()
        .ok_or(AuthRejection::RedirectToLogin)?;

    Ok((session, user))
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let (_, user) = session_user(parts).await?;
        Ok(Self(user))
    }
}

/// Extractor that optionally gets the current user.
///
/// Unlike `RequireAuth`, this does not reject the request if nobody is logged in.
pub struct OptionalAuth(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = match parts.extensions.get::<Session>() {
            Some(session) => session
                .get::<CurrentUser>(session_keys::CURRENT_USER)
                .await
                .ok()
                .flatten(),
            None => None,
        };

        Ok(Self(user))
    }
}

/// Look up the logged-in user's role profiles.
///
/// A session pointing at a deleted user is flushed and sent to login.
async fn session_profiles<S>(
    parts: &Parts,
    state: &S,
) -> Result<(CurrentUser, Profiles), AuthRejection>
where
    AppState: FromRef<S>,
{
    let (session, user) = session_user(parts).await?;
    let state = AppState::from_ref(state);

    let profiles = UserRepository::new(state.pool())
        .profiles(user.id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, user_id = %user.id, "role lookup failed");
            AuthRejection::Internal
        })?;

    let Some(profiles) = profiles else {
        tracing::info!(user_id = %user.id, "session user no longer exists");
        if let Err(e) = session.flush().await {
            tracing::warn!(error = %e, "failed to flush stale session");
        }
        return Err(AuthRejection::RedirectToLogin);
    };

    Ok((user, profiles))
}

/// A logged-in customer.
#[derive(Debug, Clone)]
pub struct CustomerContext {
    pub user: CurrentUser,
    pub customer_id: CustomerId,
}

/// Extractor that requires a user with a customer profile.
pub struct RequireCustomer(pub CustomerContext);

impl<S> FromRequestParts<S> for RequireCustomer
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let (user, profiles) = session_profiles(parts, state).await?;
        let customer_id = profiles
            .customer
            .ok_or(AuthRejection::Forbidden("Only customers can order pizzas"))?;
        Ok(Self(CustomerContext { user, customer_id }))
    }
}

/// A logged-in employee.
#[derive(Debug, Clone)]
pub struct EmployeeContext {
    pub user: CurrentUser,
    pub employee_id: EmployeeId,
}

/// Extractor that requires a user with an employee profile.
pub struct RequireEmployee(pub EmployeeContext);

impl<S> FromRequestParts<S> for RequireEmployee
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let (user, profiles) = session_profiles(parts, state).await?;
        let employee_id = profiles
            .employee
            .ok_or(AuthRejection::Forbidden("Only employees have shifts"))?;
        Ok(Self(EmployeeContext { user, employee_id }))
    }
}

/// A logged-in manager.
#[derive(Debug, Clone)]
pub struct ManagerContext {
    pub user: CurrentUser,
    pub manager_id: ManagerId,
}

/// Extractor that requires a user with a manager profile.
pub struct RequireManager(pub ManagerContext);

impl<S> FromRequestParts<S> for RequireManager
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let (user, profiles) = session_profiles(parts, state).await?;
        let manager_id = profiles
            .manager
            .ok_or(AuthRejection::Forbidden("Only managers can access this page"))?;
        Ok(Self(ManagerContext { user, manager_id }))
    }
}

/// A logged-in employee or manager, with their effective role.
#[derive(Debug, Clone)]
pub struct StaffContext {
    pub user: CurrentUser,
    pub role: Role,
}

/// Extractor that requires an employee or manager (order fulfillment).
pub struct RequireStaff(pub StaffContext);

impl<S> FromRequestParts<S> for RequireStaff
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let (user, profiles) = session_profiles(parts, state).await?;
        match profiles.role() {
            Some(role) if role.is_staff() => Ok(Self(StaffContext { user, role })),
            _ => Err(AuthRejection::Forbidden("Only staff can view orders")),
        }
    }
}

/// Helper to set the current user in the session.
///
/// Cycles the session ID first so a pre-login session ID can't be reused.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Helper to clear the current user from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentUser>(session_keys::CURRENT_USER)
        .await?;
    Ok(())
}
