//! Session middleware configuration.
//!
//! Sessions live in `PostgreSQL` (`tower_sessions.session`) so logins survive
//! restarts and work across several app instances.

use sqlx::PgPool;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::WebConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "pizzeria_session";

/// Idle time before a session expires (12 hours).
const SESSION_EXPIRY_SECONDS: i64 = 12 * 60 * 60;

/// Create the session layer with a `PostgreSQL` store.
///
/// The cookie is only marked `Secure` when `BASE_URL` is https, so plain
/// http works in local development.
#[must_use]
pub fn create_session_layer(pool: &PgPool, config: &WebConfig) -> SessionManagerLayer<PostgresStore> {
    // The session table is created by migration, not by the store.
    let store = PostgresStore::new(pool.clone());

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
