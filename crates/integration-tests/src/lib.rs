//! Integration tests for the pizzeria.
//!
//! # Running Tests
//!
//! ```bash
//! # Cross-crate tests, no services needed
//! cargo test -p pizzeria-integration-tests
//!
//! # HTTP flow tests: migrate, start the server, then run the ignored tests
//! pizzeria migrate && pizzeria menu seed
//! PIZZERIA_AUTH_RATE_LIMIT=false cargo run -p pizzeria-web &
//! cargo test -p pizzeria-integration-tests -- --ignored
//! ```
//!
//! # Environment Variables
//!
//! - `PIZZERIA_TEST_URL` - Server under test (default `http://localhost:3000`)
//! - `PIZZERIA_DATABASE_URL` - Same database the server uses, for creating staff

use reqwest::{Client, StatusCode, redirect};
use sqlx::PgPool;
use uuid::Uuid;

use pizzeria_web::config::get_database_url;
use pizzeria_web::db::create_pool;
use pizzeria_web::services::auth::{AuthService, NewStaff};

/// Password used for every account the tests create.
pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Base URL of the server under test.
#[must_use]
pub fn base_url() -> String {
    std::env::var("PIZZERIA_TEST_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Absolute URL for a path on the server under test.
#[must_use]
pub fn url(path: &str) -> String {
    format!("{}{path}", base_url())
}

/// A browser-like client: keeps cookies, follows redirects.
///
/// # Panics
///
/// Panics if the HTTP client can't be built.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// A client that keeps cookies but returns redirects instead of following them.
///
/// # Panics
///
/// Panics if the HTTP client can't be built.
#[must_use]
pub fn client_no_redirect() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

/// A username no other test run will have picked.
#[must_use]
pub fn unique_username(prefix: &str) -> String {
    let suffix: String = Uuid::new_v4().simple().to_string().chars().take(12).collect();
    format!("{prefix}_{suffix}")
}

/// Sign up a customer through the site.
///
/// # Panics
///
/// Panics if the request fails.
pub async fn signup_customer(client: &Client, username: &str) -> reqwest::Response {
    client
        .post(url("/auth/signup"))
        .form(&[
            ("name", "Test Customer"),
            ("email", "test@example.com"),
            ("address", "1 Via Roma"),
            ("phone", "+39 06 1234 5678"),
            ("username", username),
            ("password", TEST_PASSWORD),
        ])
        .send()
        .await
        .expect("signup request failed")
}

/// Log in through the site.
///
/// # Panics
///
/// Panics if the request fails.
pub async fn login(client: &Client, username: &str, password: &str) -> reqwest::Response {
    client
        .post(url("/auth/login"))
        .form(&[("username", username), ("password", password)])
        .send()
        .await
        .expect("login request failed")
}

/// Sign up and log in a fresh customer. Returns their username.
///
/// # Panics
///
/// Panics if either step doesn't land on the menu.
pub async fn logged_in_customer(client: &Client) -> String {
    let username = unique_username("cust");
    let resp = signup_customer(client, &username).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = login(client, &username, TEST_PASSWORD).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.url().path().ends_with("/menu"), "landed on {}", resp.url());
    username
}

/// Connect to the server's database, for setting up staff accounts.
///
/// # Panics
///
/// Panics if the database URL is missing or unreachable.
pub async fn test_pool() -> PgPool {
    dotenvy::dotenv().ok();
    let database_url =
        get_database_url("PIZZERIA_DATABASE_URL").expect("PIZZERIA_DATABASE_URL must be set");
    create_pool(&database_url)
        .await
        .expect("Failed to connect to test database")
}

/// Create a staff account directly in the database. Returns the username.
///
/// # Panics
///
/// Panics if validation or the insert fails.
pub async fn create_staff(pool: &PgPool, staff: NewStaff) -> String {
    AuthService::new(pool)
        .create_staff(&staff, TEST_PASSWORD)
        .await
        .expect("Failed to create staff account");
    staff.username
}

/// Pull the first `/cart/add/{id}` target out of the menu page.
#[must_use]
pub fn first_add_to_cart_path(menu_html: &str) -> Option<String> {
    let start = menu_html.find("/cart/add/")?;
    let rest = menu_html.get(start..)?;
    let end = rest.find('"')?;
    rest.get(..end).map(str::to_owned)
}
