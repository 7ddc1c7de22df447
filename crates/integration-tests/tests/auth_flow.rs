//! HTTP tests for signup, login, logout and access control.
//!
//! These tests require:
//! - A migrated `PostgreSQL` database (`pizzeria migrate`)
//! - The web server running (`cargo run -p pizzeria-web`)
//!
//! Run with: `cargo test -p pizzeria-integration-tests -- --ignored`

use reqwest::StatusCode;

use pizzeria_integration_tests::{
    TEST_PASSWORD, client, client_no_redirect, logged_in_customer, login, signup_customer,
    unique_username, url,
};

#[tokio::test]
#[ignore = "Requires running pizzeria server"]
async fn test_health_endpoints() {
    let client = client();

    let resp = client.get(url("/health")).send().await.expect("health failed");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.expect("body"), "ok");

    let resp = client.get(url("/health/ready")).send().await.expect("ready failed");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running pizzeria server"]
async fn test_security_headers_and_request_id() {
    let resp = client()
        .get(url("/auth/login"))
        .header("x-request-id", "test-request-123")
        .send()
        .await
        .expect("request failed");

    let headers = resp.headers();
    assert_eq!(headers.get("x-frame-options").map(|v| v.as_bytes()), Some(&b"DENY"[..]));
    assert!(headers.contains_key("content-security-policy"));
    assert_eq!(
        headers.get("x-request-id").map(|v| v.as_bytes()),
        Some(&b"test-request-123"[..])
    );
}

#[tokio::test]
#[ignore = "Requires running pizzeria server"]
async fn test_anonymous_users_are_sent_to_login() {
    let client = client_no_redirect();

    for path in ["/", "/menu", "/employee/orders", "/manager/shifts"] {
        let resp = client.get(url(path)).send().await.expect("request failed");
        assert!(resp.status().is_redirection(), "{path} gave {}", resp.status());
        assert_eq!(
            resp.headers().get("location").map(|v| v.as_bytes()),
            Some(&b"/auth/login"[..]),
            "{path}"
        );
    }
}

#[tokio::test]
#[ignore = "Requires running pizzeria server"]
async fn test_signup_with_missing_fields() {
    let client = client();
    let resp = client
        .post(url("/auth/signup"))
        .form(&[("username", "someone"), ("password", TEST_PASSWORD)])
        .send()
        .await
        .expect("signup failed");

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.url().path().ends_with("/auth/signup"));
    let body = resp.text().await.expect("body");
    assert!(body.contains("Please fill in all fields"));
}

#[tokio::test]
#[ignore = "Requires running pizzeria server"]
async fn test_duplicate_username_is_rejected() {
    let username = unique_username("dup");

    let first = signup_customer(&client(), &username).await;
    assert!(first.url().path().ends_with("/auth/login"));

    let second = signup_customer(&client(), &username).await;
    assert!(second.url().path().ends_with("/auth/signup"));
    let body = second.text().await.expect("body");
    assert!(body.contains("Username already taken"));
}

#[tokio::test]
#[ignore = "Requires running pizzeria server"]
async fn test_wrong_password() {
    let client = client();
    let username = unique_username("wrong");
    signup_customer(&client, &username).await;

    let resp = login(&client, &username, "not-the-password").await;
    assert!(resp.url().path().ends_with("/auth/login"));
    let body = resp.text().await.expect("body");
    assert!(body.contains("Incorrect username or password"));
}

#[tokio::test]
#[ignore = "Requires running pizzeria server"]
async fn test_logout_ends_session() {
    let client = client();
    logged_in_customer(&client).await;

    let resp = client.post(url("/auth/logout")).send().await.expect("logout failed");
    assert!(resp.url().path().ends_with("/auth/login"));

    let resp = client.get(url("/menu")).send().await.expect("menu failed");
    assert!(resp.url().path().ends_with("/auth/login"));
}

#[tokio::test]
#[ignore = "Requires running pizzeria server"]
async fn test_customer_cannot_open_staff_pages() {
    let client = client();
    logged_in_customer(&client).await;

    for path in ["/employee/orders", "/employee/shifts", "/manager/shifts", "/manager/employees"] {
        let resp = client.get(url(path)).send().await.expect("request failed");
        assert_eq!(resp.status(), StatusCode::FORBIDDEN, "{path}");
    }
}

#[tokio::test]
#[ignore = "Requires running pizzeria server"]
async fn test_auth_pages_keep_pending_flashes_for_logged_in_users() {
    let client = client_no_redirect();
    let username = unique_username("cust");
    signup_customer(&client, &username).await;
    login(&client, &username, TEST_PASSWORD).await;

    // Queue a message without rendering the page that would show it.
    let resp = client.post(url("/checkout")).send().await.expect("checkout failed");
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    for path in ["/auth/login", "/auth/signup"] {
        let resp = client.get(url(path)).send().await.expect("request failed");
        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "{path}");
        assert_eq!(
            resp.headers().get("location").and_then(|v| v.to_str().ok()),
            Some("/")
        );
    }

    let body = client
        .get(url("/menu"))
        .send()
        .await
        .expect("menu failed")
        .text()
        .await
        .expect("body");
    assert!(body.contains("Your cart is empty"));
}
