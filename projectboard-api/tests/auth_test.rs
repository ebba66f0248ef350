/// Router tests for signup, login, logout and the session guard

mod common;

use axum::http::{Method, StatusCode};
use common::{TestContext, PASSWORD};
use serde_json::json;

#[tokio::test]
async fn test_health_is_public() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx.send(Method::GET, "/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "healthy");
    assert_eq!(response.body["database"], "connected");
}

#[tokio::test]
async fn test_signup_sets_session_cookie() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx
        .send(
            Method::POST,
            "/signup",
            None,
            Some(json!({ "username": "ada", "password": PASSWORD })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["user"]["username"], "ada");
    assert!(response.body["user"]["id"].as_i64().unwrap() > 0);

    let cookie = response.set_cookie().unwrap();
    assert!(cookie.starts_with("pb_session="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Max-Age=604800"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("GMT"));
    assert!(!cookie.contains("Secure"));
}

#[tokio::test]
async fn test_me_requires_session() {
    let ctx = TestContext::new().await.unwrap();

    let anonymous = ctx.send(Method::GET, "/me", None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
    assert_eq!(anonymous.body["error"], "unauthorized");

    let bogus = ctx.get("/me", "pb_session=not-a-real-token").await;
    assert_eq!(bogus.status, StatusCode::UNAUTHORIZED);

    let cookie = ctx.signup("ada").await;
    let me = ctx.get("/me", &cookie).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["username"], "ada");
    assert!(me.body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_signup_password_policy_lists_violations() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx
        .send(
            Method::POST,
            "/signup",
            None,
            Some(json!({ "username": "ada", "password": "short" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let details = response.body["details"].as_array().unwrap();
    assert_eq!(details.len(), 4);
    assert!(details.iter().all(|d| d["field"] == "password"));
    assert!(response.set_cookie().is_none());
}

#[tokio::test]
async fn test_signup_short_username_and_duplicate() {
    let ctx = TestContext::new().await.unwrap();

    let short = ctx
        .send(
            Method::POST,
            "/signup",
            None,
            Some(json!({ "username": " ab ", "password": PASSWORD })),
        )
        .await;
    assert_eq!(short.status, StatusCode::BAD_REQUEST);

    ctx.signup("ada").await;
    let duplicate = ctx
        .send(
            Method::POST,
            "/signup",
            None,
            Some(json!({ "username": "ada", "password": PASSWORD })),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);
    assert_eq!(duplicate.body["message"], "Username already taken");
}

#[tokio::test]
async fn test_login_and_uniform_failure() {
    let ctx = TestContext::new().await.unwrap();
    ctx.signup("ada").await;

    let ok = ctx
        .send(
            Method::POST,
            "/login",
            None,
            Some(json!({ "username": "ada", "password": PASSWORD })),
        )
        .await;
    assert_eq!(ok.status, StatusCode::OK);
    assert_eq!(ok.body["user"]["username"], "ada");
    let cookie = ok.session_cookie().unwrap();
    assert_eq!(ctx.get("/me", &cookie).await.status, StatusCode::OK);

    let wrong_password = ctx
        .send(
            Method::POST,
            "/login",
            None,
            Some(json!({ "username": "ada", "password": "Wrong-Password-1" })),
        )
        .await;
    let unknown_user = ctx
        .send(
            Method::POST,
            "/login",
            None,
            Some(json!({ "username": "nobody", "password": PASSWORD })),
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body, unknown_user.body);
}

#[tokio::test]
async fn test_logout_clears_cookie_and_revokes_session() {
    let ctx = TestContext::new().await.unwrap();
    let cookie = ctx.signup("ada").await;

    let response = ctx.send(Method::POST, "/logout", Some(&cookie), None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "ok": true }));

    let cleared = response.set_cookie().unwrap();
    assert!(cleared.starts_with("pb_session="));
    assert!(cleared.contains("Max-Age=0"));
    assert!(cleared.contains("01 Jan 1970"));

    assert_eq!(ctx.get("/me", &cookie).await.status, StatusCode::UNAUTHORIZED);

    // Logging out without a session still succeeds
    let anonymous = ctx.send(Method::POST, "/logout", None, None).await;
    assert_eq!(anonymous.status, StatusCode::OK);
}
