use axum::http::StatusCode;
use serde_json::json;

use super::{TestApp, BASE_URL};
use crate::infrastructure::crypto::verify_token;

const PASSWORD: &str = "Abc12345!";

async fn register(app: &TestApp, email: &str) -> String {
    let res = app
        .post(
            "/api/Account/register",
            None,
            json!({"email": email, "password": PASSWORD}),
        )
        .await;
    assert_eq!(res.status, StatusCode::CREATED);
    res.body["data"]["user_id"].as_str().unwrap().to_string()
}

/// Path and query of the verification link from the last mail to `email`
fn verification_path(app: &TestApp, email: &str) -> String {
    let mail = app.mailer.last_to(email).unwrap();
    let link = mail.body.split_whitespace().last().unwrap();
    link.strip_prefix(BASE_URL).unwrap().to_string()
}

#[tokio::test]
async fn register_verify_then_login() {
    let app = TestApp::new().await;
    let user_id = register(&app, "jane@example.com").await;

    let early = app
        .post(
            "/api/Account/login",
            None,
            json!({"email": "jane@example.com", "password": PASSWORD}),
        )
        .await;
    assert_eq!(early.status, StatusCode::UNAUTHORIZED);

    let verified = app
        .get(&verification_path(&app, "jane@example.com"), None)
        .await;
    assert_eq!(verified.status, StatusCode::OK);
    assert_eq!(verified.body["success"], true);

    let res = app
        .post(
            "/api/Account/login",
            None,
            json!({"email": "jane@example.com", "password": PASSWORD}),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"]["token_type"], "Bearer");
    assert_eq!(res.body["data"]["user_id"], user_id.as_str());

    let token = res.body["data"]["token"].as_str().unwrap();
    let claims = verify_token(token, &app.jwt_config).unwrap();
    assert_eq!(claims.sub, "jane@example.com");
    assert_eq!(claims.uid, user_id);
    assert!(claims.roles.is_empty());
}

#[tokio::test]
async fn verification_link_is_single_use() {
    let app = TestApp::new().await;
    register(&app, "once@example.com").await;
    let path = verification_path(&app, "once@example.com");

    assert_eq!(app.get(&path, None).await.status, StatusCode::OK);

    let again = app.get(&path, None).await;
    assert_eq!(again.status, StatusCode::BAD_REQUEST);
    assert_eq!(again.body["success"], false);
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let app = TestApp::new().await;
    register(&app, "dup@example.com").await;

    let res = app
        .post(
            "/api/Account/register",
            None,
            json!({"email": "dup@example.com", "password": PASSWORD}),
        )
        .await;

    assert_eq!(res.status, StatusCode::CONFLICT);
    assert_eq!(res.body["error"], "Email is already registered");
}

#[tokio::test]
async fn weak_or_malformed_registration_is_rejected() {
    let app = TestApp::new().await;

    let weak = app
        .post(
            "/api/Account/register",
            None,
            json!({"email": "weak@example.com", "password": "abcdefgh"}),
        )
        .await;
    assert_eq!(weak.status, StatusCode::BAD_REQUEST);

    let bad_email = app
        .post(
            "/api/Account/register",
            None,
            json!({"email": "not-an-email", "password": PASSWORD}),
        )
        .await;
    assert_eq!(bad_email.status, StatusCode::BAD_REQUEST);

    assert!(app.mailer.sent().is_empty());
}

#[tokio::test]
async fn verify_email_rejects_unknown_user_and_bad_token() {
    let app = TestApp::new().await;
    let user_id = register(&app, "token@example.com").await;

    let unknown = app
        .get("/api/Account/verify-email?userId=nobody&token=abc", None)
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);

    let bad = app
        .get(
            &format!("/api/Account/verify-email?userId={user_id}&token=abc"),
            None,
        )
        .await;
    assert_eq!(bad.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_with_bad_credentials_is_unauthorized() {
    let app = TestApp::seeded().await;

    let wrong_password = app
        .post(
            "/api/Account/login",
            None,
            json!({"email": "admin@tctravel.local", "password": "Wrong123!"}),
        )
        .await;
    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body["error"], "Invalid credentials");

    let unknown = app
        .post(
            "/api/Account/login",
            None,
            json!({"email": "ghost@example.com", "password": PASSWORD}),
        )
        .await;
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.body["error"], "Invalid credentials");
}

#[tokio::test]
async fn seeded_admin_token_carries_admin_roles() {
    let app = TestApp::seeded().await;

    let res = app
        .post(
            "/api/Account/login",
            None,
            json!({"email": "admin@tctravel.local", "password": "Admin123!"}),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"]["roles"], json!(["Admin", "SuperAdmin"]));

    let token = res.body["data"]["token"].as_str().unwrap();
    let listed = app.get("/api/Roles", Some(token)).await;
    assert_eq!(listed.status, StatusCode::OK);
}

#[tokio::test]
async fn logout_always_succeeds() {
    let app = TestApp::new().await;

    let res = app.post("/api/Account/logout", None, json!({})).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"]["message"], "Logged out");
}
