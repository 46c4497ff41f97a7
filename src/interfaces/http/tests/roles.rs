use axum::http::StatusCode;
use serde_json::json;

use super::TestApp;
use crate::domain::{NewUser, UserRepositoryInterface};
use crate::infrastructure::database::repositories::SeaOrmUserRepository;

async fn stored_user(app: &TestApp, email: &str) -> String {
    SeaOrmUserRepository::new(app.db.clone())
        .create_user(NewUser {
            email: email.to_string(),
            password_hash: "unused".to_string(),
            email_confirmed: true,
        })
        .await
        .unwrap()
        .id
}

#[tokio::test]
async fn roles_are_admin_only() {
    let app = TestApp::new().await;

    let anonymous = app.get("/api/Roles", None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let customer = app.token_with_roles(&["Customer"]);
    let forbidden = app.get("/api/Roles", Some(&customer)).await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);

    // SuperAdmin alone does not open the Roles endpoints
    let super_admin = app.token_with_roles(&["SuperAdmin"]);
    let still_forbidden = app.get("/api/Roles", Some(&super_admin)).await;
    assert_eq!(still_forbidden.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_manages_roles() {
    let app = TestApp::new().await;
    let admin = app.token_with_roles(&["Admin"]);

    let listed = app.get("/api/Roles", Some(&admin)).await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body["data"].as_array().unwrap().len(), 4);

    let created = app
        .post("/api/Roles", Some(&admin), json!({"name": "Dispatcher"}))
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let role_id = created.body["data"]["id"].as_str().unwrap().to_string();

    let duplicate = app
        .post("/api/Roles", Some(&admin), json!({"name": "Dispatcher"}))
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);

    let renamed = app
        .put(
            "/api/Roles",
            Some(&admin),
            json!({"role_id": role_id, "new_role_name": "Planner"}),
        )
        .await;
    assert_eq!(renamed.status, StatusCode::OK);
    assert_eq!(renamed.body["data"]["name"], "Planner");

    let fetched = app.get(&format!("/api/Roles/{role_id}"), Some(&admin)).await;
    assert_eq!(fetched.body["data"]["name"], "Planner");

    let deleted = app
        .delete(&format!("/api/Roles/{role_id}"), Some(&admin))
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let gone = app.get(&format!("/api/Roles/{role_id}"), Some(&admin)).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn rename_of_unknown_role_is_not_found() {
    let app = TestApp::new().await;
    let admin = app.token_with_roles(&["Admin"]);

    let res = app
        .put(
            "/api/Roles",
            Some(&admin),
            json!({"role_id": "missing", "new_role_name": "Planner"}),
        )
        .await;

    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn assign_role_to_user() {
    let app = TestApp::new().await;
    let admin = app.token_with_roles(&["Admin"]);
    let user_id = stored_user(&app, "driver@example.com").await;
    let body = json!({"user_id": user_id, "role_name": "Customer"});

    let assigned = app
        .post("/api/Roles/assign-role-to-user", Some(&admin), body.clone())
        .await;
    assert_eq!(assigned.status, StatusCode::OK);

    let again = app
        .post("/api/Roles/assign-role-to-user", Some(&admin), body)
        .await;
    assert_eq!(again.status, StatusCode::CONFLICT);

    let unknown_role = app
        .post(
            "/api/Roles/assign-role-to-user",
            Some(&admin),
            json!({"user_id": user_id, "role_name": "Pilot"}),
        )
        .await;
    assert_eq!(unknown_role.status, StatusCode::NOT_FOUND);

    let unknown_user = app
        .post(
            "/api/Roles/assign-role-to-user",
            Some(&admin),
            json!({"user_id": "nobody", "role_name": "Customer"}),
        )
        .await;
    assert_eq!(unknown_user.status, StatusCode::NOT_FOUND);
}
