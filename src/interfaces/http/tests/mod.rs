//! Router-level tests driven through `tower::ServiceExt::oneshot`

mod account;
mod roles;

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use sea_orm::DatabaseConnection;
use serde_json::Value;
use tower::ServiceExt;

use super::{create_api_router, ApiContext};
use crate::application::identity::AccountSettings;
use crate::config::AdminConfig;
use crate::domain::{RoleRepositoryInterface, BUILTIN_ROLES};
use crate::infrastructure::crypto::{create_token, JwtConfig};
use crate::infrastructure::database::repositories::SeaOrmRoleRepository;
use crate::infrastructure::database::{seed_identity, test_database};
use crate::infrastructure::mail::MemoryMailer;

pub(super) const BASE_URL: &str = "http://test";

pub(super) struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub(super) struct TestApp {
    pub router: Router,
    pub db: DatabaseConnection,
    pub mailer: Arc<MemoryMailer>,
    pub jwt_config: JwtConfig,
}

impl TestApp {
    /// Built-in roles only, no users
    pub async fn new() -> Self {
        Self::with_jwt(JwtConfig::default()).await
    }

    pub async fn with_jwt(jwt_config: JwtConfig) -> Self {
        let db = test_database().await;
        let roles = SeaOrmRoleRepository::new(db.clone());
        for name in BUILTIN_ROLES {
            roles.create_role(name).await.unwrap();
        }
        Self::build(db, jwt_config)
    }

    /// Built-in roles plus the default administrator
    pub async fn seeded() -> Self {
        let db = test_database().await;
        seed_identity(&db, &AdminConfig::default()).await.unwrap();
        Self::build(db, JwtConfig::default())
    }

    fn build(db: DatabaseConnection, jwt_config: JwtConfig) -> Self {
        let mailer = Arc::new(MemoryMailer::new());
        let router = create_api_router(ApiContext {
            db: db.clone(),
            jwt_config: jwt_config.clone(),
            account_settings: AccountSettings {
                require_confirmed_email: true,
                public_base_url: BASE_URL.to_string(),
                mail_from: "noreply@test".to_string(),
            },
            mailer: mailer.clone(),
            metrics_handle: None,
        });
        Self {
            router,
            db,
            mailer,
            jwt_config,
        }
    }

    /// Token for a caller that exists only in the claims
    pub fn token_with_roles(&self, roles: &[&str]) -> String {
        let roles: Vec<String> = roles.iter().map(|r| r.to_string()).collect();
        create_token("test-caller", "caller@example.com", &roles, &self.jwt_config).unwrap()
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send_request(request).await
    }

    pub async fn send_request(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.send(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.send(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.send(Method::PUT, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.send(Method::DELETE, uri, token, None).await
    }
}

#[tokio::test]
async fn health_reports_database_ok() {
    let app = TestApp::new().await;

    let res = app.get("/health", None).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["status"], "ok");
    assert_eq!(res.body["database"]["status"], "ok");
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let app = TestApp::new().await;

    let res = app.get("/health", None).await;

    assert!(res.headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = TestApp::new().await;

    let res = app.get("/api-doc/openapi.json", None).await;

    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body["paths"]["/api/Vehicle"].is_object());
    assert!(res.body["paths"]["/api/Account/login"].is_object());
}
