//! API router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::crud::{resource_router, CrudState};
use super::middleware::{auth_middleware, require_roles, AuthState};
use super::modules::account::{self, AccountHandlerState};
use super::modules::health::{self, HealthState};
use super::modules::metrics::{self, MetricsState};
use super::modules::request_id::request_id_middleware;
use super::modules::roles::{self, RoleHandlerState};
use super::openapi::ApiDoc;
use crate::application::catalog::{
    BookingLocationResource, BookingResource, ClientCompanyResource, CustomerResource,
    DriverResource, LocationResource, VehicleResource,
};
use crate::application::identity::{AccountService, AccountSettings, RoleService};
use crate::domain::role::ROLE_ADMIN;
use crate::infrastructure::crypto::JwtConfig;
use crate::infrastructure::database::repositories::{SeaOrmRoleRepository, SeaOrmUserRepository};
use crate::infrastructure::mail::SharedEmailSender;

const ADMIN_ONLY: &[&str] = &[ROLE_ADMIN];

/// Everything the HTTP layer needs from the outside
#[derive(Clone)]
pub struct ApiContext {
    pub db: DatabaseConnection,
    pub jwt_config: JwtConfig,
    pub account_settings: AccountSettings,
    pub mailer: SharedEmailSender,
    /// `/metrics` is only mounted when a recorder is installed
    pub metrics_handle: Option<PrometheusHandle>,
}

pub fn create_api_router(ctx: ApiContext) -> Router {
    let auth_state = AuthState {
        jwt_config: ctx.jwt_config.clone(),
    };
    let crud_state = CrudState { db: ctx.db.clone() };

    let users = Arc::new(SeaOrmUserRepository::new(ctx.db.clone()));
    let role_repo = Arc::new(SeaOrmRoleRepository::new(ctx.db.clone()));

    // ── Account (public) ───────────────────────────────────────
    let account_state = AccountHandlerState {
        account_service: Arc::new(AccountService::new(
            users.clone(),
            role_repo.clone(),
            ctx.mailer.clone(),
            ctx.jwt_config.clone(),
            ctx.account_settings.clone(),
        )),
    };
    let account_routes = Router::new()
        .route("/register", post(account::handlers::register))
        .route("/verify-email", get(account::handlers::verify_email))
        .route("/login", post(account::handlers::login))
        .route("/logout", post(account::handlers::logout))
        .with_state(account_state);

    // ── Roles (Admin only) ─────────────────────────────────────
    let role_state = RoleHandlerState {
        role_service: Arc::new(RoleService::new(users, role_repo)),
    };
    let role_routes = Router::new()
        .route(
            "/",
            get(roles::handlers::list_roles)
                .post(roles::handlers::create_role)
                .put(roles::handlers::update_role),
        )
        .route(
            "/{role_id}",
            get(roles::handlers::get_role).delete(roles::handlers::delete_role),
        )
        .route(
            "/assign-role-to-user",
            post(roles::handlers::assign_role_to_user),
        )
        .layer(middleware::from_fn_with_state(ADMIN_ONLY, require_roles))
        .layer(middleware::from_fn_with_state(
            auth_state.clone(),
            auth_middleware,
        ))
        .with_state(role_state);

    // ── Catalog (generic CRUD) ─────────────────────────────────
    let catalog_routes = Router::new()
        .merge(resource_router::<VehicleResource>(crud_state.clone(), auth_state.clone()))
        .merge(resource_router::<DriverResource>(crud_state.clone(), auth_state.clone()))
        .merge(resource_router::<CustomerResource>(crud_state.clone(), auth_state.clone()))
        .merge(resource_router::<ClientCompanyResource>(crud_state.clone(), auth_state.clone()))
        .merge(resource_router::<LocationResource>(crud_state.clone(), auth_state.clone()))
        .merge(resource_router::<BookingResource>(crud_state.clone(), auth_state.clone()))
        .merge(resource_router::<BookingLocationResource>(crud_state, auth_state));

    let health_state = HealthState {
        db: ctx.db.clone(),
        started_at: Arc::new(Instant::now()),
    };

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .merge(swagger_routes)
        .route("/health", get(health::health_check).with_state(health_state))
        .nest("/api/Account", account_routes)
        .nest("/api/Roles", role_routes)
        .merge(catalog_routes);

    if let Some(handle) = ctx.metrics_handle {
        router = router.route(
            "/metrics",
            get(metrics::prometheus_metrics).with_state(MetricsState { handle }),
        );
    }

    router
        .route_layer(middleware::from_fn(metrics::http_metrics_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
}
