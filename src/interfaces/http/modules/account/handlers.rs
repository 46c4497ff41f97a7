//! Account API handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    LoginRequest, LoginResponse, MessageResponse, RegisterRequest, RegisteredUser,
    VerifyEmailParams,
};
use crate::application::identity::AccountService;
use crate::infrastructure::database::repositories::{SeaOrmRoleRepository, SeaOrmUserRepository};
use crate::interfaces::http::common::{domain_error, ApiError, ApiResponse, ValidatedJson};

/// Account handler state, concrete over the SeaORM repositories
#[derive(Clone)]
pub struct AccountHandlerState {
    pub account_service: Arc<AccountService<SeaOrmUserRepository, SeaOrmRoleRepository>>,
}

#[utoipa::path(
    post,
    path = "/api/Account/register",
    tag = "Account",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created, verification email sent", body = ApiResponse<RegisteredUser>),
        (status = 400, description = "Invalid email or weak password"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register(
    State(state): State<AccountHandlerState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RegisteredUser>>), ApiError> {
    let user = state
        .account_service
        .register(&request.email, &request.password)
        .await
        .map_err(|e| domain_error("Account.register", e))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(RegisteredUser {
            user_id: user.id,
            email: user.email,
            email_confirmed: user.email_confirmed,
        })),
    ))
}

#[utoipa::path(
    get,
    path = "/api/Account/verify-email",
    tag = "Account",
    params(VerifyEmailParams),
    responses(
        (status = 200, description = "Email confirmed", body = ApiResponse<MessageResponse>),
        (status = 400, description = "Invalid or expired token"),
        (status = 404, description = "Unknown user")
    )
)]
pub async fn verify_email(
    State(state): State<AccountHandlerState>,
    Query(params): Query<VerifyEmailParams>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .account_service
        .verify_email(&params.user_id, &params.token)
        .await
        .map_err(|e| domain_error("Account.verify_email", e))?;

    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Email confirmed",
    ))))
}

#[utoipa::path(
    post,
    path = "/api/Account/login",
    tag = "Account",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials or unconfirmed email")
    )
)]
pub async fn login(
    State(state): State<AccountHandlerState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let auth = state
        .account_service
        .login(&request.email, &request.password)
        .await
        .map_err(|e| domain_error("Account.login", e))?;

    Ok(Json(ApiResponse::success(LoginResponse {
        token: auth.token,
        token_type: auth.token_type,
        expires_in: auth.expires_in,
        user_id: auth.user.id,
        email: auth.user.email,
        roles: auth.roles,
    })))
}

/// Tokens are stateless; the client discards its copy.
#[utoipa::path(
    post,
    path = "/api/Account/logout",
    tag = "Account",
    responses(
        (status = 200, description = "Logged out", body = ApiResponse<MessageResponse>)
    )
)]
pub async fn logout() -> Json<ApiResponse<MessageResponse>> {
    Json(ApiResponse::success(MessageResponse::new("Logged out")))
}
