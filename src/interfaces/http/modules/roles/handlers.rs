//! Role management handlers
//!
//! Mounted behind the token middleware and an Admin role gate.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{AssignRoleRequest, CreateRoleRequest, RoleDto, UpdateRoleRequest};
use crate::application::identity::RoleService;
use crate::infrastructure::database::repositories::{SeaOrmRoleRepository, SeaOrmUserRepository};
use crate::interfaces::http::common::{domain_error, ApiError, ApiResponse, ValidatedJson};
use crate::interfaces::http::modules::account::dto::MessageResponse;

#[derive(Clone)]
pub struct RoleHandlerState {
    pub role_service: Arc<RoleService<SeaOrmUserRepository, SeaOrmRoleRepository>>,
}

#[utoipa::path(
    get,
    path = "/api/Roles",
    tag = "Roles",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All roles", body = ApiResponse<Vec<RoleDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn list_roles(
    State(state): State<RoleHandlerState>,
) -> Result<Json<ApiResponse<Vec<RoleDto>>>, ApiError> {
    let roles = state
        .role_service
        .list_roles()
        .await
        .map_err(|e| domain_error("Roles.list", e))?;
    Ok(Json(ApiResponse::success(
        roles.into_iter().map(RoleDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/Roles/{roleId}",
    tag = "Roles",
    security(("bearer_auth" = [])),
    params(("roleId" = String, Path, description = "Role ID")),
    responses(
        (status = 200, description = "Role", body = ApiResponse<RoleDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_role(
    State(state): State<RoleHandlerState>,
    Path(role_id): Path<String>,
) -> Result<Json<ApiResponse<RoleDto>>, ApiError> {
    let role = state
        .role_service
        .get_role(&role_id)
        .await
        .map_err(|e| domain_error("Roles.get", e))?;
    Ok(Json(ApiResponse::success(role.into())))
}

#[utoipa::path(
    post,
    path = "/api/Roles",
    tag = "Roles",
    security(("bearer_auth" = [])),
    request_body = CreateRoleRequest,
    responses(
        (status = 201, description = "Role created", body = ApiResponse<RoleDto>),
        (status = 400, description = "Empty name"),
        (status = 409, description = "Role already exists")
    )
)]
pub async fn create_role(
    State(state): State<RoleHandlerState>,
    ValidatedJson(request): ValidatedJson<CreateRoleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RoleDto>>), ApiError> {
    let role = state
        .role_service
        .create_role(&request.name)
        .await
        .map_err(|e| domain_error("Roles.create", e))?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(role.into()))))
}

#[utoipa::path(
    put,
    path = "/api/Roles",
    tag = "Roles",
    security(("bearer_auth" = [])),
    request_body = UpdateRoleRequest,
    responses(
        (status = 200, description = "Role renamed", body = ApiResponse<RoleDto>),
        (status = 404, description = "Not found"),
        (status = 409, description = "Name already taken")
    )
)]
pub async fn update_role(
    State(state): State<RoleHandlerState>,
    ValidatedJson(request): ValidatedJson<UpdateRoleRequest>,
) -> Result<Json<ApiResponse<RoleDto>>, ApiError> {
    let role = state
        .role_service
        .rename_role(&request.role_id, &request.new_role_name)
        .await
        .map_err(|e| domain_error("Roles.update", e))?;
    Ok(Json(ApiResponse::success(role.into())))
}

#[utoipa::path(
    delete,
    path = "/api/Roles/{roleId}",
    tag = "Roles",
    security(("bearer_auth" = [])),
    params(("roleId" = String, Path, description = "Role ID")),
    responses(
        (status = 204, description = "Role deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_role(
    State(state): State<RoleHandlerState>,
    Path(role_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .role_service
        .delete_role(&role_id)
        .await
        .map_err(|e| domain_error("Roles.delete", e))?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/Roles/assign-role-to-user",
    tag = "Roles",
    security(("bearer_auth" = [])),
    request_body = AssignRoleRequest,
    responses(
        (status = 200, description = "Role assigned", body = ApiResponse<MessageResponse>),
        (status = 404, description = "User or role not found"),
        (status = 409, description = "User already has the role")
    )
)]
pub async fn assign_role_to_user(
    State(state): State<RoleHandlerState>,
    ValidatedJson(request): ValidatedJson<AssignRoleRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .role_service
        .assign_role_to_user(&request.user_id, &request.role_name)
        .await
        .map_err(|e| domain_error("Roles.assign", e))?;
    Ok(Json(ApiResponse::success(MessageResponse::new(format!(
        "Role '{}' assigned",
        request.role_name
    )))))
}
