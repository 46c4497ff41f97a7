//! Generic CRUD handlers
//!
//! One handler set serves every catalog table. The [`Resource`] type
//! parameter supplies the key shape, payload, access rule and reference
//! checks.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use sea_orm::DatabaseConnection;

use super::common::{domain_error, ApiError, ApiResponse, ValidatedJson};
use super::middleware::{auth_middleware, AuthState, CurrentUser};
use crate::application::catalog::{Access, CrudService, Operation, Resource};
use crate::domain::DomainError;

/// State shared by the generic handlers
#[derive(Clone)]
pub struct CrudState {
    pub db: DatabaseConnection,
}

fn operation_name<R: Resource>(op: Operation) -> String {
    format!("{}.{}", R::NAME, op.as_str())
}

/// 401 without an authenticated caller, 403 when no role matches
fn authorize<R: Resource>(op: Operation, user: &CurrentUser) -> Result<(), ApiError> {
    let access = R::access(op);
    if access.is_public() {
        return Ok(());
    }
    let Some(user) = &user.0 else {
        return Err(domain_error(
            &operation_name::<R>(op),
            DomainError::Unauthorized("Missing authentication token".to_string()),
        ));
    };
    if !access.allows(&user.roles) {
        return Err(domain_error(
            &operation_name::<R>(op),
            DomainError::Forbidden("Insufficient permissions".to_string()),
        ));
    }
    Ok(())
}

pub async fn list<R: Resource>(
    State(state): State<CrudState>,
    user: CurrentUser,
) -> Result<Json<ApiResponse<Vec<R::Model>>>, ApiError> {
    authorize::<R>(Operation::List, &user)?;
    CrudService::<R>::new(state.db)
        .list()
        .await
        .map(|rows| Json(ApiResponse::success(rows)))
        .map_err(|e| domain_error(&operation_name::<R>(Operation::List), e))
}

pub async fn get_one<R: Resource>(
    State(state): State<CrudState>,
    user: CurrentUser,
    Path(key): Path<R::Key>,
) -> Result<Json<ApiResponse<R::Model>>, ApiError> {
    authorize::<R>(Operation::Get, &user)?;
    CrudService::<R>::new(state.db)
        .get(key)
        .await
        .map(|row| Json(ApiResponse::success(row)))
        .map_err(|e| domain_error(&operation_name::<R>(Operation::Get), e))
}

/// 201 with a `Location` header and the stored row
pub async fn create<R: Resource>(
    State(state): State<CrudState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<R::Payload>,
) -> Result<Response, ApiError> {
    authorize::<R>(Operation::Create, &user)?;
    let created = CrudService::<R>::new(state.db)
        .create(payload)
        .await
        .map_err(|e| domain_error(&operation_name::<R>(Operation::Create), e))?;

    let location = R::location(&R::model_key(&created));
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ApiResponse::success(created)),
    )
        .into_response())
}

pub async fn update<R: Resource>(
    State(state): State<CrudState>,
    user: CurrentUser,
    Path(key): Path<R::Key>,
    ValidatedJson(payload): ValidatedJson<R::Payload>,
) -> Result<StatusCode, ApiError> {
    authorize::<R>(Operation::Update, &user)?;
    CrudService::<R>::new(state.db)
        .update(key, payload)
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(|e| domain_error(&operation_name::<R>(Operation::Update), e))
}

pub async fn delete<R: Resource>(
    State(state): State<CrudState>,
    user: CurrentUser,
    Path(key): Path<R::Key>,
) -> Result<StatusCode, ApiError> {
    authorize::<R>(Operation::Delete, &user)?;
    CrudService::<R>::new(state.db)
        .delete(key)
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(|e| domain_error(&operation_name::<R>(Operation::Delete), e))
}

/// Routes for one resource. Token checking is layered only when some
/// operation of the resource is restricted.
pub fn resource_router<R: Resource>(crud_state: CrudState, auth_state: AuthState) -> Router {
    let base = R::path();
    let item = format!("{base}/{}", R::KEY_SEGMENTS);

    let router = Router::new()
        .route(&base, get(list::<R>).post(create::<R>))
        .route(&item, get(get_one::<R>).put(update::<R>).delete(delete::<R>))
        .with_state(crud_state);

    let restricted = [
        Operation::List,
        Operation::Get,
        Operation::Create,
        Operation::Update,
        Operation::Delete,
    ]
    .into_iter()
    .any(|op| R::access(op) != Access::Public);

    if restricted {
        router.layer(middleware::from_fn_with_state(auth_state, auth_middleware))
    } else {
        router
    }
}
