//! Shared HTTP types: the response envelope, error mapping and the
//! validating JSON extractor.

mod validated_json;

pub use validated_json::{ValidatedJson, ValidatedJsonRejection};

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::domain::DomainError;

/// Message returned for every unexpected server-side failure
pub const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again.";

/// Standard API response envelope
///
/// Success: `{"success": true, "data": {...}}`,
/// failure: `{"success": false, "data": null, "error": "..."}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Error half of every handler result
pub type ApiError = (StatusCode, Json<ApiResponse<()>>);

pub fn error_response(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(ApiResponse::error(message)))
}

/// Map a domain error to a status code and log it under `operation`.
/// Storage faults are hidden from the client.
pub fn domain_error(operation: &str, err: DomainError) -> ApiError {
    let status = match &err {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
        DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
        error!(operation, error = %err, "Request failed");
        return error_response(status, GENERIC_ERROR_MESSAGE);
    }

    warn!(operation, error = %err, "Request rejected");
    let message = match err {
        DomainError::NotFound { entity, field, value } => {
            format!("{entity} with {field} {value} was not found")
        }
        DomainError::Validation(m)
        | DomainError::Conflict(m)
        | DomainError::Unauthorized(m)
        | DomainError::Forbidden(m)
        | DomainError::Storage(m) => m,
    };
    error_response(status, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_errors_are_not_leaked() {
        let (status, Json(body)) =
            domain_error("test", DomainError::Storage("disk on fire".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error.as_deref(), Some(GENERIC_ERROR_MESSAGE));
    }

    #[test]
    fn client_errors_keep_their_message() {
        let (status, Json(body)) = domain_error("test", DomainError::not_found("Vehicle", "id", 9));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error.as_deref(), Some("Vehicle with id 9 was not found"));

        let (status, _) = domain_error("test", DomainError::Conflict("dup".into()));
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[test]
    fn auth_failures_map_to_401_and_403() {
        let (status, Json(body)) =
            domain_error("test", DomainError::Unauthorized("Missing authentication token".into()));
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body.error.as_deref(), Some("Missing authentication token"));

        let (status, Json(body)) =
            domain_error("test", DomainError::Forbidden("Insufficient permissions".into()));
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body.error.as_deref(), Some("Insufficient permissions"));
        assert!(!body.success);
    }

    #[test]
    fn error_envelope_carries_null_data() {
        let json = serde_json::to_value(ApiResponse::<()>::error("nope")).unwrap();
        assert_eq!(json, serde_json::json!({"success": false, "data": null, "error": "nope"}));
    }
}
