//! API response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::warn;
use userbase_core::{ErrorResponse, UserbaseError};

/// Application error type for Axum.
#[derive(Debug)]
pub struct AppError(pub UserbaseError);

impl From<UserbaseError> for AppError {
    fn from(err: UserbaseError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if self.0.is_store_failure() {
            warn!(code = self.0.error_code(), "Store failure: {}", self.0);
        }

        let body = Json(ErrorResponse::from_error(&self.0));
        (status, body).into_response()
    }
}

/// Result type for Axum handlers.
pub type ApiResult<T> = Result<T, AppError>;

/// Helper to create a success (200) response.
pub fn ok<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(data)).into_response()
}

/// Helper to create a created (201) response.
pub fn created<T: Serialize>(data: T) -> Response {
    (StatusCode::CREATED, Json(data)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        let response = AppError(UserbaseError::InvalidEmail("x".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = AppError(UserbaseError::MethodNotAllowed("PATCH".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

        let response = AppError(UserbaseError::internal("boom")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_success_helpers() {
        assert_eq!(ok("x").status(), StatusCode::OK);
        assert_eq!(created("x").status(), StatusCode::CREATED);
    }
}
