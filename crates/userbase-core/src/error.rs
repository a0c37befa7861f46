//! Unified error types for all layers of the application.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for all layers of Userbase.
///
/// The request-level variants are rendered to callers as an opaque message
/// string; the variant only decides the HTTP status.
#[derive(Error, Debug)]
pub enum UserbaseError {
    // ============ Request Errors ============
    /// The request itself is malformed (e.g. an empty key on a single fetch).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The payload could not be decoded into a user record.
    #[error("Invalid user data: {0}")]
    InvalidUserData(String),

    /// The email address failed the format check.
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    /// A record with the same email is already stored.
    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    /// No record with this email is stored.
    #[error("Email does not exist: {0}")]
    EmailDoesNotExist(String),

    /// The method does not map to any user operation.
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    // ============ Store Errors ============
    /// The record could not be converted to the backend representation.
    #[error("Could not encode record: {0}")]
    Encoding(String),

    /// The backend call itself failed.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// A single fetch failed, either in the backend or while decoding the item.
    #[error("Failed to fetch user: {0}")]
    FetchFailed(String),

    /// Enumerating all records failed.
    #[error("Failed to scan users: {0}")]
    Scan(String),

    /// Deleting a record failed in the backend.
    #[error("Failed to delete user: {0}")]
    DeleteFailed(String),

    // ============ Infrastructure Errors ============
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl UserbaseError {
    /// Returns the HTTP status code for this error.
    ///
    /// Every failure of a user operation is a client error; no distinction
    /// is made between "not found" and "bad request".
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_)
            | Self::InvalidUserData(_)
            | Self::InvalidEmail(_)
            | Self::EmailAlreadyExists(_)
            | Self::EmailDoesNotExist(_)
            | Self::Encoding(_)
            | Self::StoreUnavailable(_)
            | Self::FetchFailed(_)
            | Self::Scan(_)
            | Self::DeleteFailed(_) => 400,
            Self::MethodNotAllowed(_) => 405,
            Self::Configuration(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns a machine-readable error code, used in logs.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::InvalidUserData(_) => "INVALID_USER_DATA",
            Self::InvalidEmail(_) => "INVALID_EMAIL",
            Self::EmailAlreadyExists(_) => "EMAIL_ALREADY_EXISTS",
            Self::EmailDoesNotExist(_) => "EMAIL_DOES_NOT_EXIST",
            Self::MethodNotAllowed(_) => "METHOD_NOT_ALLOWED",
            Self::Encoding(_) => "ENCODING_ERROR",
            Self::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            Self::FetchFailed(_) => "FETCH_FAILED",
            Self::Scan(_) => "SCAN_ERROR",
            Self::DeleteFailed(_) => "DELETE_FAILED",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input<T: Into<String>>(message: T) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Creates a store unavailable error.
    #[must_use]
    pub fn store_unavailable<T: Into<String>>(message: T) -> Self {
        Self::StoreUnavailable(message.into())
    }

    /// Creates an encoding error.
    #[must_use]
    pub fn encoding<T: Into<String>>(message: T) -> Self {
        Self::Encoding(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Checks if this error originated in the store backend.
    #[must_use]
    pub const fn is_store_failure(&self) -> bool {
        matches!(
            self,
            Self::StoreUnavailable(_) | Self::FetchFailed(_) | Self::Scan(_) | Self::DeleteFailed(_)
        )
    }
}

impl From<serde_json::Error> for UserbaseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Encoding(format!("JSON serialization error: {err}"))
    }
}

/// Error envelope returned to callers: `{"error": "<message>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new error response from a `UserbaseError`.
    #[must_use]
    pub fn from_error(error: &UserbaseError) -> Self {
        Self {
            error: error.to_string(),
        }
    }
}

impl From<&UserbaseError> for ErrorResponse {
    fn from(error: &UserbaseError) -> Self {
        Self::from_error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_errors_are_client_errors() {
        assert_eq!(UserbaseError::invalid_input("empty email").status_code(), 400);
        assert_eq!(UserbaseError::InvalidUserData("eof".to_string()).status_code(), 400);
        assert_eq!(UserbaseError::InvalidEmail("x".to_string()).status_code(), 400);
        assert_eq!(UserbaseError::EmailAlreadyExists("a@b.com".to_string()).status_code(), 400);
        assert_eq!(UserbaseError::EmailDoesNotExist("a@b.com".to_string()).status_code(), 400);
        assert_eq!(UserbaseError::encoding("bad").status_code(), 400);
        assert_eq!(UserbaseError::store_unavailable("down").status_code(), 400);
        assert_eq!(UserbaseError::FetchFailed("down".to_string()).status_code(), 400);
        assert_eq!(UserbaseError::Scan("down".to_string()).status_code(), 400);
        assert_eq!(UserbaseError::DeleteFailed("down".to_string()).status_code(), 400);
    }

    #[test]
    fn test_method_not_allowed_status() {
        assert_eq!(UserbaseError::MethodNotAllowed("PATCH".to_string()).status_code(), 405);
    }

    #[test]
    fn test_infrastructure_status_codes() {
        assert_eq!(UserbaseError::Configuration("x".to_string()).status_code(), 500);
        assert_eq!(UserbaseError::internal("oops").status_code(), 500);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(UserbaseError::InvalidEmail("x".to_string()).error_code(), "INVALID_EMAIL");
        assert_eq!(UserbaseError::Scan("x".to_string()).error_code(), "SCAN_ERROR");
        assert_eq!(UserbaseError::internal("x").error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_store_failures() {
        assert!(UserbaseError::store_unavailable("down").is_store_failure());
        assert!(UserbaseError::DeleteFailed("down".to_string()).is_store_failure());
        assert!(!UserbaseError::InvalidEmail("x".to_string()).is_store_failure());
        assert!(!UserbaseError::encoding("x").is_store_failure());
    }

    #[test]
    fn test_error_display() {
        let err = UserbaseError::EmailAlreadyExists("a@b.com".to_string());
        assert_eq!(err.to_string(), "Email already exists: a@b.com");
    }

    #[test]
    fn test_error_response_serializes_as_envelope() {
        let err = UserbaseError::invalid_input("email is required");
        let response = ErrorResponse::from(&err);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "Invalid input: email is required" }));
    }

    #[test]
    fn test_json_error_maps_to_encoding() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = UserbaseError::from(json_err);
        assert!(matches!(err, UserbaseError::Encoding(_)));
    }
}
