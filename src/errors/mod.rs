//! Error handling module for the Symplibackup proxy.
//!
//! Provides centralized error types with mapping to HTTP status codes and
//! a uniform JSON error body, so handlers never hand-roll status mapping.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::backend::BackendError;

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const BACKEND_FAILURE: &str = "BACKEND_FAILURE";
    pub const FILE_NOT_FOUND: &str = "FILE_NOT_FOUND";
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
}

/// Application error type.
#[derive(Debug)]
pub enum ApiError {
    /// Client, backup, group or schedule identifier did not resolve
    NotFound(String),
    /// The UrBackup backend surfaced a failure; carried verbatim as detail
    Backend(BackendError),
    /// Download target missing, not a regular file, or backup has no path
    FileNotFound(String),
    /// Documentation gate rejected the presented Basic credentials
    Unauthorized(String),
}

impl ApiError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Backend(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::FileNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => codes::NOT_FOUND,
            ApiError::Backend(_) => codes::BACKEND_FAILURE,
            ApiError::FileNotFound(_) => codes::FILE_NOT_FOUND,
            ApiError::Unauthorized(_) => codes::UNAUTHORIZED,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            ApiError::NotFound(msg) => msg.clone(),
            ApiError::Backend(err) => err.to_string(),
            ApiError::FileNotFound(msg) => msg.clone(),
            ApiError::Unauthorized(msg) => msg.clone(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for ApiError {}

impl From<BackendError> for ApiError {
    fn from(err: BackendError) -> Self {
        tracing::error!("Backend error: {:?}", err);
        ApiError::Backend(err)
    }
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            code: self.error_code().to_string(),
            message: self.message(),
        };

        // The Basic challenge is part of the 401 contract for /docs.
        if let ApiError::Unauthorized(_) = self {
            return (
                status,
                [(header::WWW_AUTHENTICATE, "Basic realm=\"Documentation Symplibackup\"")],
                Json(body),
            )
                .into_response();
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_status() {
        let err = ApiError::NotFound("Client 'x' non trouvé".to_string());
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.error_code(), codes::NOT_FOUND);
    }

    #[test]
    fn test_backend_status() {
        let err = ApiError::Backend(BackendError::Protocol("réponse invalide".to_string()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), codes::BACKEND_FAILURE);
    }

    #[test]
    fn test_unauthorized_carries_challenge() {
        let err = ApiError::Unauthorized("Identifiants requis".to_string());
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert!(resp.headers().contains_key(header::WWW_AUTHENTICATE));
    }
}
