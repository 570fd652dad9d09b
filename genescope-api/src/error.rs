//! Error types for the Genescope API.
//!
//! Every endpoint failure is serialized as a structured JSON body with a
//! stable error code, so the front end can branch on `code` rather than
//! parsing messages.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use genescope_core::{GeneNotFound, GenescopeError, PublicationError};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// ERROR CODE ENUM
// ============================================================================

/// Error codes for API responses. Each maps to one HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Request contains invalid input data (bad page number, unknown sort)
    InvalidInput,

    /// Requested gene symbol is not in the analyzed dataset
    GeneNotFound,

    /// Expression dataset could not be served
    DatasetUnavailable,

    /// Publication lookup failed upstream
    PublicationUnavailable,

    /// Publication lookup exceeded its deadline
    UpstreamTimeout,

    /// Internal server error
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::InvalidInput => StatusCode::BAD_REQUEST,
            ErrorCode::GeneNotFound => StatusCode::NOT_FOUND,
            ErrorCode::DatasetUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::PublicationUnavailable => StatusCode::BAD_GATEWAY,
            ErrorCode::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

// ============================================================================
// API ERROR STRUCT
// ============================================================================

/// Structured error response returned by every endpoint on failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ApiError {
    /// Error code categorizing the error
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,

    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<Object>))]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn status_code(&self) -> StatusCode {
        self.code.status_code()
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    pub fn gene_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::GeneNotFound, message)
    }

    pub fn dataset_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatasetUnavailable, message)
    }

    pub fn publication_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PublicationUnavailable, message)
    }

    pub fn upstream_timeout(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UpstreamTimeout, message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self);
        (status, body).into_response()
    }
}

// ============================================================================
// CONVERSIONS
// ============================================================================

impl From<GeneNotFound> for ApiError {
    fn from(err: GeneNotFound) -> Self {
        ApiError::gene_not_found(err.to_string())
    }
}

impl From<PublicationError> for ApiError {
    fn from(err: PublicationError) -> Self {
        match err {
            PublicationError::Timeout { .. } => ApiError::upstream_timeout(err.to_string()),
            PublicationError::Transport { .. } | PublicationError::InvalidResponse { .. } => {
                ApiError::publication_unavailable(err.to_string())
            }
        }
    }
}

impl From<GenescopeError> for ApiError {
    fn from(err: GenescopeError) -> Self {
        match err {
            GenescopeError::Data(e) => ApiError::dataset_unavailable(e.to_string()),
            GenescopeError::NotFound(e) => e.into(),
            GenescopeError::Publication(e) => e.into(),
        }
    }
}

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(
            ErrorCode::InvalidInput.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ErrorCode::GeneNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::PublicationUnavailable.status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ErrorCode::UpstreamTimeout.status_code(),
            StatusCode::GATEWAY_TIMEOUT
        );
    }

    #[test]
    fn test_gene_not_found_conversion() {
        let err: ApiError = GeneNotFound::new("CDK2").into();
        assert_eq!(err.code, ErrorCode::GeneNotFound);
        assert!(err.message.contains("CDK2"));
    }

    #[test]
    fn test_publication_error_conversion() {
        let timeout: ApiError = PublicationError::Timeout { seconds: 100 }.into();
        assert_eq!(timeout.code, ErrorCode::UpstreamTimeout);

        let transport: ApiError = PublicationError::transport("connection refused").into();
        assert_eq!(transport.code, ErrorCode::PublicationUnavailable);
    }

    #[test]
    fn test_error_serialization() {
        let err = ApiError::invalid_input("page must be at least 1");
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("\"code\":\"INVALID_INPUT\""));
        assert!(!json.contains("details"));
    }
}
