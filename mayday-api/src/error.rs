//! Error Types for the MAYDAY API
//!
//! This module defines error handling for the API layer, including:
//! - ApiError struct for structured error responses
//! - ErrorCode enum for categorizing errors
//! - IntoResponse implementation for Axum HTTP responses
//!
//! All errors are serialized as JSON with appropriate HTTP status codes.
//! The gRPC side maps the same codes onto tonic Status values (see grpc.rs).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

use mayday_core::{MaydayError, StoreError};

// ============================================================================
// ERROR CODE ENUM
// ============================================================================

/// Error codes for API responses.
///
/// Each error code maps to a specific HTTP status code and represents
/// a category of error that can occur during API operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Request contains invalid input data (blank kind, malformed id,
    /// status outside the lifecycle set)
    InvalidInput,

    /// Requested alert does not exist
    AlertNotFound,

    /// Gateway deadline elapsed before the call completed
    Timeout,

    /// Stream ended before the expected completion message
    TransportFailure,

    /// Upstream service is unavailable
    UpstreamUnavailable,

    /// Internal server error
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::InvalidInput => StatusCode::BAD_REQUEST,
            ErrorCode::AlertNotFound => StatusCode::NOT_FOUND,
            ErrorCode::Timeout => StatusCode::GATEWAY_TIMEOUT,
            ErrorCode::TransportFailure => StatusCode::BAD_GATEWAY,
            ErrorCode::UpstreamUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get a default message for this error code.
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::InvalidInput => "Invalid input data",
            ErrorCode::AlertNotFound => "Alert not found",
            ErrorCode::Timeout => "Operation timed out",
            ErrorCode::TransportFailure => "Stream ended unexpectedly",
            ErrorCode::UpstreamUnavailable => "Upstream service unavailable",
            ErrorCode::InternalError => "Internal server error",
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

/// Structured error response for API operations.
///
/// This type is returned by all gateway endpoints when an error occurs.
/// It provides a consistent error format across REST and gRPC.
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
    /// Create a new API error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Create a new API error with the given code, using the default message.
    pub fn from_code(code: ErrorCode) -> Self {
        Self {
            code,
            message: code.default_message().to_string(),
            details: None,
        }
    }

    /// Add additional details to the error.
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        self.code.status_code()
    }

    // ========================================================================
    // Convenience constructors for common errors
    // ========================================================================

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Create an AlertNotFound error.
    pub fn alert_not_found(id: impl fmt::Display) -> Self {
        Self::new(ErrorCode::AlertNotFound, format!("Alert {} not found", id))
    }

    /// Create a Timeout error.
    pub fn timeout(operation: &str) -> Self {
        Self::new(
            ErrorCode::Timeout,
            format!("Operation '{}' timed out", operation),
        )
    }

    /// Create a TransportFailure error.
    pub fn transport_failure(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::TransportFailure, message)
    }

    /// Create an UpstreamUnavailable error.
    pub fn upstream_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UpstreamUnavailable, message)
    }

    /// Create an InternalError.
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

// ============================================================================
// AXUM INTEGRATION
// ============================================================================

/// Implement IntoResponse for ApiError to enable automatic error handling in Axum.
///
/// This allows ApiError to be returned directly from Axum handlers:
/// ```ignore
/// async fn handler() -> Result<Json<Response>, ApiError> {
///     Err(ApiError::alert_not_found(id))
/// }
/// ```
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self);
        (status, body).into_response()
    }
}

// ============================================================================
// CONVERSIONS FROM DOMAIN AND TRANSPORT ERRORS
// ============================================================================

/// Convert from MaydayError to ApiError.
impl From<MaydayError> for ApiError {
    fn from(err: MaydayError) -> Self {
        match err {
            MaydayError::Store(StoreError::NotFound { id }) => ApiError::alert_not_found(id),
            MaydayError::Store(StoreError::LockPoisoned) => {
                tracing::error!("alert store lock poisoned");
                ApiError::internal_error("Alert store unavailable")
            }
            MaydayError::Validation(e) => ApiError::invalid_input(e.to_string()),
            MaydayError::Advice(e) => ApiError::upstream_unavailable(e.to_string()),
        }
    }
}

/// Convert from tonic::Status to ApiError.
///
/// This is the gateway-side mapping: a Status coming back over the channel
/// becomes the JSON error envelope the HTTP caller sees.
impl From<tonic::Status> for ApiError {
    fn from(status: tonic::Status) -> Self {
        let code = match status.code() {
            tonic::Code::NotFound => ErrorCode::AlertNotFound,
            tonic::Code::InvalidArgument => ErrorCode::InvalidInput,
            tonic::Code::DeadlineExceeded => ErrorCode::Timeout,
            tonic::Code::Unavailable => ErrorCode::UpstreamUnavailable,
            tonic::Code::Aborted => ErrorCode::TransportFailure,
            _ => ErrorCode::InternalError,
        };
        let message = status.message();
        if message.is_empty() {
            ApiError::from_code(code)
        } else {
            ApiError::new(code, message)
        }
    }
}

// ============================================================================
// RESULT TYPE ALIAS
// ============================================================================

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
