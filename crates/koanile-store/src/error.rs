//! # API Error Type
//!
//! Unified error type for the storefront operation surface.
//!
//! ## Error Handling Strategy
//! Cart-level edge cases (absent lines, zero quantities, over-max requests,
//! empty-cart checkout) are not errors at all; they clamp or no-op by
//! contract. `ApiError` exists for the failures a screen must actually
//! display: unknown catalog ids and auth backend failures. The frontend
//! receives both a machine-readable `code` and a human-readable `message`:
//!
//! ```json
//! {
//!   "code": "NOT_FOUND",
//!   "message": "Product not found: 42"
//! }
//! ```

use serde::Serialize;
use ts_rs::TS;

use koanile_core::CoreError;

use crate::session::AuthError;

/// API error returned from storefront operations.
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Auth backend reported a failure
    AuthError,

    /// Anything unexpected
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", id),
            CoreError::CategoryNotFound(slug) => ApiError::not_found("Category", slug),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

/// Converts auth backend errors to API errors.
impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Backend(message) => ApiError::new(ErrorCode::AuthError, message),
            AuthError::NotConfigured => ApiError::new(
                ErrorCode::AuthError,
                "Sign-in is not available in this build",
            ),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = ApiError::not_found("Product", 42);
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Product not found: 42");
    }

    #[test]
    fn test_core_error_conversion() {
        let err: ApiError = CoreError::ProductNotFound("nova-drift-pro".to_string()).into();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err: ApiError = CoreError::CategoryNotFound("retro".to_string()).into();
        assert_eq!(err.message, "Category not found: retro");
    }

    #[test]
    fn test_auth_error_conversion() {
        let err: ApiError = AuthError::Backend("invalid credentials".to_string()).into();
        assert_eq!(err.code, ErrorCode::AuthError);
        assert_eq!(err.message, "invalid credentials");
    }

    #[test]
    fn test_serialized_shape() {
        let err = ApiError::not_found("Product", 42);
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Product not found: 42");
    }
}
