//! # Error Types
//!
//! Domain-specific error types for koanile-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  koanile-core errors (this file)                                       │
//! │  ├── CoreError        - Catalog lookups and data checks                │
//! │  └── ValidationError  - Static catalog data failures                   │
//! │                                                                         │
//! │  koanile-store errors (separate crate)                                 │
//! │  ├── AuthError        - Auth backend failures                          │
//! │  └── ApiError         - What the frontend sees (serialized)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Frontend               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart mutations are deliberately absent from this taxonomy: they are total
//! functions that clamp or no-op instead of raising (absent product ids,
//! zero quantities, over-max requests, empty-cart checkout).

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
///
/// These surface from catalog lookups and static data validation; they are
/// translated to user-facing messages at the API boundary.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Category slug does not exist in the catalog.
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Static catalog data validation errors.
///
/// The catalog is compiled into the binary; these errors indicate a bad data
/// edit, and the catalog builder refuses to serve a catalog that fails them.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., slug with spaces).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., duplicate slug).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// Reference to an entity that does not exist.
    #[error("{field} references unknown {target} '{value}'")]
    UnknownReference {
        field: String,
        target: String,
        value: String,
    },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::ProductNotFound("nova-drift-pro".to_string());
        assert_eq!(err.to_string(), "Product not found: nova-drift-pro");

        let err = CoreError::CategoryNotFound("wheels".to_string());
        assert_eq!(err.to_string(), "Category not found: wheels");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "slug".to_string(),
        };
        assert_eq!(err.to_string(), "slug is required");

        let err = ValidationError::UnknownReference {
            field: "category_slug".to_string(),
            target: "category".to_string(),
            value: "retro".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "category_slug references unknown category 'retro'"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "slug".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
