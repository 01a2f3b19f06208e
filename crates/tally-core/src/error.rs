//! # Error Types
//!
//! Domain-specific error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! tally-core errors (this file)
//! ├── CoreError        - Business rule violations
//! └── ValidationError  - Input validation failures
//!
//! tally-db errors (separate crate)
//! └── DbError          - Database operation failures
//!
//! tally-app errors (app crate)
//! └── AppError         - What a UI shell sees (alert messages)
//!
//! Flow: ValidationError → CoreError → AppError → user alert
//! ```
//!
//! Errors are enum variants with structured fields, never bare strings,
//! so callers can match on them and the app layer can map each variant
//! to a user-facing message.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A product id was referenced that no longer exists (deleted between
    /// add-to-cart and the operation, or never existed).
    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    /// The product has no stock left; it cannot enter the cart.
    #[error("{name} is out of stock")]
    OutOfStock { name: String },

    /// The requested quantity exceeds the stock observed when the cart line
    /// was last validated. The cart is left unchanged.
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// A cart line index that does not address any line.
    #[error("No cart line at index {index}")]
    LineNotFound { index: usize },

    /// The cart already holds the maximum number of distinct lines.
    #[error("Cart cannot have more than {max} lines")]
    CartTooLarge { max: usize },

    /// Report serialization failed. Should not happen for in-memory
    /// buffers; surfaced rather than panicking.
    #[error("Report serialization failed: {0}")]
    Report(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any record is constructed or any store mutation happens.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        let err = CoreError::InsufficientStock {
            name: "Rice".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Rice: available 3, requested 5"
        );

        let err = CoreError::OutOfStock {
            name: "Beans".to_string(),
        };
        assert_eq!(err.to_string(), "Beans is out of stock");
    }

    #[test]
    fn validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::MustBePositive {
            field: "price".to_string(),
        };
        assert_eq!(err.to_string(), "price must be positive");
    }

    #[test]
    fn validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
