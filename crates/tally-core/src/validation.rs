//! # Validation Module
//!
//! Input validation for Tally POS.
//!
//! Validators run before any record is constructed or any store mutation
//! happens, so a failed validation never leaves partial state behind. Each
//! function checks one field and returns a specific [`ValidationError`]
//! variant.
//!
//! ## Usage
//! ```
//! use tally_core::validation::{validate_price_cents, validate_restock_amount};
//!
//! assert!(validate_price_cents(1000).is_ok());
//! assert!(validate_price_cents(0).is_err());
//! assert!(validate_restock_amount(0).is_ok());
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a catalog search query.
///
/// ## Rules
/// - Can be empty (matches every product)
/// - Maximum 100 characters
///
/// Returns the trimmed query.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "search".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price in minor units.
///
/// ## Rules
/// - Must be strictly positive; a product cannot be listed for free or
///   for a negative amount.
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates an initial stock level.
///
/// Zero is allowed (listing a product before goods arrive); negative is not.
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "stock".to_string(),
        });
    }

    Ok(())
}

/// Validates a restock amount (items received).
///
/// ## Rules
/// - Must be zero or greater; restocking never removes stock.
pub fn validate_restock_amount(amount: i64) -> ValidationResult<()> {
    if amount < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "restock amount".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
