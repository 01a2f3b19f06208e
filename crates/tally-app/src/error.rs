//! # Application Error Types
//!
//! The top of the error stack: wraps core and database errors and adds
//! the handful of conditions only the application layer can detect.
//!
//! ## Error Flow
//! ```text
//! CoreError (tally-core)   DbError (tally-db)
//!        │                      │
//!        └──────────┬───────────┘
//!                   ▼
//!               AppError        ← this module
//!                   │
//!                   ▼
//!            user_message()     ← alert text the UI shell shows
//! ```

use thiserror::Error;

use tally_core::CoreError;
use tally_db::DbError;

/// Application-level errors.
#[derive(Debug, Error)]
pub enum AppError {
    /// Business rule violation from tally-core.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Persistence failure from tally-db.
    #[error(transparent)]
    Db(#[from] DbError),

    /// Export requested with an empty sales ledger.
    #[error("No sales data to export")]
    NoSalesData,

    /// Void requested with no receipt on the session.
    #[error("No receipt to void")]
    NoReceipt,

    /// Rejected settings write (e.g. blank shop name).
    #[error("Invalid setting: {0}")]
    InvalidSetting(String),
}

impl AppError {
    /// Text for the alert the UI shell shows the cashier.
    ///
    /// Business errors carry their own message; infrastructure failures
    /// collapse to a generic line so SQL never reaches the screen.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Core(e) => e.to_string(),
            AppError::NoSalesData => "No sales data to export".to_string(),
            AppError::NoReceipt => "No receipt to void".to_string(),
            AppError::InvalidSetting(msg) => msg.clone(),
            AppError::Db(DbError::NotFound { entity, .. }) => {
                format!("{} no longer exists", entity)
            }
            AppError::Db(_) => "Something went wrong. Please try again.".to_string(),
        }
    }
}

/// Result type for application operations.
pub type AppResult<T> = Result<T, AppError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_hides_infrastructure_detail() {
        let err = AppError::Db(DbError::QueryFailed("near SELECT: syntax error".to_string()));
        assert_eq!(err.user_message(), "Something went wrong. Please try again.");
    }

    #[test]
    fn user_message_surfaces_business_errors() {
        let err = AppError::Core(CoreError::OutOfStock {
            name: "Rice".to_string(),
        });
        assert!(err.user_message().contains("Rice"));

        let err = AppError::Db(DbError::not_found("Product", 7));
        assert_eq!(err.user_message(), "Product no longer exists");
    }
}
