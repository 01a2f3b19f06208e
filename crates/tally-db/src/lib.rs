//! # tally-db: Database Layer for Tally POS
//!
//! SQLite persistence for the catalog, the sales ledger, and key-value
//! settings, using sqlx for async access.
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (product, sale, settings)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tally_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/tally.db")).await?;
//! let products = db.products().list_all().await?;
//! ```
//!
//! ## Transactions
//!
//! Checkout and void each touch many product rows plus the ledger. Those
//! multi-record writes live in [`repository::sale`] and run inside a
//! single SQLite transaction: either every stock decrement and the sale
//! row commit together, or none of them do.

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::product::ProductRepository;
pub use repository::sale::SaleRepository;
pub use repository::settings::SettingsRepository;
