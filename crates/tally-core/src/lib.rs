//! # tally-core: Pure Business Logic for Tally POS
//!
//! This crate is the heart of Tally POS. It contains all business logic as
//! pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    tally-app (services)                         │
//! │    catalog, checkout engine, report exporter, session state     │
//! └─────────────────────────────┬───────────────────────────────────┘
//!                               │
//! ┌─────────────────────────────▼───────────────────────────────────┐
//! │               ★ tally-core (THIS CRATE) ★                       │
//! │                                                                 │
//! │   ┌─────────┐  ┌─────────┐  ┌─────────┐  ┌──────────┐          │
//! │   │  types  │  │  money  │  │  cart   │  │  report  │          │
//! │   │ Product │  │  Money  │  │  Cart   │  │ CSV rows │          │
//! │   │  Sale   │  │  cents  │  │CartLine │  │  totals  │          │
//! │   └─────────┘  └─────────┘  └─────────┘  └──────────┘          │
//! │                                                                 │
//! │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS            │
//! └─────────────────────────────┬───────────────────────────────────┘
//!                               │
//! ┌─────────────────────────────▼───────────────────────────────────┐
//! │                   tally-db (persistence)                        │
//! │            SQLite queries, migrations, repositories             │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Sale, SaleItem, StockStatus)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - The pending-transaction cart and its stock-ceiling rules
//! - [`report`] - CSV builders for the sales ledger and stock report
//! - [`validation`] - Business rule validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: same input, same output
//! 2. **No I/O**: database, network, and file access are forbidden here
//! 3. **Integer money**: all monetary values are minor units (i64)
//! 4. **Explicit errors**: all errors are typed, never strings or panics

pub mod cart;
pub mod error;
pub mod money;
pub mod report;
pub mod types;
pub mod validation;

pub use cart::{Cart, CartLine};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::{Product, ProductDraft, Sale, SaleItem, StockStatus};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Category filter sentinel meaning "every category".
pub const ALL_CATEGORIES: &str = "All";

/// Stock at or below this level is reported as LOW in the stock report
/// (and flagged for the product grid).
pub const LOW_STOCK_THRESHOLD: i64 = 5;

/// Maximum distinct lines allowed in a single cart.
///
/// Prevents runaway carts; one line per product, so this bounds the number
/// of distinct products in a transaction, not the quantities.
pub const MAX_CART_LINES: usize = 100;
