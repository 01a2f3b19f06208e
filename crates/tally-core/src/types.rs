//! # Domain Types
//!
//! Core domain types used throughout Tally POS.
//!
//! ```text
//! ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐
//! │    Product      │   │      Sale       │   │    SaleItem     │
//! │  ─────────────  │   │  ─────────────  │   │  ─────────────  │
//! │  id (i64)       │   │  id (i64)       │   │  sale_id        │
//! │  name           │   │  created_at     │   │  name snapshot  │
//! │  price_cents    │   │  total_cents    │   │  unit price     │
//! │  stock          │   │                 │   │  quantity       │
//! │  category       │   └─────────────────┘   └─────────────────┘
//! └─────────────────┘
//! ```
//!
//! Identifiers are store-assigned `i64` rowids: the persistent store hands
//! them out monotonically, so sale-id order is creation order.
//!
//! Sale items use the snapshot pattern: name and unit price are frozen at
//! checkout, so editing or deleting a product never rewrites history. Only
//! `product_id` links back, and that link is allowed to dangle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::{validate_price_cents, validate_product_name, validate_stock};
use crate::LOW_STOCK_THRESHOLD;

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Store-assigned identifier.
    pub id: i64,

    /// Display name shown on the product grid and on receipts.
    pub name: String,

    /// Unit price in minor currency units.
    pub price_cents: i64,

    /// Current stock level. Can go negative on pathological input; the
    /// cart's stock ceiling prevents the checkout path from driving it
    /// below zero.
    pub stock: i64,

    /// Category used by the grid filter.
    pub category: String,

    /// Optional photo reference (data URL captured by the UI shell).
    pub photo: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the unit price as a Money value.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Nothing left to sell.
    #[inline]
    pub fn is_out_of_stock(&self) -> bool {
        self.stock <= 0
    }

    /// Low but not empty; the grid highlights these.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.stock > 0 && self.stock <= LOW_STOCK_THRESHOLD
    }

    /// Status label used by the stock report.
    #[inline]
    pub fn stock_status(&self) -> StockStatus {
        StockStatus::from_stock(self.stock)
    }
}

// =============================================================================
// Product Draft
// =============================================================================

/// A validated, not-yet-persisted product.
///
/// The only way to build one is [`ProductDraft::new`], which applies all
/// field validation before any record exists. This replaces trusting
/// ambient string parsing: a draft either holds well-formed fields or was
/// never constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub price_cents: i64,
    pub stock: i64,
    pub category: String,
    pub photo: Option<String>,
}

impl ProductDraft {
    /// Validates the fields and builds a draft.
    ///
    /// ## Rules
    /// - `name` must be non-empty after trimming
    /// - `price` must be strictly positive
    /// - `stock` must not be negative
    ///
    /// ```
    /// use tally_core::{Money, ProductDraft};
    ///
    /// let draft = ProductDraft::new("Rice", Money::from_cents(1000), 10, "Food", None);
    /// assert!(draft.is_ok());
    ///
    /// let bad = ProductDraft::new("", Money::from_cents(1000), 10, "Food", None);
    /// assert!(bad.is_err());
    /// ```
    pub fn new(
        name: &str,
        price: Money,
        stock: i64,
        category: &str,
        photo: Option<String>,
    ) -> Result<Self, ValidationError> {
        validate_product_name(name)?;
        validate_price_cents(price.cents())?;
        validate_stock(stock)?;

        Ok(ProductDraft {
            name: name.trim().to_string(),
            price_cents: price.cents(),
            stock,
            category: category.trim().to_string(),
            photo,
        })
    }
}

// =============================================================================
// Stock Status
// =============================================================================

/// Derived stock label for the stock report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    /// Stock is at or below the low-stock threshold (includes zero and
    /// negative stock).
    Low,
    /// Stock is comfortably above the threshold.
    Ok,
}

impl StockStatus {
    /// Classifies a stock level. Boundary: `stock <= 5` is LOW.
    #[inline]
    pub const fn from_stock(stock: i64) -> Self {
        if stock <= LOW_STOCK_THRESHOLD {
            StockStatus::Low
        } else {
            StockStatus::Ok
        }
    }

    /// Label as it appears in the CSV stock report.
    #[inline]
    pub const fn label(&self) -> &'static str {
        match self {
            StockStatus::Low => "LOW",
            StockStatus::Ok => "OK",
        }
    }
}

// =============================================================================
// Sale
// =============================================================================

/// An immutable record of a completed checkout.
///
/// Deleted only by voiding. Ids are monotonically increasing, so the ledger
/// reads in chronological order when sorted by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub total_cents: i64,
}

impl Sale {
    /// Returns the sale total as a Money value.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Sale Item
// =============================================================================

/// A line item of a sale; a frozen snapshot of the cart line at commit time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleItem {
    pub id: i64,
    pub sale_id: i64,

    /// The product this line sold. Not a foreign key: the product may be
    /// deleted later, and the ledger must still read correctly.
    pub product_id: i64,

    /// Product name at time of sale (frozen).
    pub name: String,

    /// Unit price in minor units at time of sale (frozen).
    pub unit_price_cents: i64,

    /// Quantity sold.
    pub quantity: i64,
}

impl SaleItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Line subtotal: unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().times(self.quantity)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(stock: i64) -> Product {
        Product {
            id: 1,
            name: "Rice".to_string(),
            price_cents: 1000,
            stock,
            category: "Food".to_string(),
            photo: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn stock_status_boundary() {
        assert_eq!(StockStatus::from_stock(3), StockStatus::Low);
        assert_eq!(StockStatus::from_stock(5), StockStatus::Low);
        assert_eq!(StockStatus::from_stock(6), StockStatus::Ok);
        assert_eq!(StockStatus::from_stock(0), StockStatus::Low);
        assert_eq!(StockStatus::from_stock(-2), StockStatus::Low);
        assert_eq!(StockStatus::Low.label(), "LOW");
        assert_eq!(StockStatus::Ok.label(), "OK");
    }

    #[test]
    fn product_stock_flags() {
        assert!(product(0).is_out_of_stock());
        assert!(!product(0).is_low_stock());
        assert!(product(3).is_low_stock());
        assert!(!product(10).is_low_stock());
        assert!(!product(10).is_out_of_stock());
    }

    #[test]
    fn draft_rejects_empty_name() {
        let err = ProductDraft::new("   ", Money::from_cents(100), 1, "Food", None);
        assert!(err.is_err());
    }

    #[test]
    fn draft_rejects_non_positive_price() {
        assert!(ProductDraft::new("Rice", Money::from_cents(0), 1, "Food", None).is_err());
        assert!(ProductDraft::new("Rice", Money::from_cents(-5), 1, "Food", None).is_err());
    }

    #[test]
    fn draft_rejects_negative_stock() {
        assert!(ProductDraft::new("Rice", Money::from_cents(100), -1, "Food", None).is_err());
    }

    #[test]
    fn draft_trims_fields() {
        let draft = ProductDraft::new(" Rice ", Money::from_cents(100), 0, " Food ", None).unwrap();
        assert_eq!(draft.name, "Rice");
        assert_eq!(draft.category, "Food");
    }

    #[test]
    fn sale_item_line_total() {
        let item = SaleItem {
            id: 1,
            sale_id: 1,
            product_id: 1,
            name: "Rice".to_string(),
            unit_price_cents: 1000,
            quantity: 2,
        };
        assert_eq!(item.line_total().cents(), 2000);
    }
}
