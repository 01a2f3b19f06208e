//! # Session State
//!
//! The in-memory state of one terminal session: the cart being built, the
//! active catalog filters, and the receipt of the last checkout.
//!
//! ## Thread Safety
//! The session is wrapped in `Arc<Mutex<T>>` because:
//! 1. Multiple service calls may access/modify the session
//! 2. Only one call should modify it at a time
//! 3. A UI shell dispatches calls concurrently
//!
//! ## Why an Explicit Session
//! Everything mutable lives on this one object and is passed to the
//! services that need it. No globals: two terminals in the same process
//! are just two sessions.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tally_core::{Cart, Money, Sale, SaleItem, ALL_CATEGORIES};

// =============================================================================
// Receipt
// =============================================================================

/// One line of a receipt (frozen snapshot from the sale items).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptLine {
    pub name: String,
    pub unit_price_cents: i64,
    pub quantity: i64,
}

impl ReceiptLine {
    /// Line subtotal: unit price × quantity.
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.unit_price_cents).times(self.quantity)
    }
}

/// The receipt of a completed checkout.
///
/// Carries the sale id so a void targets exactly this sale, not whatever
/// happens to be newest in the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    /// Ledger id of the sale this receipt describes.
    pub sale_id: i64,

    /// When the sale was committed.
    pub created_at: DateTime<Utc>,

    pub lines: Vec<ReceiptLine>,

    pub total_cents: i64,
}

impl Receipt {
    /// Builds a receipt from a persisted sale and its items.
    pub fn from_sale(sale: &Sale, items: &[SaleItem]) -> Self {
        Receipt {
            sale_id: sale.id,
            created_at: sale.created_at,
            lines: items
                .iter()
                .map(|item| ReceiptLine {
                    name: item.name.clone(),
                    unit_price_cents: item.unit_price_cents,
                    quantity: item.quantity,
                })
                .collect(),
            total_cents: sale.total_cents,
        }
    }

    /// Receipt total as Money.
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Session
// =============================================================================

/// Mutable per-terminal state.
#[derive(Debug, Clone)]
pub struct Session {
    /// The cart being built.
    pub cart: Cart,

    /// Active category filter. `ALL_CATEGORIES` means no filter.
    pub category_filter: String,

    /// Raw search box contents (validated on use, not on set).
    pub search_query: String,

    /// Receipt of the last checkout, if one is still open. Cleared by
    /// closing the receipt or voiding the sale.
    pub last_receipt: Option<Receipt>,
}

impl Session {
    /// Creates a fresh session: empty cart, "All" categories, no search.
    pub fn new() -> Self {
        Session {
            cart: Cart::new(),
            category_filter: ALL_CATEGORIES.to_string(),
            search_query: String::new(),
            last_receipt: None,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}

// =============================================================================
// Shared Session Handle
// =============================================================================

/// Thread-safe session handle shared across services.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    inner: Arc<Mutex<Session>>,
}

impl SessionState {
    /// Creates a handle around a fresh session.
    pub fn new() -> Self {
        SessionState {
            inner: Arc::new(Mutex::new(Session::new())),
        }
    }

    /// Runs a closure with read access to the session.
    ///
    /// A poisoned mutex means a panic mid-mutation; the session is a
    /// plain value, so continuing with it is safe.
    pub fn with_session<T>(&self, f: impl FnOnce(&Session) -> T) -> T {
        let guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        f(&guard)
    }

    /// Runs a closure with exclusive mutable access to the session.
    pub fn with_session_mut<T>(&self, f: impl FnOnce(&mut Session) -> T) -> T {
        let mut guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut guard)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
