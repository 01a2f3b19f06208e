//! # Checkout Engine
//!
//! Commits the cart to the ledger and manages the receipt lifecycle.
//!
//! ## Checkout Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Checkout Lifecycle                                 │
//! │                                                                         │
//! │  1. CHECKOUT                                                            │
//! │     └── cart lines + total ──► record_checkout() (one transaction)     │
//! │     └── session.last_receipt = Receipt { sale_id, lines, total }       │
//! │     └── cart stays intact behind the receipt view                      │
//! │                                                                         │
//! │  2a. CLOSE RECEIPT (normal path)                                       │
//! │     └── cart cleared, receipt cleared, ready for the next customer     │
//! │                                                                         │
//! │  2b. VOID (mistake path)                                               │
//! │     └── void_sale(receipt.sale_id) (one transaction)                   │
//! │     └── stock restored, sale deleted, cart and receipt cleared         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart is deliberately NOT cleared at checkout: while the receipt is
//! open the cashier can still void, and the void needs nothing from the
//! cart (it works off the stored sale items), but clearing on close keeps
//! the two paths symmetrical with what the cashier sees.

use tracing::info;

use crate::error::{AppError, AppResult};
use crate::session::{Receipt, Session};
use tally_db::Database;

/// Service for checkout and void operations.
#[derive(Debug, Clone)]
pub struct CheckoutEngine {
    db: Database,
}

impl CheckoutEngine {
    /// Creates a new CheckoutEngine.
    pub fn new(db: Database) -> Self {
        CheckoutEngine { db }
    }

    /// Commits the session's cart as a sale.
    ///
    /// Stock decrements, the sale row, and the item snapshots land in one
    /// database transaction. On success the receipt is stored on the
    /// session (and returned); an empty cart is a no-op returning `None`.
    pub async fn checkout(&self, session: &mut Session) -> AppResult<Option<Receipt>> {
        if session.cart.is_empty() {
            return Ok(None);
        }

        let (sale, items) = self
            .db
            .sales()
            .record_checkout(session.cart.lines(), session.cart.total())
            .await?;

        info!(
            sale_id = %sale.id,
            total_cents = %sale.total_cents,
            lines = items.len(),
            "Checkout complete"
        );

        let receipt = Receipt::from_sale(&sale, &items);
        session.last_receipt = Some(receipt.clone());
        Ok(Some(receipt))
    }

    /// Closes the open receipt: clears the cart and the receipt so the
    /// terminal is ready for the next customer. Safe to call with no
    /// receipt open.
    pub fn close_receipt(&self, session: &mut Session) {
        session.cart.clear();
        session.last_receipt = None;
    }

    /// Voids the sale on the open receipt.
    ///
    /// Restores stock and deletes the sale in one transaction, then resets
    /// the session like [`close_receipt`](Self::close_receipt).
    ///
    /// ## Errors
    /// * [`AppError::NoReceipt`] - No receipt is open on this session
    pub async fn void_transaction(&self, session: &mut Session) -> AppResult<()> {
        let sale_id = session
            .last_receipt
            .as_ref()
            .map(|r| r.sale_id)
            .ok_or(AppError::NoReceipt)?;

        self.db.sales().void_sale(sale_id).await?;

        info!(sale_id = %sale_id, "Sale voided");

        session.cart.clear();
        session.last_receipt = None;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogService;
    use tally_core::{Money, ProductDraft};
    use tally_db::DbConfig;

    async fn setup() -> (Database, CatalogService, CheckoutEngine) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        (
            db.clone(),
            CatalogService::new(db.clone()),
            CheckoutEngine::new(db),
        )
    }

    fn draft(name: &str, price_cents: i64, stock: i64) -> ProductDraft {
        ProductDraft::new(name, Money::from_cents(price_cents), stock, "Food", None).unwrap()
    }

    #[tokio::test]
    async fn empty_cart_checkout_is_a_noop() {
        let (db, _, engine) = setup().await;
        let mut session = Session::new();

        let receipt = engine.checkout(&mut session).await.unwrap();
        assert!(receipt.is_none());
        assert!(session.last_receipt.is_none());
        assert_eq!(db.sales().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn checkout_stores_receipt_and_keeps_cart() {
        let (_, catalog, engine) = setup().await;
        let product = catalog.add_product(draft("Rice", 1000, 10)).await.unwrap();

        let mut session = Session::new();
        catalog.add_to_cart(&mut session, product.id).await.unwrap();
        catalog.add_to_cart(&mut session, product.id).await.unwrap();

        let receipt = engine.checkout(&mut session).await.unwrap().unwrap();
        assert_eq!(receipt.total_cents, 2000);
        assert_eq!(receipt.lines.len(), 1);

        // Cart survives until the receipt is closed.
        assert!(!session.cart.is_empty());
        assert!(session.last_receipt.is_some());

        engine.close_receipt(&mut session);
        assert!(session.cart.is_empty());
        assert!(session.last_receipt.is_none());
    }

    #[tokio::test]
    async fn void_without_receipt_errors() {
        let (_, _, engine) = setup().await;
        let mut session = Session::new();

        let err = engine.void_transaction(&mut session).await;
        assert!(matches!(err, Err(AppError::NoReceipt)));
    }

    #[tokio::test]
    async fn void_restores_stock_and_resets_session() {
        let (db, catalog, engine) = setup().await;
        let product = catalog.add_product(draft("Rice", 1000, 10)).await.unwrap();

        let mut session = Session::new();
        catalog.add_to_cart(&mut session, product.id).await.unwrap();
        catalog.add_to_cart(&mut session, product.id).await.unwrap();
        let receipt = engine.checkout(&mut session).await.unwrap().unwrap();

        engine.void_transaction(&mut session).await.unwrap();

        let after = db.products().get_by_id(product.id).await.unwrap().unwrap();
        assert_eq!(after.stock, 10);
        assert!(db.sales().get_by_id(receipt.sale_id).await.unwrap().is_none());
        assert!(session.cart.is_empty());
        assert!(session.last_receipt.is_none());

        // The receipt is gone: a second void has nothing to target.
        assert!(matches!(
            engine.void_transaction(&mut session).await,
            Err(AppError::NoReceipt)
        ));
    }
}
