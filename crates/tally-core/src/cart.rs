//! # Cart
//!
//! The in-memory cart for the one pending transaction.
//!
//! ## Stock Ceiling Invariant
//! ```text
//! add(product)                     line.stock_ceiling = product.stock
//!      │                                        │
//!      ▼                                        ▼
//! line.quantity  ≤  stock_ceiling   (always, for every line)
//! ```
//!
//! Every line snapshots the product (id, name, unit price) and records the
//! stock level observed at that moment as its *ceiling*. Quantity changes
//! are checked against the ceiling, never against the live store, so the
//! cart stays pure; a successful re-add of the same product refreshes the
//! ceiling from the product passed in. A rejected operation never mutates
//! the line, so the invariant survives stale stock reads too.
//!
//! Lines are addressed by index, in insertion order, matching how the cart
//! renders on screen.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Product;
use crate::MAX_CART_LINES;

// =============================================================================
// Cart Line
// =============================================================================

/// One product pending checkout: a snapshot plus a quantity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Product id, for the stock decrement at checkout.
    pub product_id: i64,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Unit price in minor units at time of adding (frozen). The sale
    /// commits at this price even if the catalog price changes meanwhile.
    pub unit_price_cents: i64,

    /// Stock observed when the line was created or last validated.
    /// Quantity may never exceed this.
    pub stock_ceiling: i64,

    /// Quantity pending checkout. Always positive.
    pub quantity: i64,
}

impl CartLine {
    fn from_product(product: &Product) -> Self {
        CartLine {
            product_id: product.id,
            name: product.name.clone(),
            unit_price_cents: product.price_cents,
            stock_ceiling: product.stock,
            quantity: 1,
        }
    }

    /// Line subtotal: unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.unit_price_cents).times(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// An ordered list of cart lines, cleared when the transaction completes
/// (receipt dismissed), is voided, or is explicitly abandoned.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// The lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Cart total: Σ line price × quantity. Pure, no side effects.
    pub fn total(&self) -> Money {
        self.lines.iter().map(|l| l.line_total()).sum()
    }

    /// Adds a product to the cart.
    ///
    /// ## Behavior
    /// - Product out of stock: rejected, cart unchanged.
    /// - Product already in the cart: quantity is incremented by 1 if the
    ///   product's *current* stock allows it, and the line's ceiling is
    ///   refreshed to that stock. A rejection leaves the line untouched,
    ///   ceiling included.
    /// - Otherwise a new quantity-1 line is appended.
    pub fn add(&mut self, product: &Product) -> CoreResult<()> {
        if product.is_out_of_stock() {
            return Err(CoreError::OutOfStock {
                name: product.name.clone(),
            });
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            // The caller just re-read the product, so this is the freshest
            // stock observation the line can be validated against.
            let requested = line.quantity + 1;
            if requested > product.stock {
                return Err(CoreError::InsufficientStock {
                    name: product.name.clone(),
                    available: product.stock,
                    requested,
                });
            }

            // Accepted: the fresh read becomes the line's new ceiling.
            line.stock_ceiling = product.stock;
            line.quantity = requested;
            return Ok(());
        }

        if self.lines.len() >= MAX_CART_LINES {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_LINES,
            });
        }

        self.lines.push(CartLine::from_product(product));
        Ok(())
    }

    /// Adjusts the quantity of the line at `index` by `delta`.
    ///
    /// ## Behavior
    /// - Resulting quantity ≤ 0: the line is removed.
    /// - Increment above the line's stock ceiling: rejected, quantity
    ///   unchanged. Decrements are never ceiling-checked; the cashier can
    ///   always reduce a line.
    /// - Otherwise applied.
    pub fn update_quantity(&mut self, index: usize, delta: i64) -> CoreResult<()> {
        let line = self
            .lines
            .get_mut(index)
            .ok_or(CoreError::LineNotFound { index })?;

        let requested = line.quantity + delta;

        if requested <= 0 {
            self.lines.remove(index);
            return Ok(());
        }

        if requested > line.quantity && requested > line.stock_ceiling {
            return Err(CoreError::InsufficientStock {
                name: line.name.clone(),
                available: line.stock_ceiling,
                requested,
            });
        }

        line.quantity = requested;
        Ok(())
    }

    /// Deletes the line at `index`.
    pub fn remove(&mut self, index: usize) -> CoreResult<CartLine> {
        if index >= self.lines.len() {
            return Err(CoreError::LineNotFound { index });
        }
        Ok(self.lines.remove(index))
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product(id: i64, price_cents: i64, stock: i64) -> Product {
        Product {
            id,
            name: format!("Product {}", id),
            price_cents,
            stock,
            category: "General".to_string(),
            photo: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    /// Every line's quantity stays within the ceiling captured when the
    /// line was created or last validated, whatever sequence of operations
    /// runs.
    fn assert_invariant(cart: &Cart) {
        for line in cart.lines() {
            assert!(line.quantity >= 1);
            assert!(line.quantity <= line.stock_ceiling);
        }
    }

    #[test]
    fn add_appends_quantity_one_line() {
        let mut cart = Cart::new();
        cart.add(&product(1, 1000, 10)).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity, 1);
        assert_eq!(cart.lines()[0].stock_ceiling, 10);
        assert_invariant(&cart);
    }

    #[test]
    fn add_same_product_increments() {
        let mut cart = Cart::new();
        let p = product(1, 1000, 10);
        cart.add(&p).unwrap();
        cart.add(&p).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
        assert_invariant(&cart);
    }

    #[test]
    fn add_rejects_out_of_stock() {
        let mut cart = Cart::new();
        let err = cart.add(&product(1, 1000, 0)).unwrap_err();
        assert!(matches!(err, CoreError::OutOfStock { .. }));
        assert!(cart.is_empty());

        let err = cart.add(&product(2, 1000, -3)).unwrap_err();
        assert!(matches!(err, CoreError::OutOfStock { .. }));
    }

    #[test]
    fn add_rejects_beyond_stock() {
        let mut cart = Cart::new();
        let p = product(1, 1000, 2);
        cart.add(&p).unwrap();
        cart.add(&p).unwrap();

        let err = cart.add(&p).unwrap_err();
        assert!(matches!(err, CoreError::InsufficientStock { available: 2, requested: 3, .. }));
        assert_eq!(cart.lines()[0].quantity, 2);
        assert_invariant(&cart);
    }

    #[test]
    fn re_add_refreshes_ceiling_after_restock() {
        let mut cart = Cart::new();
        let mut p = product(1, 1000, 1);
        cart.add(&p).unwrap();
        assert!(cart.add(&p).is_err());

        // A restock happened; the caller re-reads the product and re-adds.
        p.stock = 3;
        cart.add(&p).unwrap();
        assert_eq!(cart.lines()[0].quantity, 2);
        assert_eq!(cart.lines()[0].stock_ceiling, 3);
        assert_invariant(&cart);
    }

    #[test]
    fn rejected_re_add_leaves_line_untouched() {
        let mut cart = Cart::new();
        let mut p = product(1, 1000, 5);
        for _ in 0..5 {
            cart.add(&p).unwrap();
        }

        // Stock dropped below the line's quantity (another terminal sold
        // some); the rejection must not drag the ceiling down with it.
        p.stock = 2;
        let err = cart.add(&p).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientStock { available: 2, requested: 6, .. }
        ));
        assert_eq!(cart.lines()[0].quantity, 5);
        assert_eq!(cart.lines()[0].stock_ceiling, 5);
        assert_invariant(&cart);
    }

    #[test]
    fn decrement_allowed_after_stock_drop() {
        let mut cart = Cart::new();
        let mut p = product(1, 1000, 5);
        for _ in 0..5 {
            cart.add(&p).unwrap();
        }
        p.stock = 2;
        let _ = cart.add(&p); // rejected

        // Reducing the line must always work, whatever the stock did.
        cart.update_quantity(0, -1).unwrap();
        assert_eq!(cart.lines()[0].quantity, 4);
        cart.update_quantity(0, -3).unwrap();
        assert_eq!(cart.lines()[0].quantity, 1);
        assert_invariant(&cart);
    }

    #[test]
    fn update_quantity_applies_delta() {
        let mut cart = Cart::new();
        cart.add(&product(1, 1000, 10)).unwrap();

        cart.update_quantity(0, 1).unwrap();
        assert_eq!(cart.lines()[0].quantity, 2);

        cart.update_quantity(0, -1).unwrap();
        assert_eq!(cart.lines()[0].quantity, 1);
        assert_invariant(&cart);
    }

    #[test]
    fn update_quantity_to_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add(&product(1, 1000, 10)).unwrap();

        cart.update_quantity(0, -1).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn update_quantity_rejects_beyond_ceiling() {
        let mut cart = Cart::new();
        cart.add(&product(1, 1000, 3)).unwrap();

        let err = cart.update_quantity(0, 5).unwrap_err();
        assert!(matches!(err, CoreError::InsufficientStock { .. }));
        assert_eq!(cart.lines()[0].quantity, 1);
        assert_invariant(&cart);
    }

    #[test]
    fn update_quantity_unknown_index() {
        let mut cart = Cart::new();
        let err = cart.update_quantity(0, 1).unwrap_err();
        assert!(matches!(err, CoreError::LineNotFound { index: 0 }));
    }

    #[test]
    fn remove_deletes_line() {
        let mut cart = Cart::new();
        cart.add(&product(1, 1000, 10)).unwrap();
        cart.add(&product(2, 500, 4)).unwrap();

        let removed = cart.remove(0).unwrap();
        assert_eq!(removed.product_id, 1);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].product_id, 2);

        assert!(cart.remove(5).is_err());
    }

    #[test]
    fn total_sums_line_totals() {
        let mut cart = Cart::new();
        cart.add(&product(1, 1000, 10)).unwrap();
        cart.update_quantity(0, 1).unwrap();
        cart.add(&product(2, 250, 4)).unwrap();

        assert_eq!(cart.total().cents(), 2250);
        assert_eq!(cart.total_quantity(), 3);
    }

    #[test]
    fn clear_empties_cart() {
        let mut cart = Cart::new();
        cart.add(&product(1, 1000, 10)).unwrap();
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Money::zero());
    }

    #[test]
    fn mixed_sequence_preserves_invariant() {
        let mut cart = Cart::new();
        let a = product(1, 1000, 4);
        let b = product(2, 300, 2);

        cart.add(&a).unwrap();
        cart.add(&b).unwrap();
        cart.add(&a).unwrap();
        let _ = cart.update_quantity(0, 10); // rejected
        cart.update_quantity(1, 1).unwrap();
        let _ = cart.update_quantity(1, 5); // rejected
        cart.update_quantity(0, -1).unwrap();
        assert_invariant(&cart);

        cart.update_quantity(1, -5).unwrap(); // removes line b
        assert_eq!(cart.len(), 1);
        assert_invariant(&cart);
    }
}
