//! # Sale Repository
//!
//! Database operations for the sales ledger: checkout, void, and queries.
//!
//! ## Checkout Atomicity
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Atomic Checkout                                     │
//! │                                                                         │
//! │  BEGIN TRANSACTION                                                      │
//! │    for each cart line:                                                  │
//! │      SELECT stock  ── product gone? ──► ROLLBACK (nothing changed)     │
//! │      UPDATE products SET stock = stock - qty                           │
//! │    INSERT INTO sales (created_at, total_cents)                          │
//! │    INSERT INTO sale_items (… snapshot per line …)                       │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  Either every stock decrement and the sale row land together,          │
//! │  or none of them do. There is no partial-failure state where           │
//! │  stock moved but the ledger has no record.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Void is the mirror image: restore stock per stored item, delete the
//! items, delete the sale, all in one transaction. Items whose product was
//! deleted since the sale skip the restore (logged, not fatal).

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};
use tally_core::{CartLine, Money, Sale, SaleItem};

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Records a checkout: decrements stock for every cart line and writes
    /// the sale plus its item snapshots, all in one transaction.
    ///
    /// ## Arguments
    /// * `lines` - Non-empty cart lines (the caller handles the empty case)
    /// * `total` - Sale total, already computed by the cart
    ///
    /// ## Returns
    /// The persisted sale and its items, ids assigned by the store.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - A line's product was deleted since it was
    ///   added to the cart. The whole checkout rolls back.
    pub async fn record_checkout(
        &self,
        lines: &[CartLine],
        total: Money,
    ) -> DbResult<(Sale, Vec<SaleItem>)> {
        debug!(lines = lines.len(), total_cents = total.cents(), "Recording checkout");

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        for line in lines {
            // Existence check first: UPDATE alone can't distinguish a
            // deleted product from a zero-row fluke.
            let stock: Option<i64> =
                sqlx::query_scalar("SELECT stock FROM products WHERE id = ?1")
                    .bind(line.product_id)
                    .fetch_optional(&mut *tx)
                    .await?;

            if stock.is_none() {
                return Err(DbError::not_found("Product", line.product_id));
            }

            sqlx::query("UPDATE products SET stock = stock - ?2, updated_at = ?3 WHERE id = ?1")
                .bind(line.product_id)
                .bind(line.quantity)
                .bind(now)
                .execute(&mut *tx)
                .await?;
        }

        let result = sqlx::query("INSERT INTO sales (created_at, total_cents) VALUES (?1, ?2)")
            .bind(now)
            .bind(total.cents())
            .execute(&mut *tx)
            .await?;

        let sale_id = result.last_insert_rowid();
        let mut items = Vec::with_capacity(lines.len());

        for line in lines {
            let result = sqlx::query(
                r#"
                INSERT INTO sale_items (sale_id, product_id, name, unit_price_cents, quantity)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(sale_id)
            .bind(line.product_id)
            .bind(&line.name)
            .bind(line.unit_price_cents)
            .bind(line.quantity)
            .execute(&mut *tx)
            .await?;

            items.push(SaleItem {
                id: result.last_insert_rowid(),
                sale_id,
                product_id: line.product_id,
                name: line.name.clone(),
                unit_price_cents: line.unit_price_cents,
                quantity: line.quantity,
            });
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let sale = Sale {
            id: sale_id,
            created_at: now,
            total_cents: total.cents(),
        };

        debug!(sale_id = %sale_id, "Checkout committed");
        Ok((sale, items))
    }

    /// Voids a sale: restores stock for every item, then deletes the items
    /// and the sale row, all in one transaction.
    ///
    /// Items whose product has since been deleted skip the stock restore
    /// (logged at warn); the void itself still succeeds.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - No sale with this id (already voided?)
    pub async fn void_sale(&self, sale_id: i64) -> DbResult<()> {
        debug!(sale_id = %sale_id, "Voiding sale");

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM sales WHERE id = ?1")
            .bind(sale_id)
            .fetch_optional(&mut *tx)
            .await?;

        if exists.is_none() {
            return Err(DbError::not_found("Sale", sale_id));
        }

        let items = sqlx::query_as::<_, SaleItem>(
            r#"
            SELECT id, sale_id, product_id, name, unit_price_cents, quantity
            FROM sale_items
            WHERE sale_id = ?1
            ORDER BY id
            "#,
        )
        .bind(sale_id)
        .fetch_all(&mut *tx)
        .await?;

        for item in &items {
            let result =
                sqlx::query("UPDATE products SET stock = stock + ?2, updated_at = ?3 WHERE id = ?1")
                    .bind(item.product_id)
                    .bind(item.quantity)
                    .bind(now)
                    .execute(&mut *tx)
                    .await?;

            if result.rows_affected() == 0 {
                warn!(
                    product_id = %item.product_id,
                    name = %item.name,
                    "Product deleted since sale; skipping stock restore"
                );
            }
        }

        sqlx::query("DELETE FROM sale_items WHERE sale_id = ?1")
            .bind(sale_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM sales WHERE id = ?1")
            .bind(sale_id)
            .execute(&mut *tx)
            .await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        debug!(sale_id = %sale_id, "Sale voided");
        Ok(())
    }

    /// Gets a sale by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>(
            "SELECT id, created_at, total_cents FROM sales WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Gets all items for a sale, in insertion order.
    pub async fn get_items(&self, sale_id: i64) -> DbResult<Vec<SaleItem>> {
        let items = sqlx::query_as::<_, SaleItem>(
            r#"
            SELECT id, sale_id, product_id, name, unit_price_cents, quantity
            FROM sale_items
            WHERE sale_id = ?1
            ORDER BY id
            "#,
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Lists every sale with its items, in chronological (id) order.
    ///
    /// Used by the sales export. Two queries, stitched in memory; the
    /// ledger for a single shop stays small enough that this is fine.
    pub async fn list_all_with_items(&self) -> DbResult<Vec<(Sale, Vec<SaleItem>)>> {
        let sales = sqlx::query_as::<_, Sale>(
            "SELECT id, created_at, total_cents FROM sales ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        let all_items = sqlx::query_as::<_, SaleItem>(
            r#"
            SELECT id, sale_id, product_id, name, unit_price_cents, quantity
            FROM sale_items
            ORDER BY sale_id, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut result: Vec<(Sale, Vec<SaleItem>)> =
            sales.into_iter().map(|s| (s, Vec::new())).collect();

        for item in all_items {
            if let Some((_, items)) = result.iter_mut().find(|(s, _)| s.id == item.sale_id) {
                items.push(item);
            }
        }

        Ok(result)
    }

    /// Sums sale totals recorded at or after the given instant.
    ///
    /// Used for the daily revenue figure (caller passes local midnight).
    pub async fn total_since(&self, since: DateTime<Utc>) -> DbResult<Money> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(total_cents), 0) FROM sales WHERE created_at >= ?1",
        )
        .bind(since)
        .fetch_one(&self.pool)
        .await?;

        Ok(Money::from_cents(total))
    }

    /// Counts sales in the ledger (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};
    use chrono::{Duration, Utc};
    use tally_core::{Cart, Money, ProductDraft};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn seed_product(db: &Database, name: &str, price_cents: i64, stock: i64) -> i64 {
        let draft =
            ProductDraft::new(name, Money::from_cents(price_cents), stock, "Food", None).unwrap();
        db.products().insert(&draft).await.unwrap().id
    }

    #[tokio::test]
    async fn checkout_decrements_stock_and_writes_ledger() {
        let db = test_db().await;
        let rice_id = seed_product(&db, "Rice", 1000, 10).await;

        let rice = db.products().get_by_id(rice_id).await.unwrap().unwrap();
        let mut cart = Cart::new();
        cart.add(&rice).unwrap();
        cart.add(&rice).unwrap();

        let (sale, items) = db
            .sales()
            .record_checkout(cart.lines(), cart.total())
            .await
            .unwrap();

        assert_eq!(sale.total_cents, 2000);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[0].name, "Rice");

        let after = db.products().get_by_id(rice_id).await.unwrap().unwrap();
        assert_eq!(after.stock, 8);

        let stored = db.sales().get_by_id(sale.id).await.unwrap().unwrap();
        assert_eq!(stored.total_cents, 2000);
    }

    #[tokio::test]
    async fn checkout_rolls_back_when_product_deleted() {
        let db = test_db().await;
        let rice_id = seed_product(&db, "Rice", 1000, 10).await;
        let beans_id = seed_product(&db, "Beans", 500, 6).await;

        let rice = db.products().get_by_id(rice_id).await.unwrap().unwrap();
        let beans = db.products().get_by_id(beans_id).await.unwrap().unwrap();

        let mut cart = Cart::new();
        cart.add(&rice).unwrap();
        cart.add(&beans).unwrap();

        // Beans disappears between add-to-cart and checkout.
        db.products().delete(beans_id).await.unwrap();

        let err = db.sales().record_checkout(cart.lines(), cart.total()).await;
        assert!(err.is_err());

        // Rice stock untouched, no sale recorded.
        let rice_after = db.products().get_by_id(rice_id).await.unwrap().unwrap();
        assert_eq!(rice_after.stock, 10);
        assert_eq!(db.sales().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn void_restores_stock_and_deletes_sale() {
        let db = test_db().await;
        let rice_id = seed_product(&db, "Rice", 1000, 10).await;

        let rice = db.products().get_by_id(rice_id).await.unwrap().unwrap();
        let mut cart = Cart::new();
        cart.add(&rice).unwrap();
        cart.add(&rice).unwrap();

        let (sale, _) = db
            .sales()
            .record_checkout(cart.lines(), cart.total())
            .await
            .unwrap();

        db.sales().void_sale(sale.id).await.unwrap();

        let after = db.products().get_by_id(rice_id).await.unwrap().unwrap();
        assert_eq!(after.stock, 10);
        assert!(db.sales().get_by_id(sale.id).await.unwrap().is_none());
        assert!(db.sales().get_items(sale.id).await.unwrap().is_empty());

        // Voiding twice fails: the sale is gone.
        assert!(db.sales().void_sale(sale.id).await.is_err());
    }

    #[tokio::test]
    async fn void_skips_restore_for_deleted_product() {
        let db = test_db().await;
        let rice_id = seed_product(&db, "Rice", 1000, 10).await;

        let rice = db.products().get_by_id(rice_id).await.unwrap().unwrap();
        let mut cart = Cart::new();
        cart.add(&rice).unwrap();

        let (sale, _) = db
            .sales()
            .record_checkout(cart.lines(), cart.total())
            .await
            .unwrap();

        db.products().delete(rice_id).await.unwrap();

        // Void still succeeds; there is simply nothing to restore into.
        db.sales().void_sale(sale.id).await.unwrap();
        assert!(db.sales().get_by_id(sale.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_all_with_items_is_chronological() {
        let db = test_db().await;
        let rice_id = seed_product(&db, "Rice", 1000, 10).await;
        let rice = db.products().get_by_id(rice_id).await.unwrap().unwrap();

        for _ in 0..3 {
            let mut cart = Cart::new();
            cart.add(&rice).unwrap();
            db.sales()
                .record_checkout(cart.lines(), cart.total())
                .await
                .unwrap();
        }

        let ledger = db.sales().list_all_with_items().await.unwrap();
        assert_eq!(ledger.len(), 3);
        assert!(ledger.windows(2).all(|w| w[0].0.id < w[1].0.id));
        assert!(ledger.iter().all(|(_, items)| items.len() == 1));
    }

    #[tokio::test]
    async fn total_since_sums_recent_sales_only() {
        let db = test_db().await;
        let rice_id = seed_product(&db, "Rice", 1000, 10).await;
        let rice = db.products().get_by_id(rice_id).await.unwrap().unwrap();

        let mut cart = Cart::new();
        cart.add(&rice).unwrap();
        db.sales()
            .record_checkout(cart.lines(), cart.total())
            .await
            .unwrap();

        let hour_ago = Utc::now() - Duration::hours(1);
        assert_eq!(db.sales().total_since(hour_ago).await.unwrap().cents(), 1000);

        let tomorrow = Utc::now() + Duration::days(1);
        assert_eq!(db.sales().total_since(tomorrow).await.unwrap().cents(), 0);
    }
}
