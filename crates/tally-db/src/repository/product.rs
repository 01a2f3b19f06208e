//! # Product Repository
//!
//! Database operations for the product catalog.
//!
//! ## Key Operations
//! - CRUD (insert from a validated draft, price edit, hard delete)
//! - Combined category + substring filtering for the catalog grid
//! - Delta-based stock adjustments
//!
//! ## Filtering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How Catalog Filtering Works                          │
//! │                                                                         │
//! │  User picks category "Drinks" and types "co"                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  WHERE (?1 IS NULL OR category = ?1)                                   │
//! │    AND name LIKE '%' || ?2 || '%'      ← case-insensitive (ASCII)      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │ Coca-Cola | Drinks │ ← MATCH!           │                           │
//! │  │ Coffee    | Drinks │ ← MATCH!           │                           │
//! │  │ Corn      | Food   │ ← wrong category   │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │                                                                         │
//! │  category = None means "All": the ?1 IS NULL arm short-circuits it.    │
//! │  An empty search matches everything ('%%').                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use tally_core::{Money, Product, ProductDraft};

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// // Filter the catalog
/// let results = repo.list_filtered(Some("Drinks"), "co").await?;
///
/// // Get by ID
/// let product = repo.get_by_id(42).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Inserts a new product from a validated draft.
    ///
    /// The store assigns the id (AUTOINCREMENT rowid) and both
    /// timestamps; the fully-populated row is read back and returned.
    ///
    /// ## Returns
    /// * `Ok(Product)` - Inserted product with its assigned id
    pub async fn insert(&self, draft: &ProductDraft) -> DbResult<Product> {
        debug!(name = %draft.name, "Inserting product");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO products (
                name, price_cents, stock, category, photo, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&draft.name)
        .bind(draft.price_cents)
        .bind(draft.stock)
        .bind(&draft.category)
        .bind(&draft.photo)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();

        // Read back so the caller sees exactly what was stored.
        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id))
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price_cents, stock, category, photo, created_at, updated_at
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Lists all products in creation order (id ascending).
    pub async fn list_all(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price_cents, stock, category, photo, created_at, updated_at
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Lists products matching a category and name substring.
    ///
    /// Both filters are conjunctive. `category = None` means no category
    /// filter; an empty `search` matches every name. Matching is
    /// case-insensitive for ASCII (SQLite LIKE semantics).
    ///
    /// ## Arguments
    /// * `category` - Exact category to match, or `None` for all
    /// * `search` - Name substring (already trimmed by the caller)
    pub async fn list_filtered(
        &self,
        category: Option<&str>,
        search: &str,
    ) -> DbResult<Vec<Product>> {
        debug!(category = ?category, search = %search, "Filtering products");

        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price_cents, stock, category, photo, created_at, updated_at
            FROM products
            WHERE (?1 IS NULL OR category = ?1)
              AND name LIKE '%' || ?2 || '%'
            ORDER BY id
            "#,
        )
        .bind(category)
        .bind(search)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Filter returned products");
        Ok(products)
    }

    /// Lists the distinct categories present in the catalog, sorted.
    pub async fn list_categories(&self) -> DbResult<Vec<String>> {
        let categories: Vec<String> =
            sqlx::query_scalar("SELECT DISTINCT category FROM products ORDER BY category")
                .fetch_all(&self.pool)
                .await?;

        Ok(categories)
    }

    /// Updates a product's price.
    ///
    /// ## Returns
    /// * `Ok(())` - Update successful
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn update_price(&self, id: i64, price: Money) -> DbResult<()> {
        debug!(id = %id, price_cents = %price.cents(), "Updating price");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE products
            SET price_cents = ?2, updated_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(price.cents())
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Adjusts a product's stock by a delta.
    ///
    /// Delta updates (`stock = stock + ?`) instead of absolute writes, so
    /// concurrent adjustments compose instead of clobbering each other.
    ///
    /// ## Arguments
    /// * `id` - Product ID
    /// * `delta` - Change in stock (negative for sales, positive for restocking)
    pub async fn adjust_stock(&self, id: i64, delta: i64) -> DbResult<()> {
        debug!(id = %id, delta = %delta, "Adjusting stock");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE products
            SET stock = stock + ?2, updated_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(delta)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Deletes a product.
    ///
    /// Hard delete: the row is gone. Historical sale items are unaffected
    /// because they carry their own name/price snapshots.
    ///
    /// ## Returns
    /// * `Ok(())` - Delete successful
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts total products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
