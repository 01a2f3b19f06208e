//! # Catalog Service
//!
//! Product management and the catalog grid: add, edit price, restock,
//! delete, filter, and add-to-cart.
//!
//! Validation happens here, before the database sees anything: drafts are
//! built through [`ProductDraft::new`], and the scalar edits (price,
//! restock amount, search query) run their validators first.

use tracing::info;

use crate::error::{AppError, AppResult};
use crate::session::Session;
use tally_core::{
    validation, CoreError, Money, Product, ProductDraft, ALL_CATEGORIES,
};
use tally_db::Database;

/// Service for catalog operations.
#[derive(Debug, Clone)]
pub struct CatalogService {
    db: Database,
}

impl CatalogService {
    /// Creates a new CatalogService.
    pub fn new(db: Database) -> Self {
        CatalogService { db }
    }

    /// Adds a product from a validated draft.
    pub async fn add_product(&self, draft: ProductDraft) -> AppResult<Product> {
        let product = self.db.products().insert(&draft).await?;
        info!(id = %product.id, name = %product.name, "Product added");
        Ok(product)
    }

    /// Changes a product's price. The new price must be strictly positive.
    pub async fn edit_price(&self, product_id: i64, price: Money) -> AppResult<()> {
        validation::validate_price_cents(price.cents()).map_err(CoreError::from)?;

        self.db.products().update_price(product_id, price).await?;
        info!(id = %product_id, price_cents = %price.cents(), "Price updated");
        Ok(())
    }

    /// Adds stock to a product. The amount must not be negative; zero is a
    /// permitted no-op.
    pub async fn restock(&self, product_id: i64, amount: i64) -> AppResult<()> {
        validation::validate_restock_amount(amount).map_err(CoreError::from)?;

        self.db.products().adjust_stock(product_id, amount).await?;
        info!(id = %product_id, amount = %amount, "Product restocked");
        Ok(())
    }

    /// Deletes a product from the catalog.
    ///
    /// Historical sales keep their snapshots; only the catalog row goes.
    pub async fn delete_product(&self, product_id: i64) -> AppResult<()> {
        self.db.products().delete(product_id).await?;
        info!(id = %product_id, "Product deleted");
        Ok(())
    }

    /// Lists products matching the session's category filter and search
    /// query, in creation order.
    pub async fn list_filtered(&self, session: &Session) -> AppResult<Vec<Product>> {
        let search =
            validation::validate_search_query(&session.search_query).map_err(CoreError::from)?;

        let category = if session.category_filter == ALL_CATEGORIES {
            None
        } else {
            Some(session.category_filter.as_str())
        };

        let products = self.db.products().list_filtered(category, &search).await?;
        Ok(products)
    }

    /// Lists the distinct categories in the catalog (for the filter bar).
    pub async fn list_categories(&self) -> AppResult<Vec<String>> {
        Ok(self.db.products().list_categories().await?)
    }

    /// Adds one unit of a product to the session's cart.
    ///
    /// Reads the product fresh so the stock ceiling reflects the current
    /// level, then delegates the business rules to the cart.
    pub async fn add_to_cart(&self, session: &mut Session, product_id: i64) -> AppResult<()> {
        let product = self
            .db
            .products()
            .get_by_id(product_id)
            .await?
            .ok_or(CoreError::ProductNotFound(product_id))?;

        session.cart.add(&product).map_err(AppError::Core)?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tally_db::DbConfig;

    async fn service() -> CatalogService {
        CatalogService::new(Database::new(DbConfig::in_memory()).await.unwrap())
    }

    fn draft(name: &str, price_cents: i64, stock: i64, category: &str) -> ProductDraft {
        ProductDraft::new(name, Money::from_cents(price_cents), stock, category, None).unwrap()
    }

    #[tokio::test]
    async fn edit_price_rejects_non_positive_without_mutation() {
        let catalog = service().await;
        let product = catalog.add_product(draft("Rice", 1000, 10, "Food")).await.unwrap();

        assert!(catalog.edit_price(product.id, Money::from_cents(0)).await.is_err());
        assert!(catalog.edit_price(product.id, Money::from_cents(-5)).await.is_err());

        let unchanged = catalog
            .db
            .products()
            .get_by_id(product.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(unchanged.price_cents, 1000);
    }

    #[tokio::test]
    async fn restock_rejects_negative_amount() {
        let catalog = service().await;
        let product = catalog.add_product(draft("Rice", 1000, 10, "Food")).await.unwrap();

        assert!(catalog.restock(product.id, -1).await.is_err());
        catalog.restock(product.id, 0).await.unwrap();
        catalog.restock(product.id, 5).await.unwrap();

        let after = catalog
            .db
            .products()
            .get_by_id(product.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(after.stock, 15);
    }

    #[tokio::test]
    async fn list_filtered_uses_session_filters() {
        let catalog = service().await;
        catalog.add_product(draft("Coca-Cola", 350, 24, "Drinks")).await.unwrap();
        catalog.add_product(draft("Corn", 200, 8, "Food")).await.unwrap();

        let mut session = Session::new();
        assert_eq!(catalog.list_filtered(&session).await.unwrap().len(), 2);

        session.category_filter = "Drinks".to_string();
        let drinks = catalog.list_filtered(&session).await.unwrap();
        assert_eq!(drinks.len(), 1);
        assert_eq!(drinks[0].name, "Coca-Cola");

        session.category_filter = ALL_CATEGORIES.to_string();
        session.search_query = "  corn  ".to_string();
        let corn = catalog.list_filtered(&session).await.unwrap();
        assert_eq!(corn.len(), 1);
        assert_eq!(corn[0].name, "Corn");
    }

    #[tokio::test]
    async fn add_to_cart_respects_stock() {
        let catalog = service().await;
        let product = catalog.add_product(draft("Rice", 1000, 1, "Food")).await.unwrap();

        let mut session = Session::new();
        catalog.add_to_cart(&mut session, product.id).await.unwrap();

        // Second unit exceeds the stock ceiling.
        assert!(catalog.add_to_cart(&mut session, product.id).await.is_err());
        assert_eq!(session.cart.total_quantity(), 1);

        // Unknown product id.
        assert!(catalog.add_to_cart(&mut session, 9999).await.is_err());
    }
}
