//! # Settings Repository
//!
//! Key-value store for shop settings (name, currency symbol, PIN).
//!
//! Plain strings both ways; typed interpretation lives in the app layer's
//! config service. Upsert semantics: setting an existing key overwrites it.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

/// Repository for the settings key-value store.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    pool: SqlitePool,
}

impl SettingsRepository {
    /// Creates a new SettingsRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SettingsRepository { pool }
    }

    /// Gets a setting value.
    ///
    /// ## Returns
    /// * `Ok(Some(value))` - Key exists
    /// * `Ok(None)` - Key never set (caller applies its default)
    pub async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let value: Option<String> =
            sqlx::query_scalar("SELECT value FROM settings WHERE key = ?1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        Ok(value)
    }

    /// Sets a setting value, overwriting any previous value.
    pub async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        debug!(key = %key, "Writing setting");

        sqlx::query(
            r#"
            INSERT INTO settings (key, value) VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Deletes a setting. Deleting a missing key is a no-op.
    pub async fn delete(&self, key: &str) -> DbResult<()> {
        sqlx::query("DELETE FROM settings WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn get_set_overwrite_delete() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.settings();

        assert!(repo.get("shop_name").await.unwrap().is_none());

        repo.set("shop_name", "My Store").await.unwrap();
        assert_eq!(repo.get("shop_name").await.unwrap().unwrap(), "My Store");

        repo.set("shop_name", "Corner Shop").await.unwrap();
        assert_eq!(repo.get("shop_name").await.unwrap().unwrap(), "Corner Shop");

        repo.delete("shop_name").await.unwrap();
        assert!(repo.get("shop_name").await.unwrap().is_none());

        // Deleting again is fine.
        repo.delete("shop_name").await.unwrap();
    }
}
