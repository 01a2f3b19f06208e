//! # Database Migrations
//!
//! Embedded SQL migrations for Tally POS.
//!
//! The `sqlx::migrate!()` macro embeds every file from `migrations/` into
//! the binary at compile time; applied migrations are tracked in the
//! `_sqlx_migrations` table, so running them is idempotent.
//!
//! ## Adding New Migrations
//!
//! 1. Create a new file under `crates/tally-db/migrations/`
//! 2. Name format: `NNN_description.sql` (e.g., `002_add_customers.sql`)
//! 3. Never modify existing migrations - always add new ones

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Runs all pending database migrations, in filename order, each in its
/// own transaction. Safe to run on every startup.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    info!("Checking for pending migrations");

    MIGRATOR.run(pool).await?;

    info!("All migrations applied");
    Ok(())
}
