//! # Report Exporter
//!
//! Assembles the CSV exports and the daily revenue figure. The CSV shapes
//! themselves are built in tally-core; this service fetches the data,
//! refuses empty exports, and names the files.

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{AppError, AppResult};
use tally_core::{report, Money};
use tally_db::Database;

/// A ready-to-save CSV export: suggested filename plus content.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
}

/// Service for reports and exports.
#[derive(Debug, Clone)]
pub struct ReportExporter {
    db: Database,
}

impl ReportExporter {
    /// Creates a new ReportExporter.
    pub fn new(db: Database) -> Self {
        ReportExporter { db }
    }

    /// Exports the full sales ledger as CSV, one row per item sold, with
    /// an overall-total footer.
    ///
    /// ## Errors
    /// * [`AppError::NoSalesData`] - The ledger is empty
    pub async fn export_sales(&self) -> AppResult<CsvExport> {
        let ledger = self.db.sales().list_all_with_items().await?;

        if ledger.is_empty() {
            return Err(AppError::NoSalesData);
        }

        let content = report::sales_csv(&ledger)?;
        let filename = report::sales_export_filename(Utc::now().date_naive());

        info!(sales = ledger.len(), %filename, "Sales ledger exported");
        Ok(CsvExport { filename, content })
    }

    /// Exports the current stock levels as CSV with LOW/OK status labels.
    ///
    /// An empty catalog still exports (header only): unlike the sales
    /// export, "no products" is a state worth reporting.
    pub async fn export_stock(&self) -> AppResult<CsvExport> {
        let products = self.db.products().list_all().await?;

        let content = report::stock_csv(&products)?;
        let filename = report::stock_export_filename(Utc::now().date_naive());

        info!(products = products.len(), %filename, "Stock report exported");
        Ok(CsvExport { filename, content })
    }

    /// Revenue recorded since midnight (UTC) of the given instant's day.
    ///
    /// Takes `now` as a parameter so tests can pin the clock.
    pub async fn daily_revenue(&self, now: DateTime<Utc>) -> AppResult<Money> {
        let midnight = now.date_naive().and_time(NaiveTime::MIN).and_utc();
        let total = self.db.sales().total_since(midnight).await?;
        Ok(total)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
