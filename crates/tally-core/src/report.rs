//! # Report Building
//!
//! Pure CSV builders for the two exports: the detailed sales ledger and
//! the stock report. Callers load the records, these functions serialize
//! them; no I/O happens here.
//!
//! ## Sales export shape
//! ```text
//! Date,Time,Item Name,Item Price,Quantity,Subtotal
//! 2026-08-27,14:03,Rice,1000,2,2000
//! 2026-08-27,14:10,Beans,500,1,500
//!
//! ,,,OVERALL TOTAL,,2500
//! ```
//!
//! One row per item line, a blank separator, then a grand-total row.
//! Amounts are minor units, matching the stored values. Names containing
//! commas or quotes are handled by the csv writer's quoting.

use chrono::NaiveDate;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Product, Sale, SaleItem};

/// Sales export header.
const SALES_HEADER: [&str; 6] = ["Date", "Time", "Item Name", "Item Price", "Quantity", "Subtotal"];

/// Stock export header.
const STOCK_HEADER: [&str; 4] = ["Product", "Price", "Stock", "Status"];

/// Serializes the sales ledger to CSV text, one row per item line, with a
/// trailing grand-total row.
///
/// Sales without item snapshots contribute no rows (and nothing to the
/// grand total); the canonical schema always stores snapshots, so this
/// only matters for an empty item list.
pub fn sales_csv(sales: &[(Sale, Vec<SaleItem>)]) -> CoreResult<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());

    wtr.write_record(SALES_HEADER)
        .map_err(|e| CoreError::Report(e.to_string()))?;

    let mut grand_total = Money::zero();

    for (sale, items) in sales {
        let date = sale.created_at.format("%Y-%m-%d").to_string();
        let time = sale.created_at.format("%H:%M").to_string();

        for item in items {
            let subtotal = item.line_total();
            grand_total += subtotal;

            wtr.write_record(&[
                date.clone(),
                time.clone(),
                item.name.clone(),
                item.unit_price_cents.to_string(),
                item.quantity.to_string(),
                subtotal.cents().to_string(),
            ])
            .map_err(|e| CoreError::Report(e.to_string()))?;
        }
    }

    // The blank separator is a raw newline, not a csv record: the writer
    // would render an empty one-field record as `""`.
    let mut out = into_string(wtr)?;
    out.push('\n');

    let mut footer = csv::Writer::from_writer(Vec::new());
    footer
        .write_record(&[
            String::new(),
            String::new(),
            String::new(),
            "OVERALL TOTAL".to_string(),
            String::new(),
            grand_total.cents().to_string(),
        ])
        .map_err(|e| CoreError::Report(e.to_string()))?;
    out.push_str(&into_string(footer)?);

    Ok(out)
}

/// Serializes the product list to the stock report: one row per product
/// with a derived LOW/OK status label.
pub fn stock_csv(products: &[Product]) -> CoreResult<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());

    wtr.write_record(STOCK_HEADER)
        .map_err(|e| CoreError::Report(e.to_string()))?;

    for p in products {
        wtr.write_record(&[
            p.name.clone(),
            p.price_cents.to_string(),
            p.stock.to_string(),
            p.stock_status().label().to_string(),
        ])
        .map_err(|e| CoreError::Report(e.to_string()))?;
    }

    into_string(wtr)
}

/// Export filename for the sales ledger, embedding the export date.
pub fn sales_export_filename(date: NaiveDate) -> String {
    format!("Detailed_Sales_{}.csv", date.format("%Y-%m-%d"))
}

/// Export filename for the stock report, embedding the export date.
pub fn stock_export_filename(date: NaiveDate) -> String {
    format!("Stock_Report_{}.csv", date.format("%Y-%m-%d"))
}

fn into_string(wtr: csv::Writer<Vec<u8>>) -> CoreResult<String> {
    let bytes = wtr
        .into_inner()
        .map_err(|e| CoreError::Report(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| CoreError::Report(e.to_string()))
}

// =============================================================================
// Unit Tests
// =============================================================================
