//! # tally-app: Application Services for Tally POS
//!
//! The orchestration layer a UI shell drives. Owns the in-memory session
//! (cart, filters, last receipt) and composes tally-core logic with
//! tally-db persistence into the operations the terminal exposes.
//!
//! ## Service Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         tally-app                                       │
//! │                                                                         │
//! │  Session (Arc<Mutex>)      in-memory cart, filters, last receipt        │
//! │        │                                                                │
//! │  ┌─────┴──────────┬─────────────────┬──────────────┬────────────────┐  │
//! │  ▼                ▼                 ▼              ▼                │  │
//! │  CatalogService   CheckoutEngine    ReportExporter ConfigService    │  │
//! │  add/edit/restock checkout/void     CSV exports    settings + PIN   │  │
//! │  delete/filter    close receipt     daily revenue                   │  │
//! │  add-to-cart                                                        │  │
//! │        │                │                 │              │          │  │
//! │        └────────────────┴────────┬────────┴──────────────┘          │  │
//! │                                  ▼                                  │  │
//! │                             tally-db                                │  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod logging;
pub mod report;
pub mod session;

pub use catalog::CatalogService;
pub use checkout::CheckoutEngine;
pub use config::{AppConfig, ConfigService};
pub use error::{AppError, AppResult};
pub use report::{CsvExport, ReportExporter};
pub use session::{Receipt, ReceiptLine, Session, SessionState};
