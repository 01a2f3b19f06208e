//! # Repository Module
//!
//! Database repository implementations for Tally POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  Service layer (tally-app)                                             │
//! │       │                                                                 │
//! │       │  db.products().list_filtered(Some("Drinks"), "co")             │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── insert(&self, draft)                                              │
//! │  ├── list_filtered(&self, category, search)                            │
//! │  ├── update_price(&self, id, price)                                    │
//! │  └── adjust_stock(&self, id, delta)                                    │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Clean separation of concerns                                        │
//! │  • SQL is isolated in one place                                        │
//! │  • Multi-record writes (checkout, void) own their transactions         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`] - Catalog CRUD and filtering
//! - [`SaleRepository`] - Checkout, void, and ledger queries
//! - [`SettingsRepository`] - Key-value store settings

pub mod product;
pub mod sale;
pub mod settings;

pub use product::ProductRepository;
pub use sale::SaleRepository;
pub use settings::SettingsRepository;
