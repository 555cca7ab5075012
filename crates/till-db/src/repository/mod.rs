//! # Repository Module
//!
//! One repository per table of the ledger.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Ledger operation                                                      │
//! │       │                                                                 │
//! │       │  db.products().upsert("A1", "Widget", price)                   │
//! │       ▼                                                                 │
//! │  ProductRepository / CustomerRepository / SaleRepository               │
//! │       │                                                                 │
//! │       │  SQL                                                            │
//! │       ▼                                                                 │
//! │  SQLite                                                                │
//! │                                                                         │
//! │  Each module also exposes crate-private functions over a bare          │
//! │  connection; the sale transaction calls those with its own handle.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Catalog upsert, stock deltas
//! - [`CustomerRepository`](customer::CustomerRepository) - Registry upsert and lookup
//! - [`SaleRepository`](sale::SaleRepository) - Sales log listing and purge

pub mod customer;
pub mod product;
pub mod sale;
