//! # till-db: Database Layer for Till
//!
//! SQLite storage for the store ledger, accessed asynchronously through
//! sqlx, and the [`Ledger`] facade the presentation layer talks to.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Till Data Flow                                 │
//! │                                                                         │
//! │  Terminal menu ("Record sale")                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     till-db (THIS CRATE)                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │    Ledger     │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │  (ledger.rs)  │───►│ ProductRepo   │    │  (embedded)  │  │   │
//! │  │   │               │    │ CustomerRepo  │    │ 001_init.sql │  │   │
//! │  │   │ record_sale   │    │ SaleRepo      │    │              │  │   │
//! │  │   └───────┬───────┘    └───────┬───────┘    └──────────────┘  │   │
//! │  │           │    Database (pool.rs)                               │   │
//! │  │           └────────────────────┘                                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │   till.db  (products, customers, sales)                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database and ledger error types
//! - [`repository`] - Per-table repositories
//! - [`ledger`] - The operations the presentation layer calls
//!
//! ## Usage
//!
//! ```rust,ignore
//! use till_db::{Database, DbConfig, Ledger};
//!
//! let ledger = Ledger::new(Database::new(DbConfig::new("till.db")).await?);
//! ledger.add_product("A1", "Widget", "10.00").await?;
//! ledger.replenish_stock("A1", "5").await?;
//! let receipt = ledger.record_sale("A1", "3", "1234567890").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod ledger;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult, LedgerError, LedgerResult};
pub use ledger::Ledger;
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::customer::CustomerRepository;
pub use repository::product::ProductRepository;
pub use repository::sale::SaleRepository;
