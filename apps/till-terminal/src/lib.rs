//! # till-terminal: Front Desk for Till
//!
//! A line-oriented shell over the store ledger. It owns no business rules:
//! every form is forwarded to [`till_db::Ledger`] and the outcome printed.
//!
//! ## Application Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           Till Terminal                                 │
//! │                                                                         │
//! │  main.rs ────► Tokio runtime                                           │
//! │                                                                         │
//! │  lib.rs ─────► Logging, config, ledger, shell                          │
//! │                                                                         │
//! │  shell.rs ───► Menu loop over stdin/stdout                             │
//! │                                                                         │
//! │  commands/ ──► One function per form                                   │
//! │    ├── product.rs   add_product, replenish_stock, list_products        │
//! │    ├── customer.rs  register_customer, list_customers                  │
//! │    └── sale.rs      record_sale, day_book, purge_sales                 │
//! │                                                                         │
//! │  state/ ─────► LedgerState, ConfigState                                │
//! │                                                                         │
//! │  error.rs ───► ApiError { code, message }                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod shell;
pub mod state;

use std::process::ExitCode;
use tokio::io::BufReader;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use shell::Shell;
use state::{ConfigState, LedgerState};
use till_db::{DbConfig, Ledger};

/// Runs the front desk until the operator quits.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, writing to stderr             │
/// │     • Default: info,till=debug,sqlx=warn; override with RUST_LOG        │
/// │                                                                         │
/// │  2. Read Configuration ───────────────────────────────────────────────► │
/// │     • TILL_STORE_NAME, TILL_DB_PATH                                     │
/// │                                                                         │
/// │  3. Open the Ledger ──────────────────────────────────────────────────► │
/// │     • SQLite with WAL mode                                              │
/// │     • Embedded schema migration                                         │
/// │     • Failure here is the only fatal error                              │
/// │                                                                         │
/// │  4. Menu Loop ────────────────────────────────────────────────────────► │
/// │     • One action at a time until "0" or end of input                    │
/// │                                                                         │
/// │  5. Close the pool                                                      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> ExitCode {
    init_tracing();

    info!("Starting Till");

    let config = ConfigState::from_env();

    let ledger = match open_ledger(&config).await {
        Ok(ledger) => LedgerState::new(ledger),
        Err(e) => {
            error!(error = %e, "Could not open the ledger");
            eprintln!("till: could not open the ledger: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut shell = Shell::new(
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        ledger.clone(),
        config,
    );
    let result = shell.run().await;

    ledger.inner().close().await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Terminal I/O failed");
            ExitCode::FAILURE
        }
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=till_db=trace` - Trace for the database crate only
/// - Default: `info,till=debug,sqlx=warn`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,till=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolves the database path and opens the ledger there.
async fn open_ledger(config: &ConfigState) -> Result<Ledger, Box<dyn std::error::Error>> {
    let db_path = config.resolve_database_path()?;
    info!(?db_path, "Database path determined");

    let ledger = Ledger::open(DbConfig::new(db_path)).await?;

    info!("Database connected and migrations applied");
    Ok(ledger)
}
