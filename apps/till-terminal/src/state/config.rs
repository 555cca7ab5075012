//! # Configuration State
//!
//! Store settings read once at startup.
//!
//! ## Environment Variables
//! - `TILL_DB_PATH`: use this ledger file instead of the platform default
//! - `TILL_STORE_NAME`: name shown in the menu header

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::PathBuf;
use till_core::Money;

/// Ledger file name inside the platform data directory.
const DB_FILE_NAME: &str = "till.db";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Store name (menu header)
    pub store_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,

    /// Explicit ledger file. `None` means the platform data directory.
    pub database_path: Option<PathBuf>,
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState {
            store_name: "Till".to_string(),
            currency_symbol: "$".to_string(),
            currency_decimals: 2,
            database_path: None,
        }
    }
}

impl ConfigState {
    /// Creates a ConfigState from environment variables and defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Creates a ConfigState from any key lookup. Blank values are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = ConfigState::default();
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(store_name) = non_blank("TILL_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Some(path) = non_blank("TILL_DB_PATH") {
            config.database_path = Some(PathBuf::from(path));
        }

        config
    }

    /// Determines the ledger file path.
    ///
    /// ## Platform-Specific Paths
    /// - **macOS**: `~/Library/Application Support/com.till.ledger/till.db`
    /// - **Windows**: `%APPDATA%\till\ledger\data\till.db`
    /// - **Linux**: `~/.local/share/ledger/till.db`
    ///
    /// The data directory is created if missing.
    pub fn resolve_database_path(&self) -> io::Result<PathBuf> {
        if let Some(path) = &self.database_path {
            return Ok(path.clone());
        }

        let proj_dirs = ProjectDirs::from("com", "till", "ledger").ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine app data directory",
            )
        })?;

        let data_dir = proj_dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;

        Ok(data_dir.join(DB_FILE_NAME))
    }

    /// Formats an amount with the configured symbol and precision.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::Money;
    /// use till_terminal::state::ConfigState;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let cents = amount.cents();
        let sign = if cents < 0 { "-" } else { "" };

        match self.currency_decimals {
            0 => format!("{}{}{}", sign, self.currency_symbol, amount.major().abs()),
            decimals => {
                let width = decimals as usize;
                // Money carries two decimals; pad or cut to the display width
                let minor = format!("{:02}", amount.minor().abs());
                let minor = format!("{:0<width$}", minor, width = width);
                format!(
                    "{}{}{}.{}",
                    sign,
                    self.currency_symbol,
                    amount.major().abs(),
                    &minor[..width]
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = ConfigState::from_lookup(lookup(&[
            ("TILL_STORE_NAME", "Corner Shop"),
            ("TILL_DB_PATH", "/tmp/corner.db"),
        ]));

        assert_eq!(config.store_name, "Corner Shop");
        assert_eq!(config.database_path, Some(PathBuf::from("/tmp/corner.db")));
        assert_eq!(
            config.resolve_database_path().unwrap(),
            PathBuf::from("/tmp/corner.db")
        );
    }

    #[test]
    fn test_blank_values_keep_defaults() {
        let config = ConfigState::from_lookup(lookup(&[("TILL_STORE_NAME", "  ")]));
        assert_eq!(config, ConfigState::default());
    }

    #[test]
    fn test_format_currency() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
        assert_eq!(config.format_currency(Money::from_cents(100)), "$1.00");
        assert_eq!(config.format_currency(Money::from_cents(1)), "$0.01");
        assert_eq!(config.format_currency(Money::zero()), "$0.00");
        assert_eq!(config.format_currency(Money::from_cents(-1234)), "-$12.34");
    }

    #[test]
    fn test_format_currency_other_precisions() {
        let mut config = ConfigState::default();
        config.currency_symbol = "S/ ".to_string();

        config.currency_decimals = 0;
        assert_eq!(config.format_currency(Money::from_cents(1299)), "S/ 12");

        config.currency_decimals = 3;
        assert_eq!(config.format_currency(Money::from_cents(1205)), "S/ 12.050");
    }
}
