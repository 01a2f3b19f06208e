//! # Application Configuration
//!
//! Shop settings: name, currency symbol, and the settings PIN.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`TALLY_*`)
//! 2. Database (`settings` table)
//! 3. Defaults (this file)
//!
//! The in-memory [`AppConfig`] is a plain value; [`ConfigService`] loads
//! it from the settings store and writes changes back through.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{AppError, AppResult};
use tally_core::Money;
use tally_db::Database;

/// Settings-store keys.
const KEY_SHOP_NAME: &str = "shop_name";
const KEY_CURRENCY_SYMBOL: &str = "currency_symbol";
const KEY_PIN: &str = "settings_pin";

/// Shop configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Shop name shown in the header and on receipts.
    pub shop_name: String,

    /// Currency symbol prefixed to formatted amounts.
    pub currency_symbol: String,

    /// PIN guarding the settings screen. Stored as a plain setting; this
    /// is a deterrent for a shared shop counter, not an auth system.
    pub pin: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            shop_name: "My Store".to_string(),
            currency_symbol: "₦".to_string(),
            pin: "1234".to_string(),
        }
    }
}

impl AppConfig {
    /// Checks an entered PIN against the configured one.
    pub fn verify_pin(&self, entered: &str) -> bool {
        entered == self.pin
    }

    /// Formats a money amount with the configured currency symbol.
    ///
    /// ```rust,ignore
    /// let config = AppConfig::default();
    /// assert_eq!(config.format_currency(Money::from_cents(1234)), "₦12.34");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        if amount.is_negative() {
            let positive = Money::zero() - amount;
            format!("-{}{}", self.currency_symbol, positive)
        } else {
            format!("{}{}", self.currency_symbol, amount)
        }
    }
}

/// Service that loads and persists shop configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    db: Database,
}

impl ConfigService {
    /// Creates a new ConfigService.
    pub fn new(db: Database) -> Self {
        ConfigService { db }
    }

    /// Loads the configuration: defaults, overlaid with stored settings,
    /// overlaid with environment variables.
    ///
    /// ## Environment Variables
    /// - `TALLY_SHOP_NAME`: Override shop name
    /// - `TALLY_PIN`: Override settings PIN
    pub async fn load(&self) -> AppResult<AppConfig> {
        let mut config = AppConfig::default();
        let settings = self.db.settings();

        if let Some(name) = settings.get(KEY_SHOP_NAME).await? {
            config.shop_name = name;
        }
        if let Some(symbol) = settings.get(KEY_CURRENCY_SYMBOL).await? {
            config.currency_symbol = symbol;
        }
        if let Some(pin) = settings.get(KEY_PIN).await? {
            config.pin = pin;
        }

        if let Ok(name) = std::env::var("TALLY_SHOP_NAME") {
            config.shop_name = name;
        }
        if let Ok(pin) = std::env::var("TALLY_PIN") {
            config.pin = pin;
        }

        Ok(config)
    }

    /// Sets the shop name. Blank names are rejected.
    pub async fn set_shop_name(&self, name: &str) -> AppResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidSetting(
                "Shop name cannot be empty".to_string(),
            ));
        }

        self.db.settings().set(KEY_SHOP_NAME, name).await?;
        info!(shop_name = %name, "Shop name updated");
        Ok(())
    }

    /// Sets the currency symbol.
    pub async fn set_currency_symbol(&self, symbol: &str) -> AppResult<()> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(AppError::InvalidSetting(
                "Currency symbol cannot be empty".to_string(),
            ));
        }

        self.db.settings().set(KEY_CURRENCY_SYMBOL, symbol).await?;
        info!(%symbol, "Currency symbol updated");
        Ok(())
    }

    /// Sets the settings PIN.
    pub async fn set_pin(&self, pin: &str) -> AppResult<()> {
        let pin = pin.trim();
        if pin.is_empty() {
            return Err(AppError::InvalidSetting("PIN cannot be empty".to_string()));
        }

        self.db.settings().set(KEY_PIN, pin).await?;
        info!("Settings PIN updated");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
