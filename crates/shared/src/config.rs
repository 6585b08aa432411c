//! Application configuration management.

use std::collections::HashMap;
use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

use crate::error::{AppError, AppResult};
use crate::types::Currency;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Currency all results are compared in.
    #[serde(
        default = "default_reference_currency",
        deserialize_with = "deserialize_currency"
    )]
    pub reference_currency: Currency,
    /// Exchange rate configuration.
    #[serde(default)]
    pub exchange: ExchangeConfig,
}

fn default_reference_currency() -> Currency {
    Currency::Cny
}

fn deserialize_currency<'de, D>(deserializer: D) -> Result<Currency, D::Error>
where
    D: Deserializer<'de>,
{
    let code = String::deserialize(deserializer)?;
    code.parse().map_err(serde::de::Error::custom)
}

/// Exchange rate provider configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeConfig {
    /// API key for the rate provider. Without one, only static rates are used.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Provider base URL; the key and base currency are appended as path segments.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// How long a fetched rate book stays fresh, in seconds.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,
    /// HTTP timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// File the last fetched rate book is kept in between runs.
    #[serde(default = "default_cache_path")]
    pub cache_path: PathBuf,
    /// Static rates against the reference currency, keyed by currency code.
    #[serde(default)]
    pub rates: HashMap<String, Decimal>,
}

fn default_base_url() -> String {
    "https://v6.exchangerate-api.com/v6".to_string()
}

fn default_cache_ttl() -> u64 {
    86400 // 24 hours
}

fn default_timeout() -> u64 {
    10
}

fn default_cache_path() -> PathBuf {
    std::env::temp_dir().join("vpsval-rates.json")
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            cache_ttl_secs: default_cache_ttl(),
            timeout_secs: default_timeout(),
            cache_path: default_cache_path(),
            rates: HashMap::new(),
        }
    }
}

impl ExchangeConfig {
    /// Returns the configured static rates with parsed currency codes.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` for unknown codes or non-positive rates.
    pub fn static_rates(&self) -> AppResult<HashMap<Currency, Decimal>> {
        self.rates
            .iter()
            .map(|(code, rate)| {
                let currency: Currency = code.parse().map_err(AppError::Config)?;
                if *rate <= Decimal::ZERO {
                    return Err(AppError::Config(format!(
                        "exchange rate for {currency} must be positive, got {rate}"
                    )));
                }
                Ok((currency, *rate))
            })
            .collect()
    }

    /// Returns true if a live rate provider can be used.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("VPSVAL").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
