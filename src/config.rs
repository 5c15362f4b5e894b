//! Configuration file handling.
//!
//! The configuration file is optional. It is looked up at `--config` (or `$SPONSORS_CONFIG`), and
//! otherwise at `$XDG_CONFIG_HOME/sponsor-tiers/config.json` or the platform equivalent. When no
//! file exists, defaults are used.

use crate::summary::{AmountDisclosure, SummaryOptions};
use crate::{utils, Result};
use anyhow::{ensure, Context};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

const APP_NAME: &str = "sponsor-tiers";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const GITHUB_API_URL: &str = "https://api.github.com";
const REQUEST_DELAY_MS: u64 = 250;
const REQUEST_TIMEOUT_SECS: u64 = 5;

/// The `Config` object represents the resolved settings of the app: the values from the config
/// file, if there is one, or the defaults.
#[derive(Debug, Clone, Default)]
pub struct Config {
    config_path: Option<PathBuf>,
    config_file: ConfigFile,
}

impl Config {
    /// Loads the configuration.
    ///
    /// - If `path` is given, the file must exist and be valid.
    /// - Otherwise the default location is tried, and defaults are used if nothing is there.
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            let config_file = ConfigFile::load(path).await?;
            return Ok(Self {
                config_path: Some(path.to_path_buf()),
                config_file,
            });
        }

        match default_config_path().filter(|p| p.is_file()) {
            Some(path) => {
                debug!("Loading config from {}", path.display());
                let config_file = ConfigFile::load(&path).await?;
                Ok(Self {
                    config_path: Some(path),
                    config_file,
                })
            }
            None => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// The file the settings were loaded from, if any.
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    pub fn github_api_url(&self) -> &str {
        &self.config_file.github_api_url
    }

    /// The pause between two profile lookups.
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.config_file.request_delay_ms)
    }

    /// The upper bound on a single profile lookup.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.config_file.request_timeout_secs)
    }

    pub fn amount_disclosure(&self) -> AmountDisclosure {
        self.config_file.amount_disclosure
    }

    /// The presentation settings passed to `summarize`.
    pub fn summary_options(&self) -> SummaryOptions {
        SummaryOptions {
            disclosure: self.config_file.amount_disclosure,
            currency_symbol: self.config_file.currency_symbol.clone(),
            exchange_rate: self.config_file.exchange_rate,
        }
    }
}

/// Represents the serialization and deserialization format of the configuration file. Omitted
/// fields take their default values.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "sponsor-tiers",
///   "config_version": 1,
///   "github_api_url": "https://api.github.com",
///   "request_delay_ms": 250,
///   "request_timeout_secs": 5,
///   "amount_disclosure": "repeat",
///   "currency_symbol": "€",
///   "exchange_rate": 0.92
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(default)]
struct ConfigFile {
    /// Application name, should always be "sponsor-tiers"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Base URL of the GitHub REST API used for profile lookups
    github_api_url: String,

    /// Milliseconds to wait between two profile lookups
    request_delay_ms: u64,

    /// Seconds before a profile lookup is abandoned
    request_timeout_secs: u64,

    /// When to include lifetime amounts in the output
    amount_disclosure: AmountDisclosure,

    /// Symbol placed before formatted amounts
    currency_symbol: String,

    /// Multiplier from USD to the display currency
    #[serde(with = "rust_decimal::serde::float")]
    exchange_rate: Decimal,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            github_api_url: GITHUB_API_URL.to_string(),
            request_delay_ms: REQUEST_DELAY_MS,
            request_timeout_secs: REQUEST_TIMEOUT_SECS,
            amount_disclosure: AmountDisclosure::default(),
            currency_symbol: "$".to_string(),
            exchange_rate: Decimal::ONE,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile asynchronously from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or holds invalid settings.
    async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config: ConfigFile = utils::deserialize(path)
            .await
            .with_context(|| format!("Failed to load config file at {}", path.display()))?;

        ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );
        ensure!(
            config.config_version == CONFIG_VERSION,
            "Unsupported config_version {} in config file, expected {}",
            config.config_version,
            CONFIG_VERSION
        );
        ensure!(
            config.exchange_rate > Decimal::ZERO,
            "The exchange_rate must be positive, got {}",
            config.exchange_rate
        );
        url::Url::parse(&config.github_api_url).with_context(|| {
            format!("Invalid github_api_url '{}'", config.github_api_url)
        })?;

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    #[cfg(test)]
    async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(path.as_ref(), data)
            .await
            .context("Unable to write config file")
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME).join(CONFIG_JSON))
}
