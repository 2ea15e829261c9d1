//! # Marketplace Configuration
//!
//! Startup settings for the stores.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     ECOFINDS_SEED_DEMO_DATA=false                                      │
//! │     ECOFINDS_AUTH_LATENCY_MS=0                                         │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/ecofinds/marketplace.toml (Linux)                        │
//! │     ~/Library/Application Support/com.ecofinds.ecofinds/... (macOS)    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     demo data on, demo@ecofinds.com, 1000 ms login latency             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # marketplace.toml
//! seed_demo_data = true
//! demo_account_email = "demo@ecofinds.com"
//! auth_latency_ms = 1000
//! default_product_image = "https://images.pexels.com/photos/441797/pexels-photo-441797.jpeg"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use ecofinds_core::validation::validate_email;

/// Longest simulated login delay accepted from configuration.
const MAX_AUTH_LATENCY_MS: u64 = 60_000;

// =============================================================================
// Config Error
// =============================================================================

/// Failure to load or validate configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    InvalidValue(String),
}

// =============================================================================
// Marketplace Config
// =============================================================================

/// Settings read once at startup by [`Marketplace::init`](crate::Marketplace::init).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketplaceConfig {
    /// Seed the catalog, purchase ledger and demo account.
    pub seed_demo_data: bool,

    /// The one email the mock authenticator accepts.
    pub demo_account_email: String,

    /// Simulated round-trip for login and register.
    pub auth_latency_ms: u64,

    /// Photo used for listings created without one.
    pub default_product_image: String,
}

impl Default for MarketplaceConfig {
    fn default() -> Self {
        MarketplaceConfig {
            seed_demo_data: true,
            demo_account_email: "demo@ecofinds.com".to_string(),
            auth_latency_ms: 1000,
            default_product_image:
                "https://images.pexels.com/photos/441797/pexels-photo-441797.jpeg".to_string(),
        }
    }
}

impl MarketplaceConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (marketplace.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading marketplace config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load marketplace config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_email(&self.demo_account_email).map_err(|e| {
            ConfigError::InvalidValue(format!("demo_account_email: {}", e))
        })?;

        if self.auth_latency_ms > MAX_AUTH_LATENCY_MS {
            return Err(ConfigError::InvalidValue(format!(
                "auth_latency_ms must be at most {}, got {}",
                MAX_AUTH_LATENCY_MS, self.auth_latency_ms
            )));
        }

        if self.default_product_image.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "default_product_image must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Simulated authenticator latency.
    pub fn auth_latency(&self) -> Duration {
        Duration::from_millis(self.auth_latency_ms)
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `ECOFINDS_*` overrides from `lookup`. Unparseable values are
    /// logged and ignored.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(seed) = lookup("ECOFINDS_SEED_DEMO_DATA") {
            match seed.to_lowercase().as_str() {
                "1" | "true" | "yes" => self.seed_demo_data = true,
                "0" | "false" | "no" => self.seed_demo_data = false,
                _ => warn!(value = %seed, "Unknown ECOFINDS_SEED_DEMO_DATA value"),
            }
        }

        if let Some(email) = lookup("ECOFINDS_DEMO_ACCOUNT_EMAIL") {
            debug!(email = %email, "Overriding demo account from environment");
            self.demo_account_email = email;
        }

        if let Some(latency) = lookup("ECOFINDS_AUTH_LATENCY_MS") {
            match latency.parse::<u64>() {
                Ok(ms) => self.auth_latency_ms = ms,
                Err(_) => warn!(value = %latency, "Ignoring non-numeric ECOFINDS_AUTH_LATENCY_MS"),
            }
        }

        if let Some(image) = lookup("ECOFINDS_DEFAULT_PRODUCT_IMAGE") {
            self.default_product_image = image;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "ecofinds", "ecofinds")
            .map(|dirs| dirs.config_dir().join("marketplace.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = MarketplaceConfig::default();
        assert!(config.seed_demo_data);
        assert_eq!(config.demo_account_email, "demo@ecofinds.com");
        assert_eq!(config.auth_latency(), Duration::from_secs(1));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: MarketplaceConfig = toml::from_str("auth_latency_ms = 0").unwrap();
        assert_eq!(config.auth_latency_ms, 0);
        assert!(config.seed_demo_data);
        assert_eq!(config.demo_account_email, "demo@ecofinds.com");
    }

    #[test]
    fn test_config_validation() {
        let mut config = MarketplaceConfig::default();

        config.demo_account_email = "not-an-email".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue(_))
        ));

        config.demo_account_email = "demo@ecofinds.com".to_string();
        config.auth_latency_ms = MAX_AUTH_LATENCY_MS + 1;
        assert!(config.validate().is_err());

        config.auth_latency_ms = 0;
        config.default_product_image = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("ECOFINDS_SEED_DEMO_DATA", "false"),
            ("ECOFINDS_AUTH_LATENCY_MS", "250"),
            ("ECOFINDS_DEMO_ACCOUNT_EMAIL", "tester@ecofinds.com"),
        ]
        .into_iter()
        .collect();

        let mut config = MarketplaceConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert!(!config.seed_demo_data);
        assert_eq!(config.auth_latency_ms, 250);
        assert_eq!(config.demo_account_email, "tester@ecofinds.com");
    }

    #[test]
    fn test_bad_overrides_are_ignored() {
        let mut config = MarketplaceConfig::default();
        config.apply_overrides(|key| match key {
            "ECOFINDS_SEED_DEMO_DATA" => Some("maybe".to_string()),
            "ECOFINDS_AUTH_LATENCY_MS" => Some("soon".to_string()),
            _ => None,
        });
        assert_eq!(config, MarketplaceConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "ecofinds-config-test-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "seed_demo_data = false\nauth_latency_ms = 5\n").unwrap();

        let config = MarketplaceConfig::load(Some(path.clone())).unwrap();
        std::fs::remove_file(&path).ok();

        assert!(!config.seed_demo_data);
        assert_eq!(config.auth_latency_ms, 5);
    }

    #[test]
    fn test_load_or_default_falls_back_on_parse_error() {
        let path = std::env::temp_dir().join(format!(
            "ecofinds-config-bad-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "auth_latency_ms = \"fast\"").unwrap();

        assert!(matches!(
            MarketplaceConfig::load(Some(path.clone())),
            Err(ConfigError::Parse(_))
        ));
        let config = MarketplaceConfig::load_or_default(Some(path.clone()));
        std::fs::remove_file(&path).ok();

        assert_eq!(config.auth_latency_ms, 1000);
    }
}
