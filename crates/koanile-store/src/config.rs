//! # Store Configuration
//!
//! Runtime configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`KOANILE_*`)
//! 2. Values passed in by the embedding shell
//! 3. Defaults (this file)
//!
//! Configuration is read-only after initialization, so no lock is needed.

use serde::{Deserialize, Serialize};

/// Environment variable names recognized by [`StoreConfig::from_env_or`].
const ENV_STORE_NAME: &str = "KOANILE_STORE_NAME";
const ENV_CURRENCY_CODE: &str = "KOANILE_CURRENCY_CODE";
const ENV_CURRENCY_SYMBOL: &str = "KOANILE_CURRENCY_SYMBOL";
const ENV_AUTH_URL: &str = "KOANILE_AUTH_URL";
const ENV_AUTH_ANON_KEY: &str = "KOANILE_AUTH_ANON_KEY";

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    /// Store name shown in the shell and on order screens.
    pub store_name: String,

    /// Currency code (ISO 4217).
    pub currency_code: String,

    /// Currency symbol (for display).
    pub currency_symbol: String,

    /// Endpoint of the hosted identity service, if configured.
    pub auth_url: Option<String>,

    /// Publishable key for the hosted identity service.
    pub auth_anon_key: Option<String>,
}

impl StoreConfig {
    /// Creates a config from environment variables or provided values.
    ///
    /// Environment variables win over the provided values; defaults fill
    /// whatever is left.
    pub fn from_env_or(
        store_name: Option<String>,
        auth_url: Option<String>,
        auth_anon_key: Option<String>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            store_name: std::env::var(ENV_STORE_NAME)
                .ok()
                .or(store_name)
                .unwrap_or(defaults.store_name),
            currency_code: std::env::var(ENV_CURRENCY_CODE)
                .ok()
                .unwrap_or(defaults.currency_code),
            currency_symbol: std::env::var(ENV_CURRENCY_SYMBOL)
                .ok()
                .unwrap_or(defaults.currency_symbol),
            auth_url: std::env::var(ENV_AUTH_URL).ok().or(auth_url),
            auth_anon_key: std::env::var(ENV_AUTH_ANON_KEY).ok().or(auth_anon_key),
        }
    }

    /// True when both identity-service settings are present.
    ///
    /// Builds without them run sign-in-less (browse and order locally); the
    /// shell hides the account screens.
    pub fn auth_configured(&self) -> bool {
        self.auth_url.is_some() && self.auth_anon_key.is_some()
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            store_name: "Koanile".to_string(),
            currency_code: "USD".to_string(),
            currency_symbol: "$".to_string(),
            auth_url: None,
            auth_anon_key: None,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.store_name, "Koanile");
        assert_eq!(config.currency_code, "USD");
        assert_eq!(config.currency_symbol, "$");
        assert!(!config.auth_configured());
    }

    #[test]
    fn test_provided_values_fill_gaps() {
        let config = StoreConfig::from_env_or(
            Some("Koanile Dev".to_string()),
            Some("https://auth.example.com".to_string()),
            Some("anon-key".to_string()),
        );
        assert_eq!(config.store_name, "Koanile Dev");
        assert!(config.auth_configured());
    }

    #[test]
    fn test_auth_requires_both_settings() {
        let config = StoreConfig::from_env_or(
            None,
            Some("https://auth.example.com".to_string()),
            None,
        );
        assert!(!config.auth_configured());
    }
}
