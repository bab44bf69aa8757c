//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Variables use the `PAYMENT_TAG` prefix
//! and nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use payment_tag::config::{init_tracing, AppConfig};
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! init_tracing(&config.logging);
//! ```

mod error;
mod logging;
mod sdk;
mod widget;

pub use error::{ConfigError, ValidationError};
pub use logging::{init_tracing, LoggingConfig};
pub use sdk::SdkConfig;
pub use widget::WidgetDefaults;

use serde::Deserialize;

/// Root configuration
///
/// Every section has defaults, so an empty environment loads successfully.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Library defaults for widget options
    #[serde(default)]
    pub widget: WidgetDefaults,

    /// SDK script and API endpoints
    #[serde(default)]
    pub sdk: SdkConfig,

    /// Log filter and format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `PAYMENT_TAG` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `PAYMENT_TAG__WIDGET__PUBLISHABLE_KEY=pk_test_...` -> `widget.publishable_key`
    /// - `PAYMENT_TAG__SDK__API_BASE_URL=...` -> `sdk.api_base_url`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PAYMENT_TAG")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.widget.validate()?;
        self.sdk.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("PAYMENT_TAG__WIDGET__PUBLISHABLE_KEY");
        env::remove_var("PAYMENT_TAG__WIDGET__COLLECT_CVC");
        env::remove_var("PAYMENT_TAG__WIDGET__TOKEN_FIELD_NAME");
        env::remove_var("PAYMENT_TAG__SDK__API_BASE_URL");
        env::remove_var("PAYMENT_TAG__LOGGING__JSON");
    }

    #[test]
    fn test_load_with_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.widget.token_field_name, "stripe_token");
        assert_eq!(config.sdk.api_base_url, "https://api.stripe.com");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("PAYMENT_TAG__WIDGET__PUBLISHABLE_KEY", "pk_test_env");
        env::set_var("PAYMENT_TAG__WIDGET__COLLECT_CVC", "false");
        env::set_var("PAYMENT_TAG__LOGGING__JSON", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.widget.publishable_key.as_deref(), Some("pk_test_env"));
        assert!(!config.widget.collect_cvc);
        assert!(config.logging.json);
    }

    #[test]
    fn test_validate_rejects_secret_key_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("PAYMENT_TAG__WIDGET__PUBLISHABLE_KEY", "sk_test_env");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.validate(), Err(ValidationError::SecretKeyNotAllowed));
    }

    #[test]
    fn test_validate_rejects_insecure_api_url() {
        let config = AppConfig {
            sdk: SdkConfig {
                api_base_url: "http://localhost:12111".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
