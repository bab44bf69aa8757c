//! Tokenization SDK endpoints

use serde::Deserialize;

use super::error::ValidationError;

/// Where the SDK script and the tokenization API live
#[derive(Debug, Clone, Deserialize)]
pub struct SdkConfig {
    /// Script injected when the client is not already loaded
    #[serde(default = "default_script_url")]
    pub script_url: String,

    /// Base URL of the tokenization API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

fn default_script_url() -> String {
    "https://js.stripe.com/v1/".to_string()
}

fn default_api_base_url() -> String {
    "https://api.stripe.com".to_string()
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            script_url: default_script_url(),
            api_base_url: default_api_base_url(),
        }
    }
}

impl SdkConfig {
    /// Validate SDK configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.script_url.starts_with("https://") {
            return Err(ValidationError::UrlMustBeHttps("SDK__SCRIPT_URL"));
        }
        if !self.api_base_url.starts_with("https://") {
            return Err(ValidationError::UrlMustBeHttps("SDK__API_BASE_URL"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_urls() {
        let config = SdkConfig::default();
        assert_eq!(config.script_url, "https://js.stripe.com/v1/");
        assert_eq!(config.api_base_url, "https://api.stripe.com");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_plain_http_is_rejected() {
        let config = SdkConfig {
            api_base_url: "http://api.stripe.com".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::UrlMustBeHttps("SDK__API_BASE_URL"))
        );
    }
}
