//! Library defaults for widget configuration

use serde::Deserialize;

use crate::domain::widget::{Configuration, DEFAULT_TOKEN_FIELD_NAME};

use super::error::ValidationError;

/// Library-level widget defaults, lowest precedence in option resolution
#[derive(Debug, Clone, Deserialize)]
pub struct WidgetDefaults {
    /// Name of the hidden token field
    #[serde(default = "default_token_field_name")]
    pub token_field_name: String,

    /// Insert the hidden token field on success
    #[serde(default = "default_true")]
    pub collect_token: bool,

    /// Render and send the CVC field
    #[serde(default = "default_true")]
    pub collect_cvc: bool,

    /// Publishable key used when a widget supplies none
    #[serde(default)]
    pub publishable_key: Option<String>,
}

fn default_token_field_name() -> String {
    DEFAULT_TOKEN_FIELD_NAME.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for WidgetDefaults {
    fn default() -> Self {
        Self {
            token_field_name: default_token_field_name(),
            collect_token: true,
            collect_cvc: true,
            publishable_key: None,
        }
    }
}

impl WidgetDefaults {
    /// Check if the default key is a test-mode key
    pub fn is_test_mode(&self) -> bool {
        self.publishable_key
            .as_deref()
            .is_some_and(|k| k.starts_with("pk_test_"))
    }

    /// Validate widget defaults
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.token_field_name.trim().is_empty() {
            return Err(ValidationError::MissingRequired("WIDGET__TOKEN_FIELD_NAME"));
        }

        if let Some(key) = &self.publishable_key {
            if key.starts_with("sk_") {
                return Err(ValidationError::SecretKeyNotAllowed);
            }
            if !key.starts_with("pk_") {
                return Err(ValidationError::InvalidPublishableKey);
            }
            if !self.is_test_mode() {
                tracing::warn!("live publishable key configured; cards will be charged for real");
            }
        }

        Ok(())
    }
}

impl From<&WidgetDefaults> for Configuration {
    fn from(defaults: &WidgetDefaults) -> Self {
        Configuration {
            token_field_name: defaults.token_field_name.clone(),
            collect_token: defaults.collect_token,
            collect_cvc: defaults.collect_cvc,
            publishable_key: defaults.publishable_key.clone(),
            host_form: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_library_defaults() {
        let defaults = WidgetDefaults::default();
        assert_eq!(Configuration::from(&defaults), Configuration::default());
        assert!(defaults.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_secret_key() {
        let defaults = WidgetDefaults {
            publishable_key: Some("sk_live_xxx".to_string()),
            ..Default::default()
        };
        assert_eq!(defaults.validate(), Err(ValidationError::SecretKeyNotAllowed));
    }

    #[test]
    fn test_validation_rejects_unknown_key_prefix() {
        let defaults = WidgetDefaults {
            publishable_key: Some("rk_test_xxx".to_string()),
            ..Default::default()
        };
        assert_eq!(defaults.validate(), Err(ValidationError::InvalidPublishableKey));
    }

    #[test]
    fn test_validation_rejects_blank_field_name() {
        let defaults = WidgetDefaults {
            token_field_name: " ".to_string(),
            ..Default::default()
        };
        assert!(defaults.validate().is_err());
    }

    #[test]
    fn test_is_test_mode() {
        let defaults = WidgetDefaults {
            publishable_key: Some("pk_test_abc".to_string()),
            ..Default::default()
        };
        assert!(defaults.is_test_mode());
        assert!(defaults.validate().is_ok());
    }

    #[test]
    fn test_live_key_is_valid_but_not_test_mode() {
        let defaults = WidgetDefaults {
            publishable_key: Some("pk_live_abc".to_string()),
            ..Default::default()
        };
        assert!(!defaults.is_test_mode());
        assert!(defaults.validate().is_ok());
    }

    #[test]
    fn test_deserialization_fills_defaults() {
        let json = r#"{ "collect_cvc": false }"#;
        let defaults: WidgetDefaults = serde_json::from_str(json).unwrap();
        assert!(!defaults.collect_cvc);
        assert!(defaults.collect_token);
        assert_eq!(defaults.token_field_name, "stripe_token");
    }
}
