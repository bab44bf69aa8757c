//! Widget configuration and its resolution rules.
//!
//! Three layers feed a [`Configuration`], highest precedence first:
//! explicit construction options, attribute-sourced options scraped from
//! the mount element, and library defaults.

use crate::domain::foundation::{NodeId, WidgetError};

/// Name of the hidden field injected on success unless overridden.
pub const DEFAULT_TOKEN_FIELD_NAME: &str = "stripe_token";

/// Partially specified options. `None` means "not supplied".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetOptions {
    pub token_field_name: Option<String>,
    pub collect_token: Option<bool>,
    pub collect_cvc: Option<bool>,
    pub publishable_key: Option<String>,
    pub host_form: Option<NodeId>,
}

impl WidgetOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token_field_name(mut self, name: impl Into<String>) -> Self {
        self.token_field_name = Some(name.into());
        self
    }

    pub fn with_collect_token(mut self, collect: bool) -> Self {
        self.collect_token = Some(collect);
        self
    }

    pub fn with_collect_cvc(mut self, collect: bool) -> Self {
        self.collect_cvc = Some(collect);
        self
    }

    pub fn with_publishable_key(mut self, key: impl Into<String>) -> Self {
        self.publishable_key = Some(key.into());
        self
    }

    pub fn with_host_form(mut self, form: NodeId) -> Self {
        self.host_form = Some(form);
        self
    }

    /// Treats a blank publishable key as not supplied.
    fn without_blank_key(mut self) -> Self {
        self.publishable_key = self.publishable_key.filter(|k| !k.trim().is_empty());
        self
    }

    /// Fills every unsupplied option from `fallback`.
    pub fn or(self, fallback: WidgetOptions) -> WidgetOptions {
        WidgetOptions {
            token_field_name: self.token_field_name.or(fallback.token_field_name),
            collect_token: self.collect_token.or(fallback.collect_token),
            collect_cvc: self.collect_cvc.or(fallback.collect_cvc),
            publishable_key: self.publishable_key.or(fallback.publishable_key),
            host_form: self.host_form.or(fallback.host_form),
        }
    }
}

/// Fully resolved widget configuration.
///
/// Resolved once at construction and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    /// Name of the hidden field inserted into the host form on success.
    pub token_field_name: String,

    /// Whether the hidden token field is inserted at all.
    pub collect_token: bool,

    /// Whether the CVC field is rendered, validated and sent.
    pub collect_cvc: bool,

    /// Credential for the tokenization service.
    pub publishable_key: Option<String>,

    /// Form whose submission is intercepted.
    pub host_form: Option<NodeId>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            token_field_name: DEFAULT_TOKEN_FIELD_NAME.to_string(),
            collect_token: true,
            collect_cvc: true,
            publishable_key: None,
            host_form: None,
        }
    }
}

impl Configuration {
    /// Resolves options against library defaults.
    ///
    /// Attribute-sourced values only apply where `explicit` left the
    /// option unset.
    ///
    /// # Errors
    ///
    /// - `InvalidConfiguration` if the token field name is blank while
    ///   token collection is enabled
    pub fn resolve(
        explicit: WidgetOptions,
        attributes: WidgetOptions,
        defaults: Configuration,
    ) -> Result<Self, WidgetError> {
        let merged = explicit.without_blank_key().or(attributes.without_blank_key());

        let config = Configuration {
            token_field_name: merged
                .token_field_name
                .unwrap_or(defaults.token_field_name),
            collect_token: merged.collect_token.unwrap_or(defaults.collect_token),
            collect_cvc: merged.collect_cvc.unwrap_or(defaults.collect_cvc),
            publishable_key: merged.publishable_key.or(defaults.publishable_key),
            host_form: merged.host_form.or(defaults.host_form),
        };

        if config.collect_token && config.token_field_name.trim().is_empty() {
            return Err(WidgetError::invalid_configuration(
                "token_field_name",
                "cannot be empty when collecting a token",
            ));
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_nothing_supplied() {
        let config =
            Configuration::resolve(WidgetOptions::new(), WidgetOptions::new(), Configuration::default())
                .unwrap();
        assert_eq!(config.token_field_name, "stripe_token");
        assert!(config.collect_token);
        assert!(config.collect_cvc);
        assert_eq!(config.publishable_key, None);
    }

    #[test]
    fn attributes_override_defaults() {
        let attributes = WidgetOptions::new()
            .with_collect_cvc(false)
            .with_publishable_key("pk_test_attr");
        let config =
            Configuration::resolve(WidgetOptions::new(), attributes, Configuration::default()).unwrap();
        assert!(!config.collect_cvc);
        assert_eq!(config.publishable_key.as_deref(), Some("pk_test_attr"));
    }

    #[test]
    fn explicit_options_override_attributes() {
        let explicit = WidgetOptions::new()
            .with_collect_cvc(true)
            .with_publishable_key("pk_test_explicit");
        let attributes = WidgetOptions::new()
            .with_collect_cvc(false)
            .with_collect_token(false)
            .with_publishable_key("pk_test_attr");

        let config = Configuration::resolve(explicit, attributes, Configuration::default()).unwrap();

        assert!(config.collect_cvc);
        assert!(!config.collect_token);
        assert_eq!(config.publishable_key.as_deref(), Some("pk_test_explicit"));
    }

    #[test]
    fn blank_key_falls_back_to_default_key() {
        let defaults = Configuration {
            publishable_key: Some("pk_test_default".into()),
            ..Configuration::default()
        };
        let explicit = WidgetOptions::new().with_publishable_key("  ");
        let config = Configuration::resolve(explicit, WidgetOptions::new(), defaults).unwrap();
        assert_eq!(config.publishable_key.as_deref(), Some("pk_test_default"));
    }

    #[test]
    fn blank_explicit_key_falls_back_to_attribute_key() {
        let defaults = Configuration {
            publishable_key: Some("pk_test_default".into()),
            ..Configuration::default()
        };
        let explicit = WidgetOptions::new().with_publishable_key("");
        let attributes = WidgetOptions::new().with_publishable_key("pk_test_attr");

        let config = Configuration::resolve(explicit, attributes, defaults).unwrap();

        assert_eq!(config.publishable_key.as_deref(), Some("pk_test_attr"));
    }

    #[test]
    fn blank_token_field_name_is_rejected() {
        let explicit = WidgetOptions::new().with_token_field_name("");
        let result = Configuration::resolve(explicit, WidgetOptions::new(), Configuration::default());
        assert!(matches!(result, Err(WidgetError::InvalidConfiguration { .. })));
    }

    #[test]
    fn blank_token_field_name_allowed_without_token() {
        let explicit = WidgetOptions::new()
            .with_token_field_name("")
            .with_collect_token(false);
        let result = Configuration::resolve(explicit, WidgetOptions::new(), Configuration::default());
        assert!(result.is_ok());
    }

    #[test]
    fn host_form_comes_from_attributes_when_not_explicit() {
        let attributes = WidgetOptions::new().with_host_form(NodeId::from_index(4));
        let config =
            Configuration::resolve(WidgetOptions::new(), attributes, Configuration::default()).unwrap();
        assert_eq!(config.host_form, Some(NodeId::from_index(4)));
    }
}
