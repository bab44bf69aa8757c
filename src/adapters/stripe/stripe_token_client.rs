//! Stripe token client.
//!
//! Exchanges card data for a single-use token via `POST /v1/tokens`,
//! authenticating with the publishable key.
//!
//! # Security
//!
//! - Card number, CVC and key stay in `secrecy::SecretString` until the
//!   request body is built
//! - Secret keys (`sk_...`) are refused; this client only ever runs with
//!   publishable credentials

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::config::SdkConfig;
use crate::domain::card::{CardDetails, ServiceError, TokenResponse};
use crate::ports::TokenClient;

/// Error envelope returned by the Stripe API.
#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    error: StripeApiError,
}

#[derive(Debug, Deserialize)]
struct StripeApiError {
    #[serde(default)]
    code: Option<String>,
    #[serde(rename = "type", default)]
    error_type: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl From<StripeApiError> for ServiceError {
    fn from(error: StripeApiError) -> Self {
        let code = error
            .code
            .or(error.error_type)
            .unwrap_or_else(|| "api_error".to_string());
        ServiceError {
            code: code.into(),
            message: error.message,
        }
    }
}

/// Tokenization client backed by the Stripe REST API.
pub struct StripeTokenClient {
    api_base_url: String,
    publishable_key: RwLock<Option<SecretString>>,
    http_client: reqwest::Client,
}

impl StripeTokenClient {
    /// Client against `https://api.stripe.com`.
    pub fn new() -> Self {
        Self {
            api_base_url: "https://api.stripe.com".to_string(),
            publishable_key: RwLock::new(None),
            http_client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &SdkConfig) -> Self {
        Self::new().with_base_url(&config.api_base_url)
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    fn current_key(&self) -> Option<SecretString> {
        self.publishable_key
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn form_params(card: &CardDetails) -> Vec<(&'static str, String)> {
        let number: String = card
            .number()
            .expose_secret()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();

        let mut params = vec![
            ("card[number]", number),
            ("card[exp_month]", card.exp_month().to_string()),
            ("card[exp_year]", card.exp_year().to_string()),
        ];
        if let Some(cvc) = card.cvc() {
            params.push(("card[cvc]", cvc.expose_secret().to_string()));
        }
        params
    }
}

impl Default for StripeTokenClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenClient for StripeTokenClient {
    fn set_publishable_key(&self, key: &str) {
        if key.starts_with("sk_") {
            tracing::error!("refusing to use a secret key for client-side tokenization");
            return;
        }
        *self
            .publishable_key
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(SecretString::new(key.to_string()));
    }

    async fn create_token(&self, card: CardDetails) -> Result<TokenResponse, ServiceError> {
        let key = self.current_key().ok_or_else(|| {
            ServiceError::new("missing_publishable_key")
                .with_message("You did not set a valid publishable key.")
        })?;

        let url = format!("{}/v1/tokens", self.api_base_url);
        tracing::debug!(last4 = %card.last4(), "requesting card token");

        let response = self
            .http_client
            .post(&url)
            .basic_auth(key.expose_secret(), Option::<&str>::None)
            .form(&Self::form_params(&card))
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "token request failed to reach Stripe");
                ServiceError::api_connection(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = match serde_json::from_str::<StripeErrorBody>(&body) {
                Ok(parsed) => ServiceError::from(parsed.error),
                Err(_) => ServiceError::new("api_error")
                    .with_message(format!("Stripe API error ({})", status.as_u16())),
            };
            tracing::warn!(status = status.as_u16(), code = %error.code, "Stripe rejected token request");
            return Err(error);
        }

        response.json::<TokenResponse>().await.map_err(|e| {
            ServiceError::new("api_error")
                .with_message(format!("Failed to parse Stripe response: {}", e))
        })
    }
}
