//! Successful tokenization response.

use serde::{Deserialize, Serialize};

use super::CardBrand;

/// Opaque one-time token returned in exchange for card data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Token id injected into the host form.
    pub id: String,

    #[serde(default)]
    pub card: Option<TokenCard>,

    #[serde(default)]
    pub livemode: bool,

    /// Creation time (Unix timestamp).
    #[serde(default)]
    pub created: i64,
}

impl TokenResponse {
    /// Creates a response carrying only a token id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            card: None,
            livemode: false,
            created: 0,
        }
    }
}

/// Non-sensitive card summary echoed by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCard {
    #[serde(default)]
    pub brand: CardBrand,

    #[serde(default)]
    pub last4: Option<String>,

    #[serde(default)]
    pub exp_month: Option<u32>,

    #[serde(default)]
    pub exp_year: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_provider_token() {
        let json = r#"{
            "id": "tok_abc",
            "object": "token",
            "card": {"brand": "Visa", "last4": "4242", "exp_month": 4, "exp_year": 2030},
            "livemode": false,
            "created": 1700000000,
            "used": false
        }"#;

        let token: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(token.id, "tok_abc");
        let card = token.card.unwrap();
        assert_eq!(card.brand, CardBrand::Visa);
        assert_eq!(card.last4.as_deref(), Some("4242"));
    }

    #[test]
    fn minimal_token_needs_only_id() {
        let token: TokenResponse = serde_json::from_str(r#"{"id":"tok_min"}"#).unwrap();
        assert_eq!(token, TokenResponse::new("tok_min"));
    }
}
