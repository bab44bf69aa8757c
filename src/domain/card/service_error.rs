//! Errors reported by the tokenization service.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error code returned by the tokenization exchange.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ServiceErrorCode {
    CardDeclined,
    InvalidNumber,
    IncorrectNumber,
    InvalidExpiryMonth,
    InvalidExpiryYear,
    ExpiredCard,
    InvalidCvc,
    /// Any code the widget has no field mapping for.
    Other(String),
}

impl ServiceErrorCode {
    /// Wire representation of the code.
    pub fn as_str(&self) -> &str {
        match self {
            ServiceErrorCode::CardDeclined => "card_declined",
            ServiceErrorCode::InvalidNumber => "invalid_number",
            ServiceErrorCode::IncorrectNumber => "incorrect_number",
            ServiceErrorCode::InvalidExpiryMonth => "invalid_expiry_month",
            ServiceErrorCode::InvalidExpiryYear => "invalid_expiry_year",
            ServiceErrorCode::ExpiredCard => "expired_card",
            ServiceErrorCode::InvalidCvc => "invalid_cvc",
            ServiceErrorCode::Other(code) => code,
        }
    }
}

impl From<&str> for ServiceErrorCode {
    fn from(code: &str) -> Self {
        match code {
            "card_declined" => ServiceErrorCode::CardDeclined,
            "invalid_number" => ServiceErrorCode::InvalidNumber,
            "incorrect_number" => ServiceErrorCode::IncorrectNumber,
            "invalid_expiry_month" => ServiceErrorCode::InvalidExpiryMonth,
            "invalid_expiry_year" => ServiceErrorCode::InvalidExpiryYear,
            "expired_card" => ServiceErrorCode::ExpiredCard,
            "invalid_cvc" => ServiceErrorCode::InvalidCvc,
            other => ServiceErrorCode::Other(other.to_string()),
        }
    }
}

impl From<String> for ServiceErrorCode {
    fn from(code: String) -> Self {
        ServiceErrorCode::from(code.as_str())
    }
}

impl From<ServiceErrorCode> for String {
    fn from(code: ServiceErrorCode) -> Self {
        code.as_str().to_string()
    }
}

impl fmt::Display for ServiceErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Failure reported by the tokenization service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceError {
    pub code: ServiceErrorCode,

    /// Human-readable message, shown to the user when present.
    #[serde(default)]
    pub message: Option<String>,
}

impl ServiceError {
    /// Creates an error without a message.
    pub fn new(code: impl Into<ServiceErrorCode>) -> Self {
        Self {
            code: code.into(),
            message: None,
        }
    }

    /// Attaches a display message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// The service could not be reached.
    pub fn api_connection(message: impl Into<String>) -> Self {
        Self::new("api_connection_error").with_message(message)
    }

    /// The request was abandoned before the service answered.
    pub fn aborted() -> Self {
        Self::new("request_aborted")
            .with_message("The payment request was interrupted. Please try again.")
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{}: {}", self.code, message),
            None => write!(f, "{}", self.code),
        }
    }
}

impl std::error::Error for ServiceError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_parse() {
        assert_eq!(ServiceErrorCode::from("invalid_cvc"), ServiceErrorCode::InvalidCvc);
        assert_eq!(ServiceErrorCode::from("expired_card"), ServiceErrorCode::ExpiredCard);
        assert_eq!(ServiceErrorCode::from("card_declined"), ServiceErrorCode::CardDeclined);
    }

    #[test]
    fn unknown_codes_are_preserved() {
        let code = ServiceErrorCode::from("processing_error");
        assert_eq!(code, ServiceErrorCode::Other("processing_error".to_string()));
        assert_eq!(code.as_str(), "processing_error");
    }

    #[test]
    fn deserializes_provider_error_body() {
        let json = r#"{"code":"incorrect_number","message":"Your card number is incorrect.","type":"card_error"}"#;
        let err: ServiceError = serde_json::from_str(json).unwrap();
        assert_eq!(err.code, ServiceErrorCode::IncorrectNumber);
        assert_eq!(err.message.as_deref(), Some("Your card number is incorrect."));
    }

    #[test]
    fn message_is_optional() {
        let err: ServiceError = serde_json::from_str(r#"{"code":"invalid_cvc"}"#).unwrap();
        assert_eq!(err.message, None);
        assert_eq!(err.to_string(), "invalid_cvc");
    }

    #[test]
    fn display_includes_message() {
        let err = ServiceError::new("card_declined").with_message("Declined");
        assert_eq!(err.to_string(), "card_declined: Declined");
    }
}
