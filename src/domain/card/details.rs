//! Raw card data captured from the form.

use secrecy::{ExposeSecret, SecretString};

/// Expiry as typed by the user, normalised for the validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expiry {
    pub month: String,
    pub year: String,
}

impl Expiry {
    /// Builds an expiry from raw field values.
    ///
    /// Both values are trimmed. A two-digit year takes the century of
    /// `current_year` (`"27"` in 2026 becomes `"2027"`).
    pub fn from_input(month: &str, year: &str, current_year: i32) -> Self {
        let month = month.trim().to_string();
        let mut year = year.trim().to_string();

        if year.chars().count() == 2 {
            let century: String = current_year.to_string().chars().take(2).collect();
            year = format!("{}{}", century, year);
        }

        Self { month, year }
    }
}

/// Card data sent to the tokenization service.
///
/// Number and CVC are held as secrets so they never show up in logs.
#[derive(Debug, Clone)]
pub struct CardDetails {
    number: SecretString,
    cvc: Option<SecretString>,
    expiry: Expiry,
}

impl CardDetails {
    /// Creates card details. An empty CVC is treated as absent.
    pub fn new(number: impl Into<String>, cvc: Option<String>, expiry: Expiry) -> Self {
        Self {
            number: SecretString::new(number.into()),
            cvc: cvc.filter(|c| !c.is_empty()).map(SecretString::new),
            expiry,
        }
    }

    /// Card number as entered (may contain grouping spaces).
    pub fn number(&self) -> &SecretString {
        &self.number
    }

    /// Security code, absent when not collected.
    pub fn cvc(&self) -> Option<&SecretString> {
        self.cvc.as_ref()
    }

    pub fn exp_month(&self) -> &str {
        &self.expiry.month
    }

    pub fn exp_year(&self) -> &str {
        &self.expiry.year
    }

    /// Last four digits of the number, for logging.
    pub fn last4(&self) -> String {
        let digits: Vec<char> = self
            .number
            .expose_secret()
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();
        let start = digits.len().saturating_sub(4);
        digits[start..].iter().collect()
    }
}
