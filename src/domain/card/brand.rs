//! Card brand classification results.
//!
//! The widget never classifies numbers itself; it consumes a brand from
//! the external classifier and maps it to a cosmetic marker.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Card network as reported by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CardBrand {
    Visa,
    Amex,
    MasterCard,
    Discover,
    #[default]
    Unknown,
}

impl CardBrand {
    /// Every brand, in marker order.
    pub const ALL: [CardBrand; 5] = [
        CardBrand::Visa,
        CardBrand::Amex,
        CardBrand::MasterCard,
        CardBrand::Discover,
        CardBrand::Unknown,
    ];

    /// Class marker applied to the number input.
    pub fn marker(&self) -> &'static str {
        match self {
            CardBrand::Visa => "visa",
            CardBrand::Amex => "amex",
            CardBrand::MasterCard => "mastercard",
            CardBrand::Discover => "discover",
            CardBrand::Unknown => "unknown",
        }
    }

    /// Name used by the tokenization provider.
    pub fn provider_name(&self) -> &'static str {
        match self {
            CardBrand::Visa => "Visa",
            CardBrand::Amex => "American Express",
            CardBrand::MasterCard => "MasterCard",
            CardBrand::Discover => "Discover",
            CardBrand::Unknown => "Unknown",
        }
    }

    /// Amex numbers group as 4-6-5 instead of 4-4-4-4.
    pub fn is_amex(&self) -> bool {
        matches!(self, CardBrand::Amex)
    }
}

impl FromStr for CardBrand {
    type Err = Infallible;

    /// Parses a provider brand name. Unrecognized names map to `Unknown`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let brand = match s.trim() {
            "Visa" | "visa" => CardBrand::Visa,
            "American Express" | "amex" => CardBrand::Amex,
            "MasterCard" | "Mastercard" | "mastercard" => CardBrand::MasterCard,
            "Discover" | "discover" => CardBrand::Discover,
            _ => CardBrand::Unknown,
        };
        Ok(brand)
    }
}

impl From<String> for CardBrand {
    fn from(s: String) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl From<CardBrand> for String {
    fn from(brand: CardBrand) -> Self {
        brand.provider_name().to_string()
    }
}

impl fmt::Display for CardBrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.provider_name())
    }
}
