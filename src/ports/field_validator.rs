//! Field validator port - card checks provided by the tokenization SDK.
//!
//! Treated as a black box: the widget consumes these answers and never
//! reimplements the algorithms behind them.

use crate::domain::card::CardBrand;

/// Port for card field validation and brand classification.
pub trait FieldValidator: Send + Sync {
    fn validate_number(&self, number: &str) -> bool;

    fn validate_expiry(&self, month: &str, year: &str) -> bool;

    fn validate_cvc(&self, cvc: &str) -> bool;

    /// Brand of a (possibly partial) card number.
    fn classify(&self, number: &str) -> CardBrand;
}
