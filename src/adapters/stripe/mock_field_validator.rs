//! Configurable field validator for testing.
//!
//! Accepts every non-blank value unless told otherwise. Brands come from
//! registered number prefixes; the longest matching prefix wins.

use std::collections::HashSet;
use std::sync::Mutex;

use crate::domain::card::CardBrand;
use crate::ports::FieldValidator;

/// Mock field validator.
///
/// # Example
///
/// ```ignore
/// let validator = MockFieldValidator::new()
///     .rejecting_number("4111111111111112")
///     .with_brand_prefix("34", CardBrand::Amex);
/// ```
#[derive(Default)]
pub struct MockFieldValidator {
    rules: Mutex<Rules>,
}

#[derive(Default)]
struct Rules {
    rejected_numbers: HashSet<String>,
    rejected_expiries: HashSet<(String, String)>,
    rejected_cvcs: HashSet<String>,
    brand_prefixes: Vec<(String, CardBrand)>,
    calls: Vec<&'static str>,
}

impl MockFieldValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validator preloaded with the common test-card prefixes.
    pub fn with_common_brands() -> Self {
        Self::new()
            .with_brand_prefix("4", CardBrand::Visa)
            .with_brand_prefix("34", CardBrand::Amex)
            .with_brand_prefix("37", CardBrand::Amex)
            .with_brand_prefix("5", CardBrand::MasterCard)
            .with_brand_prefix("6011", CardBrand::Discover)
    }

    pub fn rejecting_number(self, number: &str) -> Self {
        self.rules.lock().unwrap().rejected_numbers.insert(number.to_string());
        self
    }

    pub fn rejecting_expiry(self, month: &str, year: &str) -> Self {
        self.rules
            .lock()
            .unwrap()
            .rejected_expiries
            .insert((month.to_string(), year.to_string()));
        self
    }

    pub fn rejecting_cvc(self, cvc: &str) -> Self {
        self.rules.lock().unwrap().rejected_cvcs.insert(cvc.to_string());
        self
    }

    pub fn with_brand_prefix(self, prefix: &str, brand: CardBrand) -> Self {
        self.rules
            .lock()
            .unwrap()
            .brand_prefixes
            .push((prefix.to_string(), brand));
        self
    }

    /// Number of calls to one validator method, e.g. `"validate_cvc"`.
    pub fn call_count(&self, method: &str) -> usize {
        self.rules
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|m| **m == method)
            .count()
    }

    fn record(&self, method: &'static str) -> std::sync::MutexGuard<'_, Rules> {
        let mut rules = self.rules.lock().unwrap();
        rules.calls.push(method);
        rules
    }
}

impl FieldValidator for MockFieldValidator {
    fn validate_number(&self, number: &str) -> bool {
        let rules = self.record("validate_number");
        !number.trim().is_empty() && !rules.rejected_numbers.contains(number)
    }

    fn validate_expiry(&self, month: &str, year: &str) -> bool {
        let rules = self.record("validate_expiry");
        !month.trim().is_empty()
            && !year.trim().is_empty()
            && !rules
                .rejected_expiries
                .contains(&(month.to_string(), year.to_string()))
    }

    fn validate_cvc(&self, cvc: &str) -> bool {
        let rules = self.record("validate_cvc");
        !cvc.trim().is_empty() && !rules.rejected_cvcs.contains(cvc)
    }

    fn classify(&self, number: &str) -> CardBrand {
        let rules = self.record("classify");
        rules
            .brand_prefixes
            .iter()
            .filter(|(prefix, _)| number.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, brand)| *brand)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_fail() {
        let validator = MockFieldValidator::new();
        assert!(!validator.validate_number(""));
        assert!(!validator.validate_expiry("12", " "));
        assert!(!validator.validate_cvc(""));
        assert!(validator.validate_cvc("123"));
    }

    #[test]
    fn rejections_are_exact() {
        let validator = MockFieldValidator::new()
            .rejecting_number("4111111111111112")
            .rejecting_expiry("01", "2000");
        assert!(!validator.validate_number("4111111111111112"));
        assert!(validator.validate_number("4242424242424242"));
        assert!(!validator.validate_expiry("01", "2000"));
        assert!(validator.validate_expiry("01", "2030"));
    }

    #[test]
    fn longest_prefix_wins() {
        let validator = MockFieldValidator::new()
            .with_brand_prefix("3", CardBrand::Discover)
            .with_brand_prefix("37", CardBrand::Amex);
        assert_eq!(validator.classify("3782"), CardBrand::Amex);
        assert_eq!(validator.classify("3012"), CardBrand::Discover);
        assert_eq!(validator.classify("9"), CardBrand::Unknown);
        assert_eq!(validator.call_count("classify"), 3);
    }
}
