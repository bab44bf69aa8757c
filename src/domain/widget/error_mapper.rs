//! Maps service error codes to the field that caused them.

use crate::domain::card::ServiceErrorCode;
use crate::domain::widget::FieldKind;

/// Deterministic code-to-field table.
pub struct ErrorMapper;

impl ErrorMapper {
    /// Field to mark invalid for a service error, if any.
    pub fn field_for(code: &ServiceErrorCode) -> Option<FieldKind> {
        match code {
            ServiceErrorCode::CardDeclined
            | ServiceErrorCode::InvalidNumber
            | ServiceErrorCode::IncorrectNumber => Some(FieldKind::Number),
            ServiceErrorCode::InvalidExpiryMonth => Some(FieldKind::ExpiryMonth),
            ServiceErrorCode::InvalidExpiryYear | ServiceErrorCode::ExpiredCard => {
                Some(FieldKind::ExpiryYear)
            }
            ServiceErrorCode::InvalidCvc => Some(FieldKind::Cvc),
            ServiceErrorCode::Other(_) => None,
        }
    }
}
