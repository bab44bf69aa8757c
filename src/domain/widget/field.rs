//! Card input fields and the references a rendered widget holds to them.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::NodeId;

/// Class of the element that displays error messages.
pub const MESSAGE_CLASS: &str = "message";

/// Class applied to a field container that failed validation.
pub const INVALID_CLASS: &str = "invalid";

/// One of the card inputs the widget renders.
///
/// Ordering follows document order, which decides focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Number,
    ExpiryMonth,
    ExpiryYear,
    Cvc,
}

impl FieldKind {
    /// All fields in document order.
    pub const ALL: [FieldKind; 4] = [
        FieldKind::Number,
        FieldKind::ExpiryMonth,
        FieldKind::ExpiryYear,
        FieldKind::Cvc,
    ];

    /// Name reported in `invalid` events; matches the tokenization parameter.
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Number => "number",
            FieldKind::ExpiryMonth => "exp_month",
            FieldKind::ExpiryYear => "exp_year",
            FieldKind::Cvc => "cvc",
        }
    }

    /// Fixed element id of the rendered input.
    pub fn element_id(&self) -> &'static str {
        match self {
            FieldKind::Number => "paymentNumber",
            FieldKind::ExpiryMonth => "paymentExpiryMonth",
            FieldKind::ExpiryYear => "paymentExpiryYear",
            FieldKind::Cvc => "paymentCVC",
        }
    }

    /// Message shown when local validation rejects the field.
    pub fn invalid_message(&self) -> &'static str {
        match self {
            FieldKind::Number => "Your card number is invalid.",
            FieldKind::ExpiryMonth | FieldKind::ExpiryYear => {
                "Your card's expiration date is invalid."
            }
            FieldKind::Cvc => "Your card's security code is invalid.",
        }
    }
}

/// Element references acquired after rendering.
///
/// Every entry is optional: a field that is missing from the markup
/// simply fails validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldRefs {
    pub number: Option<NodeId>,
    pub expiry_month: Option<NodeId>,
    pub expiry_year: Option<NodeId>,
    pub cvc: Option<NodeId>,
    pub message: Option<NodeId>,
}

impl FieldRefs {
    pub fn get(&self, kind: FieldKind) -> Option<NodeId> {
        match kind {
            FieldKind::Number => self.number,
            FieldKind::ExpiryMonth => self.expiry_month,
            FieldKind::ExpiryYear => self.expiry_year,
            FieldKind::Cvc => self.cvc,
        }
    }

    pub fn set(&mut self, kind: FieldKind, node: Option<NodeId>) {
        match kind {
            FieldKind::Number => self.number = node,
            FieldKind::ExpiryMonth => self.expiry_month = node,
            FieldKind::ExpiryYear => self.expiry_year = node,
            FieldKind::Cvc => self.cvc = node,
        }
    }

    /// Which field, if any, a node is.
    pub fn kind_of(&self, node: NodeId) -> Option<FieldKind> {
        FieldKind::ALL
            .into_iter()
            .find(|kind| self.get(*kind) == Some(node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_follows_document_order() {
        let mut kinds = vec![FieldKind::Cvc, FieldKind::Number, FieldKind::ExpiryYear];
        kinds.sort();
        assert_eq!(
            kinds,
            vec![FieldKind::Number, FieldKind::ExpiryYear, FieldKind::Cvc]
        );
    }

    #[test]
    fn element_ids_are_fixed() {
        assert_eq!(FieldKind::Number.element_id(), "paymentNumber");
        assert_eq!(FieldKind::Cvc.element_id(), "paymentCVC");
    }

    #[test]
    fn refs_get_set_and_reverse_lookup() {
        let mut refs = FieldRefs::default();
        refs.set(FieldKind::Cvc, Some(NodeId::from_index(9)));

        assert_eq!(refs.get(FieldKind::Cvc), Some(NodeId::from_index(9)));
        assert_eq!(refs.kind_of(NodeId::from_index(9)), Some(FieldKind::Cvc));
        assert_eq!(refs.kind_of(NodeId::from_index(1)), None);
    }
}
