//! Events emitted by a widget during its submission cycle.

use crate::domain::card::{ServiceError, TokenResponse};
use crate::domain::foundation::NodeId;
use crate::domain::widget::FieldKind;

/// Typed widget event, delivered to every subscribed listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetEvent {
    /// Tokenization request about to be issued; inputs are disabled.
    Pending,

    /// Tokenization callback fired; inputs are re-enabled.
    Complete,

    Success(TokenResponse),

    /// Service-reported failure. Never emitted for local validation.
    Error(ServiceError),

    /// A field was marked invalid.
    Invalid {
        field_name: &'static str,
        field: FieldKind,
        node: Option<NodeId>,
    },
}

impl WidgetEvent {
    pub fn invalid(field: FieldKind, node: Option<NodeId>) -> Self {
        WidgetEvent::Invalid {
            field_name: field.name(),
            field,
            node,
        }
    }

    /// Namespaced event type used for routing and filtering.
    pub fn event_type(&self) -> &'static str {
        match self {
            WidgetEvent::Pending => "payment.pending",
            WidgetEvent::Complete => "payment.complete",
            WidgetEvent::Success(_) => "payment.success",
            WidgetEvent::Error(_) => "payment.error",
            WidgetEvent::Invalid { .. } => "payment.invalid",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_types_are_namespaced() {
        assert_eq!(WidgetEvent::Pending.event_type(), "payment.pending");
        assert_eq!(WidgetEvent::Complete.event_type(), "payment.complete");
        assert_eq!(
            WidgetEvent::Success(TokenResponse::new("tok_1")).event_type(),
            "payment.success"
        );
        assert_eq!(
            WidgetEvent::Error(ServiceError::new("card_declined")).event_type(),
            "payment.error"
        );
    }

    #[test]
    fn invalid_carries_field_name_and_reference() {
        let event = WidgetEvent::invalid(FieldKind::Cvc, Some(NodeId::from_index(12)));
        assert_eq!(event.event_type(), "payment.invalid");
        assert_eq!(
            event,
            WidgetEvent::Invalid {
                field_name: "cvc",
                field: FieldKind::Cvc,
                node: Some(NodeId::from_index(12)),
            }
        );
    }
}
