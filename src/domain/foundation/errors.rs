//! Error types for the domain layer.

use thiserror::Error;

use super::NodeId;

/// Errors raised while constructing or driving a widget.
///
/// Card problems never surface here: they become field markers and
/// events. These are programming or wiring errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WidgetError {
    /// A required external capability was not supplied.
    #[error("Required capability missing: {0}")]
    MissingCapability(&'static str),

    #[error("Element {0} not found in document")]
    ElementNotFound(NodeId),

    #[error("Cannot transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Invalid configuration for '{field}': {reason}")]
    InvalidConfiguration { field: String, reason: String },
}

impl WidgetError {
    /// Creates a missing capability error.
    pub fn missing(capability: &'static str) -> Self {
        WidgetError::MissingCapability(capability)
    }

    /// Creates an invalid configuration error.
    pub fn invalid_configuration(field: impl Into<String>, reason: impl Into<String>) -> Self {
        WidgetError::InvalidConfiguration {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns true when the widget cannot operate at all.
    pub fn is_fatal(&self) -> bool {
        matches!(self, WidgetError::MissingCapability(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_capability_displays_correctly() {
        let err = WidgetError::missing("token client");
        assert_eq!(format!("{}", err), "Required capability missing: token client");
    }

    #[test]
    fn invalid_configuration_displays_correctly() {
        let err = WidgetError::invalid_configuration("token_field_name", "cannot be empty");
        assert_eq!(
            format!("{}", err),
            "Invalid configuration for 'token_field_name': cannot be empty"
        );
    }

    #[test]
    fn element_not_found_displays_node() {
        let err = WidgetError::ElementNotFound(NodeId::from_index(3));
        assert_eq!(format!("{}", err), "Element #3 not found in document");
    }

    #[test]
    fn only_missing_capability_is_fatal() {
        assert!(WidgetError::missing("validator").is_fatal());
        assert!(!WidgetError::ElementNotFound(NodeId::from_index(0)).is_fatal());
    }
}
