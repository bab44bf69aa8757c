//! Listener that reports widget events through `tracing`.

use crate::domain::foundation::WidgetId;
use crate::domain::widget::WidgetEvent;
use crate::ports::WidgetEventListener;

/// Logs every widget event. Card data never appears in the output.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingListener;

impl TracingListener {
    pub fn new() -> Self {
        Self
    }
}

impl WidgetEventListener for TracingListener {
    fn on_event(&self, widget: WidgetId, event: &WidgetEvent) {
        let event_type = event.event_type();
        match event {
            WidgetEvent::Pending | WidgetEvent::Complete => {
                tracing::debug!(widget = %widget, event_type, "widget event");
            }
            WidgetEvent::Success(token) => {
                tracing::info!(
                    widget = %widget,
                    event_type,
                    livemode = token.livemode,
                    "card tokenized"
                );
            }
            WidgetEvent::Error(error) => {
                tracing::warn!(widget = %widget, event_type, code = %error.code, "tokenization rejected");
            }
            WidgetEvent::Invalid { field_name, .. } => {
                tracing::debug!(widget = %widget, event_type, field = field_name, "field invalid");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::card::TokenResponse;
    use crate::domain::widget::FieldKind;

    #[test]
    fn handles_every_event_kind() {
        let listener = TracingListener::new();
        let widget = WidgetId::new();
        for event in [
            WidgetEvent::Pending,
            WidgetEvent::Complete,
            WidgetEvent::Success(TokenResponse::new("tok_1")),
            WidgetEvent::invalid(FieldKind::Number, None),
        ] {
            listener.on_event(widget, &event);
        }
    }
}
