//! Recording listener for tests.
//!
//! # Security Note
//!
//! Uses `.expect()` on lock operations; intended for tests and examples
//! only.

use std::sync::RwLock;

use crate::domain::foundation::WidgetId;
use crate::domain::widget::WidgetEvent;
use crate::ports::WidgetEventListener;

/// Captures every delivered event, in delivery order.
///
/// # Example
///
/// ```ignore
/// let recorder = Arc::new(RecordingListener::new());
/// widget.subscribe(recorder.clone());
///
/// widget.submit(None).await;
/// assert!(recorder.has_event("payment.pending"));
/// ```
#[derive(Default)]
pub struct RecordingListener {
    received: RwLock<Vec<(WidgetId, WidgetEvent)>>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// All received events.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn events(&self) -> Vec<WidgetEvent> {
        self.received
            .read()
            .expect("RecordingListener: lock poisoned")
            .iter()
            .map(|(_, event)| event.clone())
            .collect()
    }

    /// Received events of one type, e.g. `"payment.invalid"`.
    pub fn events_of_type(&self, event_type: &str) -> Vec<WidgetEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Received events emitted by one widget.
    pub fn events_for(&self, widget: WidgetId) -> Vec<WidgetEvent> {
        self.received
            .read()
            .expect("RecordingListener: lock poisoned")
            .iter()
            .filter(|(id, _)| *id == widget)
            .map(|(_, event)| event.clone())
            .collect()
    }

    /// Event types in delivery order.
    pub fn event_types(&self) -> Vec<&'static str> {
        self.events().iter().map(WidgetEvent::event_type).collect()
    }

    pub fn event_count(&self) -> usize {
        self.received
            .read()
            .expect("RecordingListener: lock poisoned")
            .len()
    }

    pub fn has_event(&self, event_type: &str) -> bool {
        self.events().iter().any(|e| e.event_type() == event_type)
    }

    pub fn clear(&self) {
        self.received
            .write()
            .expect("RecordingListener: lock poisoned")
            .clear();
    }
}

impl WidgetEventListener for RecordingListener {
    fn on_event(&self, widget: WidgetId, event: &WidgetEvent) {
        self.received
            .write()
            .expect("RecordingListener: lock poisoned")
            .push((widget, event.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::card::ServiceError;

    #[test]
    fn records_in_delivery_order() {
        let recorder = RecordingListener::new();
        let widget = WidgetId::new();

        recorder.on_event(widget, &WidgetEvent::Pending);
        recorder.on_event(widget, &WidgetEvent::Complete);
        recorder.on_event(widget, &WidgetEvent::Error(ServiceError::new("card_declined")));

        assert_eq!(
            recorder.event_types(),
            vec!["payment.pending", "payment.complete", "payment.error"]
        );
        assert_eq!(recorder.events_of_type("payment.error").len(), 1);
    }

    #[test]
    fn filters_by_widget_and_clears() {
        let recorder = RecordingListener::new();
        let first = WidgetId::new();
        let second = WidgetId::new();

        recorder.on_event(first, &WidgetEvent::Pending);
        recorder.on_event(second, &WidgetEvent::Complete);

        assert_eq!(recorder.events_for(second), vec![WidgetEvent::Complete]);

        recorder.clear();
        assert_eq!(recorder.event_count(), 0);
        assert!(!recorder.has_event("payment.pending"));
    }
}
