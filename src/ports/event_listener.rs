//! Event listener port - subscribers to widget events.

use crate::domain::foundation::WidgetId;
use crate::domain::widget::WidgetEvent;

/// Subscriber notified of every event a widget emits.
///
/// Listeners are invoked synchronously, in emission order, with no widget
/// lock held; they may call back into the widget.
pub trait WidgetEventListener: Send + Sync {
    fn on_event(&self, widget: WidgetId, event: &WidgetEvent);
}
