//! Finds mount points in a document and attaches widgets to them.
//!
//! Discovery is idempotent: an element that already carries a widget is
//! skipped on later scans.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::foundation::{NodeId, WidgetError, WidgetId};
use crate::domain::widget::{Configuration, KeyEvent, SubmitEvent, SubmitOutcome, WidgetOptions};
use crate::ports::{lock_document, Selector, SharedDocument};

use super::{MountAttributes, PaymentWidget, WidgetServices};

/// Mounts widgets on `<payment>` / `.payment-tag` elements.
pub struct TagDiscovery {
    services: WidgetServices,
    defaults: Configuration,
    mounted: Mutex<HashMap<NodeId, Arc<PaymentWidget>>>,
}

impl TagDiscovery {
    pub fn new(services: WidgetServices, defaults: Configuration) -> Self {
        Self {
            services,
            defaults,
            mounted: Mutex::new(HashMap::new()),
        }
    }

    /// Mounts a widget on every unmounted mount point under `root`
    /// (the document body when `None`). Returns the newly mounted widgets.
    ///
    /// # Errors
    ///
    /// Stops at the first element whose configuration is invalid; widgets
    /// mounted before it stay mounted.
    pub fn replace_tags(&self, root: Option<NodeId>) -> Result<MountedWidgets, WidgetError> {
        let candidates = {
            let doc = lock_document(&self.services.document);
            let root = root.unwrap_or_else(|| doc.body());
            let mut found = doc.query_all(root, &Selector::mount_points());
            if doc.matches(root, &Selector::mount_points()) {
                found.insert(0, root);
            }
            found
        };

        let mut mounted = Vec::new();
        for element in candidates {
            if self.lock_mounted().contains_key(&element) {
                continue;
            }
            mounted.push(self.mount(element, WidgetOptions::new())?);
        }

        if !mounted.is_empty() {
            tracing::info!(count = mounted.len(), "payment widgets mounted");
        }
        Ok(MountedWidgets::new(self.services.document.clone(), mounted))
    }

    /// Mounts and renders a widget on `element` with explicit options.
    ///
    /// Returns the existing widget if the element is already mounted.
    ///
    /// # Errors
    ///
    /// - `InvalidConfiguration` if the resolved options are inconsistent
    /// - `ElementNotFound` if the element is not in the document
    pub fn mount(
        &self,
        element: NodeId,
        explicit: WidgetOptions,
    ) -> Result<Arc<PaymentWidget>, WidgetError> {
        let mut mounted = self.lock_mounted();
        if let Some(existing) = mounted.get(&element) {
            return Ok(existing.clone());
        }

        let attributes = {
            let doc = lock_document(&self.services.document);
            MountAttributes::read(&*doc, element)
        };
        let config = Configuration::resolve(explicit, attributes, self.defaults.clone())?;

        let widget = Arc::new(PaymentWidget::new(element, config, self.services.clone())?);
        widget.render();
        mounted.insert(element, widget.clone());
        Ok(widget)
    }

    pub fn widget_for(&self, element: NodeId) -> Option<Arc<PaymentWidget>> {
        self.lock_mounted().get(&element).cloned()
    }

    /// Every widget mounted so far.
    pub fn mounted(&self) -> MountedWidgets {
        let widgets = self.lock_mounted().values().cloned().collect();
        MountedWidgets::new(self.services.document.clone(), widgets)
    }

    fn lock_mounted(&self) -> MutexGuard<'_, HashMap<NodeId, Arc<PaymentWidget>>> {
        self.mounted.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Where a form submission ended up.
#[derive(Debug)]
pub enum SubmitDispatch {
    /// No interceptor bound; the form was submitted natively.
    Native,

    /// Routed to the bound widget.
    Intercepted {
        widget: WidgetId,
        event: SubmitEvent,
        outcome: SubmitOutcome,
    },

    /// Interceptors are bound, but none belongs to this set.
    Unrouted,
}

/// A set of mounted widgets sharing one document.
#[derive(Clone)]
pub struct MountedWidgets {
    document: SharedDocument,
    widgets: Vec<Arc<PaymentWidget>>,
}

impl MountedWidgets {
    fn new(document: SharedDocument, widgets: Vec<Arc<PaymentWidget>>) -> Self {
        Self { document, widgets }
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<PaymentWidget>> {
        self.widgets.iter()
    }

    pub fn get(&self, id: WidgetId) -> Option<&Arc<PaymentWidget>> {
        self.widgets.iter().find(|w| w.id() == id)
    }

    /// Widget mounted on `element`, if any.
    pub fn on_element(&self, element: NodeId) -> Option<&Arc<PaymentWidget>> {
        self.widgets.iter().find(|w| w.element() == element)
    }

    /// Submits `form` as the browser would: the first bound interceptor
    /// handles it, otherwise the form submits natively.
    pub async fn dispatch_submit(&self, form: NodeId) -> SubmitDispatch {
        let interceptors = lock_document(&self.document).submit_interceptors(form);

        if interceptors.is_empty() {
            lock_document(&self.document).submit_natively(form);
            return SubmitDispatch::Native;
        }

        let Some(widget) = interceptors.iter().find_map(|id| self.get(*id)).cloned() else {
            tracing::warn!(form = %form, "form intercepted by an unknown widget");
            return SubmitDispatch::Unrouted;
        };

        let mut event = SubmitEvent::new();
        let outcome = widget.submit(Some(&mut event)).await;
        SubmitDispatch::Intercepted {
            widget: widget.id(),
            event,
            outcome,
        }
    }

    /// Routes a keystroke to the widget containing `target`. Returns false
    /// when the keystroke must be suppressed.
    pub fn dispatch_key(&self, target: NodeId, key: &KeyEvent) -> bool {
        let owner = {
            let doc = lock_document(&self.document);
            let mut current = Some(target);
            let mut owner = None;
            while let Some(node) = current {
                if let Some(widget) = self.on_element(node) {
                    owner = Some(widget.clone());
                    break;
                }
                current = doc.parent(node);
            }
            owner
        };

        match owner {
            Some(widget) => widget.handle_key(target, key),
            None => true,
        }
    }
}
