//! Document port - the DOM substrate a widget renders into.
//!
//! The widget never touches a concrete DOM. Everything it needs from the
//! page (element lookup, attributes, values, class markers, focus, and
//! submit interception on the host form) goes through this trait.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::foundation::{NodeId, WidgetId};

use super::ElementSpec;

/// Element selector understood by every document adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Tag(String),
    Class(String),
    Id(String),

    /// Any form control: `input`, `select`, `textarea` or `button`.
    FormControl,

    AnyOf(Vec<Selector>),
}

impl Selector {
    pub fn tag(tag: impl Into<String>) -> Self {
        Selector::Tag(tag.into())
    }

    pub fn class(class: impl Into<String>) -> Self {
        Selector::Class(class.into())
    }

    pub fn id(id: impl Into<String>) -> Self {
        Selector::Id(id.into())
    }

    /// Widget mount points: `<payment>` elements and `.payment-tag`.
    pub fn mount_points() -> Self {
        Selector::AnyOf(vec![Selector::tag("payment"), Selector::class("payment-tag")])
    }
}

/// Port for the document a widget lives in.
///
/// Node handles are only valid for the document that issued them.
/// Operations on unknown or detached nodes are no-ops (setters) or
/// return empty values (getters); they never panic.
pub trait Document: Send {
    /// Root element scanned when no subtree is given.
    fn body(&self) -> NodeId;

    /// True if the node exists and is attached to the tree.
    fn contains(&self, node: NodeId) -> bool;

    fn tag_name(&self, node: NodeId) -> Option<String>;

    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

    fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.attribute(node, name).is_some()
    }

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    fn matches(&self, node: NodeId, selector: &Selector) -> bool;

    /// Descendants of `root` (excluding `root`) matching `selector`, in
    /// document order.
    fn query_all(&self, root: NodeId, selector: &Selector) -> Vec<NodeId>;

    fn query(&self, root: NodeId, selector: &Selector) -> Option<NodeId> {
        self.query_all(root, selector).into_iter().next()
    }

    /// Nearest ancestor (excluding `node`) matching `selector`.
    fn closest_ancestor(&self, node: NodeId, selector: &Selector) -> Option<NodeId> {
        let mut current = self.parent(node);
        while let Some(candidate) = current {
            if self.matches(candidate, selector) {
                return Some(candidate);
            }
            current = self.parent(candidate);
        }
        None
    }

    /// Discards the children of `node` and builds `content` in their place.
    fn replace_children(&mut self, node: NodeId, content: &[ElementSpec]);

    /// Current value of a control; empty when unknown.
    fn value(&self, node: NodeId) -> String;

    fn set_value(&mut self, node: NodeId, value: &str);

    fn set_text(&mut self, node: NodeId, text: &str);

    fn is_disabled(&self, node: NodeId) -> bool;

    fn set_disabled(&mut self, node: NodeId, disabled: bool);

    fn has_class(&self, node: NodeId, class: &str) -> bool;

    fn add_class(&mut self, node: NodeId, class: &str);

    fn remove_class(&mut self, node: NodeId, class: &str);

    /// Focuses the node and selects its content.
    fn focus(&mut self, node: NodeId);

    /// Installs `widget` as a submit interceptor for `form`.
    fn bind_submit(&mut self, form: NodeId, widget: WidgetId);

    fn unbind_submit(&mut self, form: NodeId, widget: WidgetId);

    /// Interceptors bound to `form`, in binding order.
    fn submit_interceptors(&self, form: NodeId) -> Vec<WidgetId>;

    /// Submits `form` the way the browser would, bypassing interceptors.
    fn submit_natively(&mut self, form: NodeId);
}

/// Document shared between every widget mounted on the page.
pub type SharedDocument = Arc<Mutex<dyn Document>>;

/// Locks a shared document, recovering the guard if a holder panicked.
pub fn lock_document(document: &SharedDocument) -> MutexGuard<'_, dyn Document + 'static> {
    document.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn Document) {}

    #[test]
    fn mount_points_cover_tag_and_class() {
        assert_eq!(
            Selector::mount_points(),
            Selector::AnyOf(vec![
                Selector::Tag("payment".into()),
                Selector::Class("payment-tag".into())
            ])
        );
    }
}
