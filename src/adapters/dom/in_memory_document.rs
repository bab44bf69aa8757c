//! In-memory document for tests and headless hosts.
//!
//! Provides a small arena-backed element tree implementing the `Document`
//! port, plus assertion helpers (focus tracking, native submissions).
//!
//! # Security Note
//!
//! Native submissions are only recorded, never sent anywhere.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use crate::domain::foundation::{NodeId, WidgetId};
use crate::ports::{Document, ElementSpec, Selector};

const FORM_CONTROL_TAGS: [&str; 4] = ["input", "select", "textarea", "button"];

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    value: String,
    text: String,
    disabled: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            value: String::new(),
            text: String::new(),
            disabled: false,
            parent: None,
            children: Vec::new(),
        }
    }
}

/// Snapshot of a form at the moment it was natively submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    pub form: NodeId,

    /// Named, enabled controls as `(name, value)`, in document order.
    pub fields: Vec<(String, String)>,
}

impl FormSubmission {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Headless element tree.
///
/// # Example
///
/// ```ignore
/// let mut doc = InMemoryDocument::new();
/// let form = doc.append(doc.body(), &ElementSpec::new("form"));
/// let tag = doc.append(form, &ElementSpec::new("payment").attr("data-key", "pk_test_1"));
/// ```
#[derive(Debug)]
pub struct InMemoryDocument {
    nodes: Vec<Node>,
    body: NodeId,
    focused: Option<NodeId>,
    interceptors: HashMap<NodeId, Vec<WidgetId>>,
    submissions: Vec<FormSubmission>,
}

impl InMemoryDocument {
    /// Creates a document holding an empty `<body>`.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new("body")],
            body: NodeId::from_index(0),
            focused: None,
            interceptors: HashMap::new(),
            submissions: Vec::new(),
        }
    }

    /// Wraps the document for sharing between widgets.
    pub fn into_shared(self) -> Arc<Mutex<InMemoryDocument>> {
        Arc::new(Mutex::new(self))
    }

    /// Builds `spec` (and its children) as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, spec: &ElementSpec) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        let mut node = Node::new(&spec.tag);

        if let Some(element_id) = &spec.id {
            node.attributes.insert("id".to_string(), element_id.clone());
        }
        node.classes = spec.classes.clone();
        for (name, value) in &spec.attributes {
            if name == "disabled" {
                node.disabled = true;
            } else {
                node.attributes.insert(name.clone(), value.clone());
            }
        }
        node.value = spec.value.clone().unwrap_or_default();
        node.text = spec.text.clone().unwrap_or_default();

        if self.node(parent).is_some() {
            node.parent = Some(parent);
        }
        self.nodes.push(node);
        if let Some(parent_node) = self.node_mut(parent) {
            parent_node.children.push(id);
        }

        for child in &spec.children {
            self.append(id, child);
        }
        id
    }

    /// First attached element with the given id.
    pub fn find_by_id(&self, element_id: &str) -> Option<NodeId> {
        self.query(self.body, &Selector::id(element_id))
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    pub fn text(&self, node: NodeId) -> String {
        self.node(node).map(|n| n.text.clone()).unwrap_or_default()
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.node(node).map(|n| n.children.clone()).unwrap_or_default()
    }

    pub fn classes(&self, node: NodeId) -> Vec<String> {
        self.node(node).map(|n| n.classes.clone()).unwrap_or_default()
    }

    /// Every native submission so far, oldest first.
    pub fn submissions(&self) -> &[FormSubmission] {
        &self.submissions
    }

    pub fn submission_count(&self, form: NodeId) -> usize {
        self.submissions.iter().filter(|s| s.form == form).count()
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    fn collect_descendants(&self, root: NodeId, selector: &Selector, out: &mut Vec<NodeId>) {
        let Some(node) = self.node(root) else {
            return;
        };
        for &child in &node.children {
            if self.matches(child, selector) {
                out.push(child);
            }
            self.collect_descendants(child, selector, out);
        }
    }
}

impl Default for InMemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl Document for InMemoryDocument {
    fn body(&self) -> NodeId {
        self.body
    }

    fn contains(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == self.body {
                return true;
            }
            current = self.node(id).and_then(|n| n.parent);
        }
        false
    }

    fn tag_name(&self, node: NodeId) -> Option<String> {
        self.node(node).map(|n| n.tag.clone())
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        let node = self.node(node)?;
        match name {
            "class" if !node.classes.is_empty() => Some(node.classes.join(" ")),
            "disabled" if node.disabled => Some("disabled".to_string()),
            _ => node.attributes.get(name).cloned(),
        }
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).and_then(|n| n.parent)
    }

    fn matches(&self, node: NodeId, selector: &Selector) -> bool {
        let Some(n) = self.node(node) else {
            return false;
        };
        match selector {
            Selector::Tag(tag) => n.tag.eq_ignore_ascii_case(tag),
            Selector::Class(class) => n.classes.iter().any(|c| c == class),
            Selector::Id(id) => n.attributes.get("id") == Some(id),
            Selector::FormControl => FORM_CONTROL_TAGS.contains(&n.tag.as_str()),
            Selector::AnyOf(selectors) => selectors.iter().any(|s| self.matches(node, s)),
        }
    }

    fn query_all(&self, root: NodeId, selector: &Selector) -> Vec<NodeId> {
        let mut found = Vec::new();
        self.collect_descendants(root, selector, &mut found);
        found
    }

    fn replace_children(&mut self, node: NodeId, content: &[ElementSpec]) {
        let Some(target) = self.node_mut(node) else {
            return;
        };
        let old_children = std::mem::take(&mut target.children);
        for child in old_children {
            if let Some(child_node) = self.node_mut(child) {
                child_node.parent = None;
            }
        }
        for spec in content {
            self.append(node, spec);
        }
    }

    fn value(&self, node: NodeId) -> String {
        self.node(node).map(|n| n.value.clone()).unwrap_or_default()
    }

    fn set_value(&mut self, node: NodeId, value: &str) {
        if let Some(n) = self.node_mut(node) {
            n.value = value.to_string();
        }
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(n) = self.node_mut(node) {
            n.text = text.to_string();
        }
    }

    fn is_disabled(&self, node: NodeId) -> bool {
        self.node(node).is_some_and(|n| n.disabled)
    }

    fn set_disabled(&mut self, node: NodeId, disabled: bool) {
        if let Some(n) = self.node_mut(node) {
            n.disabled = disabled;
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.node(node).is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(n) = self.node_mut(node) {
            if !n.classes.iter().any(|c| c == class) {
                n.classes.push(class.to_string());
            }
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(n) = self.node_mut(node) {
            n.classes.retain(|c| c != class);
        }
    }

    fn focus(&mut self, node: NodeId) {
        if self.contains(node) {
            self.focused = Some(node);
        }
    }

    fn bind_submit(&mut self, form: NodeId, widget: WidgetId) {
        let bound = self.interceptors.entry(form).or_default();
        if !bound.contains(&widget) {
            bound.push(widget);
        }
    }

    fn unbind_submit(&mut self, form: NodeId, widget: WidgetId) {
        if let Some(bound) = self.interceptors.get_mut(&form) {
            bound.retain(|w| *w != widget);
        }
    }

    fn submit_interceptors(&self, form: NodeId) -> Vec<WidgetId> {
        self.interceptors.get(&form).cloned().unwrap_or_default()
    }

    fn submit_natively(&mut self, form: NodeId) {
        let fields = self
            .query_all(form, &Selector::FormControl)
            .into_iter()
            .filter(|&control| !self.is_disabled(control))
            .filter_map(|control| {
                let name = self.attribute(control, "name")?;
                Some((name, self.value(control)))
            })
            .collect();

        self.submissions.push(FormSubmission { form, fields });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form_with_inputs() -> (InMemoryDocument, NodeId) {
        let mut doc = InMemoryDocument::new();
        let form = doc.append(
            doc.body(),
            &ElementSpec::new("form")
                .child(ElementSpec::new("input").attr("name", "email").value("a@b.c"))
                .child(ElementSpec::new("input").attr("name", "locked").attr("disabled", ""))
                .child(ElementSpec::new("div").child(ElementSpec::new("select").attr("name", "plan"))),
        );
        (doc, form)
    }

    #[test]
    fn query_all_returns_descendants_in_document_order() {
        let (doc, form) = form_with_inputs();
        let controls = doc.query_all(form, &Selector::FormControl);
        let names: Vec<_> = controls
            .iter()
            .map(|&c| doc.attribute(c, "name").unwrap())
            .collect();
        assert_eq!(names, vec!["email", "locked", "plan"]);
    }

    #[test]
    fn disabled_attribute_maps_to_flag() {
        let (doc, form) = form_with_inputs();
        let locked = doc.query_all(form, &Selector::FormControl)[1];
        assert!(doc.is_disabled(locked));
        assert!(doc.has_attribute(locked, "disabled"));
    }

    #[test]
    fn replace_children_detaches_old_nodes() {
        let (mut doc, form) = form_with_inputs();
        let old = doc.children(form);

        doc.replace_children(form, &[ElementSpec::new("span").class("message")]);

        assert!(old.iter().all(|&n| !doc.contains(n)));
        assert_eq!(doc.query_all(form, &Selector::FormControl).len(), 0);
        assert!(doc.query(form, &Selector::class("message")).is_some());
    }

    #[test]
    fn closest_ancestor_finds_enclosing_form() {
        let (doc, form) = form_with_inputs();
        let select = doc.query(form, &Selector::tag("select")).unwrap();
        assert_eq!(doc.closest_ancestor(select, &Selector::tag("form")), Some(form));
        assert_eq!(doc.closest_ancestor(form, &Selector::tag("form")), None);
    }

    #[test]
    fn native_submit_snapshots_enabled_named_controls() {
        let (mut doc, form) = form_with_inputs();
        doc.submit_natively(form);

        assert_eq!(doc.submission_count(form), 1);
        let submission = &doc.submissions()[0];
        assert_eq!(submission.field("email"), Some("a@b.c"));
        assert_eq!(submission.field("plan"), Some(""));
        assert_eq!(submission.field("locked"), None);
    }

    #[test]
    fn submit_binding_is_idempotent_per_widget() {
        let (mut doc, form) = form_with_inputs();
        let widget = WidgetId::new();

        doc.bind_submit(form, widget);
        doc.bind_submit(form, widget);
        assert_eq!(doc.submit_interceptors(form), vec![widget]);

        doc.unbind_submit(form, widget);
        assert!(doc.submit_interceptors(form).is_empty());
    }

    #[test]
    fn focus_ignores_detached_nodes() {
        let (mut doc, form) = form_with_inputs();
        let first = doc.children(form)[0];
        doc.replace_children(form, &[]);
        doc.focus(first);
        assert_eq!(doc.focused(), None);
    }

    #[test]
    fn unknown_nodes_are_harmless() {
        let mut doc = InMemoryDocument::new();
        let ghost = NodeId::from_index(99);
        doc.set_value(ghost, "x");
        doc.add_class(ghost, "y");
        assert_eq!(doc.value(ghost), "");
        assert!(!doc.contains(ghost));
        assert!(!doc.has_class(ghost, "y"));
    }
}
