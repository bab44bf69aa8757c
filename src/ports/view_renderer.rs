//! View renderer port - turns widget configuration into field markup.
//!
//! Markup is a typed element tree rather than an HTML string so that any
//! document adapter can build it.

use crate::domain::widget::Configuration;

/// Element to be created by a document adapter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementSpec {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: Vec<(String, String)>,
    pub value: Option<String>,
    pub text: Option<String>,
    pub children: Vec<ElementSpec>,
}

impl ElementSpec {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn child(mut self, child: ElementSpec) -> Self {
        self.children.push(child);
        self
    }

    /// Looks up an attribute set on this element.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Port for generating widget markup.
pub trait ViewRenderer: Send + Sync {
    /// Markup for the card fields, honouring `collect_cvc`.
    ///
    /// Must contain inputs carrying the fixed `FieldKind::element_id`s and
    /// an element with class `message`.
    fn render_fields(&self, config: &Configuration) -> Vec<ElementSpec>;

    /// Hidden input carrying the token id under `field_name`.
    fn render_token(&self, field_name: &str, token_id: &str) -> ElementSpec;
}
