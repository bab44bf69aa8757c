//! Capabilities a widget is constructed with.

use std::sync::Arc;

use crate::domain::foundation::WidgetError;
use crate::ports::{FieldValidator, SharedDocument, TokenClient, ViewRenderer, WidgetEventListener};

/// Injected dependencies shared by every widget on a page.
#[derive(Clone)]
pub struct WidgetServices {
    pub document: SharedDocument,
    pub validator: Arc<dyn FieldValidator>,
    pub tokenizer: Arc<dyn TokenClient>,
    pub renderer: Arc<dyn ViewRenderer>,

    /// Subscribed to every widget at construction.
    pub listeners: Vec<Arc<dyn WidgetEventListener>>,
}

impl WidgetServices {
    pub fn builder(document: SharedDocument) -> WidgetServicesBuilder {
        WidgetServicesBuilder {
            document,
            validator: None,
            tokenizer: None,
            renderer: None,
            listeners: Vec::new(),
        }
    }
}

/// Builder that refuses to produce services with a capability missing.
pub struct WidgetServicesBuilder {
    document: SharedDocument,
    validator: Option<Arc<dyn FieldValidator>>,
    tokenizer: Option<Arc<dyn TokenClient>>,
    renderer: Option<Arc<dyn ViewRenderer>>,
    listeners: Vec<Arc<dyn WidgetEventListener>>,
}

impl WidgetServicesBuilder {
    pub fn validator(mut self, validator: Arc<dyn FieldValidator>) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn tokenizer(mut self, tokenizer: Arc<dyn TokenClient>) -> Self {
        self.tokenizer = Some(tokenizer);
        self
    }

    pub fn renderer(mut self, renderer: Arc<dyn ViewRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn listener(mut self, listener: Arc<dyn WidgetEventListener>) -> Self {
        self.listeners.push(listener);
        self
    }

    /// # Errors
    ///
    /// - `MissingCapability` if the validator, tokenizer or renderer is absent
    pub fn build(self) -> Result<WidgetServices, WidgetError> {
        Ok(WidgetServices {
            document: self.document,
            validator: self
                .validator
                .ok_or_else(|| WidgetError::missing("field validator"))?,
            tokenizer: self
                .tokenizer
                .ok_or_else(|| WidgetError::missing("token client"))?,
            renderer: self
                .renderer
                .ok_or_else(|| WidgetError::missing("view renderer"))?,
            listeners: self.listeners,
        })
    }
}
