//! Payment widget - one mounted card form.
//!
//! Owns the submission lifecycle for its host form:
//!
//! ```text
//! Idle ──submit──▶ Validating ──invalid──▶ Idle
//!                       │
//!                     valid
//!                       ▼
//!                    Pending ──token result──▶ Resolved ──submit──▶ Validating
//! ```
//!
//! Events are queued while the widget state is locked and delivered to
//! listeners after the lock is released. No lock is held across the
//! tokenization await.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use chrono::Datelike;

use crate::domain::card::{CardBrand, CardDetails, Expiry, ServiceError, TokenResponse};
use crate::domain::foundation::{NodeId, StateMachine, WidgetError, WidgetId};
use crate::domain::widget::{
    keystroke, Configuration, ErrorMapper, FieldKind, FieldRefs, KeyEvent, KeyPhase,
    SubmissionState, SubmitEvent, SubmitOutcome, WidgetEvent, INVALID_CLASS, MESSAGE_CLASS,
};
use crate::ports::{
    lock_document, Document, FieldValidator, Selector, SharedDocument, TokenClient, ViewRenderer,
    WidgetEventListener,
};

use super::{SubmissionGate, WidgetServices};

/// Class on the widget element while a request is outstanding.
pub const PENDING_CLASS: &str = "pending";

/// Class on the widget element after a token was obtained.
pub const SUCCESS_CLASS: &str = "success";

#[derive(Default)]
struct WidgetState {
    status: SubmissionState,

    /// Set once the submit interceptor has been let go.
    released: bool,

    fields: FieldRefs,
    invalid: BTreeSet<FieldKind>,
    messages: Vec<String>,
    gate: SubmissionGate,

    /// Events waiting to be delivered once locks are released.
    outbox: Vec<WidgetEvent>,
}

impl WidgetState {
    fn advance(&mut self, widget: WidgetId, target: SubmissionState) {
        match self.status.transition_to(target) {
            Ok(next) => {
                tracing::debug!(widget = %widget, from = ?self.status, to = ?next, "submission state");
                self.status = next;
            }
            Err(e) => tracing::error!(widget = %widget, error = %e, "rejected state transition"),
        }
    }
}

/// A card form mounted on one element.
pub struct PaymentWidget {
    id: WidgetId,
    element: NodeId,
    config: Configuration,
    document: SharedDocument,
    validator: Arc<dyn FieldValidator>,
    tokenizer: Arc<dyn TokenClient>,
    renderer: Arc<dyn ViewRenderer>,
    listeners: RwLock<Vec<Arc<dyn WidgetEventListener>>>,
    state: Mutex<WidgetState>,
}

impl std::fmt::Debug for PaymentWidget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentWidget")
            .field("id", &self.id)
            .field("element", &self.element)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl PaymentWidget {
    /// Creates a widget on `element` and starts intercepting its host form.
    ///
    /// Applies the publishable key to the token client when one is
    /// configured. Call [`render`](Self::render) before use.
    ///
    /// # Errors
    ///
    /// - `ElementNotFound` if `element` or the host form is not in the document
    pub fn new(
        element: NodeId,
        config: Configuration,
        services: WidgetServices,
    ) -> Result<Self, WidgetError> {
        let WidgetServices {
            document,
            validator,
            tokenizer,
            renderer,
            listeners,
        } = services;
        let id = WidgetId::new();

        {
            let mut doc = lock_document(&document);
            if !doc.contains(element) {
                return Err(WidgetError::ElementNotFound(element));
            }
            if let Some(form) = config.host_form {
                if !doc.contains(form) {
                    return Err(WidgetError::ElementNotFound(form));
                }
                doc.bind_submit(form, id);
            }
        }

        if let Some(key) = &config.publishable_key {
            tokenizer.set_publishable_key(key);
        } else {
            tracing::warn!(widget = %id, "no publishable key configured");
        }

        tracing::debug!(
            widget = %id,
            element = %element,
            collect_cvc = config.collect_cvc,
            collect_token = config.collect_token,
            "payment widget created"
        );

        Ok(Self {
            id,
            element,
            config,
            document,
            validator,
            tokenizer,
            renderer,
            listeners: RwLock::new(listeners),
            state: Mutex::new(WidgetState::default()),
        })
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn element(&self) -> NodeId {
        self.element
    }

    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    pub fn state(&self) -> SubmissionState {
        self.lock_state().status
    }

    /// True iff a tokenization request is outstanding.
    pub fn is_pending(&self) -> bool {
        self.state().is_pending()
    }

    /// True while this widget intercepts its host form's submit.
    pub fn is_intercepting(&self) -> bool {
        self.config.host_form.is_some() && !self.lock_state().released
    }

    /// Fields currently marked invalid, in document order.
    pub fn invalid_fields(&self) -> Vec<FieldKind> {
        self.lock_state().invalid.iter().copied().collect()
    }

    /// Messages currently shown in the message element.
    pub fn messages(&self) -> Vec<String> {
        self.lock_state().messages.clone()
    }

    pub fn fields(&self) -> FieldRefs {
        self.lock_state().fields
    }

    pub fn subscribe(&self, listener: Arc<dyn WidgetEventListener>) {
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(listener);
    }

    /// Replaces the element's content with the card fields and acquires
    /// references to them.
    pub fn render(&self) {
        let markup = self.renderer.render_fields(&self.config);
        let mut state = self.lock_state();
        let mut doc = lock_document(&self.document);

        doc.replace_children(self.element, &markup);

        let mut fields = FieldRefs::default();
        for kind in FieldKind::ALL {
            fields.set(kind, doc.query(self.element, &Selector::id(kind.element_id())));
        }
        fields.message = doc.query(self.element, &Selector::class(MESSAGE_CLASS));

        state.fields = fields;
        state.invalid.clear();
        state.messages.clear();
        tracing::debug!(widget = %self.id, "card fields rendered");
    }

    /// Runs local validation, marking failing fields.
    ///
    /// Emits `invalid` for each failing field. Never emits `error`.
    pub fn validate(&self) -> bool {
        let valid = {
            let mut state = self.lock_state();
            let mut doc = lock_document(&self.document);
            self.run_validation(&mut state, &mut *doc)
        };
        self.flush_events();
        valid
    }

    /// Handles a host form submission.
    ///
    /// The event's default action and further propagation are always
    /// suppressed. While a request is outstanding this is a no-op.
    pub async fn submit(&self, event: Option<&mut SubmitEvent>) -> SubmitOutcome {
        if let Some(event) = event {
            event.prevent_default();
            event.stop_immediate_propagation();
        }

        let card = match self.begin_submit() {
            Ok(card) => card,
            Err(outcome) => return outcome,
        };

        let in_flight = InFlight::new(self);
        let result = self.tokenizer.create_token(card).await;
        in_flight.complete(result)
    }

    /// Applies a tokenization result.
    ///
    /// On success the hidden token field is rendered (if collecting), the
    /// interceptor is released and the host form is submitted natively.
    /// On failure the message is shown and the responsible field marked.
    pub fn handle_token(&self, result: Result<TokenResponse, ServiceError>) -> SubmitOutcome {
        let (outcome, native_submit) = {
            let mut state = self.lock_state();
            if !state.status.is_pending() {
                tracing::warn!(widget = %self.id, "token result with no request outstanding");
                return SubmitOutcome::Ignored;
            }

            let mut doc = lock_document(&self.document);
            let roots = self.gate_roots();
            state.gate.enable_inputs(&mut *doc, &roots);
            state.outbox.push(WidgetEvent::Complete);
            doc.remove_class(self.element, PENDING_CLASS);
            state.advance(self.id, SubmissionState::Resolved);

            match result {
                Err(error) => {
                    tracing::error!(
                        widget = %self.id,
                        code = %error.code,
                        detail = error.message.as_deref().unwrap_or(""),
                        "tokenization failed"
                    );
                    self.apply_service_error(&mut state, &mut *doc, &error);
                    (SubmitOutcome::Rejected(error), None)
                }
                Ok(token) => {
                    tracing::info!(widget = %self.id, livemode = token.livemode, "card tokenized");
                    let token_id = token.id.clone();
                    state.outbox.push(WidgetEvent::Success(token));
                    doc.add_class(self.element, SUCCESS_CLASS);

                    if self.config.collect_token {
                        let hidden = self
                            .renderer
                            .render_token(&self.config.token_field_name, &token_id);
                        doc.replace_children(self.element, &[hidden]);
                        state.fields = FieldRefs::default();
                    }

                    let native_submit = match self.config.host_form {
                        Some(form) if !state.released => {
                            doc.unbind_submit(form, self.id);
                            Some(form)
                        }
                        _ => None,
                    };
                    state.released = true;
                    (SubmitOutcome::Tokenized { token_id }, native_submit)
                }
            }
        };

        self.flush_events();

        if let Some(form) = native_submit {
            tracing::debug!(widget = %self.id, form = %form, "submitting host form");
            lock_document(&self.document).submit_natively(form);
        }
        outcome
    }

    /// Routes a keystroke on `target`. Returns false when the keystroke
    /// must be suppressed.
    pub fn handle_key(&self, target: NodeId, key: &KeyEvent) -> bool {
        let (is_number, is_tel) = {
            let state = self.lock_state();
            let doc = lock_document(&self.document);
            let is_tel = state.fields.kind_of(target).is_some()
                && doc.attribute(target, "type").as_deref() == Some("tel");
            (state.fields.number == Some(target), is_tel)
        };

        match key.phase {
            KeyPhase::Down if is_number => {
                self.format_number(key);
                true
            }
            KeyPhase::Up if is_number => {
                self.change_card_type();
                true
            }
            KeyPhase::Press if is_tel => self.restrict_numeric(key),
            _ => true,
        }
    }

    /// Inserts a grouping space into the number field when the value sits
    /// on a group boundary for its brand.
    pub fn format_number(&self, key: &KeyEvent) {
        let state = self.lock_state();
        let Some(number) = state.fields.number else {
            return;
        };
        let mut doc = lock_document(&self.document);
        let value = doc.value(number);
        let brand = self.validator.classify(&value);
        if let Some(formatted) = keystroke::format_number(&value, brand, key) {
            doc.set_value(number, &formatted);
        }
    }

    /// Whether a keystroke is allowed in a numeric-only field.
    pub fn restrict_numeric(&self, key: &KeyEvent) -> bool {
        keystroke::allows_keystroke(key)
    }

    /// Keeps exactly one brand marker on the number field.
    pub fn change_card_type(&self) {
        let state = self.lock_state();
        let Some(number) = state.fields.number else {
            return;
        };
        let mut doc = lock_document(&self.document);
        let brand = self.validator.classify(&doc.value(number));

        let present: Vec<CardBrand> = CardBrand::ALL
            .into_iter()
            .filter(|b| doc.has_class(number, b.marker()))
            .collect();
        if present == [brand] {
            return;
        }

        for marker in CardBrand::ALL {
            doc.remove_class(number, marker.marker());
        }
        doc.add_class(number, brand.marker());
    }

    /// Releases the submit interceptor. Later submits are no-ops.
    pub fn dispose(&self) {
        let mut state = self.lock_state();
        if state.released {
            return;
        }
        if let Some(form) = self.config.host_form {
            lock_document(&self.document).unbind_submit(form, self.id);
        }
        state.released = true;
        tracing::debug!(widget = %self.id, "payment widget disposed");
    }

    fn begin_submit(&self) -> Result<CardDetails, SubmitOutcome> {
        let begun = {
            let mut state = self.lock_state();
            if state.released {
                tracing::warn!(widget = %self.id, "submit after release ignored");
                Err(SubmitOutcome::Released)
            } else if state.status.is_pending() {
                tracing::debug!(widget = %self.id, "submit while pending ignored");
                Err(SubmitOutcome::AlreadyPending)
            } else {
                state.advance(self.id, SubmissionState::Validating);
                let mut doc = lock_document(&self.document);

                if self.run_validation(&mut state, &mut *doc) {
                    let card = self.card_details(&state, &*doc);
                    state.advance(self.id, SubmissionState::Pending);
                    let roots = self.gate_roots();
                    state.gate.disable_inputs(&mut *doc, &roots);
                    state.outbox.push(WidgetEvent::Pending);
                    doc.add_class(self.element, PENDING_CLASS);
                    tracing::debug!(widget = %self.id, last4 = %card.last4(), "requesting token");
                    Ok(card)
                } else {
                    state.advance(self.id, SubmissionState::Idle);
                    Err(SubmitOutcome::Invalid(state.invalid.iter().copied().collect()))
                }
            }
        };

        self.flush_events();
        begun
    }

    fn run_validation(&self, state: &mut WidgetState, doc: &mut dyn Document) -> bool {
        self.clear_invalid(state, doc);

        let number = field_value(doc, state.fields.number);
        if !self.validator.validate_number(&number) {
            self.mark_invalid(state, doc, FieldKind::Number);
            state.messages.push(FieldKind::Number.invalid_message().to_string());
        }

        let expiry = self.expiry(state, doc);
        if !self.validator.validate_expiry(&expiry.month, &expiry.year) {
            self.mark_invalid(state, doc, FieldKind::ExpiryYear);
            state.messages.push(FieldKind::ExpiryYear.invalid_message().to_string());
        }

        if self.config.collect_cvc {
            let cvc = field_value(doc, state.fields.cvc);
            if !self.validator.validate_cvc(&cvc) {
                self.mark_invalid(state, doc, FieldKind::Cvc);
                state.messages.push(FieldKind::Cvc.invalid_message().to_string());
            }
        }

        if state.invalid.is_empty() {
            return true;
        }

        self.show_messages(state, doc);
        focus_first_invalid(state, doc);
        tracing::debug!(widget = %self.id, invalid = ?state.invalid, "local validation failed");
        false
    }

    fn clear_invalid(&self, state: &mut WidgetState, doc: &mut dyn Document) {
        for kind in FieldKind::ALL {
            if let Some(container) = state.fields.get(kind).and_then(|n| doc.parent(n)) {
                doc.remove_class(container, INVALID_CLASS);
            }
        }
        state.invalid.clear();
        state.messages.clear();
        if let Some(message) = state.fields.message {
            doc.set_text(message, "");
        }
    }

    fn mark_invalid(&self, state: &mut WidgetState, doc: &mut dyn Document, kind: FieldKind) {
        let node = state.fields.get(kind);
        if let Some(container) = node.and_then(|n| doc.parent(n)) {
            doc.add_class(container, INVALID_CLASS);
        }
        state.invalid.insert(kind);
        state.outbox.push(WidgetEvent::invalid(kind, node));
    }

    fn show_messages(&self, state: &WidgetState, doc: &mut dyn Document) {
        if let Some(message) = state.fields.message {
            doc.set_text(message, &state.messages.join(" "));
        }
    }

    fn apply_service_error(
        &self,
        state: &mut WidgetState,
        doc: &mut dyn Document,
        error: &ServiceError,
    ) {
        if let Some(text) = &error.message {
            state.messages = vec![text.clone()];
            self.show_messages(state, doc);
        }

        let rendered = ErrorMapper::field_for(&error.code)
            .filter(|kind| state.fields.get(*kind).is_some());
        if let Some(kind) = rendered {
            self.mark_invalid(state, doc, kind);
            focus_first_invalid(state, doc);
        }

        state.outbox.push(WidgetEvent::Error(error.clone()));
    }

    fn expiry(&self, state: &WidgetState, doc: &dyn Document) -> Expiry {
        Expiry::from_input(
            &field_value(doc, state.fields.expiry_month),
            &field_value(doc, state.fields.expiry_year),
            chrono::Utc::now().year(),
        )
    }

    fn card_details(&self, state: &WidgetState, doc: &dyn Document) -> CardDetails {
        let cvc = self
            .config
            .collect_cvc
            .then(|| field_value(doc, state.fields.cvc));
        CardDetails::new(field_value(doc, state.fields.number), cvc, self.expiry(state, doc))
    }

    fn gate_roots(&self) -> Vec<NodeId> {
        let mut roots = vec![self.element];
        roots.extend(self.config.host_form);
        roots
    }

    fn lock_state(&self) -> MutexGuard<'_, WidgetState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn flush_events(&self) {
        let events = std::mem::take(&mut self.lock_state().outbox);
        if events.is_empty() {
            return;
        }

        let listeners = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for event in &events {
            tracing::trace!(widget = %self.id, event_type = event.event_type(), "emit");
            for listener in &listeners {
                listener.on_event(self.id, event);
            }
        }
    }
}

/// An outstanding tokenization request.
///
/// If the submitting future is dropped before the result arrives, the
/// cycle is resolved as an aborted request so the inputs are restored and
/// the widget leaves `Pending`.
struct InFlight<'a> {
    widget: &'a PaymentWidget,
    armed: bool,
}

impl<'a> InFlight<'a> {
    fn new(widget: &'a PaymentWidget) -> Self {
        Self {
            widget,
            armed: true,
        }
    }

    fn complete(mut self, result: Result<TokenResponse, ServiceError>) -> SubmitOutcome {
        self.armed = false;
        self.widget.handle_token(result)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.armed {
            tracing::warn!(widget = %self.widget.id, "tokenization request abandoned");
            self.widget.handle_token(Err(ServiceError::aborted()));
        }
    }
}

fn field_value(doc: &dyn Document, node: Option<NodeId>) -> String {
    node.map(|n| doc.value(n)).unwrap_or_default()
}

fn focus_first_invalid(state: &WidgetState, doc: &mut dyn Document) {
    if let Some(node) = state.invalid.iter().find_map(|kind| state.fields.get(*kind)) {
        doc.focus(node);
    }
}
