//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the widget and the outside world. Adapters implement these ports.
//!
//! - `Document` - DOM substrate (elements, values, markers, submit binding)
//! - `ViewRenderer` - Field and token markup generation
//! - `FieldValidator` - Card validation and brand classification
//! - `TokenClient` - Card-for-token exchange
//! - `WidgetEventListener` - Subscribers to widget events
//! - `SdkHost` - Presence and loading of the tokenization SDK

mod document;
mod event_listener;
mod field_validator;
mod sdk_host;
mod token_client;
mod view_renderer;

pub use document::{lock_document, Document, Selector, SharedDocument};
pub use event_listener::WidgetEventListener;
pub use field_validator::FieldValidator;
pub use sdk_host::SdkHost;
pub use token_client::TokenClient;
pub use view_renderer::{ElementSpec, ViewRenderer};
