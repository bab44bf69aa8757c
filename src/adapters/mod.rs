//! Adapters - Implementations of port interfaces.
//!
//! - `dom` - In-memory document
//! - `view` - Default card form markup
//! - `events` - Widget event listeners (recording, tracing)
//! - `stripe` - Tokenization over the Stripe API, plus test doubles

pub mod dom;
pub mod events;
pub mod stripe;
pub mod view;

pub use dom::{FormSubmission, InMemoryDocument};
pub use events::{RecordingListener, TracingListener};
pub use stripe::{MockFieldValidator, MockTokenClient, StripeTokenClient, TokenRequest};
pub use view::CardFormView;
