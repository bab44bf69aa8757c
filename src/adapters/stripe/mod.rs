//! Stripe tokenization adapters.
//!
//! - `StripeTokenClient` - `POST /v1/tokens` with the publishable key
//! - `MockTokenClient` - queued or held responses for tests
//! - `MockFieldValidator` - configurable stand-in for the SDK's card checks
//!
//! # Security
//!
//! Card data and keys are handled via `secrecy::SecretString`.

mod mock_field_validator;
mod mock_token_client;
mod stripe_token_client;

pub use mock_field_validator::MockFieldValidator;
pub use mock_token_client::{MockTokenClient, TokenRequest};
pub use stripe_token_client::StripeTokenClient;
