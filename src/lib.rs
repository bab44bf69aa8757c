//! Payment Tag - drop-in card payment widget
//!
//! Mounts a card form on `<payment>` elements, validates card input,
//! exchanges it for a single-use token and submits the host form with
//! the token in place of raw card data.
//!
//! Layers:
//! - `domain` - card data, configuration, submission state machine
//! - `ports` - document, validator, tokenizer, renderer, listener seams
//! - `adapters` - in-memory document, Stripe client, default markup
//! - `application` - widget lifecycle, discovery, SDK bootstrap
//! - `config` - environment-driven defaults and logging

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
