//! Domain layer containing widget rules and card vocabulary.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (identifiers, errors, state machine trait)
//! - `card` - Card brands, raw card details, tokens and service errors
//! - `widget` - Configuration, fields, submission lifecycle and events

pub mod card;
pub mod foundation;
pub mod widget;
