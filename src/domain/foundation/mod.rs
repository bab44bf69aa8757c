//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, error types and the state machine trait
//! that form the vocabulary of the widget domain.

mod errors;
mod ids;
mod state_machine;

pub use errors::WidgetError;
pub use ids::{NodeId, WidgetId};
pub use state_machine::StateMachine;
