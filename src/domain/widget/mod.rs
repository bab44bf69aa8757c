//! Widget vocabulary: configuration, fields, submission lifecycle,
//! error mapping, keystroke rules and events.

mod configuration;
mod error_mapper;
mod events;
mod field;
pub mod keystroke;
mod submission;

pub use configuration::{Configuration, WidgetOptions, DEFAULT_TOKEN_FIELD_NAME};
pub use error_mapper::ErrorMapper;
pub use events::WidgetEvent;
pub use field::{FieldKind, FieldRefs, INVALID_CLASS, MESSAGE_CLASS};
pub use keystroke::{KeyEvent, KeyPhase};
pub use submission::{SubmissionState, SubmitEvent, SubmitOutcome};
