//! Document adapters.
//!
//! - `InMemoryDocument` - headless element tree for tests and servers

mod in_memory_document;

pub use in_memory_document::{FormSubmission, InMemoryDocument};
