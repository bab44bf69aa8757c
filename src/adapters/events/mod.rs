//! Widget event listeners.
//!
//! - `RecordingListener` - captures events for assertions
//! - `TracingListener` - structured log output

mod recording_listener;
mod tracing_listener;

pub use recording_listener::RecordingListener;
pub use tracing_listener::TracingListener;
