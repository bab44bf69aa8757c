//! Application layer - widget lifecycle and page orchestration.
//!
//! - `PaymentWidget` - one mounted card form and its submission cycle
//! - `SubmissionGate` - input disabling around tokenization
//! - `TagDiscovery` / `MountedWidgets` - mounting and event routing
//! - `MountAttributes` - options scraped from mount elements
//! - `SdkBootstrap` - SDK loading and one-shot discovery

mod bootstrap;
mod discovery;
mod mount_attributes;
mod payment_widget;
mod services;
mod submission_gate;

pub use bootstrap::{BootstrapPlan, SdkBootstrap};
pub use discovery::{MountedWidgets, SubmitDispatch, TagDiscovery};
pub use mount_attributes::MountAttributes;
pub use payment_widget::{PaymentWidget, PENDING_CLASS, SUCCESS_CLASS};
pub use services::{WidgetServices, WidgetServicesBuilder};
pub use submission_gate::SubmissionGate;
