//! Card data vocabulary: brands, raw details, tokens and service errors.

mod brand;
mod details;
mod service_error;
mod token;

pub use brand::CardBrand;
pub use details::{CardDetails, Expiry};
pub use service_error::{ServiceError, ServiceErrorCode};
pub use token::{TokenCard, TokenResponse};
