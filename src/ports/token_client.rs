//! Token client port - exchanges card data for a one-time token.
//!
//! A request, once issued, resolves exactly once with either a token or a
//! service error. There is no retry, timeout or cancellation at this level.

use async_trait::async_trait;

use crate::domain::card::{CardDetails, ServiceError, TokenResponse};

/// Port for the tokenization service.
///
/// # Example
///
/// ```ignore
/// client.set_publishable_key("pk_test_123");
/// let token = client.create_token(card).await?;
/// ```
#[async_trait]
pub trait TokenClient: Send + Sync {
    /// Applies the credential used for subsequent requests.
    fn set_publishable_key(&self, key: &str);

    async fn create_token(&self, card: CardDetails) -> Result<TokenResponse, ServiceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn TokenClient) {}
}
