//! Mock token client for testing.
//!
//! Supports:
//! - Queued responses, answered immediately
//! - Held mode, where requests wait until the test releases them
//! - Request tracking

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use secrecy::ExposeSecret;
use tokio::sync::{oneshot, Notify};

use crate::domain::card::{CardDetails, ServiceError, TokenResponse};
use crate::ports::TokenClient;

type TokenResult = Result<TokenResponse, ServiceError>;

/// Mock token client for testing.
///
/// # Example
///
/// ```ignore
/// let tokens = MockTokenClient::new();
/// tokens.push_response(Ok(TokenResponse::new("tok_abc")));
///
/// // Or hold requests to observe the pending state
/// let tokens = MockTokenClient::held();
/// tokens.wait_for_requests(1).await;
/// tokens.release(Ok(TokenResponse::new("tok_abc")));
/// ```
#[derive(Default, Clone)]
pub struct MockTokenClient {
    inner: Arc<Mutex<MockState>>,
    requests_changed: Arc<Notify>,
}

#[derive(Default)]
struct MockState {
    publishable_key: Option<String>,
    responses: VecDeque<TokenResult>,
    held: bool,
    waiting: VecDeque<oneshot::Sender<TokenResult>>,
    requests: Vec<TokenRequest>,
}

/// Recorded tokenization request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRequest {
    pub number: String,
    pub cvc: Option<String>,
    pub exp_month: String,
    pub exp_year: String,
    pub publishable_key: Option<String>,
}

impl MockTokenClient {
    /// Answers every request immediately.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parks every request until [`release`](Self::release) is called.
    pub fn held() -> Self {
        let mock = Self::new();
        mock.inner.lock().unwrap().held = true;
        mock
    }

    /// Queues the answer for the next immediate request.
    ///
    /// With an empty queue, requests succeed with a generated token.
    pub fn push_response(&self, response: TokenResult) {
        self.inner.lock().unwrap().responses.push_back(response);
    }

    /// Answers the oldest parked request. Returns false if none is parked.
    pub fn release(&self, response: TokenResult) -> bool {
        let sender = self.inner.lock().unwrap().waiting.pop_front();
        match sender {
            Some(sender) => sender.send(response).is_ok(),
            None => false,
        }
    }

    /// Waits until at least `count` requests have been received.
    pub async fn wait_for_requests(&self, count: usize) {
        loop {
            let notified = self.requests_changed.notified();
            if self.request_count() >= count {
                return;
            }
            notified.await;
        }
    }

    pub fn requests(&self) -> Vec<TokenRequest> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.inner.lock().unwrap().requests.len()
    }

    pub fn publishable_key(&self) -> Option<String> {
        self.inner.lock().unwrap().publishable_key.clone()
    }
}

#[async_trait]
impl TokenClient for MockTokenClient {
    fn set_publishable_key(&self, key: &str) {
        self.inner.lock().unwrap().publishable_key = Some(key.to_string());
    }

    async fn create_token(&self, card: CardDetails) -> TokenResult {
        let parked = {
            let mut state = self.inner.lock().unwrap();
            let request = TokenRequest {
                number: card.number().expose_secret().clone(),
                cvc: card.cvc().map(|c| c.expose_secret().clone()),
                exp_month: card.exp_month().to_string(),
                exp_year: card.exp_year().to_string(),
                publishable_key: state.publishable_key.clone(),
            };
            state.requests.push(request);

            if state.held {
                let (sender, receiver) = oneshot::channel();
                state.waiting.push_back(sender);
                Err(receiver)
            } else {
                Ok(state.responses.pop_front())
            }
        };
        self.requests_changed.notify_waiters();

        match parked {
            Ok(Some(response)) => response,
            Ok(None) => Ok(TokenResponse::new(format!(
                "tok_mock_{}",
                self.request_count()
            ))),
            Err(receiver) => receiver
                .await
                .unwrap_or_else(|_| Err(ServiceError::api_connection("request abandoned"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::card::Expiry;

    fn card() -> CardDetails {
        CardDetails::new("4242424242424242", Some("123".into()), Expiry::from_input("1", "2030", 2026))
    }

    #[tokio::test]
    async fn immediate_mode_uses_queued_responses() {
        let mock = MockTokenClient::new();
        mock.set_publishable_key("pk_test_1");
        mock.push_response(Err(ServiceError::new("card_declined")));

        let first = mock.create_token(card()).await;
        let second = mock.create_token(card()).await;

        assert_eq!(first.unwrap_err().code.as_str(), "card_declined");
        assert_eq!(second.unwrap().id, "tok_mock_2");
        assert_eq!(mock.requests()[0].publishable_key.as_deref(), Some("pk_test_1"));
        assert_eq!(mock.requests()[0].cvc.as_deref(), Some("123"));
    }

    #[tokio::test]
    async fn held_mode_waits_for_release() {
        let mock = MockTokenClient::held();
        let task = {
            let mock = mock.clone();
            tokio::spawn(async move { mock.create_token(card()).await })
        };

        mock.wait_for_requests(1).await;
        assert!(mock.release(Ok(TokenResponse::new("tok_held"))));

        assert_eq!(task.await.unwrap().unwrap().id, "tok_held");
        assert!(!mock.release(Ok(TokenResponse::new("tok_none"))));
    }
}
