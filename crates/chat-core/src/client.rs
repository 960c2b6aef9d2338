//! HTTP client for the chat backend
//!
//! Thin wrapper around reqwest that POSTs the context window plus the new
//! user message to `/api/chat` and extracts the assistant text from the
//! completion-style response. Transport failures are retried with
//! exponential backoff; HTTP status and decode failures are not, since a
//! retry cannot fix them.

use crate::conversation::Turn;
use crate::error::{ChatError, Result};
use crate::wire::{ChatRequest, ChatResponse};
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

/// Default per-request timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Retry schedule for transport failures
///
/// The default matches the frontend convention for this backend: an initial
/// attempt plus up to three retries, sleeping 2 s, 4 s, 8 s before them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Number of retries after the initial attempt
    pub retries: u32,
    /// Delay before the first retry; doubles for each one after
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 3,
            base_delay: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    /// Create a policy with an explicit schedule
    pub fn new(retries: u32, base_delay: Duration) -> Self {
        Self { retries, base_delay }
    }

    /// A policy that never retries
    pub fn none() -> Self {
        Self {
            retries: 0,
            base_delay: Duration::ZERO,
        }
    }

    /// Delay before retry number `retry` (zero-based)
    pub fn delay(&self, retry: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(retry)
    }
}

/// Client for the backend chat endpoint
#[derive(Debug, Clone)]
pub struct ChatClient {
    /// Underlying HTTP client
    http: reqwest::Client,
    /// Resolved `/api/chat` endpoint
    endpoint: Url,
    /// Retry schedule for transport failures
    retry: RetryPolicy,
}

impl ChatClient {
    /// Create a client for `server_url` with default timeout and retries
    pub fn new(server_url: &str) -> Result<Self> {
        Self::with_policy(server_url, DEFAULT_REQUEST_TIMEOUT, RetryPolicy::default())
    }

    /// Create a client with an explicit timeout and retry schedule
    pub fn with_policy(
        server_url: &str,
        timeout: Duration,
        retry: RetryPolicy,
    ) -> Result<Self> {
        let endpoint_str = format!("{}/api/chat", server_url.trim_end_matches('/'));
        let endpoint = Url::parse(&endpoint_str).map_err(|source| ChatError::InvalidUrl {
            url: server_url.to_string(),
            source,
        })?;

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| ChatError::Transport {
                url: endpoint.to_string(),
                source,
            })?;

        Ok(Self {
            http,
            endpoint,
            retry,
        })
    }

    /// The resolved endpoint URL
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    /// Send one exchange: context window plus the new user message
    ///
    /// Returns the assistant text on success. Transport failures are retried
    /// per the client's [`RetryPolicy`] before the last error is surfaced.
    #[instrument(skip(self, context), fields(context_len = context.len()))]
    pub async fn send(&self, context: &[Turn], user_message: &str) -> Result<String> {
        let request = ChatRequest {
            cached_messages: context.to_vec(),
            user_message: user_message.to_string(),
        };

        let mut retry = 0u32;
        loop {
            match self.send_once(&request).await {
                Ok(content) => return Ok(content),
                Err(err) if err.is_retryable() && retry < self.retry.retries => {
                    let delay = self.retry.delay(retry);
                    warn!(
                        retry = retry + 1,
                        max_retries = self.retry.retries,
                        delay_secs = delay.as_secs_f64(),
                        error = %err,
                        "chat request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    retry += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// One POST to the endpoint, no retries
    async fn send_once(&self, request: &ChatRequest) -> Result<String> {
        let url = self.endpoint.as_str();
        debug!(url, "sending chat request");

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| ChatError::from_transport(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChatError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| ChatError::from_transport(url, e))?;

        body.into_content().ok_or_else(|| ChatError::Decode {
            reason: "response had no choices".to_string(),
            source: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_retry_schedule_is_2_4_8_seconds() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.retries, 3);
        assert_eq!(policy.delay(0), Duration::from_secs(2));
        assert_eq!(policy.delay(1), Duration::from_secs(4));
        assert_eq!(policy.delay(2), Duration::from_secs(8));
    }

    #[test]
    fn endpoint_is_joined_regardless_of_trailing_slash() {
        let client = ChatClient::new("http://localhost:8000").unwrap();
        assert_eq!(client.endpoint(), "http://localhost:8000/api/chat");

        let client = ChatClient::new("http://localhost:8000/").unwrap();
        assert_eq!(client.endpoint(), "http://localhost:8000/api/chat");
    }

    #[test]
    fn invalid_server_url_is_rejected() {
        let err = ChatClient::new("not a url").unwrap_err();
        assert!(matches!(err, ChatError::InvalidUrl { .. }));
    }
}
