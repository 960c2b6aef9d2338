//! Error handling for the chat client core
//!
//! Failures fall into two user-visible categories: aborts/timeouts, which the
//! UI surfaces as a warning, and everything else, which it surfaces as an
//! error. [`ChatError::is_timeout`] is the seam between the two.

use thiserror::Error;

/// Result type alias using the crate's error type
pub type Result<T> = std::result::Result<T, ChatError>;

/// Error type for chat requests
#[derive(Error, Debug)]
pub enum ChatError {
    /// Request timed out or was aborted before a response arrived
    #[error("request to '{url}' timed out")]
    Timeout {
        /// Endpoint URL
        url: String,
        /// Underlying transport error
        #[source]
        source: reqwest::Error,
    },

    /// Transport-level failure (connect refused, reset, DNS, ...)
    #[error("failed to reach chat backend at '{url}'")]
    Transport {
        /// Endpoint URL
        url: String,
        /// Underlying transport error
        #[source]
        source: reqwest::Error,
    },

    /// Backend answered with a non-success HTTP status
    #[error("chat backend returned {status} for '{url}'")]
    Status {
        /// Endpoint URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// Response body was not the expected completion shape
    #[error("failed to decode chat response: {reason}")]
    Decode {
        /// What was wrong with the body
        reason: String,
        /// Decode error source, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Server URL given at construction was not a valid URL
    #[error("invalid server URL '{url}'")]
    InvalidUrl {
        /// The offending URL string
        url: String,
        /// Parse error source
        #[source]
        source: url::ParseError,
    },
}

impl ChatError {
    /// Whether this is the abort/timeout category (warning banner in the UI)
    pub fn is_timeout(&self) -> bool {
        matches!(self, ChatError::Timeout { .. })
    }

    /// Whether a retry may help (transport-class failures only)
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ChatError::Timeout { .. } | ChatError::Transport { .. }
        )
    }

    /// Get a user-friendly message for banner display
    pub fn user_message(&self) -> String {
        match self {
            ChatError::Timeout { .. } => {
                "The request timed out. Please try again.".to_string()
            }
            ChatError::Transport { url, .. } => {
                format!("Unable to reach the chat backend at {url}. Please try again.")
            }
            ChatError::Status { status, .. } => {
                format!("The chat backend returned an error ({status}). Please try again.")
            }
            ChatError::Decode { .. } => {
                "The chat backend sent an unexpected response. Please try again.".to_string()
            }
            ChatError::InvalidUrl { url, .. } => {
                format!("'{url}' is not a valid server URL")
            }
        }
    }

    /// Classify a reqwest error for a given endpoint
    pub(crate) fn from_transport(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ChatError::Timeout {
                url: url.to_string(),
                source: err,
            }
        } else if err.is_decode() {
            ChatError::Decode {
                reason: "invalid response body".to_string(),
                source: Some(Box::new(err)),
            }
        } else {
            ChatError::Transport {
                url: url.to_string(),
                source: err,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_classifies_as_timeout_only() {
        let err = ChatError::Status {
            url: "http://localhost:8000/api/chat".to_string(),
            status: 502,
        };
        assert!(!err.is_timeout());
        assert!(!err.is_retryable());

        let err = ChatError::Decode {
            reason: "response had no choices".to_string(),
            source: None,
        };
        assert!(!err.is_timeout());
        assert!(!err.is_retryable());
    }

    #[test]
    fn user_messages_are_actionable() {
        let err = ChatError::Status {
            url: "http://localhost:8000/api/chat".to_string(),
            status: 500,
        };
        assert!(err.user_message().contains("500"));
        assert!(err.user_message().contains("try again"));
    }
}
