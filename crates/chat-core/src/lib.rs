//! # chat-core
//!
//! UI-free core of the chat client: the conversation data model (turns,
//! bounded context cache, transcript) and a retrying HTTP client for the
//! backend's `/api/chat` endpoint.
//!
//! The terminal frontend lives in the `chat-tui` crate; everything here is
//! plain data and async I/O so it can be unit tested without a terminal.

pub mod client;
pub mod conversation;
pub mod error;
pub mod wire;

// Re-export main types for convenience
pub use client::{ChatClient, RetryPolicy};
pub use conversation::{Conversation, Transcript, Turn, TurnCache};
pub use error::{ChatError, Result};
