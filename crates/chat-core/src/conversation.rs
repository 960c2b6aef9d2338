//! Conversation data model
//!
//! Two views of the same logical history are maintained independently:
//!
//! - [`TurnCache`]: a bounded FIFO window of recent turns, sent with every
//!   request so the backend has limited context. Oldest turn is evicted when
//!   the window is full.
//! - [`Transcript`]: append-only parallel sequences of user and assistant
//!   texts, used purely for rendering and never truncated.
//!
//! [`Conversation`] ties the two together: a successful exchange grows both
//! by exactly one entry, a failed one touches neither.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Default number of turns kept in the context window
pub const DEFAULT_CACHE_CAPACITY: usize = 15;

/// One request/response exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// What the user sent
    pub user: String,
    /// What the assistant answered
    pub assistant: String,
}

impl Turn {
    /// Create a turn from a user/assistant pair
    pub fn new(user: impl Into<String>, assistant: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            assistant: assistant.into(),
        }
    }
}

/// Bounded FIFO window of recent turns
#[derive(Debug, Clone)]
pub struct TurnCache {
    /// Turns, oldest first
    turns: VecDeque<Turn>,
    /// Maximum number of turns retained
    capacity: usize,
}

impl TurnCache {
    /// Create a cache holding at most `capacity` turns
    pub fn new(capacity: usize) -> Self {
        Self {
            turns: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a turn, evicting the oldest one if the window is full
    pub fn push(&mut self, turn: Turn) {
        if self.turns.len() >= self.capacity {
            self.turns.pop_front();
        }
        self.turns.push_back(turn);
    }

    /// Number of cached turns
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether the cache is empty
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Maximum number of turns retained
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterate over cached turns, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter()
    }

    /// Copy of the window for sending with a request, oldest first
    pub fn snapshot(&self) -> Vec<Turn> {
        self.turns.iter().cloned().collect()
    }
}

impl Default for TurnCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

/// Append-only render history: parallel user/assistant text sequences
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    /// User texts, in submission order
    user_texts: Vec<String>,
    /// Assistant texts, parallel to `user_texts`
    assistant_texts: Vec<String>,
}

impl Transcript {
    /// Create an empty transcript
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one exchange
    pub fn push(&mut self, user: impl Into<String>, assistant: impl Into<String>) {
        self.user_texts.push(user.into());
        self.assistant_texts.push(assistant.into());
    }

    /// Number of exchanges
    pub fn len(&self) -> usize {
        self.user_texts.len()
    }

    /// Whether nothing has been exchanged yet
    pub fn is_empty(&self) -> bool {
        self.user_texts.is_empty()
    }

    /// Iterate over (user, assistant) pairs, oldest first
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.user_texts
            .iter()
            .map(String::as_str)
            .zip(self.assistant_texts.iter().map(String::as_str))
    }
}

/// The full local conversation state: render history plus context window
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    /// Append-only render history
    transcript: Transcript,
    /// Bounded context window sent to the backend
    cache: TurnCache,
}

impl Conversation {
    /// Create a conversation whose context window holds `cache_capacity` turns
    pub fn new(cache_capacity: usize) -> Self {
        Self {
            transcript: Transcript::new(),
            cache: TurnCache::new(cache_capacity),
        }
    }

    /// Record a successful exchange: transcript and cache each grow by one
    pub fn record_exchange(&mut self, user: impl Into<String>, assistant: impl Into<String>) {
        let user = user.into();
        let assistant = assistant.into();
        self.transcript.push(user.clone(), assistant.clone());
        self.cache.push(Turn { user, assistant });
    }

    /// The render history
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// The context window
    pub fn cache(&self) -> &TurnCache {
        &self.cache
    }

    /// Context to send with the next request, oldest first
    pub fn context(&self) -> Vec<Turn> {
        self.cache.snapshot()
    }
}
