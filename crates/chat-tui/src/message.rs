//! Application message types
//!
//! All state changes happen through these messages, following the Elm
//! pattern: terminal events, ticks, and results coming back from spawned
//! request tasks are all funneled into [`AppMessage`].

use chat_core::ChatError;
use crossterm::event::KeyEvent;
use ratatui::style::Color;

/// Severity of a banner message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Informational (blue)
    Info,
    /// Transient problem, retry likely to help (yellow)
    Warning,
    /// Failed operation (red)
    Error,
}

impl Severity {
    /// Color for this severity
    pub fn color(&self) -> Color {
        match self {
            Severity::Info => Color::Blue,
            Severity::Warning => Color::Yellow,
            Severity::Error => Color::Red,
        }
    }

    /// Prefix symbol for this severity
    pub fn symbol(&self) -> &'static str {
        match self {
            Severity::Info => "ℹ",
            Severity::Warning => "⚠",
            Severity::Error => "✗",
        }
    }

    /// Banner severity for a failed chat request: aborts/timeouts are a
    /// warning, everything else an error
    pub fn for_error(error: &ChatError) -> Self {
        if error.is_timeout() {
            Severity::Warning
        } else {
            Severity::Error
        }
    }
}

/// Main application messages
#[derive(Debug)]
pub enum AppMessage {
    /// Keyboard input
    Key(KeyEvent),

    /// Terminal resize
    Resize(u16, u16),

    /// Animation/housekeeping tick
    Tick,

    /// A chat request finished successfully
    ChatCompleted {
        /// The user message that was sent
        user: String,
        /// The assistant reply
        assistant: String,
    },

    /// A chat request failed after retries
    ChatFailed {
        /// The surfaced error
        error: ChatError,
    },

    /// Quit the application
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_timeout_errors_map_to_error_severity() {
        let err = ChatError::Status {
            url: "http://localhost:8000/api/chat".to_string(),
            status: 503,
        };
        assert_eq!(Severity::for_error(&err), Severity::Error);

        let err = ChatError::Decode {
            reason: "response had no choices".to_string(),
            source: None,
        };
        assert_eq!(Severity::for_error(&err), Severity::Error);
    }
}
