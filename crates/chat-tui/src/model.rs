//! Application model and update logic
//!
//! [`Model`] is all view state; [`update`] is the pure transition function.
//! Side effects (sending a chat request, quitting) are returned as
//! [`Effect`]s for the event loop to perform, which keeps the whole submit
//! flow unit-testable without a terminal or a backend.

use crate::components::{BannerLine, TranscriptMessage, TranscriptView};
use crate::config::Config;
use crate::message::{AppMessage, Severity};
use chat_core::{Conversation, Turn};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    style::{Color, Style},
    widgets::{Block, Borders},
};
use throbber_widgets_tui::ThrobberState;
use tracing::{debug, info, warn};
use tui_textarea::TextArea;

/// Side effects requested by [`update`]
#[derive(Debug, PartialEq, Eq)]
pub enum Effect {
    /// Spawn a chat request with this context window and user message
    SendChat {
        /// Snapshot of the cached turns, oldest first
        context: Vec<Turn>,
        /// The message to send
        user_message: String,
    },
    /// Stop the event loop
    Quit,
}

/// All view state for the chat client
pub struct Model {
    /// Conversation history: transcript plus bounded context cache
    pub conversation: Conversation,
    /// Message input box
    pub input: TextArea<'static>,
    /// Whether keystrokes go to the input (vs. transcript scrolling)
    pub input_focused: bool,
    /// A request is in flight
    pub is_loading: bool,
    /// Submission allowed (false while a request is in flight)
    pub send_enabled: bool,
    /// Banner line for warnings and errors
    pub banner: BannerLine,
    /// Transcript presentation state
    pub transcript_view: TranscriptView,
    /// Spinner state while loading
    pub throbber: ThrobberState,
    /// Help overlay visible
    pub show_help: bool,
}

impl Model {
    /// Create the initial model from configuration
    pub fn new(config: &Config) -> Self {
        let mut banner = BannerLine::new(config.ui.banner_timeout());
        banner.raise(
            Severity::Info,
            format!("Chatting with {} (F1 for help)", config.server_url),
        );

        Self {
            conversation: Conversation::new(config.chat.max_cached_turns),
            input: new_input(),
            input_focused: true,
            is_loading: false,
            send_enabled: true,
            banner,
            transcript_view: TranscriptView::new(),
            throbber: ThrobberState::default(),
            show_help: false,
        }
    }

    /// Current input text (lines joined)
    pub fn input_text(&self) -> String {
        self.input.lines().join("\n")
    }

    /// Whether the input holds nothing but whitespace
    pub fn is_input_empty(&self) -> bool {
        self.input.lines().iter().all(|line| line.trim().is_empty())
    }

    /// Reset the input box to empty
    fn clear_input(&mut self) {
        self.input = new_input();
    }
}

/// Fresh input box with placeholder and border
fn new_input() -> TextArea<'static> {
    let mut input = TextArea::default();
    input.set_placeholder_text("Type a message (Enter to send, Shift+Enter for a new line)");
    input.set_block(
        Block::default()
            .title("Message")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );
    input
}

/// Apply a message to the model, returning side effects to perform
pub fn update(model: &mut Model, msg: AppMessage) -> Vec<Effect> {
    let mut effects = Vec::new();

    match msg {
        AppMessage::Key(key) => handle_key(model, key, &mut effects),

        AppMessage::Resize(width, height) => {
            debug!(width, height, "terminal resized");
        }

        AppMessage::Tick => {
            model.banner.tick();
            if model.is_loading {
                model.throbber.calc_next();
            }
        }

        AppMessage::ChatCompleted { user, assistant } => {
            info!(turns = model.conversation.transcript().len() + 1, "exchange completed");
            model.conversation.record_exchange(user, assistant);
            model.clear_input();
            model.transcript_view.update(TranscriptMessage::Follow);
            model.input_focused = true;
            model.is_loading = false;
            model.send_enabled = true;
        }

        AppMessage::ChatFailed { error } => {
            warn!(error = %error, "chat request failed");
            model
                .banner
                .raise(Severity::for_error(&error), error.user_message());
            model.is_loading = false;
            model.send_enabled = true;
        }

        AppMessage::Quit => {
            effects.push(Effect::Quit);
        }
    }

    effects
}

/// Keyboard handling
fn handle_key(model: &mut Model, key: KeyEvent, effects: &mut Vec<Effect>) {
    // Any key closes the help overlay
    if model.show_help {
        model.show_help = false;
        return;
    }

    match key {
        KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => {
            effects.push(Effect::Quit);
        }

        KeyEvent {
            code: KeyCode::F(1), ..
        } => {
            model.show_help = true;
        }

        KeyEvent {
            code: KeyCode::Esc, ..
        } => {
            model.banner.dismiss();
        }

        KeyEvent {
            code: KeyCode::Tab, ..
        } => {
            model.input_focused = !model.input_focused;
        }

        // Transcript navigation while it has focus
        KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            ..
        } if !model.input_focused => {
            effects.push(Effect::Quit);
        }
        KeyEvent {
            code: KeyCode::Char('?'),
            modifiers: KeyModifiers::NONE,
            ..
        } if !model.input_focused => {
            model.show_help = true;
        }
        KeyEvent {
            code: KeyCode::Up, ..
        } if !model.input_focused => {
            model.transcript_view.update(TranscriptMessage::ScrollUp);
        }
        KeyEvent {
            code: KeyCode::Down, ..
        } if !model.input_focused => {
            model.transcript_view.update(TranscriptMessage::ScrollDown);
        }
        KeyEvent {
            code: KeyCode::PageUp, ..
        } if !model.input_focused => {
            model.transcript_view.update(TranscriptMessage::PageUp);
        }
        KeyEvent {
            code: KeyCode::PageDown,
            ..
        } if !model.input_focused => {
            model.transcript_view.update(TranscriptMessage::PageDown);
        }

        // Enter submits when the input is focused
        KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
            ..
        } if model.input_focused => {
            submit(model, effects);
        }

        // Shift+Enter inserts a new line
        KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::SHIFT,
            ..
        } if model.input_focused => {
            model
                .input
                .input(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        }

        // Everything else edits the input when it has focus
        key if model.input_focused => {
            model.input.input(key);
        }

        _ => {}
    }
}

/// Start a chat request if one is allowed
///
/// The input is deliberately not cleared here: a failed request must leave
/// the user's text in place. It is cleared when the exchange completes.
fn submit(model: &mut Model, effects: &mut Vec<Effect>) {
    if !model.send_enabled || model.is_input_empty() {
        return;
    }

    let user_message = model.input_text().trim().to_string();
    info!(len = user_message.len(), "submitting message");

    model.is_loading = true;
    model.send_enabled = false;

    effects.push(Effect::SendChat {
        context: model.conversation.context(),
        user_message,
    });
}
