//! Transcript view component
//!
//! Renders the conversation as alternating user/assistant rows with a
//! gutter marking who spoke, wraps long messages, and keeps the newest
//! exchange in view unless the user scrolls away.

use chat_core::Transcript;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Lines scrolled per page step
const PAGE_STEP: usize = 10;

/// Messages that drive transcript presentation state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptMessage {
    /// Scroll one line up (detaches from the bottom)
    ScrollUp,
    /// Scroll one line down (re-attaches at the bottom)
    ScrollDown,
    /// Scroll a page up
    PageUp,
    /// Scroll a page down
    PageDown,
    /// Jump to and follow the bottom
    Follow,
}

/// Scrolling view over the conversation transcript
#[derive(Debug)]
pub struct TranscriptView {
    /// Current scroll offset in rendered lines
    scroll_offset: usize,
    /// Whether the view follows the newest exchange
    stick_to_bottom: bool,
    /// Largest valid offset seen at the last render
    last_max_offset: usize,
}

impl Default for TranscriptView {
    fn default() -> Self {
        Self::new()
    }
}

impl TranscriptView {
    /// Create a view following the bottom of the transcript
    pub fn new() -> Self {
        Self {
            scroll_offset: 0,
            stick_to_bottom: true,
            last_max_offset: 0,
        }
    }

    /// Whether the view follows the newest exchange
    pub fn is_following(&self) -> bool {
        self.stick_to_bottom
    }

    /// Update presentation state
    pub fn update(&mut self, message: TranscriptMessage) {
        match message {
            TranscriptMessage::ScrollUp => {
                self.stick_to_bottom = false;
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
            }
            TranscriptMessage::ScrollDown => {
                self.scroll_offset = (self.scroll_offset + 1).min(self.last_max_offset);
                if self.scroll_offset >= self.last_max_offset {
                    self.stick_to_bottom = true;
                }
            }
            TranscriptMessage::PageUp => {
                self.stick_to_bottom = false;
                self.scroll_offset = self.scroll_offset.saturating_sub(PAGE_STEP);
            }
            TranscriptMessage::PageDown => {
                self.scroll_offset = (self.scroll_offset + PAGE_STEP).min(self.last_max_offset);
                if self.scroll_offset >= self.last_max_offset {
                    self.stick_to_bottom = true;
                }
            }
            TranscriptMessage::Follow => {
                self.stick_to_bottom = true;
            }
        }
    }

    /// Render the transcript into `area`
    pub fn render(&mut self, frame: &mut Frame, area: Rect, transcript: &Transcript, focused: bool) {
        let border_style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        };
        let block = Block::default()
            .title("Conversation")
            .borders(Borders::ALL)
            .border_style(border_style);

        let inner_width = area.width.saturating_sub(2) as usize;
        let lines = build_lines(transcript, inner_width);

        let visible = area.height.saturating_sub(2) as usize;
        let max_offset = lines.len().saturating_sub(visible);
        self.last_max_offset = max_offset;
        if self.stick_to_bottom {
            self.scroll_offset = max_offset;
        } else {
            self.scroll_offset = self.scroll_offset.min(max_offset);
        }

        let paragraph = Paragraph::new(lines)
            .block(block)
            .scroll((self.scroll_offset as u16, 0));
        frame.render_widget(paragraph, area);
    }
}

/// Build styled lines for every exchange, wrapped to `width`
fn build_lines(transcript: &Transcript, width: usize) -> Vec<Line<'static>> {
    if transcript.is_empty() {
        return vec![Line::from(Span::styled(
            " Type a message and press Enter to start.",
            Style::default().fg(Color::DarkGray),
        ))];
    }

    let gutter_user = Span::styled(
        " You │ ",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    );
    let gutter_bot = Span::styled(
        " Bot │ ",
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    );
    let gutter_cont = Span::raw("     │ ");
    let text_width = width.saturating_sub(7).max(1);

    let mut lines = Vec::new();
    for (user, assistant) in transcript.iter() {
        push_entry(&mut lines, &gutter_user, &gutter_cont, user, text_width, None);
        push_entry(
            &mut lines,
            &gutter_bot,
            &gutter_cont,
            assistant,
            text_width,
            Some(Style::default().fg(Color::Green)),
        );
        lines.push(Line::from(""));
    }
    lines
}

/// Append one speaker's wrapped message, gutter on the first line only
fn push_entry(
    lines: &mut Vec<Line<'static>>,
    gutter: &Span<'static>,
    continuation: &Span<'static>,
    text: &str,
    width: usize,
    text_style: Option<Style>,
) {
    let style = text_style.unwrap_or_default();
    for (idx, wrapped) in wrap_text(text, width).into_iter().enumerate() {
        let prefix = if idx == 0 {
            gutter.clone()
        } else {
            continuation.clone()
        };
        lines.push(Line::from(vec![prefix, Span::styled(wrapped, style)]));
    }
}

/// Wrap text to fit within a given width, preserving word boundaries
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![String::new()];
    }

    let mut lines = Vec::new();
    let mut current_line = String::new();

    for word in text.split_whitespace() {
        if current_line.is_empty() {
            current_line = word.to_string();
        } else if current_line.len() + 1 + word.len() <= width {
            current_line.push(' ');
            current_line.push_str(word);
        } else {
            lines.push(current_line);
            current_line = word.to_string();
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}
