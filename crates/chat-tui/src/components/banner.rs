//! Banner line component
//!
//! Shows the latest warning or error in a single line, color coded by
//! severity. A banner dismisses itself after a timeout (checked on tick) or
//! when the user closes it.

use crate::message::Severity;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::Paragraph,
    Frame,
};
use std::time::{Duration, Instant};
use tracing::debug;

/// A banner message currently on display
#[derive(Debug, Clone)]
pub struct Banner {
    /// Severity, drives color and symbol
    pub severity: Severity,
    /// Message text
    pub text: String,
    /// When the banner was raised
    raised_at: Instant,
}

impl Banner {
    /// Formatted display text
    pub fn display_text(&self) -> String {
        format!("{} {}", self.severity.symbol(), self.text)
    }
}

/// Single-line banner holding at most the latest message
#[derive(Debug)]
pub struct BannerLine {
    /// Current banner, if any
    current: Option<Banner>,
    /// How long a banner stays up before auto-dismissing
    timeout: Duration,
}

impl BannerLine {
    /// Create a banner line with the given auto-dismiss timeout
    pub fn new(timeout: Duration) -> Self {
        Self {
            current: None,
            timeout,
        }
    }

    /// Raise a banner, replacing any current one
    pub fn raise(&mut self, severity: Severity, text: impl Into<String>) {
        let text = text.into();
        debug!(?severity, %text, "raising banner");
        self.current = Some(Banner {
            severity,
            text,
            raised_at: Instant::now(),
        });
    }

    /// Close the banner manually
    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// Auto-dismiss if the banner has outlived its timeout
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    /// Auto-dismiss relative to an explicit clock reading
    pub fn tick_at(&mut self, now: Instant) {
        if let Some(ref banner) = self.current {
            if now.duration_since(banner.raised_at) >= self.timeout {
                debug!("banner timed out");
                self.current = None;
            }
        }
    }

    /// Current banner, if any
    pub fn current(&self) -> Option<&Banner> {
        self.current.as_ref()
    }

    /// Whether there is a banner to show
    pub fn is_visible(&self) -> bool {
        self.current.is_some()
    }

    /// Render the banner line
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if let Some(ref banner) = self.current {
            let style = Style::default()
                .fg(banner.severity.color())
                .add_modifier(Modifier::BOLD);
            let paragraph = Paragraph::new(banner.display_text()).style(style);
            frame.render_widget(paragraph, area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raise_replaces_previous_banner() {
        let mut line = BannerLine::new(Duration::from_secs(6));
        line.raise(Severity::Warning, "first");
        line.raise(Severity::Error, "second");

        let banner = line.current().unwrap();
        assert_eq!(banner.severity, Severity::Error);
        assert_eq!(banner.text, "second");
    }

    #[test]
    fn banner_auto_dismisses_after_timeout() {
        let mut line = BannerLine::new(Duration::from_secs(6));
        line.raise(Severity::Error, "boom");
        let raised_at = line.current().unwrap().raised_at;

        line.tick_at(raised_at + Duration::from_secs(5));
        assert!(line.is_visible());

        line.tick_at(raised_at + Duration::from_secs(6));
        assert!(!line.is_visible());
    }

    #[test]
    fn manual_dismiss_clears_banner() {
        let mut line = BannerLine::new(Duration::from_secs(6));
        line.raise(Severity::Warning, "heads up");
        line.dismiss();
        assert!(!line.is_visible());

        // Dismissing an empty line is a no-op
        line.dismiss();
        assert!(!line.is_visible());
    }
}
