//! Main application: event loop and rendering
//!
//! Owns the terminal, the internal message channel, and the async tasks
//! that perform effects requested by the model's update function. One chat
//! request is in flight at most; its result comes back over the channel as
//! an [`AppMessage`].

use crate::{
    components::BannerLine,
    config::Config,
    message::AppMessage,
    model::{update, Effect, Model},
    terminal::TerminalGuard,
};
use anyhow::{Context, Result};
use chat_core::ChatClient;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

/// The running application
pub struct App {
    /// Application configuration
    config: Config,

    /// Shared HTTP client for chat requests
    client: Arc<ChatClient>,

    /// All view state
    model: Model,

    /// Terminal guard (raw mode + alternate screen)
    terminal: TerminalGuard,

    /// Sender handed to spawned request tasks
    sender: mpsc::UnboundedSender<AppMessage>,

    /// Receiver for messages from spawned tasks
    receiver: mpsc::UnboundedReceiver<AppMessage>,

    /// Event loop running flag
    running: bool,
}

impl App {
    /// Create a new application instance
    #[instrument(skip(config))]
    pub fn new(config: Config) -> Result<Self> {
        info!("Initializing chat client");

        let client = ChatClient::with_policy(
            &config.server_url,
            config.chat.request_timeout(),
            config.chat.retry_policy(),
        )
        .context("Failed to initialize chat client")?;
        info!("Chat endpoint: {}", client.endpoint());

        let model = Model::new(&config);
        let terminal = TerminalGuard::new()?;
        let (sender, receiver) = mpsc::unbounded_channel();

        Ok(Self {
            config,
            client: Arc::new(client),
            model,
            terminal,
            sender,
            receiver,
            running: true,
        })
    }

    /// Run the main event loop
    #[instrument(skip(self))]
    pub async fn run(&mut self) -> Result<()> {
        info!("Starting event loop");

        let tick_interval = self.config.ui.tick_interval();
        let mut last_tick = Instant::now();

        while self.running {
            // Terminal events
            if event::poll(Duration::from_millis(10)).context("Failed to poll terminal events")? {
                match event::read().context("Failed to read terminal event")? {
                    Event::Key(key) if key.kind != KeyEventKind::Release => {
                        self.dispatch(AppMessage::Key(key));
                    }
                    Event::Resize(width, height) => {
                        self.dispatch(AppMessage::Resize(width, height));
                    }
                    _ => {}
                }
            }

            // Results from spawned request tasks
            while let Ok(msg) = self.receiver.try_recv() {
                self.dispatch(msg);
            }

            // Housekeeping tick (banner timeout, spinner)
            if last_tick.elapsed() >= tick_interval {
                self.dispatch(AppMessage::Tick);
                last_tick = Instant::now();
            }

            self.render()?;

            // Keep the loop from spinning
            tokio::time::sleep(Duration::from_millis(16)).await;
        }

        info!("Event loop ended");
        Ok(())
    }

    /// Apply a message and perform the resulting effects
    fn dispatch(&mut self, msg: AppMessage) {
        for effect in update(&mut self.model, msg) {
            self.perform(effect);
        }
    }

    /// Perform one side effect
    fn perform(&mut self, effect: Effect) {
        match effect {
            Effect::SendChat {
                context,
                user_message,
            } => {
                debug!(context_len = context.len(), "spawning chat request");
                let client = Arc::clone(&self.client);
                let sender = self.sender.clone();

                tokio::spawn(async move {
                    let result = client.send(&context, &user_message).await;
                    let msg = match result {
                        Ok(assistant) => AppMessage::ChatCompleted {
                            user: user_message,
                            assistant,
                        },
                        Err(error) => AppMessage::ChatFailed { error },
                    };
                    // Receiver only goes away on shutdown
                    let _ = sender.send(msg);
                });
            }

            Effect::Quit => {
                self.running = false;
            }
        }
    }

    /// Draw the current frame
    fn render(&mut self) -> Result<()> {
        let model = &mut self.model;
        self.terminal
            .terminal_mut()
            .draw(|frame| render_frame(frame, model))
            .context("Failed to render frame")?;
        Ok(())
    }
}

/// Render a single frame
fn render_frame(frame: &mut Frame, model: &mut Model) {
    let area = frame.area();

    // Input grows with its content, within limits
    let input_lines = model.input.lines().len();
    let input_height = (input_lines + 2).clamp(3, 8) as u16;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),                // Transcript
            Constraint::Length(input_height),  // Input
            Constraint::Length(1),             // Banner / status
        ])
        .split(area);

    model.transcript_view.render(
        frame,
        chunks[0],
        model.conversation.transcript(),
        !model.input_focused,
    );

    let border_color = if model.input_focused {
        Color::Yellow
    } else {
        Color::White
    };
    model.input.set_block(
        Block::default()
            .title("Message")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color)),
    );
    frame.render_widget(&model.input, chunks[1]);

    render_status(frame, chunks[2], model);

    if model.show_help {
        render_help(frame, area);
    }
}

/// Render the bottom line: banner first, then spinner, then key hints
fn render_status(frame: &mut Frame, area: Rect, model: &mut Model) {
    if model.banner.is_visible() {
        let banner: &BannerLine = &model.banner;
        banner.render(frame, area);
        return;
    }

    if model.is_loading {
        let throbber = throbber_widgets_tui::Throbber::default()
            .label("Waiting for reply...")
            .style(Style::default().fg(Color::Cyan))
            .throbber_set(throbber_widgets_tui::BRAILLE_SIX);
        frame.render_stateful_widget(throbber, area, &mut model.throbber);
        return;
    }

    let hints = Paragraph::new(" Enter: send | Tab: focus | F1: help | Ctrl+C: quit")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(hints, area);
}

/// Render the help overlay
fn render_help(frame: &mut Frame, area: Rect) {
    let popup_area = Rect {
        x: area.width / 4,
        y: area.height / 4,
        width: area.width / 2,
        height: (area.height / 2).max(14),
    };

    frame.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(""),
        Line::from(" Enter: Send message"),
        Line::from(" Shift+Enter: New line"),
        Line::from(" Tab: Switch focus between input and transcript"),
        Line::from(" Up/Down: Scroll transcript (when focused)"),
        Line::from(" PgUp/PgDn: Scroll faster"),
        Line::from(" Esc: Dismiss banner"),
        Line::from(" ?: Show this help (transcript focus) / F1 anywhere"),
        Line::from(" q: Quit (transcript focus)"),
        Line::from(" Ctrl+C: Quit"),
        Line::from(""),
        Line::from(" Press any key to close"),
    ];

    let help = Paragraph::new(help_text).block(
        Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );

    frame.render_widget(help, popup_area);
}
