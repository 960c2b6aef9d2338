//! # chat-tui
//!
//! Interactive terminal client for the chat backend. The UI follows an
//! Elm-style split: a plain [`model::Model`] holds all view state, the pure
//! [`model::update`] function applies [`message::AppMessage`]s and returns
//! side effects, and [`app::App`] owns the terminal, the event loop, and the
//! async tasks that perform those effects.

pub mod app;
pub mod components;
pub mod config;
pub mod message;
pub mod model;
pub mod terminal;

pub use app::App;
pub use config::Config;
