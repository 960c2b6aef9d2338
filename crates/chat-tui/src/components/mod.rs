//! UI components for the chat client
//!
//! Each component owns its presentation state and reacts to messages; the
//! data they render (transcript, banner text) lives in the application model.

pub mod banner;
pub mod transcript;

pub use banner::{Banner, BannerLine};
pub use transcript::{TranscriptMessage, TranscriptView};
