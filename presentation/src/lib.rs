//! Presentation layer for chatwire
//!
//! This crate contains CLI definitions, transcript formatters, the typing
//! indicator and the interactive chat interface.

pub mod chat;
pub mod cli;
pub mod config;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use chat::{ChatRepl, OneShotError, send_once};
pub use cli::commands::{Cli, OutputFormatArg};
pub use config::{OutputConfig, ReplConfig};
pub use output::{
    console::ConsoleFormatter,
    formatter::{JsonFormatter, TranscriptFormatter, formatter_for},
    html::HtmlFormatter,
};
pub use progress::typing::TypingIndicator;
