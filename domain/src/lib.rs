//! Domain layer for chatwire
//!
//! This crate contains the core entities and value objects of a chat session.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Transcript
//!
//! The ordered, append-only list of [`Message`]s shown to the user. A fresh
//! transcript always starts with a single bot greeting.
//!
//! ## Chat state
//!
//! [`ChatState`] couples the transcript with the draft input and the
//! typing flag. The flag is raised when a user message is sent and lowered
//! once the exchange ends, whatever its outcome.
//!
//! ## Reply markup
//!
//! Bot replies arrive as plain model output and are turned into a small HTML
//! fragment by [`sanitize`]: fenced blocks, line breaks and `**bold**` pairs.

pub mod config;
pub mod core;
pub mod markup;
pub mod transcript;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::{error::DomainError, query::Query};
pub use markup::{RenderMode, escape_html, sanitize, sanitize_with};
pub use transcript::{
    entities::{DEFAULT_GREETING, Message, Sender, Transcript},
    state::ChatState,
};
