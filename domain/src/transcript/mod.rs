//! Transcript domain.
//!
//! - [`entities::Message`]: a single chat message from the user or the bot
//! - [`entities::Transcript`]: the ordered, append-only message list
//! - [`state::ChatState`]: transcript plus draft input and typing flag

pub mod entities;
pub mod state;
