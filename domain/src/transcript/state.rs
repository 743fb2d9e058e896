//! Chat session state

use super::entities::{DEFAULT_GREETING, Message, Transcript};
use crate::core::error::DomainError;
use crate::core::query::Query;

/// State of one chat session (Entity)
///
/// Invariant: `is_bot_typing` is true exactly while a user message has been
/// sent and its exchange has not ended yet. An exchange opens with
/// [`begin_exchange`](Self::begin_exchange) and closes with
/// [`end_exchange`](Self::end_exchange); at most one is open at a time.
#[derive(Debug, Clone)]
pub struct ChatState {
    transcript: Transcript,
    pending_input: String,
    is_bot_typing: bool,
}

impl ChatState {
    pub fn new(greeting: impl Into<String>) -> Self {
        Self {
            transcript: Transcript::with_greeting(greeting),
            pending_input: String::new(),
            is_bot_typing: false,
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    pub fn set_pending_input(&mut self, draft: impl Into<String>) {
        self.pending_input = draft.into();
    }

    pub fn is_bot_typing(&self) -> bool {
        self.is_bot_typing
    }

    /// Open an exchange for `raw`.
    ///
    /// Appends the user message verbatim, clears the draft and raises the
    /// typing flag, in that order. Blank input and input arriving while a
    /// reply is pending leave the state untouched.
    pub fn begin_exchange(&mut self, raw: &str) -> Result<Query, DomainError> {
        let query = Query::try_new(raw)?;
        if self.is_bot_typing {
            return Err(DomainError::ReplyPending);
        }

        self.transcript.push(Message::user(query.content()));
        self.pending_input.clear();
        self.is_bot_typing = true;
        Ok(query)
    }

    /// Append a sanitized bot reply and return a copy of the new message.
    pub fn record_reply(&mut self, html: impl Into<String>) -> Message {
        let message = Message::bot(html);
        self.transcript.push(message.clone());
        message
    }

    /// Close the current exchange.
    pub fn end_exchange(&mut self) {
        self.is_bot_typing = false;
    }
}

impl Default for ChatState {
    fn default() -> Self {
        Self::new(DEFAULT_GREETING)
    }
}
