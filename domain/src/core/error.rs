//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Message is empty")]
    BlankMessage,

    #[error("A bot reply is already pending")]
    ReplyPending,
}

impl DomainError {
    /// Check if this error comes from blank or whitespace-only input.
    ///
    /// Blank input is dropped silently by callers rather than reported.
    pub fn is_blank(&self) -> bool {
        matches!(self, DomainError::BlankMessage)
    }
}
