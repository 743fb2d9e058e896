//! Query value object

use super::error::DomainError;
use serde::Serialize;

/// A user message accepted for sending to the chat endpoint (Value Object)
///
/// The content is kept verbatim; only the blank check looks at the trimmed
/// form. Leading and trailing whitespace is sent as typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Query {
    content: String,
}

impl Query {
    /// Try to create a query, rejecting blank or whitespace-only input.
    pub fn try_new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            Err(DomainError::BlankMessage)
        } else {
            Ok(Self { content })
        }
    }

    /// Get the query content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}
