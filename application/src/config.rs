//! Session configuration
//!
//! Settings that shape a chat session independently of where they were
//! loaded from. Infrastructure builds this from the config file and the
//! presentation layer may override individual fields.

use chatwire_domain::{DEFAULT_GREETING, RenderMode};

/// Configuration for a single chat session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Bot message that seeds every new transcript
    pub greeting: String,
    /// How bot replies are turned into HTML
    pub render_mode: RenderMode,
}

impl SessionConfig {
    pub fn with_greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = greeting.into();
        self
    }

    pub fn with_render_mode(mut self, mode: RenderMode) -> Self {
        self.render_mode = mode;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            greeting: DEFAULT_GREETING.to_string(),
            render_mode: RenderMode::Raw,
        }
    }
}
