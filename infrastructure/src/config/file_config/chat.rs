//! Chat session configuration from TOML (`[chat]` section)

use chatwire_domain::{ConfigIssue, ConfigIssueCode, DEFAULT_GREETING, RenderMode};
use serde::{Deserialize, Serialize};

/// Raw chat configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileChatConfig {
    /// Bot greeting that opens every transcript
    pub greeting: String,
    /// Entity-escape reply text before adding markup
    pub escape_html: bool,
}

impl Default for FileChatConfig {
    fn default() -> Self {
        Self {
            greeting: DEFAULT_GREETING.to_string(),
            escape_html: false,
        }
    }
}

impl FileChatConfig {
    /// Greeting to use, falling back to the default when blank.
    pub fn effective_greeting(&self) -> &str {
        if self.greeting.trim().is_empty() {
            DEFAULT_GREETING
        } else {
            &self.greeting
        }
    }

    pub fn render_mode(&self) -> RenderMode {
        if self.escape_html {
            RenderMode::Escaped
        } else {
            RenderMode::Raw
        }
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        if self.greeting.trim().is_empty() {
            vec![ConfigIssue::warning(
                ConfigIssueCode::EmptyValue {
                    field: "chat.greeting".to_string(),
                },
                "chat.greeting is empty, falling back to the default greeting",
            )]
        } else {
            Vec::new()
        }
    }
}
