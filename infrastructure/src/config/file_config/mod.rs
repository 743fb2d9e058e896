//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod chat;
mod endpoint;
mod logging;
mod output;
mod repl;

pub use chat::FileChatConfig;
pub use endpoint::FileEndpointConfig;
pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use repl::FileReplConfig;

use chatwire_application::SessionConfig;
use chatwire_domain::ConfigIssue;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when a configuration contains at least one error-level issue.
#[derive(Error, Debug)]
#[error("invalid configuration: {}", summarize(.issues))]
pub struct ConfigValidationError {
    pub issues: Vec<ConfigIssue>,
}

fn summarize(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .filter(|issue| issue.is_error())
        .map(|issue| issue.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Chat endpoint location and timeout
    pub endpoint: FileEndpointConfig,
    /// Session settings (greeting, escaping)
    pub chat: FileChatConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// REPL settings
    pub repl: FileReplConfig,
    /// Log file settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.endpoint.validate());
        issues.extend(self.chat.validate());
        issues.extend(self.logging.validate());
        issues
    }

    /// Validate and split off warnings.
    ///
    /// Returns the warnings when the configuration is usable, and every issue
    /// when at least one of them is an error.
    pub fn check(&self) -> Result<Vec<ConfigIssue>, ConfigValidationError> {
        let issues = self.validate();
        if issues.iter().any(ConfigIssue::is_error) {
            Err(ConfigValidationError { issues })
        } else {
            Ok(issues)
        }
    }

    /// Session settings for the application layer.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig::default()
            .with_greeting(self.chat.effective_greeting())
            .with_render_mode(self.chat.render_mode())
    }
}
