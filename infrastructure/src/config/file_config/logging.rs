//! Logging configuration from TOML (`[logging]` section)

use chatwire_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Write diagnostic logs to this file instead of stderr
    pub file: Option<String>,
    /// Append conversation events as JSONL to this file
    pub conversation_log: Option<String>,
}

impl FileLoggingConfig {
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        for (field, value) in [
            ("logging.file", &self.file),
            ("logging.conversation_log", &self.conversation_log),
        ] {
            if let Some(path) = value
                && path.trim().is_empty()
            {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::EmptyValue {
                        field: field.to_string(),
                    },
                    format!("{} is empty and will be ignored", field),
                ));
            }
        }
        issues
    }

    /// Diagnostic log file, if one is configured.
    pub fn log_file(&self) -> Option<&str> {
        self.file.as_deref().filter(|p| !p.trim().is_empty())
    }

    /// Conversation log file, if one is configured.
    pub fn conversation_log_file(&self) -> Option<&str> {
        self.conversation_log
            .as_deref()
            .filter(|p| !p.trim().is_empty())
    }
}
