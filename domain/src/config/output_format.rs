//! Output format value object

use serde::{Deserialize, Serialize};

/// How a transcript is written out
///
/// This is a domain concept representing how the output should be formatted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Styled text for the terminal (default)
    #[default]
    Terminal,
    /// Standalone HTML page with the sanitized fragments
    Html,
    /// JSON array of messages
    Json,
}

impl OutputFormat {
    /// Pick a format from a file extension, if it names one.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "html" | "htm" => Some(Self::Html),
            "json" => Some(Self::Json),
            "txt" => Some(Self::Terminal),
            _ => None,
        }
    }
}
