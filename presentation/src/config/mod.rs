//! Presentation-level configuration
//!
//! Configuration for output formatting and REPL behavior.

use chatwire_domain::OutputFormat;
use std::path::PathBuf;

/// Output configuration for the presentation layer
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Format for one-shot output and `/export` without a known extension
    pub format: OutputFormat,
    /// Enable colored terminal output
    pub color: bool,
    /// Entity-escape user text in HTML exports
    pub escape_user_text: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Terminal,
            color: true,
            escape_user_text: false,
        }
    }
}

/// REPL configuration for the presentation layer
#[derive(Debug, Clone, Default)]
pub struct ReplConfig {
    /// Path to history file (`~/` is expanded)
    pub history_file: Option<String>,
}

impl ReplConfig {
    /// Resolve the history file location.
    ///
    /// Falls back to `<data_dir>/chatwire/history.txt`.
    pub fn history_path(&self) -> Option<PathBuf> {
        match &self.history_file {
            Some(path) => Some(expand_home(path)),
            None => dirs::data_dir().map(|p| p.join("chatwire").join("history.txt")),
        }
    }
}

fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}
