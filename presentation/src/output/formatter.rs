//! Transcript formatter trait

use super::console::ConsoleFormatter;
use super::html::HtmlFormatter;
use crate::config::OutputConfig;
use chatwire_domain::{OutputFormat, Transcript};

/// Trait for formatting transcripts
pub trait TranscriptFormatter {
    /// Format the whole transcript
    fn format_transcript(&self, transcript: &Transcript) -> String;
}

/// Formats transcripts as a pretty-printed JSON array
pub struct JsonFormatter;

impl TranscriptFormatter for JsonFormatter {
    fn format_transcript(&self, transcript: &Transcript) -> String {
        serde_json::to_string_pretty(transcript).unwrap_or_else(|_| "[]".to_string())
    }
}

/// Pick the formatter for an output format.
pub fn formatter_for(format: OutputFormat, config: &OutputConfig) -> Box<dyn TranscriptFormatter> {
    match format {
        OutputFormat::Terminal => Box::new(ConsoleFormatter::new(config.color)),
        OutputFormat::Html => Box::new(HtmlFormatter::new(config.escape_user_text)),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}
