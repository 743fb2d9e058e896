//! Console output formatter for chat transcripts
//!
//! Bot messages hold an HTML fragment. For the terminal the three tags the
//! sanitizer produces are mapped to text styling and common entities are
//! decoded; any other markup is shown as-is.

use super::formatter::TranscriptFormatter;
use chatwire_domain::{Message, Sender, Transcript};
use colored::Colorize;
use regex::Regex;
use std::sync::LazyLock;

static PRE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<pre><code>(.*?)</code></pre>").expect("pre block pattern is valid")
});

static STRONG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<strong>(.*?)</strong>").expect("strong pattern is valid")
});

const CODE_INDENT: &str = "    ";

/// Formats chat messages for console display
pub struct ConsoleFormatter {
    color: bool,
}

impl ConsoleFormatter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Format one message with its sender label
    pub fn format_message(&self, message: &Message) -> String {
        let body = match message.sender() {
            Sender::User => message.text().to_string(),
            Sender::Bot => self.render_fragment(message.text()),
        };

        let label = match message.sender() {
            Sender::User => self.paint("you", |s| s.yellow().bold().to_string()),
            Sender::Bot => self.paint("bot", |s| s.green().bold().to_string()),
        };

        format!("{} {}", label, Self::indent_continuation(&body, "    "))
    }

    /// Dimmed one-line notice (e.g. cancellation)
    pub fn notice(&self, text: &str) -> String {
        self.paint(text, |s| s.dimmed().to_string())
    }

    /// Turn a sanitized HTML fragment into terminal text.
    pub fn render_fragment(&self, html: &str) -> String {
        let mut out = String::new();
        let mut last = 0;

        for caps in PRE_BLOCK.captures_iter(html) {
            let (Some(whole), Some(code)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            push_after_block(&mut out, &self.render_inline(&html[last..whole.start()]));

            let code = decode_entities(code.as_str());
            let block = Self::indent(code.trim_matches('\n'), CODE_INDENT);
            if !out.is_empty() && !out.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(&self.paint(&block, |s| s.cyan().to_string()));
            out.push('\n');

            last = whole.end();
        }
        push_after_block(&mut out, &self.render_inline(&html[last..]));

        out.trim_end_matches('\n').to_string()
    }

    fn render_inline(&self, html: &str) -> String {
        let text = html.replace("<br>", "\n");
        let mut out = String::new();
        let mut last = 0;

        for caps in STRONG.captures_iter(&text) {
            let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            out.push_str(&decode_entities(&text[last..whole.start()]));
            let inner = decode_entities(inner.as_str());
            out.push_str(&self.paint(&inner, |s| s.bold().to_string()));
            last = whole.end();
        }
        out.push_str(&decode_entities(&text[last..]));

        out
    }

    fn paint(&self, text: &str, style: impl Fn(&str) -> String) -> String {
        if self.color {
            style(text)
        } else {
            text.to_string()
        }
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn indent_continuation(text: &str, prefix: &str) -> String {
        text.replace('\n', &format!("\n{}", prefix))
    }
}

impl TranscriptFormatter for ConsoleFormatter {
    fn format_transcript(&self, transcript: &Transcript) -> String {
        transcript
            .iter()
            .map(|message| self.format_message(message))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Append text, dropping one leading line break when `out` already ends a line.
fn push_after_block(out: &mut String, text: &str) {
    if out.ends_with('\n') {
        out.push_str(text.strip_prefix('\n').unwrap_or(text));
    } else {
        out.push_str(text);
    }
}

fn decode_entities(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}
