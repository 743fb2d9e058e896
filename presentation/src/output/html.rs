//! Standalone HTML export of a transcript

use super::formatter::TranscriptFormatter;
use chatwire_domain::{Sender, Transcript, escape_html};

const STYLE: &str = "body{font-family:sans-serif;max-width:48rem;margin:2rem auto}\
.message{margin:.5rem 0;padding:.5rem .75rem;border-radius:.5rem}\
.user{background:#e8f0fe;text-align:right}\
.bot{background:#f1f3f4}\
pre{background:#272822;color:#f8f8f2;padding:.5rem;overflow-x:auto}";

/// Renders a transcript as an HTML page.
///
/// Bot messages are already HTML fragments and are inserted unchanged.
/// User text is inserted verbatim unless `escape_user_text` is set.
pub struct HtmlFormatter {
    escape_user_text: bool,
}

impl HtmlFormatter {
    pub fn new(escape_user_text: bool) -> Self {
        Self { escape_user_text }
    }

    fn body(&self, sender: Sender, text: &str) -> String {
        match sender {
            Sender::User if self.escape_user_text => escape_html(text),
            _ => text.to_string(),
        }
    }
}

impl TranscriptFormatter for HtmlFormatter {
    fn format_transcript(&self, transcript: &Transcript) -> String {
        let mut out = String::new();
        out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        out.push_str("<title>Chat transcript</title>\n");
        out.push_str(&format!("<style>{}</style>\n", STYLE));
        out.push_str("</head>\n<body>\n<div class=\"chat-messages\">\n");

        for message in transcript {
            out.push_str(&format!(
                "<div class=\"message {}\">{}</div>\n",
                message.sender(),
                self.body(message.sender(), message.text())
            ));
        }

        out.push_str("</div>\n</body>\n</html>\n");
        out
    }
}
