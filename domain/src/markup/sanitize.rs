//! Bot reply sanitizer.
//!
//! Rules run in a fixed order and never re-match their own output:
//!
//! 1. ```` ```X``` ```` becomes `<pre><code>X</code></pre>`, `X` untouched
//! 2. every `\n` outside a fenced block becomes `<br>`
//! 3. every `**X**` outside a fenced block becomes `<strong>X</strong>`
//!
//! Fenced blocks are cut out first and the remaining rules only see the text
//! between them, so code keeps its newlines and asterisks.

use super::escape::escape_html;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::LazyLock;

const FENCE: &str = "```";

static FENCED_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```.*?```").expect("fenced block pattern is valid"));

static STRONG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("strong pattern is valid"));

/// How text outside the three known constructs reaches the output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Pass reply text through as-is. Any markup in the reply is live HTML.
    #[default]
    Raw,
    /// Entity-escape reply text first, so only the generated tags are markup.
    Escaped,
}

/// Sanitize a raw reply in [`RenderMode::Raw`].
pub fn sanitize(raw: &str) -> String {
    sanitize_with(raw, RenderMode::Raw)
}

/// Sanitize a raw reply under the given render mode.
pub fn sanitize_with(raw: &str, mode: RenderMode) -> String {
    let mut out = String::with_capacity(raw.len() + 16);
    let mut last = 0;

    for block in FENCED_BLOCK.find_iter(raw) {
        out.push_str(&render_inline(&raw[last..block.start()], mode));

        let interior = &block.as_str()[FENCE.len()..block.len() - FENCE.len()];
        out.push_str("<pre><code>");
        out.push_str(&apply_mode(interior, mode));
        out.push_str("</code></pre>");

        last = block.end();
    }
    out.push_str(&render_inline(&raw[last..], mode));

    out
}

fn apply_mode(text: &str, mode: RenderMode) -> Cow<'_, str> {
    match mode {
        RenderMode::Raw => Cow::Borrowed(text),
        RenderMode::Escaped => Cow::Owned(escape_html(text)),
    }
}

fn render_inline(text: &str, mode: RenderMode) -> String {
    if text.is_empty() {
        return String::new();
    }
    let with_breaks = apply_mode(text, mode).replace('\n', "<br>");
    STRONG
        .replace_all(&with_breaks, "<strong>$1</strong>")
        .into_owned()
}
