//! String utilities for the domain layer.

/// Shorten `s` to at most `max_chars` characters for log lines.
///
/// Newlines are flattened to spaces so a preview always fits on one line.
/// When anything was cut, the preview ends with `...`.
pub fn preview(s: &str, max_chars: usize) -> String {
    let flat: String = s
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();

    if flat.chars().count() <= max_chars {
        return flat;
    }

    let keep = max_chars.saturating_sub(3);
    let mut out: String = flat.chars().take(keep).collect();
    out.push_str("...");
    out
}
