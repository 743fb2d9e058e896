//! Reply markup.
//!
//! Turns raw bot output into the HTML fragment stored in the transcript.
//!
//! - [`sanitize`]: the fixed three-step transform, passing other text through
//! - [`sanitize_with`]: same transform under an explicit [`RenderMode`]
//! - [`escape_html`]: entity-escape the five HTML-significant characters

mod escape;
mod sanitize;

pub use escape::escape_html;
pub use sanitize::{RenderMode, sanitize, sanitize_with};
