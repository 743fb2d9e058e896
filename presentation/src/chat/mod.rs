//! Chat front ends
//!
//! An interactive reedline session and a one-shot send used by the CLI.

mod oneshot;
mod repl;

pub use oneshot::{OneShotError, send_once};
pub use repl::{ChatRepl, ReplCommand, export_transcript};
