//! Transcript output
//!
//! Renders transcripts for the terminal, as a standalone HTML page, or as
//! JSON.

pub mod console;
pub mod formatter;
pub mod html;
