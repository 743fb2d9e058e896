//! Core domain concepts shared across all subdomains.
//!
//! - [`query::Query`]: a validated, non-blank user message bound for the endpoint
//! - [`error::DomainError`]: domain-level errors
//! - [`string`]: UTF-8 safe helpers for log previews

pub mod error;
pub mod query;
pub mod string;
