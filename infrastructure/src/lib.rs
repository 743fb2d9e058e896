//! Infrastructure layer for chatwire
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod http;
pub mod logging;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileChatConfig, FileConfig, FileEndpointConfig,
    FileLoggingConfig, FileOutputConfig, FileReplConfig,
};
pub use http::HttpChatEndpoint;
pub use logging::JsonlConversationLogger;
