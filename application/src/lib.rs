//! Application layer for chatwire
//!
//! This crate contains the chat session use case, port definitions, and
//! session configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::SessionConfig;
pub use ports::{
    chat_endpoint::{ChatEndpoint, EndpointError},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    session_observer::{NoSessionObserver, SessionObserver},
};
pub use use_cases::chat_session::{ChatSessionController, SubmitOutcome};
