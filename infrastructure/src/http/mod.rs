//! HTTP adapter for the chat endpoint port.

mod endpoint;

pub use endpoint::HttpChatEndpoint;
