//! Chat endpoint port
//!
//! Defines the interface for sending a user query to the remote chat
//! service and receiving its raw reply text.

use async_trait::async_trait;
use chatwire_domain::Query;
use thiserror::Error;

/// Errors that can occur while talking to the chat endpoint
#[derive(Error, Debug, Clone)]
pub enum EndpointError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Endpoint returned HTTP {status}")]
    Status { status: u16 },

    #[error("Malformed reply: {0}")]
    MalformedReply(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

impl EndpointError {
    /// HTTP status code, if the endpoint answered with a non-success status.
    pub fn status(&self) -> Option<u16> {
        match self {
            EndpointError::Status { status } => Some(*status),
            _ => None,
        }
    }
}

/// Remote service that answers chat queries
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ChatEndpoint: Send + Sync {
    /// Send a query and return the raw reply text.
    async fn ask(&self, query: &Query) -> Result<String, EndpointError>;

    /// Human-readable location of the endpoint, used in diagnostics.
    fn describe(&self) -> String {
        "chat endpoint".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_accessor() {
        assert_eq!(EndpointError::Status { status: 502 }.status(), Some(502));
        assert_eq!(EndpointError::Timeout.status(), None);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            EndpointError::Status { status: 500 }.to_string(),
            "Endpoint returned HTTP 500"
        );
        assert_eq!(
            EndpointError::ConnectionError("refused".to_string()).to_string(),
            "Connection error: refused"
        );
    }
}
