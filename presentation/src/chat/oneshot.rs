//! Send a single message and hand back the resulting transcript

use chatwire_application::{ChatSessionController, EndpointError, SubmitOutcome};
use chatwire_domain::Transcript;
use thiserror::Error;

/// Why a one-shot message produced no reply
#[derive(Error, Debug)]
pub enum OneShotError {
    #[error("Message is empty")]
    Blank,

    #[error("Chat request failed: {0}")]
    Failed(#[from] EndpointError),

    #[error("Request was cancelled")]
    Cancelled,

    #[error("Chat session is closed")]
    Closed,
}

/// Submit `message` once and return the transcript including the reply.
pub async fn send_once(
    controller: &ChatSessionController,
    message: &str,
) -> Result<Transcript, OneShotError> {
    match controller.submit(message).await {
        SubmitOutcome::Replied(_) => Ok(controller.transcript()),
        SubmitOutcome::Ignored => Err(OneShotError::Blank),
        SubmitOutcome::Failed(e) => Err(OneShotError::Failed(e)),
        SubmitOutcome::Closed => Err(OneShotError::Closed),
        // A fresh controller has nothing in flight, so Busy only shows up
        // when a caller shares it; treat it like a cancelled request.
        SubmitOutcome::Busy | SubmitOutcome::Cancelled => Err(OneShotError::Cancelled),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chatwire_application::{ChatEndpoint, SessionConfig};
    use chatwire_domain::{Query, Sender};
    use std::sync::Arc;

    struct Reply(Result<String, EndpointError>);

    #[async_trait]
    impl ChatEndpoint for Reply {
        async fn ask(&self, _query: &Query) -> Result<String, EndpointError> {
            self.0.clone()
        }
    }

    fn controller(reply: Result<String, EndpointError>) -> ChatSessionController {
        ChatSessionController::new(Arc::new(Reply(reply)), SessionConfig::default())
    }

    #[tokio::test]
    async fn test_send_once_returns_full_transcript() {
        let controller = controller(Ok("**ok**".to_string()));

        let transcript = send_once(&controller, "hi").await.unwrap();

        assert_eq!(transcript.len(), 3);
        let last = transcript.last().unwrap();
        assert_eq!(last.sender(), Sender::Bot);
        assert_eq!(last.text(), "<strong>ok</strong>");
    }

    #[tokio::test]
    async fn test_send_once_blank_message() {
        let controller = controller(Ok("unused".to_string()));
        assert!(matches!(
            send_once(&controller, "   ").await,
            Err(OneShotError::Blank)
        ));
    }

    #[tokio::test]
    async fn test_send_once_endpoint_failure() {
        let controller = controller(Err(EndpointError::Status { status: 500 }));
        let err = send_once(&controller, "hi").await.unwrap_err();
        assert!(matches!(err, OneShotError::Failed(EndpointError::Status { status: 500 })));
    }

    #[tokio::test]
    async fn test_send_once_on_closed_session() {
        let controller = controller(Ok("unused".to_string()));
        controller.close();
        assert!(matches!(
            send_once(&controller, "hi").await,
            Err(OneShotError::Closed)
        ));
        assert_eq!(controller.transcript().len(), 1);
    }
}
