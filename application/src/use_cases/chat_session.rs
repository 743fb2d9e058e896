//! Chat session use case.
//!
//! [`ChatSessionController`] owns the state of one chat session and is the
//! only thing that mutates it. Submitting a message:
//!
//! 1. appends the user message, clears the draft and raises the typing flag
//! 2. sends the query to the [`ChatEndpoint`]
//! 3. on success sanitizes the reply and appends it as a bot message
//! 4. on failure reports to the operator log only; the transcript is left alone
//! 5. lowers the typing flag, whatever happened
//!
//! Step 5 is owned by [`TypingGuard`], which lowers the flag when dropped.

use crate::config::SessionConfig;
use crate::ports::chat_endpoint::{ChatEndpoint, EndpointError};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::session_observer::{NoSessionObserver, SessionObserver};
use chatwire_domain::core::string::preview;
use chatwire_domain::{ChatState, Message, Transcript, sanitize_with};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Result of a single [`ChatSessionController::submit`] call.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Input was blank; nothing happened.
    Ignored,
    /// A reply is still pending; the input was not sent.
    Busy,
    /// The endpoint answered and this bot message was appended.
    Replied(Message),
    /// The request failed; no bot message was appended.
    Failed(EndpointError),
    /// The request was cancelled before the endpoint answered.
    Cancelled,
    /// The session was already closed; nothing was appended.
    Closed,
}

impl SubmitOutcome {
    /// The appended bot message, if the endpoint answered.
    pub fn reply(&self) -> Option<&Message> {
        match self {
            SubmitOutcome::Replied(message) => Some(message),
            _ => None,
        }
    }

    /// Whether a user message was appended to the transcript.
    pub fn was_sent(&self) -> bool {
        matches!(
            self,
            SubmitOutcome::Replied(_) | SubmitOutcome::Failed(_) | SubmitOutcome::Cancelled
        )
    }
}

/// Use case driving one chat session.
///
/// Cloning yields another handle to the same session. The session ends when
/// [`close`](Self::close) is called; any request still in flight is then
/// cancelled and further submits are refused.
#[derive(Clone)]
pub struct ChatSessionController {
    endpoint: Arc<dyn ChatEndpoint>,
    config: SessionConfig,
    state: Arc<Mutex<ChatState>>,
    observer: Arc<dyn SessionObserver>,
    conversation_logger: Arc<dyn ConversationLogger>,
    session_token: CancellationToken,
}

impl ChatSessionController {
    pub fn new(endpoint: Arc<dyn ChatEndpoint>, config: SessionConfig) -> Self {
        let state = ChatState::new(config.greeting.clone());
        Self {
            endpoint,
            config,
            state: Arc::new(Mutex::new(state)),
            observer: Arc::new(NoSessionObserver),
            conversation_logger: Arc::new(NoConversationLogger),
            session_token: CancellationToken::new(),
        }
    }

    /// Create with a session observer.
    pub fn with_observer(mut self, observer: Arc<dyn SessionObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Copy of the current session state.
    pub fn snapshot(&self) -> ChatState {
        self.lock_state().clone()
    }

    /// Copy of the current transcript.
    pub fn transcript(&self) -> Transcript {
        self.lock_state().transcript().clone()
    }

    pub fn is_bot_typing(&self) -> bool {
        self.lock_state().is_bot_typing()
    }

    /// Replace the draft input.
    pub fn set_pending_input(&self, draft: impl Into<String>) {
        self.lock_state().set_pending_input(draft);
    }

    /// End the session, cancelling any request still in flight.
    pub fn close(&self) {
        if !self.session_token.is_cancelled() {
            debug!("Closing chat session");
            self.session_token.cancel();
        }
    }

    pub fn is_closed(&self) -> bool {
        self.session_token.is_cancelled()
    }

    /// Close this session and start a fresh one on the same endpoint.
    ///
    /// The new session gets a newly seeded transcript and shares the
    /// observer and conversation logger.
    pub fn restart(&self) -> Self {
        self.close();
        Self::new(self.endpoint.clone(), self.config.clone())
            .with_observer(self.observer.clone())
            .with_conversation_logger(self.conversation_logger.clone())
    }

    /// Token that is cancelled when the session closes.
    ///
    /// Children of this token can be passed to
    /// [`submit_with_cancel`](Self::submit_with_cancel) to cancel a single
    /// request.
    pub fn session_token(&self) -> CancellationToken {
        self.session_token.clone()
    }

    /// Submit a user message and wait for the exchange to end.
    pub async fn submit(&self, raw: &str) -> SubmitOutcome {
        self.submit_with_cancel(raw, self.session_token.child_token())
            .await
    }

    /// Submit on a background task so the caller is not blocked.
    pub fn spawn_submit(&self, raw: impl Into<String>) -> JoinHandle<SubmitOutcome> {
        let session = self.clone();
        let raw = raw.into();
        tokio::spawn(async move { session.submit(&raw).await })
    }

    /// Submit a user message, giving up when `cancel` fires.
    pub async fn submit_with_cancel(&self, raw: &str, cancel: CancellationToken) -> SubmitOutcome {
        if self.is_closed() {
            debug!("Submit on a closed session ignored");
            return SubmitOutcome::Closed;
        }

        let (query, user_message) = {
            let mut state = self.lock_state();
            match state.begin_exchange(raw) {
                Ok(query) => {
                    let user_message = Message::user(query.content());
                    (query, user_message)
                }
                Err(e) if e.is_blank() => {
                    debug!("Blank message dropped");
                    return SubmitOutcome::Ignored;
                }
                Err(e) => {
                    warn!("Message not sent: {}", e);
                    return SubmitOutcome::Busy;
                }
            }
        };

        let _typing = TypingGuard::raise(self.state.clone(), self.observer.clone());
        self.observer.on_message_appended(&user_message);

        info!(
            "Sending message to {}: {}",
            self.endpoint.describe(),
            preview(query.content(), 80)
        );
        self.conversation_logger.log(ConversationEvent::new(
            "user_message",
            serde_json::json!({ "text": query.content() }),
        ));

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            result = self.endpoint.ask(&query) => Some(result),
        };

        match result {
            Some(Ok(raw_reply)) => self.accept_reply(&raw_reply),
            Some(Err(e)) => {
                error!(
                    endpoint = %self.endpoint.describe(),
                    "Chat request failed: {}", e
                );
                self.conversation_logger.log(ConversationEvent::new(
                    "endpoint_error",
                    serde_json::json!({
                        "error": e.to_string(),
                        "status": e.status(),
                    }),
                ));
                SubmitOutcome::Failed(e)
            }
            None => {
                info!("Chat request cancelled");
                self.conversation_logger.log(ConversationEvent::new(
                    "request_cancelled",
                    serde_json::json!({ "text": query.content() }),
                ));
                SubmitOutcome::Cancelled
            }
        }
    }

    fn accept_reply(&self, raw_reply: &str) -> SubmitOutcome {
        let html = sanitize_with(raw_reply, self.config.render_mode);
        let message = self.lock_state().record_reply(html);

        debug!(
            "Reply received ({} bytes raw, {} bytes rendered)",
            raw_reply.len(),
            message.text().len()
        );
        self.conversation_logger.log(ConversationEvent::new(
            "bot_reply",
            serde_json::json!({
                "raw": raw_reply,
                "text": message.text(),
            }),
        ));
        self.observer.on_message_appended(&message);

        SubmitOutcome::Replied(message)
    }

    fn lock_state(&self) -> MutexGuard<'_, ChatState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for ChatSessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSessionController")
            .field("endpoint", &self.endpoint.describe())
            .field("config", &self.config)
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

/// Holds the typing flag up for the lifetime of one exchange.
struct TypingGuard {
    state: Arc<Mutex<ChatState>>,
    observer: Arc<dyn SessionObserver>,
}

impl TypingGuard {
    /// The flag itself was raised by `begin_exchange`; this only announces it.
    fn raise(state: Arc<Mutex<ChatState>>, observer: Arc<dyn SessionObserver>) -> Self {
        observer.on_typing_changed(true);
        Self { state, observer }
    }
}

impl Drop for TypingGuard {
    fn drop(&mut self) {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .end_exchange();
        self.observer.on_typing_changed(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chatwire_domain::{DEFAULT_GREETING, Query, RenderMode, Sender};
    use tokio::sync::Notify;

    // ==================== Test Mocks ====================

    /// Endpoint that answers every query with a fixed result.
    struct FixedEndpoint {
        reply: Result<String, EndpointError>,
        queries: Mutex<Vec<String>>,
    }

    impl FixedEndpoint {
        fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                queries: Mutex::new(Vec::new()),
            }
        }

        fn failing(status: u16) -> Self {
            Self::erroring(EndpointError::Status { status })
        }

        fn erroring(error: EndpointError) -> Self {
            Self {
                reply: Err(error),
                queries: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ChatEndpoint for FixedEndpoint {
        async fn ask(&self, query: &Query) -> Result<String, EndpointError> {
            self.queries
                .lock()
                .unwrap()
                .push(query.content().to_string());
            self.reply.clone()
        }
    }

    /// Endpoint that waits for the test to release it before answering.
    struct GatedEndpoint {
        started: Notify,
        release: Notify,
    }

    impl GatedEndpoint {
        fn new() -> Self {
            Self {
                started: Notify::new(),
                release: Notify::new(),
            }
        }
    }

    #[async_trait]
    impl ChatEndpoint for GatedEndpoint {
        async fn ask(&self, query: &Query) -> Result<String, EndpointError> {
            self.started.notify_one();
            self.release.notified().await;
            Ok(format!("echo: {}", query.content()))
        }
    }

    #[derive(Debug, PartialEq)]
    enum Observed {
        Typing(bool),
        Appended(Sender, String),
    }

    #[derive(Default)]
    struct RecordingObserver {
        events: Mutex<Vec<Observed>>,
    }

    impl SessionObserver for RecordingObserver {
        fn on_typing_changed(&self, typing: bool) {
            self.events.lock().unwrap().push(Observed::Typing(typing));
        }

        fn on_message_appended(&self, message: &Message) {
            self.events.lock().unwrap().push(Observed::Appended(
                message.sender(),
                message.text().to_string(),
            ));
        }
    }

    #[derive(Default)]
    struct RecordingLogger {
        events: Mutex<Vec<&'static str>>,
    }

    impl ConversationLogger for RecordingLogger {
        fn log(&self, event: ConversationEvent) {
            self.events.lock().unwrap().push(event.event_type);
        }
    }

    fn controller(endpoint: impl ChatEndpoint + 'static) -> ChatSessionController {
        ChatSessionController::new(Arc::new(endpoint), SessionConfig::default())
    }

    // ==================== Submit ====================

    #[tokio::test]
    async fn test_successful_reply_is_sanitized_and_appended() {
        let session = controller(FixedEndpoint::replying("**bold** line1\nline2"));

        let outcome = session.submit("hi").await;

        assert_eq!(
            outcome.reply().map(Message::text),
            Some("<strong>bold</strong> line1<br>line2")
        );
        let transcript = session.transcript();
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript.messages()[1], Message::user("hi"));
        assert_eq!(
            transcript.last().unwrap(),
            &Message::bot("<strong>bold</strong> line1<br>line2")
        );
        assert!(!session.is_bot_typing());
    }

    #[tokio::test]
    async fn test_failed_request_appends_only_user_message() {
        let session = controller(FixedEndpoint::failing(500));

        let outcome = session.submit("hi").await;

        assert!(matches!(
            outcome,
            SubmitOutcome::Failed(EndpointError::Status { status: 500 })
        ));
        let transcript = session.transcript();
        assert_eq!(
            transcript.messages(),
            &[Message::bot(DEFAULT_GREETING), Message::user("hi")]
        );
        assert!(!session.is_bot_typing());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_appends_only_user_message() {
        let observer = Arc::new(RecordingObserver::default());
        let session = controller(FixedEndpoint::erroring(EndpointError::ConnectionError(
            "connection refused".to_string(),
        )))
        .with_observer(observer.clone());

        let outcome = session.submit("hi").await;

        assert!(matches!(outcome, SubmitOutcome::Failed(EndpointError::ConnectionError(_))));
        assert!(outcome.reply().is_none());
        assert!(outcome.was_sent());
        assert_eq!(
            session.transcript().messages(),
            &[Message::bot(DEFAULT_GREETING), Message::user("hi")]
        );
        assert!(!session.is_bot_typing());
        assert_eq!(
            observer.events.lock().unwrap().last(),
            Some(&Observed::Typing(false))
        );
    }

    #[tokio::test]
    async fn test_blank_input_is_ignored() {
        let endpoint = Arc::new(FixedEndpoint::replying("never"));
        let session = ChatSessionController::new(endpoint.clone(), SessionConfig::default());
        session.set_pending_input("  ");

        for blank in ["", "   ", "\n\t"] {
            assert!(matches!(session.submit(blank).await, SubmitOutcome::Ignored));
        }

        let state = session.snapshot();
        assert_eq!(state.transcript().len(), 1);
        assert_eq!(state.pending_input(), "  ");
        assert!(!state.is_bot_typing());
        assert!(endpoint.queries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_query_is_sent_verbatim_and_draft_cleared() {
        let endpoint = Arc::new(FixedEndpoint::replying("ok"));
        let session = ChatSessionController::new(endpoint.clone(), SessionConfig::default());
        session.set_pending_input("  padded  ");

        session.submit("  padded  ").await;

        assert_eq!(*endpoint.queries.lock().unwrap(), vec!["  padded  "]);
        assert_eq!(session.snapshot().pending_input(), "");
    }

    #[tokio::test]
    async fn test_escaped_render_mode() {
        let session = ChatSessionController::new(
            Arc::new(FixedEndpoint::replying("<i>x</i>")),
            SessionConfig::default().with_render_mode(RenderMode::Escaped),
        );

        let outcome = session.submit("hi").await;

        assert_eq!(
            outcome.reply().map(Message::text),
            Some("&lt;i&gt;x&lt;/i&gt;")
        );
    }

    #[tokio::test]
    async fn test_custom_greeting_seeds_transcript() {
        let session = ChatSessionController::new(
            Arc::new(FixedEndpoint::replying("ok")),
            SessionConfig::default().with_greeting("Welcome back"),
        );
        assert_eq!(session.transcript().messages(), &[Message::bot("Welcome back")]);
    }

    // ==================== Observer & logging ====================

    #[tokio::test]
    async fn test_observer_sees_user_message_before_reply() {
        let observer = Arc::new(RecordingObserver::default());
        let session = controller(FixedEndpoint::replying("pong")).with_observer(observer.clone());

        session.submit("ping").await;

        assert_eq!(
            *observer.events.lock().unwrap(),
            vec![
                Observed::Typing(true),
                Observed::Appended(Sender::User, "ping".to_string()),
                Observed::Appended(Sender::Bot, "pong".to_string()),
                Observed::Typing(false),
            ]
        );
    }

    #[tokio::test]
    async fn test_observer_sees_typing_cleared_on_failure() {
        let observer = Arc::new(RecordingObserver::default());
        let session = controller(FixedEndpoint::failing(503)).with_observer(observer.clone());

        session.submit("ping").await;

        assert_eq!(
            observer.events.lock().unwrap().last(),
            Some(&Observed::Typing(false))
        );
    }

    #[tokio::test]
    async fn test_conversation_events_logged() {
        let logger = Arc::new(RecordingLogger::default());
        let ok = controller(FixedEndpoint::replying("pong")).with_conversation_logger(logger.clone());
        ok.submit("ping").await;

        let failing =
            controller(FixedEndpoint::failing(500)).with_conversation_logger(logger.clone());
        failing.submit("ping").await;

        assert_eq!(
            *logger.events.lock().unwrap(),
            vec!["user_message", "bot_reply", "user_message", "endpoint_error"]
        );
    }

    // ==================== Concurrency ====================

    #[tokio::test]
    async fn test_typing_while_pending_and_overlapping_submit_is_busy() {
        let endpoint = Arc::new(GatedEndpoint::new());
        let session = ChatSessionController::new(endpoint.clone(), SessionConfig::default());

        let handle = session.spawn_submit("first");
        endpoint.started.notified().await;

        assert!(session.is_bot_typing());
        assert!(matches!(session.submit("second").await, SubmitOutcome::Busy));
        assert_eq!(session.transcript().len(), 2);

        endpoint.release.notify_one();
        let outcome = handle.await.unwrap();

        assert_eq!(outcome.reply().map(Message::text), Some("echo: first"));
        assert!(!session.is_bot_typing());
        let texts: Vec<String> = session
            .transcript()
            .iter()
            .map(|m| m.text().to_string())
            .collect();
        assert_eq!(texts, vec![DEFAULT_GREETING, "first", "echo: first"]);
    }

    #[tokio::test]
    async fn test_cancelled_request_clears_typing_without_reply() {
        let endpoint = Arc::new(GatedEndpoint::new());
        let session = ChatSessionController::new(endpoint.clone(), SessionConfig::default());
        let cancel = session.session_token().child_token();

        let task_session = session.clone();
        let task_cancel = cancel.clone();
        let handle =
            tokio::spawn(async move { task_session.submit_with_cancel("hi", task_cancel).await });
        endpoint.started.notified().await;

        cancel.cancel();
        let outcome = handle.await.unwrap();

        assert!(matches!(outcome, SubmitOutcome::Cancelled));
        assert!(outcome.was_sent());
        assert!(!session.is_bot_typing());
        assert_eq!(session.transcript().len(), 2);
        // Cancelling one request leaves the session usable
        assert!(!session.is_closed());
    }

    #[tokio::test]
    async fn test_closing_session_cancels_in_flight_request() {
        let endpoint = Arc::new(GatedEndpoint::new());
        let session = ChatSessionController::new(endpoint.clone(), SessionConfig::default());

        let handle = session.spawn_submit("hi");
        endpoint.started.notified().await;
        session.close();

        assert!(matches!(handle.await.unwrap(), SubmitOutcome::Cancelled));
        assert!(!session.is_bot_typing());
    }

    #[tokio::test]
    async fn test_closed_session_refuses_submits() {
        let session = controller(FixedEndpoint::replying("never"));
        session.close();

        let outcome = session.submit("hi").await;

        assert!(matches!(outcome, SubmitOutcome::Closed));
        assert!(!outcome.was_sent());
        assert_eq!(session.transcript().len(), 1);
    }

    #[tokio::test]
    async fn test_restart_starts_fresh_transcript() {
        let session = controller(FixedEndpoint::replying("pong"));
        session.submit("ping").await;

        let fresh = session.restart();

        assert!(session.is_closed());
        assert!(!fresh.is_closed());
        assert_eq!(fresh.transcript().len(), 1);
        assert!(fresh.submit("again").await.reply().is_some());
    }
}
