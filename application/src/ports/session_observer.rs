//! Session observer port
//!
//! Lets a front end follow state changes of a chat session as they happen,
//! e.g. to animate a typing indicator while a reply is pending.

use chatwire_domain::Message;

/// Callback for chat session updates
///
/// Implementations live in the presentation layer. Callbacks run on the
/// task driving the session and must not block.
pub trait SessionObserver: Send + Sync {
    /// Called whenever the typing flag flips.
    fn on_typing_changed(&self, _typing: bool) {}

    /// Called after a message was appended to the transcript.
    fn on_message_appended(&self, _message: &Message) {}
}

/// No-op observer for when nobody is watching
pub struct NoSessionObserver;

impl SessionObserver for NoSessionObserver {}
