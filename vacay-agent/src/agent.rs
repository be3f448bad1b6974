//! The capability the request handler drives

use async_trait::async_trait;
use vacay_providers::Message;

use crate::booking::BookingState;

/// One user's conversation: a greeting to open it, then replies.
///
/// Neither method fails: errors are turned into a user-visible apology and
/// the conversation continues.
#[async_trait]
pub trait ConversationAgent: Send {
    /// Opening message for a new session
    async fn greet(&mut self) -> String;

    /// Record `user_text` and produce the next assistant reply
    async fn reply(&mut self, user_text: &str) -> String;

    /// Every turn so far, oldest first
    fn transcript(&self) -> &[Message];

    fn booking(&self) -> &BookingState;
}

pub type BoxedAgent = Box<dyn ConversationAgent>;
