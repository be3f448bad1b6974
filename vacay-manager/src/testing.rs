//! Scripted agents for handler tests

use std::time::Duration;

use async_trait::async_trait;
use vacay_agent::{BookingState, BoxedAgent, ConversationAgent};
use vacay_core::session::{SessionCache, SessionStore};
use vacay_providers::Message;

use crate::state::AgentCache;

pub const GREETING: &str = "Welcome! Shall we book Orlando?";

/// Greets with a fixed line and echoes replies.
///
/// Only the greeting and the user turns are recorded.
#[derive(Default)]
pub struct FakeAgent {
    transcript: Vec<Message>,
    booking: BookingState,
}

#[async_trait]
impl ConversationAgent for FakeAgent {
    async fn greet(&mut self) -> String {
        self.transcript.push(Message::assistant(GREETING));
        GREETING.to_string()
    }

    async fn reply(&mut self, user_text: &str) -> String {
        self.transcript.push(Message::user(user_text));
        tokio::task::yield_now().await;
        format!("You said: {}", user_text)
    }

    fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    fn booking(&self) -> &BookingState {
        &self.booking
    }
}

pub fn fake_cache() -> AgentCache {
    let store = SessionStore::new(Duration::from_secs(3600), || {
        Ok(Box::new(FakeAgent::default()) as BoxedAgent)
    });
    SessionCache::new(store, Duration::from_secs(300))
}
