use std::sync::Arc;
use std::time::Instant;

use vacay_agent::BoxedAgent;
use vacay_core::session::SessionCache;

/// The cache every request resolves its conversation from
pub type AgentCache = SessionCache<BoxedAgent>;

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<AgentCache>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(sessions: Arc<AgentCache>) -> Self {
        Self {
            sessions,
            started_at: Instant::now(),
        }
    }
}
