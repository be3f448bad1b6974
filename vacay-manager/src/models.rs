use serde::{Deserialize, Serialize};

/// Media type of a chat message
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[default]
    Text,
    Image,
    Audio,
}

/// Whether a response ends the agent's turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseCategory {
    AgentResponse,
    /// Reserved for progress messages; the handler only produces final answers
    AgentIntermediateResponse,
}

/// Inbound chat message. The `request_*` names are accepted for older clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default, alias = "request_type")]
    pub message_type: ContentType,
    #[serde(alias = "request_content")]
    pub message_content: String,
    #[serde(alias = "request_session")]
    pub session_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response_type: ContentType,
    pub response_category: ResponseCategory,
    pub response_content: String,
}

impl ChatResponse {
    pub fn final_answer(response_type: ContentType, content: impl Into<String>) -> Self {
        Self {
            response_type,
            response_category: ResponseCategory::AgentResponse,
            response_content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub sessions: usize,
    pub uptime_seconds: u64,
    pub timestamp: String,
}
