use axum::{extract::State, Json};

use crate::dispatch::dispatch;
use crate::error::ApiError;
use crate::models::{ChatRequest, ChatResponse, HealthResponse};
use crate::state::AppState;

pub async fn chat_handler(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    match dispatch(&state.sessions, &payload).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            tracing::error!("Chat request failed: {}", e);
            Err(e.into())
        }
    }
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        sessions: state.sessions.size(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

