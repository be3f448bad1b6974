use std::net::SocketAddr;
use std::path::Path;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::sync::broadcast;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use vacay_core::config::ServerConfig;

use crate::handlers::{chat_handler, health_handler};
use crate::state::AppState;

/// Build the application router. Files under `static_dir` are served for any
/// other path when the directory exists.
pub fn build_router(state: AppState, static_dir: &Path) -> Router {
    let mut app = Router::new()
        .route("/chat", post(chat_handler))
        .route("/api/health", get(health_handler));

    if static_dir.is_dir() {
        app = app.fallback_service(ServeDir::new(static_dir));
    } else {
        tracing::warn!("Static directory {} not found, UI disabled", static_dir.display());
    }

    app.layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(
    state: AppState,
    config: &ServerConfig,
    mut shutdown_rx: broadcast::Receiver<()>,
) -> anyhow::Result<()> {
    let app = build_router(state, Path::new(&config.static_dir));

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.recv().await;
            tracing::info!("Server shutting down signal received");
        })
        .await?;

    Ok(())
}
