pub mod dispatch;
pub mod error;
pub mod handlers;
pub mod models;
pub mod server;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use dispatch::dispatch;
pub use error::ApiError;
pub use models::{ChatRequest, ChatResponse, ContentType, ResponseCategory};
pub use server::{build_router, run_server};
pub use state::{AgentCache, AppState};
