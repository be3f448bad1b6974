//! Test doubles shared by the agent tests

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use vacay_providers::{LLMProvider, LLMResponse, Message, ProviderError, ProviderResult};
use vacay_tools::{booking_tools, SampleDataSource, ToolRegistry};

/// Tools backed by the repository's `data/` directory
pub fn sample_tools() -> Arc<ToolRegistry> {
    let data_dir = PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../data"));
    Arc::new(booking_tools(Arc::new(SampleDataSource::load(data_dir))))
}

/// Provider that replays canned responses in order
pub struct ScriptedProvider {
    responses: Mutex<VecDeque<ProviderResult<LLMResponse>>>,
    requests: Mutex<Vec<Vec<Message>>>,
}

impl ScriptedProvider {
    pub fn new(responses: Vec<ProviderResult<LLMResponse>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Vec<Message> {
        self.requests.lock().unwrap().last().cloned().unwrap_or_default()
    }
}

#[async_trait]
impl LLMProvider for ScriptedProvider {
    async fn chat(
        &self,
        messages: Vec<Message>,
        _tools: Option<Vec<serde_json::Value>>,
        _model: Option<String>,
        _max_tokens: u32,
        _temperature: f32,
    ) -> ProviderResult<LLMResponse> {
        self.requests.lock().unwrap().push(messages);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ProviderError::InvalidResponse("script exhausted".into())))
    }

    fn get_default_model(&self) -> String {
        "scripted".to_string()
    }
}
