//! Vacation booking agent: greeting plus an LLM/tool loop per reply

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info, warn};
use vacay_core::config::AgentSettings;
use vacay_core::utils::preview;
use vacay_providers::{LLMProvider, Message, ProviderResult};
use vacay_tools::models::Package;
use vacay_tools::ToolRegistry;

use crate::agent::ConversationAgent;
use crate::booking::BookingState;
use crate::context::ContextBuilder;

pub const FALLBACK_GREETING: &str =
    "Hello! I'm your vacation assistant. I'd be happy to help you plan your trip.";

const UNKNOWN_DESTINATION: &str = "Unknown destination";
const EMPTY_REPLY: &str = "I've completed processing but have no response to give.";
const ITERATION_LIMIT_REPLY: &str =
    "I'm sorry, I couldn't finish looking that up. Could you rephrase or try again?";

pub fn greeting_for(destination: &str) -> String {
    format!(
        "{} Would you like to go ahead with this {} or explore some alternative options?",
        FALLBACK_GREETING, destination
    )
}

/// Conversation state for one booking session
pub struct VacationAgent {
    provider: Arc<dyn LLMProvider>,
    tools: Arc<ToolRegistry>,
    settings: AgentSettings,
    context: ContextBuilder,
    transcript: Vec<Message>,
    booking: BookingState,
}

impl VacationAgent {
    pub fn new(
        provider: Arc<dyn LLMProvider>,
        tools: Arc<ToolRegistry>,
        settings: AgentSettings,
    ) -> Self {
        Self {
            provider,
            tools,
            settings,
            context: ContextBuilder::new(),
            transcript: Vec::new(),
            booking: BookingState::default(),
        }
    }

    async fn package_destination(&self) -> vacay_core::Result<String> {
        let raw = self
            .tools
            .execute("get_package_summary", serde_json::json!({}))
            .await;
        let package: Package = serde_json::from_str(&raw)
            .map_err(|_| vacay_core::Error::Tool(format!("package unavailable: {}", raw)))?;
        debug!("Greeting with package {}", package.package_id);
        Ok(package
            .primary_destination()
            .unwrap_or(UNKNOWN_DESTINATION)
            .to_string())
    }

    /// Call the model until it answers in text, running requested tools
    async fn run_tool_loop(&mut self) -> ProviderResult<String> {
        let tool_defs = self.tools.get_definitions();
        let max_iterations = self.settings.max_tool_iterations;

        for iteration in 1..=max_iterations {
            debug!("Agent iteration {}/{}", iteration, max_iterations);

            let messages = self.context.build_messages(
                &self.transcript,
                self.settings.history_limit,
                &self.booking,
            );
            let response = self
                .provider
                .chat(
                    messages,
                    (!tool_defs.is_empty()).then(|| tool_defs.clone()),
                    None,
                    self.settings.max_tokens,
                    self.settings.temperature,
                )
                .await?;

            if !response.has_tool_calls() {
                return Ok(response
                    .content
                    .filter(|c| !c.trim().is_empty())
                    .unwrap_or_else(|| EMPTY_REPLY.to_string()));
            }

            info!("LLM requested {} tool calls", response.tool_calls.len());
            self.transcript.push(Message::assistant_with_tools(
                response.content.clone(),
                response.tool_calls.clone(),
            ));

            for tool_call in &response.tool_calls {
                let args = tool_call.arguments_value();
                info!(
                    "Tool call: {}({})",
                    tool_call.name,
                    preview(&args.to_string(), 200)
                );
                let result = self.tools.execute(&tool_call.name, args).await;
                debug!("Tool result: {}", preview(&result, 500));

                self.booking
                    .absorb(&tool_call.name, &tool_call.arguments, &result);
                self.transcript
                    .push(Message::tool(result, tool_call.id.clone()));
            }
        }

        warn!("Reached the limit of {} tool iterations", max_iterations);
        Ok(ITERATION_LIMIT_REPLY.to_string())
    }
}

#[async_trait]
impl ConversationAgent for VacationAgent {
    async fn greet(&mut self) -> String {
        let greeting = match self.package_destination().await {
            Ok(destination) => {
                info!("Greeting with destination {}", destination);
                greeting_for(&destination)
            }
            Err(e) => {
                error!("Error getting initial greeting: {}", e);
                FALLBACK_GREETING.to_string()
            }
        };
        self.transcript.push(Message::assistant(greeting.clone()));
        greeting
    }

    async fn reply(&mut self, user_text: &str) -> String {
        info!("Processing user message: {}", preview(user_text, 80));
        self.transcript.push(Message::user(user_text));

        match self.run_tool_loop().await {
            Ok(reply) => {
                info!("Reply: {}", preview(&reply, 120));
                self.transcript.push(Message::assistant(reply.clone()));
                reply
            }
            Err(e) => {
                error!("Error getting agent response: {}", e);
                format!("Sorry, I encountered an error: {}", e)
            }
        }
    }

    fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    fn booking(&self) -> &BookingState {
        &self.booking
    }
}
