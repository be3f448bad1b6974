//! Builds one agent per session

use std::sync::Arc;

use tracing::debug;
use vacay_core::config::{AgentSettings, Config, ProviderConfig};
use vacay_providers::{AzureOpenAIClient, LLMProvider};
use vacay_tools::ToolRegistry;

use crate::agent::BoxedAgent;
use crate::vacation::VacationAgent;

enum ProviderSource {
    /// A fresh client per agent, built from config
    Azure(ProviderConfig),
    /// One shared provider, used by tests and embedders
    Shared(Arc<dyn LLMProvider>),
}

/// Creates the agent for a new session
pub struct AgentFactory {
    provider: ProviderSource,
    settings: AgentSettings,
    tools: Arc<ToolRegistry>,
}

impl AgentFactory {
    pub fn new(config: &Config, tools: Arc<ToolRegistry>) -> Self {
        Self {
            provider: ProviderSource::Azure(config.provider.clone()),
            settings: config.agent.clone(),
            tools,
        }
    }

    pub fn with_provider(
        provider: Arc<dyn LLMProvider>,
        settings: AgentSettings,
        tools: Arc<ToolRegistry>,
    ) -> Self {
        Self {
            provider: ProviderSource::Shared(provider),
            settings,
            tools,
        }
    }

    /// Build a new agent. Fails if the provider cannot be configured.
    pub fn create(&self) -> vacay_core::Result<BoxedAgent> {
        let provider: Arc<dyn LLMProvider> = match &self.provider {
            ProviderSource::Azure(config) => Arc::new(AzureOpenAIClient::from_config(config)?),
            ProviderSource::Shared(provider) => provider.clone(),
        };
        debug!("Creating agent on model {}", provider.get_default_model());

        Ok(Box::new(VacationAgent::new(
            provider,
            self.tools.clone(),
            self.settings.clone(),
        )))
    }

    /// Adapt into the closure a session store expects
    pub fn into_session_factory(
        self,
    ) -> impl Fn() -> vacay_core::Result<BoxedAgent> + Send + Sync + 'static {
        move || self.create()
    }
}
