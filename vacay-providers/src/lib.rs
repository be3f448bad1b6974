//! LLM provider integrations for vacay
//!
//! The agent only depends on [`LLMProvider`]; the Azure OpenAI client is the
//! production implementation.

pub mod azure;
pub mod base;

pub use azure::AzureOpenAIClient;
pub use base::{LLMProvider, LLMResponse, Message, ProviderError, ProviderResult, ToolCallRequest};
