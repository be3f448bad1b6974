//! Typed configuration sections

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Root configuration for vacay
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Conversation agent settings
    #[serde(default)]
    pub agent: AgentSettings,
    /// Hosted inference service
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Booking data source
    #[serde(default)]
    pub booking: BookingConfig,
    /// Session cache lifetime
    #[serde(default)]
    pub sessions: SessionConfig,
    /// HTTP server
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Base filter level, e.g. `info` or `vacay_agent=debug`
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (text, json)
    #[serde(default = "default_log_format")]
    pub format: String,
    /// Directory for log files
    #[serde(default = "default_log_dir")]
    pub dir: String,
    /// Module-specific overrides
    #[serde(default)]
    pub overrides: HashMap<String, String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            dir: default_log_dir(),
            overrides: HashMap::new(),
        }
    }
}

/// Settings applied to every conversation agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSettings {
    /// Maximum completion tokens per call
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum model/tool round trips per user turn
    #[serde(default = "default_max_tool_iterations")]
    pub max_tool_iterations: u32,
    /// Number of transcript messages sent with each call
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

fn default_max_tokens() -> u32 {
    2048
}

fn default_temperature() -> f32 {
    0.3
}

fn default_max_tool_iterations() -> u32 {
    8
}

fn default_history_limit() -> usize {
    60
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            max_tool_iterations: default_max_tool_iterations(),
            history_limit: default_history_limit(),
        }
    }
}

/// Azure OpenAI style chat-completions endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Resource endpoint, e.g. `https://my-resource.openai.azure.com/`
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// Deployment name of the chat model
    #[serde(default)]
    pub deployment: String,
    /// Request timeout in seconds
    #[serde(default = "default_provider_timeout")]
    pub timeout_secs: u64,
}

fn default_api_version() -> String {
    "2024-12-01-preview".to_string()
}

fn default_provider_timeout() -> u64 {
    60
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: String::new(),
            api_version: default_api_version(),
            deployment: String::new(),
            timeout_secs: default_provider_timeout(),
        }
    }
}

impl ProviderConfig {
    /// Whether the minimum fields to reach the endpoint are present
    pub fn is_configured(&self) -> bool {
        !self.endpoint.trim().is_empty()
            && !self.api_key.trim().is_empty()
            && !self.deployment.trim().is_empty()
    }
}

/// Where booking data comes from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfig {
    /// `sample` (JSON files in `data_dir`) or `remote` (booking REST API)
    #[serde(default = "default_booking_source")]
    pub source: String,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default)]
    pub package_id: String,
    #[serde(default)]
    pub api_base: String,
    /// Value of the `X-Env` header sent to the booking API
    #[serde(default = "default_booking_env")]
    pub environment: String,
    #[serde(default = "default_booking_timeout")]
    pub timeout_secs: u64,
}

fn default_booking_source() -> String {
    "sample".to_string()
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_booking_env() -> String {
    "qa".to_string()
}

fn default_booking_timeout() -> u64 {
    30
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            source: default_booking_source(),
            data_dir: default_data_dir(),
            package_id: String::new(),
            api_base: String::new(),
            environment: default_booking_env(),
            timeout_secs: default_booking_timeout(),
        }
    }
}

/// Session cache lifetime settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Idle time after which a session is evicted
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
    /// Time between two expiry sweeps
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

fn default_ttl_secs() -> u64 {
    3600
}

fn default_sweep_interval_secs() -> u64 {
    300
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

impl SessionConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory holding the chat UI (`index.html`)
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_static_dir() -> String {
    "static".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}
