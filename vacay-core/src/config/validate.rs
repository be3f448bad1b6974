//! Configuration validation rules.

use super::schema::Config;

/// Validate configuration and return aggregated validation errors.
pub fn validate_config(config: &Config) -> crate::Result<()> {
    let mut errors = Vec::new();

    if config.agent.max_tokens == 0 {
        errors.push("agent.max_tokens must be > 0".to_string());
    }
    if !(0.0..=2.0).contains(&config.agent.temperature) {
        errors.push("agent.temperature must be in [0.0, 2.0]".to_string());
    }
    if config.agent.max_tool_iterations == 0 {
        errors.push("agent.max_tool_iterations must be > 0".to_string());
    }
    if config.agent.history_limit == 0 {
        errors.push("agent.history_limit must be > 0".to_string());
    }

    if config.sessions.ttl_secs == 0 {
        errors.push("sessions.ttl_secs must be > 0".to_string());
    }
    if config.sessions.sweep_interval_secs == 0 {
        errors.push("sessions.sweep_interval_secs must be > 0".to_string());
    }

    if config.server.port == 0 {
        errors.push("server.port must be > 0".to_string());
    }

    match config.booking.source.as_str() {
        "sample" => {
            if config.booking.data_dir.trim().is_empty() {
                errors.push("booking.data_dir is required for the sample source".to_string());
            }
        }
        "remote" => {
            if config.booking.api_base.trim().is_empty() {
                errors.push("booking.api_base is required for the remote source".to_string());
            }
            if config.booking.package_id.trim().is_empty() {
                errors.push("booking.package_id is required for the remote source".to_string());
            }
        }
        other => errors.push(format!(
            "booking.source must be 'sample' or 'remote', got '{}'",
            other
        )),
    }

    if !matches!(config.logging.format.to_lowercase().as_str(), "text" | "json") {
        errors.push("logging.format must be 'text' or 'json'".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(crate::Error::Validation(errors.join("; ")))
    }
}
