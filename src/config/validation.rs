use crate::config::types::{Config, HarvestConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Largest chunk the fetcher will write in one call (1 MiB)
const MAX_CHUNK_SIZE: usize = 1024 * 1024;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_user_agent_config(&config.user_agent)?;
    validate_harvest_config(&config.harvest)?;
    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if config.crawler_version.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_version cannot be empty".to_string(),
        ));
    }

    if let Some(contact_url) = &config.contact_url {
        Url::parse(contact_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;
    }

    if let Some(email) = &config.contact_email {
        validate_email(email)?;
    }

    Ok(())
}

/// Validates harvest tunables
fn validate_harvest_config(config: &HarvestConfig) -> Result<(), ConfigError> {
    if !config.extension.starts_with('.') || config.extension.len() < 2 {
        return Err(ConfigError::Validation(format!(
            "extension must start with '.' and name a suffix, got '{}'",
            config.extension
        )));
    }

    if config.preview_chars == 0 {
        return Err(ConfigError::Validation(
            "preview_chars must be greater than 0".to_string(),
        ));
    }

    if config.chunk_size == 0 || config.chunk_size > MAX_CHUNK_SIZE {
        return Err(ConfigError::Validation(format!(
            "chunk_size must be between 1 and {}, got {}",
            MAX_CHUNK_SIZE, config.chunk_size
        )));
    }

    if config.request_timeout_secs == Some(0) {
        return Err(ConfigError::Validation(
            "request_timeout_secs must be >= 1 when set".to_string(),
        ));
    }

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact_email cannot be empty".to_string(),
        ));
    }

    // Basic email format check: must contain @ and have text on both sides
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !parts[1].contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}
