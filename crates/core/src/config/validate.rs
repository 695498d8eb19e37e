use reqwest::Url;

use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Both endpoints parse as http(s) URLs
/// - Timeouts are not 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    validate_endpoint("trace.base_url", &config.trace.base_url)?;
    validate_endpoint("anilist.base_url", &config.anilist.base_url)?;

    if config.trace.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "trace.timeout_secs cannot be 0".to_string(),
        ));
    }
    if config.anilist.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "anilist.timeout_secs cannot be 0".to_string(),
        ));
    }
    if config.search.search_timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "search.search_timeout_secs cannot be 0".to_string(),
        ));
    }
    if config.search.lookup_timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "search.lookup_timeout_secs cannot be 0".to_string(),
        ));
    }

    Ok(())
}

fn validate_endpoint(field: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::ValidationError(format!("{} is not a valid URL: {}", field, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::ValidationError(format!(
            "{} must use http or https, got {}",
            field, other
        ))),
    }
}
