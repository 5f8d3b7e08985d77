//! Configuration resolution for internlink-iv
//!
//! Completion API key priority: ENV → TOML. Two environment variables are
//! accepted, the service-specific one first.

use std::sync::Arc;

use internlink_common::config::TomlConfig;
use internlink_common::{Error, Result};
use tracing::{info, warn};

use crate::services::{CompletionClient, OpenAiClient};

/// Service-specific API key variable
pub const API_KEY_ENV: &str = "INTERNLINK_COMPLETION_API_KEY";

/// Generic OpenAI API key variable
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

pub const MODEL_ENV: &str = "INTERNLINK_COMPLETION_MODEL";
pub const BASE_URL_ENV: &str = "INTERNLINK_COMPLETION_BASE_URL";

/// Resolve the completion API key
///
/// Returns `Ok(None)` when no source provides a usable key; the service then
/// runs without a completion client and reports the gap per request.
pub fn resolve_completion_api_key(toml_config: &TomlConfig) -> Result<Option<String>> {
    let candidates = [
        (API_KEY_ENV, std::env::var(API_KEY_ENV).ok()),
        (OPENAI_API_KEY_ENV, std::env::var(OPENAI_API_KEY_ENV).ok()),
        ("TOML [completion] api_key", toml_config.completion.api_key.clone()),
    ];

    let valid: Vec<(&str, String)> = candidates
        .into_iter()
        .filter_map(|(source, key)| key.filter(|k| is_valid_key(k)).map(|k| (source, k)))
        .collect();

    if valid.len() > 1 {
        let sources: Vec<&str> = valid.iter().map(|(s, _)| *s).collect();
        warn!(
            "Completion API key found in multiple sources: {}. Using {}.",
            sources.join(", "),
            sources[0]
        );
    }

    match valid.into_iter().next() {
        Some((source, key)) => {
            info!("Completion API key loaded from {}", source);
            Ok(Some(key.trim().to_string()))
        }
        None => Ok(None),
    }
}

/// Build the completion client, or `None` when no key is configured
pub fn build_completion_client(toml_config: &TomlConfig) -> Result<Option<Arc<dyn CompletionClient>>> {
    let Some(api_key) = resolve_completion_api_key(toml_config)? else {
        warn!(
            "Completion API key not configured (set {} or {}); interview turns and scoring will be unavailable",
            API_KEY_ENV, OPENAI_API_KEY_ENV
        );
        return Ok(None);
    };

    let mut client = OpenAiClient::new(api_key)
        .map_err(|e| Error::Config(format!("Failed to build completion client: {}", e)))?;

    let completion = &toml_config.completion;
    if let Some(model) = env_or(MODEL_ENV, completion.model.as_ref()) {
        client = client.with_model(model);
    }
    if let Some(base_url) = env_or(BASE_URL_ENV, completion.base_url.as_ref()) {
        client = client.with_base_url(base_url);
    }
    if let Some(temperature) = completion.temperature {
        client = client.with_temperature(temperature);
    }

    info!("Completion client ready (model: {})", client.model());
    let client: Arc<dyn CompletionClient> = Arc::new(client);
    Ok(Some(client))
}

fn env_or(var: &str, fallback: Option<&String>) -> Option<String> {
    std::env::var(var)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .or_else(|| fallback.filter(|v| !v.trim().is_empty()).cloned())
}

/// Reject empty and obviously placeholder keys
pub fn is_valid_key(key: &str) -> bool {
    let key = key.trim();
    !key.is_empty() && !key.eq_ignore_ascii_case("changeme") && !key.starts_with("your-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use internlink_common::config::CompletionConfig;
    use serial_test::serial;

    fn clear_env() {
        std::env::remove_var(API_KEY_ENV);
        std::env::remove_var(OPENAI_API_KEY_ENV);
        std::env::remove_var(MODEL_ENV);
        std::env::remove_var(BASE_URL_ENV);
    }

    fn toml_with_key(key: Option<&str>) -> TomlConfig {
        TomlConfig {
            completion: CompletionConfig {
                api_key: key.map(str::to_string),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_is_valid_key() {
        assert!(is_valid_key("sk-abc"));
        assert!(!is_valid_key("   "));
        assert!(!is_valid_key("CHANGEME"));
        assert!(!is_valid_key("your-api-key"));
    }

    #[test]
    #[serial]
    fn test_env_takes_priority_over_toml() {
        clear_env();
        std::env::set_var(OPENAI_API_KEY_ENV, "sk-openai");
        let key = resolve_completion_api_key(&toml_with_key(Some("sk-toml"))).unwrap();
        assert_eq!(key.as_deref(), Some("sk-openai"));

        std::env::set_var(API_KEY_ENV, "sk-service");
        let key = resolve_completion_api_key(&toml_with_key(Some("sk-toml"))).unwrap();
        assert_eq!(key.as_deref(), Some("sk-service"));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_toml_key_used_when_env_missing() {
        clear_env();
        let key = resolve_completion_api_key(&toml_with_key(Some("sk-toml"))).unwrap();
        assert_eq!(key.as_deref(), Some("sk-toml"));
    }

    #[test]
    #[serial]
    fn test_no_key_means_no_client() {
        clear_env();
        std::env::set_var(API_KEY_ENV, "  ");
        assert!(build_completion_client(&toml_with_key(None)).unwrap().is_none());
        clear_env();
    }

    #[test]
    #[serial]
    fn test_client_settings_from_env_and_toml() {
        clear_env();
        std::env::set_var(MODEL_ENV, "gpt-test");
        let mut config = toml_with_key(Some("sk-toml"));
        config.completion.model = Some("ignored-model".to_string());

        let client = build_completion_client(&config).unwrap().unwrap();
        assert_eq!(client.model(), "gpt-test");
        clear_env();
    }
}
